//! Simulation module
//!
//! All physics lives here. This module is single-threaded and free of
//! rendering or platform dependencies:
//! - Seeded RNG only
//! - Stable iteration order (by index in the body list)
//! - Collisions resolved before integration within a tick

pub mod body;
pub mod collision;
pub mod events;
pub mod state;
pub mod step;

pub use body::{BallColor, Body, mass_for_radius};
pub use collision::{bounce, bounce_off_walls, colliding, resolve_collisions};
pub use events::{EventQueue, SimEvent};
pub use state::{Axis, Simulation, SpawnParams, Viewport};
pub use step::{nanos_to_seconds, step_world};
