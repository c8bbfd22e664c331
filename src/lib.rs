//! Ball Arena - bouncing balls with elastic collisions
//!
//! Core modules:
//! - `sim`: Simulation (bodies, collisions, integration, controller)
//! - `stats`: Frame interval statistics for the HUD label
//! - `renderer`: Draw commands and the browser canvas backend
//! - `settings`: Startup configuration

pub mod renderer;
pub mod settings;
pub mod sim;
pub mod stats;

pub use settings::Settings;
pub use stats::FrameStats;

use glam::DVec2;

/// Simulation configuration constants
pub mod consts {
    /// Number of balls seeded at startup and on reset
    pub const NUM_BALLS: usize = 400;

    /// Ball radius range (pixels), sampled uniformly in [min, max)
    pub const MIN_RADIUS: f64 = 5.0;
    pub const MAX_RADIUS: f64 = 15.0;

    /// Ball speed range (pixels/s), sampled uniformly in [min, max)
    pub const MIN_SPEED: f64 = 50.0;
    pub const MAX_SPEED: f64 = 250.0;

    /// Initial arena size
    pub const VIEWPORT_WIDTH: f64 = 800.0;
    pub const VIEWPORT_HEIGHT: f64 = 600.0;

    /// Radius that maps to unit mass; mass = (radius / MASS_RADIUS)^3
    pub const MASS_RADIUS: f64 = 40.0;

    pub const NANOS_PER_SECOND: f64 = 1_000_000_000.0;
    pub const NANOS_PER_MILLI: f64 = 1_000_000.0;
}

/// Convert polar (r, theta) to cartesian (x, y)
#[inline]
pub fn polar_to_cartesian(r: f64, theta: f64) -> DVec2 {
    DVec2::new(r * theta.cos(), r * theta.sin())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::{FRAC_PI_2, PI};

    #[test]
    fn test_polar_to_cartesian() {
        let v = polar_to_cartesian(2.0, FRAC_PI_2);
        assert!(v.x.abs() < 1e-12);
        assert!((v.y - 2.0).abs() < 1e-12);

        let v = polar_to_cartesian(3.0, PI);
        assert!((v.x + 3.0).abs() < 1e-12);
        assert!((v.length() - 3.0).abs() < 1e-12);
    }
}
