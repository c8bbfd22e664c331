//! Rendering module
//!
//! The simulation emits a backend-independent draw list each frame; the
//! browser build replays it onto a Canvas 2D context.

pub mod commands;
#[cfg(target_arch = "wasm32")]
pub mod canvas;

pub use commands::{BACKGROUND, DrawCommand, Rgb};
#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasRenderer;
