//! Backend-independent draw commands produced once per frame

use glam::DVec2;

use crate::sim::body::BallColor;

/// Arena background (light grey)
pub const BACKGROUND: Rgb = Rgb([0xD3, 0xD3, 0xD3]);

/// An opaque 8-bit RGB colour
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub [u8; 3]);

impl Rgb {
    pub fn css(&self) -> String {
        let [r, g, b] = self.0;
        format!("#{r:02x}{g:02x}{b:02x}")
    }
}

/// One drawing operation, replayed in order by a backend
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    /// Fill the rectangle `[0, width] x [0, height]`
    Clear { width: f64, height: f64, color: Rgb },
    /// Filled circle
    FillCircle {
        center: DVec2,
        radius: f64,
        color: BallColor,
    },
}
