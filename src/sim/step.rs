//! World stepping
//!
//! Advances ball positions by the elapsed frame time and emits the draw
//! list for the frame.

use super::body::Body;
use crate::consts::NANOS_PER_SECOND;
use crate::renderer::{BACKGROUND, DrawCommand};

/// Convert a nanosecond interval into seconds
#[inline]
pub fn nanos_to_seconds(nanos: u64) -> f64 {
    nanos as f64 / NANOS_PER_SECOND
}

/// Integrate every ball forward by `elapsed_seconds` (explicit Euler, no
/// substeps) and rebuild `commands`
///
/// The background clear is always the first command, followed by one
/// filled circle per ball in body order. Velocities are read as they are
/// now, so collisions must be resolved before calling this.
pub fn step_world(
    bodies: &mut [Body],
    elapsed_seconds: f64,
    width: f64,
    height: f64,
    commands: &mut Vec<DrawCommand>,
) {
    commands.clear();
    commands.reserve(bodies.len() + 1);
    commands.push(DrawCommand::Clear {
        width,
        height,
        color: BACKGROUND,
    });

    for body in bodies.iter_mut() {
        body.center += body.velocity * elapsed_seconds;
        commands.push(DrawCommand::FillCircle {
            center: body.center,
            radius: body.radius(),
            color: body.color(),
        });
    }
}
