//! Ball kinematic state and colour palette

use glam::DVec2;

use crate::consts::MASS_RADIUS;

/// Fixed ball palette; balls cycle through it by creation index
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BallColor {
    Red,
    Yellow,
    Green,
    Brown,
    Blue,
    Pink,
    Black,
}

impl BallColor {
    pub const PALETTE: [BallColor; 7] = [
        BallColor::Red,
        BallColor::Yellow,
        BallColor::Green,
        BallColor::Brown,
        BallColor::Blue,
        BallColor::Pink,
        BallColor::Black,
    ];

    /// Palette entry for the ball created at `index`
    pub fn for_index(index: usize) -> Self {
        Self::PALETTE[index % Self::PALETTE.len()]
    }

    /// CSS colour string for canvas fill styles
    pub fn css(&self) -> &'static str {
        match self {
            BallColor::Red => "#ff0000",
            BallColor::Yellow => "#ffff00",
            BallColor::Green => "#008000",
            BallColor::Brown => "#a52a2a",
            BallColor::Blue => "#0000ff",
            BallColor::Pink => "#ffc0cb",
            BallColor::Black => "#000000",
        }
    }
}

/// Mass of a ball of the given radius (larger balls are cubically heavier)
#[inline]
pub fn mass_for_radius(radius: f64) -> f64 {
    (radius / MASS_RADIUS).powi(3)
}

/// A ball in the arena
///
/// Position and velocity change every tick; radius, mass and colour are
/// fixed at construction.
#[derive(Debug, Clone, PartialEq)]
pub struct Body {
    /// Center in arena pixels
    pub center: DVec2,
    /// Velocity in pixels per second
    pub velocity: DVec2,
    radius: f64,
    mass: f64,
    color: BallColor,
}

impl Body {
    pub fn new(center: DVec2, radius: f64, velocity: DVec2, color: BallColor) -> Self {
        debug_assert!(radius > 0.0, "ball radius must be positive, got {radius}");
        Self {
            center,
            velocity,
            radius,
            mass: mass_for_radius(radius),
            color,
        }
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn mass(&self) -> f64 {
        self.mass
    }

    pub fn color(&self) -> BallColor {
        self.color
    }

    /// Linear momentum (mass * velocity)
    pub fn momentum(&self) -> DVec2 {
        self.velocity * self.mass
    }

    /// Kinetic energy (1/2 m v^2)
    pub fn kinetic_energy(&self) -> f64 {
        0.5 * self.mass * self.velocity.length_squared()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mass_is_cubic_in_radius() {
        assert!((mass_for_radius(40.0) - 1.0).abs() < 1e-12);
        assert!((mass_for_radius(20.0) - 0.125).abs() < 1e-12);

        let small = Body::new(DVec2::ZERO, 5.0, DVec2::ZERO, BallColor::Red);
        let big = Body::new(DVec2::ZERO, 10.0, DVec2::ZERO, BallColor::Red);
        assert!((big.mass() / small.mass() - 8.0).abs() < 1e-9);
        assert!(small.mass() > 0.0);
    }

    #[test]
    fn test_css_is_hex_rgb() {
        assert_eq!(BallColor::Brown.css(), "#a52a2a");
        assert_eq!(BallColor::Pink.css(), "#ffc0cb");
        for color in BallColor::PALETTE {
            let css = color.css();
            assert_eq!(css.len(), 7);
            assert!(css.starts_with('#'));
            assert!(css[1..].chars().all(|c| c.is_ascii_hexdigit()));
        }
    }

    #[test]
    fn test_palette_cycles_by_index() {
        assert_eq!(BallColor::for_index(0), BallColor::Red);
        assert_eq!(BallColor::for_index(6), BallColor::Black);
        assert_eq!(BallColor::for_index(7), BallColor::Red);
        assert_eq!(BallColor::for_index(15), BallColor::Yellow);
    }
}
