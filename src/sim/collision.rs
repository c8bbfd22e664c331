//! Collision detection and response
//!
//! Walls are handled with a discrete per-frame edge test. Ball pairs are
//! checked brute force over the upper triangle of the body list and
//! resolved as a 1D elastic collision along the line between centers.

use glam::DVec2;

use super::body::Body;

/// Invert one velocity component if the ball touches an edge and is still
/// moving into it. A non-positive bound means the arena is collapsed on
/// that axis and nothing is reflected.
#[inline]
fn bounce_axis(pos: f64, radius: f64, vel: f64, bound: f64) -> f64 {
    if bound <= 0.0 {
        return vel;
    }
    if (pos - radius <= 0.0 && vel < 0.0) || (pos + radius >= bound && vel > 0.0) {
        -vel
    } else {
        vel
    }
}

/// Reflect a ball off the arena edges `[0, width] x [0, height]`
///
/// Axes are independent, so a ball in a corner can reverse both components
/// in the same step.
pub fn bounce_off_walls(body: &mut Body, width: f64, height: f64) {
    let r = body.radius();
    body.velocity.x = bounce_axis(body.center.x, r, body.velocity.x, width);
    body.velocity.y = bounce_axis(body.center.y, r, body.velocity.y, height);
}

/// Whether two balls are touching and approaching each other
///
/// `delta` is the center-to-center vector from `b1` to `b2`. Requiring the
/// squared distance to be shrinking keeps overlapping balls that are
/// already separating from bouncing again.
pub fn colliding(b1: &Body, b2: &Body, delta: DVec2) -> bool {
    let radius_sum = b1.radius() + b2.radius();
    if delta.length_squared() > radius_sum * radius_sum {
        return false;
    }
    // d/dt(s^2) = 2 * delta . (v2 - v1)
    delta.dot(b2.velocity - b1.velocity) < 0.0
}

/// Elastic collision response along the contact vector
///
/// Velocity components perpendicular to the contact vector are unchanged.
/// Coincident centers have no contact direction; both balls are left
/// untouched for this frame.
pub fn bounce(b1: &mut Body, b2: &mut Body, delta: DVec2) {
    let distance = delta.length();
    if distance <= 0.0 || !distance.is_finite() {
        log::trace!("Skipping bounce for coincident centers");
        return;
    }
    let contact = delta / distance;

    let u1 = b1.velocity.dot(contact);
    let u2 = b2.velocity.dot(contact);

    let (m1, m2) = (b1.mass(), b2.mass());
    let mass_sum = m1 + m2;
    let mass_diff = m1 - m2;

    // 1D elastic collision: conserve momentum and kinetic energy
    let v1 = (2.0 * m2 * u2 + u1 * mass_diff) / mass_sum;
    let v2 = (2.0 * m1 * u1 - u2 * mass_diff) / mass_sum;

    let u1_perp = b1.velocity - contact * u1;
    let u2_perp = b2.velocity - contact * u2;

    b1.velocity = contact * v1 + u1_perp;
    b2.velocity = contact * v2 + u2_perp;
}

/// Run wall and pairwise checks for every ball, mutating velocities in place
///
/// Ball `i` is checked against the walls before it is checked against any
/// ball `j > i`. Pairs resolve sequentially in index order, so a ball in a
/// multi-way overlap can bounce more than once per frame.
///
/// Returns the number of ball-ball bounces resolved.
pub fn resolve_collisions(bodies: &mut [Body], width: f64, height: f64) -> usize {
    let n = bodies.len();
    let mut bounces = 0;

    for i in 0..n {
        bounce_off_walls(&mut bodies[i], width, height);

        for j in (i + 1)..n {
            let (head, tail) = bodies.split_at_mut(j);
            let b1 = &mut head[i];
            let b2 = &mut tail[0];

            // Shared by the overlap test and the response
            let delta = b2.center - b1.center;
            if colliding(b1, b2, delta) {
                bounce(b1, b2, delta);
                bounces += 1;
            }
        }
    }

    bounces
}
