//! Elastic ball-ball collision response.
//!
//! Velocities are split into a part along the line joining the two centres
//! and a part across it. Only the first is exchanged, using the 1D elastic
//! collision formula, so momentum along that line is conserved and the
//! crossing parts pass through untouched (no friction, no spin).
//!
//! ELASTIC COLLISIONS ONLY. The exchange ignores the configured elasticity;
//! the formula does not describe collisions that lose energy, and results
//! become physically meaningless as elasticity approaches 0.

use crate::items::Ball;
use crate::library::{add_vector, distance, heading, Vector2P};
use std::f64::consts::FRAC_PI_2;

/// Extra gap, in canvas units, left between the balls after separating them.
pub const SEPARATION_MARGIN: f64 = 1.0;

/// Velocity of `ball` projected onto `axis`: (along, across).
pub fn decompose(ball: &Ball, axis: f64) -> (f64, f64) {
    let Vector2P { angle, magnitude } = ball.velocity;
    ((axis - angle).cos() * magnitude, (axis - angle).sin() * magnitude)
}

/// 1D elastic collision: new speed of body 1 along the axis.
fn exchange(v1: f64, m1: f64, v2: f64, m2: f64) -> f64 {
    (v1 * (m1 - m2) + 2.0 * m2 * v2) / (m1 + m2)
}

/// Resolves a collision between `a` and `b`. Call only when
/// `a.is_colliding(b)`; the balls are pushed apart so they end up
/// `SEPARATION_MARGIN` further apart than touching.
pub fn resolve(a: &mut Ball, b: &mut Ball) {
    let axis = heading(a.position, b.position);
    let across_axis = axis - FRAC_PI_2;

    let (along_a, across_a) = decompose(a, axis);
    let (along_b, across_b) = decompose(b, axis);

    let after_a = exchange(along_a, a.mass(), along_b, b.mass());
    let after_b = exchange(along_b, b.mass(), along_a, a.mass());

    a.velocity = add_vector(Vector2P::new(axis, after_a), Vector2P::new(across_axis, across_a));
    b.velocity = add_vector(Vector2P::new(axis, after_b), Vector2P::new(across_axis, across_b));

    let overlap =
        0.5 * (a.radius() + b.radius() - distance(a.position, b.position) + SEPARATION_MARGIN);
    let (sin, cos) = axis.sin_cos();
    a.position[0] -= cos * overlap;
    a.position[1] += sin * overlap;
    b.position[0] += cos * overlap;
    b.position[1] -= sin * overlap;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::items::Tint;
    use approx::assert_abs_diff_eq;

    fn ball(position: [f64; 2], mass: f64, velocity: Vector2P) -> Ball {
        Ball::new(position, 10.0, mass, 0.0, Tint::WHITE)
            .unwrap()
            .with_velocity(velocity)
    }

    #[test]
    fn heavy_ball_barely_slows() {
        let mut a = ball([0.0, 0.0], 1000.0, Vector2P::new(0.0, 1.0));
        let mut b = ball([15.0, 0.0], 1.0, Vector2P::ZERO);
        resolve(&mut a, &mut b);
        assert!(a.velocity.magnitude > 0.99);
        assert_abs_diff_eq!(b.velocity.magnitude, 2.0 * 1000.0 / 1001.0, epsilon = 1e-9);
    }

    #[test]
    fn glancing_keeps_crossing_component() {
        // b sits straight below a on screen; a moves sideways only
        let mut a = ball([0.0, 0.0], 5.0, Vector2P::new(0.0, 3.0));
        let mut b = ball([0.0, 15.0], 5.0, Vector2P::ZERO);
        resolve(&mut a, &mut b);
        assert_abs_diff_eq!(a.velocity.magnitude, 3.0, epsilon = 1e-9);
        assert_abs_diff_eq!(a.velocity.angle.cos(), 1.0, epsilon = 1e-9);
        assert_abs_diff_eq!(b.velocity.magnitude, 0.0, epsilon = 1e-9);
    }

    #[test]
    fn separation_moves_along_centre_line() {
        let mut a = ball([0.0, 0.0], 1.0, Vector2P::ZERO);
        let mut b = ball([12.0, 0.0], 1.0, Vector2P::ZERO);
        resolve(&mut a, &mut b);
        assert_abs_diff_eq!(a.position[0], -4.5, epsilon = 1e-9);
        assert_abs_diff_eq!(b.position[0], 16.5, epsilon = 1e-9);
        assert_abs_diff_eq!(a.position[1], 0.0, epsilon = 1e-9);
        assert_abs_diff_eq!(b.position[1], 0.0, epsilon = 1e-9);
    }

    #[test]
    fn concentric_balls_are_still_separated() {
        let mut a = ball([5.0, 5.0], 1.0, Vector2P::ZERO);
        let mut b = ball([5.0, 5.0], 1.0, Vector2P::ZERO);
        resolve(&mut a, &mut b);
        assert!(distance(a.position, b.position) >= 20.0);
    }
}
