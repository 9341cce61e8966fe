use crate::library::{add_vector, distance, Vector2P};
use std::fmt;

/// Opaque RGB tag carried for the renderer; physics never reads it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Tint(pub u8, pub u8, pub u8);

impl Tint {
    pub const WHITE: Tint = Tint(230, 230, 230);
    pub const RED: Tint = Tint(255, 0, 0);
}

/// Reasons a ball cannot be built; drag and mass ratios are undefined for them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BallError {
    NonPositiveRadius(f64),
    NonPositiveMass(f64),
    NegativeAirDensity(f64),
}

impl fmt::Display for BallError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BallError::NonPositiveRadius(r) => write!(f, "ball radius must be positive, got {r}"),
            BallError::NonPositiveMass(m) => write!(f, "ball mass must be positive, got {m}"),
            BallError::NegativeAirDensity(d) => {
                write!(f, "air density must be non-negative, got {d}")
            }
        }
    }
}

impl std::error::Error for BallError {}

/// A circular particle. Radius, mass and drag are fixed at construction.
#[derive(Debug, Clone, PartialEq)]
pub struct Ball {
    /// Centre in canvas space (Y grows downward).
    pub position: [f64; 2],
    pub velocity: Vector2P,
    pub tint: Tint,
    radius: f64,
    mass: f64,
    drag: f64,
}

impl Ball {
    /// Builds a resting ball. The drag factor `(m / (m + air_density))^r` is
    /// fixed here, since radius and mass never change afterwards.
    ///
    /// # Arguments
    ///
    /// * `position` - Centre of the ball in canvas space
    /// * `radius` - Positive radius in canvas units
    /// * `mass` - Positive mass
    /// * `air_density` - Non-negative density of the surrounding air
    /// * `tint` - Colour the renderer draws the ball with
    ///
    /// # Errors
    ///
    /// Returns a [`BallError`] for a non-positive (or non-finite) radius or
    /// mass, or a negative air density.
    pub fn new(
        position: [f64; 2],
        radius: f64,
        mass: f64,
        air_density: f64,
        tint: Tint,
    ) -> Result<Ball, BallError> {
        if !(radius.is_finite() && radius > 0.0) {
            return Err(BallError::NonPositiveRadius(radius));
        }
        if !(mass.is_finite() && mass > 0.0) {
            return Err(BallError::NonPositiveMass(mass));
        }
        if !(air_density.is_finite() && air_density >= 0.0) {
            return Err(BallError::NegativeAirDensity(air_density));
        }
        Ok(Ball {
            position,
            velocity: Vector2P::ZERO,
            tint,
            radius,
            mass,
            drag: (mass / (mass + air_density)).powf(radius),
        })
    }

    /// Sets the starting velocity.
    pub fn with_velocity(mut self, velocity: Vector2P) -> Ball {
        self.velocity = velocity;
        self
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn mass(&self) -> f64 {
        self.mass
    }

    /// Per-tick multiplicative speed decay, in `[0, 1]`.
    pub fn drag(&self) -> f64 {
        self.drag
    }

    /// Adds `gravity` to the velocity, advances the position by one tick and
    /// applies drag. Canvas Y grows downward.
    ///
    /// # Arguments
    ///
    /// * `gravity` - Velocity change applied every tick
    pub fn move_ball(&mut self, gravity: Vector2P) {
        self.velocity = add_vector(self.velocity, gravity);
        let Vector2P { angle, magnitude: speed } = self.velocity;
        self.position[0] += angle.cos() * speed;
        self.position[1] -= angle.sin() * speed;
        self.velocity.magnitude *= self.drag;
    }

    /// Clamps the ball inside `[radius, dimension - radius]` on each axis,
    /// mirroring the heading and losing speed for every wall touched.
    ///
    /// # Arguments
    ///
    /// * `width` - Canvas width
    /// * `height` - Canvas height
    /// * `elasticity` - Fraction of speed kept per wall hit
    pub fn bounce(&mut self, width: f64, height: f64, elasticity: f64) {
        let r = self.radius;

        if self.position[0] > width - r {
            self.position[0] = width - r;
            self.reflect(std::f64::consts::PI - self.velocity.angle, elasticity);
        } else if self.position[0] < r {
            self.position[0] = r;
            self.reflect(std::f64::consts::PI - self.velocity.angle, elasticity);
        }

        if self.position[1] > height - r {
            self.position[1] = height - r;
            self.reflect(-self.velocity.angle, elasticity);
        } else if self.position[1] < r {
            self.position[1] = r;
            self.reflect(-self.velocity.angle, elasticity);
        }
    }

    fn reflect(&mut self, angle: f64, elasticity: f64) {
        self.velocity.angle = angle;
        self.velocity.magnitude *= elasticity;
    }

    /// Strict overlap test: balls that only touch are not colliding.
    pub fn is_colliding(&self, other: &Ball) -> bool {
        distance(self.position, other.position) < self.radius + other.radius
    }

    /// True when `point` lies inside or on the ball.
    pub fn contains(&self, point: [f64; 2]) -> bool {
        distance(self.position, point) <= self.radius
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use std::f64::consts::{FRAC_PI_2, PI};

    fn ball(position: [f64; 2], radius: f64) -> Ball {
        Ball::new(position, radius, 100.0, 0.08, Tint::WHITE).unwrap()
    }

    #[test]
    fn rejects_bad_construction() {
        assert_eq!(
            Ball::new([0.0, 0.0], 0.0, 1.0, 0.0, Tint::WHITE),
            Err(BallError::NonPositiveRadius(0.0))
        );
        assert_eq!(
            Ball::new([0.0, 0.0], 1.0, -2.0, 0.0, Tint::WHITE),
            Err(BallError::NonPositiveMass(-2.0))
        );
        assert!(Ball::new([0.0, 0.0], f64::NAN, 1.0, 0.0, Tint::WHITE).is_err());
        assert!(matches!(
            Ball::new([0.0, 0.0], 1.0, 1.0, -0.1, Tint::WHITE),
            Err(BallError::NegativeAirDensity(_))
        ));
    }

    #[test]
    fn drag_is_one_in_vacuum() {
        let b = Ball::new([0.0, 0.0], 10.0, 5.0, 0.0, Tint::WHITE).unwrap();
        assert_eq!(b.drag(), 1.0);
    }

    #[test]
    fn move_follows_heading() {
        let mut b = ball([50.0, 50.0], 5.0).with_velocity(Vector2P::new(FRAC_PI_2, 2.0));
        b.move_ball(Vector2P::ZERO);
        // heading π/2 is straight up the screen
        assert_abs_diff_eq!(b.position[0], 50.0, epsilon = 1e-9);
        assert_abs_diff_eq!(b.position[1], 48.0, epsilon = 1e-9);
        assert_abs_diff_eq!(b.velocity.magnitude, 2.0 * b.drag(), epsilon = 1e-12);
    }

    #[test]
    fn gravity_pulls_down_the_screen() {
        let mut b = ball([50.0, 50.0], 5.0);
        b.move_ball(Vector2P::new(-FRAC_PI_2, 1.0));
        assert!(b.position[1] > 50.0);
        assert_abs_diff_eq!(b.position[0], 50.0, epsilon = 1e-9);
    }

    #[test]
    fn bounce_right_wall_mirrors_horizontally() {
        let mut b = ball([99.0, 50.0], 5.0).with_velocity(Vector2P::new(0.0, 2.0));
        b.bounce(100.0, 100.0, 0.5);
        assert_eq!(b.position[0], 95.0);
        assert_abs_diff_eq!(b.velocity.angle, PI, epsilon = 1e-12);
        assert_abs_diff_eq!(b.velocity.magnitude, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn bounce_corner_hits_both_axes() {
        let mut b = ball([-30.0, 500.0], 5.0).with_velocity(Vector2P::new(-2.5, 4.0));
        b.bounce(100.0, 100.0, 0.5);
        assert_eq!(b.position, [5.0, 95.0]);
        assert_abs_diff_eq!(b.velocity.magnitude, 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(b.velocity.angle, -(PI + 2.5), epsilon = 1e-12);
    }

    #[test]
    fn bounce_inside_is_untouched() {
        let mut b = ball([50.0, 50.0], 5.0).with_velocity(Vector2P::new(1.0, 1.0));
        let before = b.clone();
        b.bounce(100.0, 100.0, 0.9);
        assert_eq!(b, before);
    }

    #[test]
    fn touching_is_not_colliding() {
        let a = ball([0.0, 0.0], 10.0);
        let b = ball([20.0, 0.0], 10.0);
        let c = ball([19.9, 0.0], 10.0);
        assert!(!a.is_colliding(&b));
        assert!(a.is_colliding(&c));
        assert!(c.is_colliding(&a));
    }
}
