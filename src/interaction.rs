//! Pointer grabbing: pick a ball, drag it around, fling it on release.
//!
//! Nothing here mutates the world directly. While a ball is held the pointer
//! produces a [`Hold`] each frame, which [`World::tick`](crate::World::tick)
//! applies before integrating the others.

use crate::items::{Ball, Tint};
use crate::library::{distance, heading, Vector2P};
use rand::Rng;

/// Speed given to a held ball per canvas unit of pointer travel.
pub const FLING_GAIN: f64 = 0.04;

pub const HELD_TINT: Tint = Tint::RED;

/// Per-tick override for the held ball.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hold {
    pub index: usize,
    pub position: [f64; 2],
    /// `None` keeps the ball's current velocity.
    pub velocity: Option<Vector2P>,
    pub tint: Option<Tint>,
}

/// Index of the first ball under `point`, in collection order.
pub fn pick(balls: &[Ball], point: [f64; 2]) -> Option<usize> {
    balls.iter().position(|b| b.contains(point))
}

/// Velocity of a ball dragged from `position` to `pointer` in one frame.
pub fn fling(position: [f64; 2], pointer: [f64; 2]) -> Vector2P {
    Vector2P::new(heading(position, pointer), distance(position, pointer) * FLING_GAIN)
}

#[derive(Debug, Default, Clone)]
pub struct Pointer {
    held: Option<usize>,
    // set by `press`, cleared by the first `drag` after it
    fresh: bool,
}

impl Pointer {
    pub fn new() -> Pointer {
        Pointer::default()
    }

    pub fn held(&self) -> Option<usize> {
        self.held
    }

    /// Selects the first ball under `point`, dropping any earlier selection.
    pub fn press(&mut self, balls: &[Ball], point: [f64; 2]) -> Option<usize> {
        self.held = pick(balls, point);
        self.fresh = self.held.is_some();
        if let Some(index) = self.held {
            tracing::debug!(index, "grabbed ball");
        }
        self.held
    }

    /// Override for this frame, or `None` when nothing is held.
    ///
    /// The first drag after a press always sets the fling velocity, so a
    /// ball grabbed at its centre comes to rest. After that the velocity is
    /// only replaced when the pointer moved away from the ball.
    ///
    /// # Arguments
    ///
    /// * `balls` - The world's balls, indexed as in the world
    /// * `point` - Current pointer position in canvas space
    pub fn drag(&mut self, balls: &[Ball], point: [f64; 2]) -> Option<Hold> {
        let index = self.held?;
        let ball = balls.get(index)?;
        let fresh = std::mem::take(&mut self.fresh);
        let velocity = (fresh || ball.position != point).then(|| fling(ball.position, point));
        Some(Hold {
            index,
            position: point,
            velocity,
            tint: Some(HELD_TINT),
        })
    }

    /// Lets go of the held ball, returning it with a fresh random tint.
    pub fn release<R: Rng>(&mut self, rng: &mut R) -> Option<(usize, Tint)> {
        let index = self.held.take()?;
        self.fresh = false;
        let tint = Tint(
            rng.random_range(10..=200),
            rng.random_range(10..=200),
            rng.random_range(10..=200),
        );
        tracing::debug!(index, "released ball");
        Some((index, tint))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn balls() -> Vec<Ball> {
        vec![
            Ball::new([50.0, 50.0], 10.0, 1.0, 0.0, Tint::WHITE).unwrap(),
            Ball::new([55.0, 50.0], 10.0, 1.0, 0.0, Tint::WHITE).unwrap(),
            Ball::new([200.0, 50.0], 10.0, 1.0, 0.0, Tint::WHITE).unwrap(),
        ]
    }

    #[test]
    fn pick_prefers_earlier_ball() {
        assert_eq!(pick(&balls(), [53.0, 50.0]), Some(0));
        assert_eq!(pick(&balls(), [210.0, 50.0]), Some(2));
        assert_eq!(pick(&balls(), [120.0, 50.0]), None);
    }

    #[test]
    fn fling_points_at_pointer() {
        let v = fling([0.0, 0.0], [30.0, -40.0]);
        assert_abs_diff_eq!(v.magnitude, 2.0, epsilon = 1e-12);
        // up-right on screen
        assert_abs_diff_eq!(v.angle, 40.0_f64.atan2(30.0), epsilon = 1e-12);
    }

    #[test]
    fn drag_and_release() {
        let balls = balls();
        let mut pointer = Pointer::new();
        assert_eq!(pointer.drag(&balls, [0.0, 0.0]), None);

        assert_eq!(pointer.press(&balls, [200.0, 45.0]), Some(2));
        let hold = pointer.drag(&balls, [200.0, 25.0]).unwrap();
        assert_eq!(hold.index, 2);
        assert_eq!(hold.position, [200.0, 25.0]);
        assert_eq!(hold.tint, Some(HELD_TINT));
        assert_abs_diff_eq!(hold.velocity.unwrap().magnitude, 25.0 * FLING_GAIN, epsilon = 1e-12);

        let still = pointer.drag(&balls, [200.0, 50.0]).unwrap();
        assert_eq!(still.velocity, None);

        let (index, Tint(r, g, b)) = pointer.release(&mut StdRng::seed_from_u64(9)).unwrap();
        assert_eq!(index, 2);
        for c in [r, g, b] {
            assert!((10..=200).contains(&c));
        }
        assert_eq!(pointer.held(), None);
        assert!(pointer.release(&mut StdRng::seed_from_u64(9)).is_none());
    }

    #[test]
    fn grab_at_centre_stops_the_ball() {
        let balls = balls();
        let mut pointer = Pointer::new();
        pointer.press(&balls, [200.0, 50.0]);

        let hold = pointer.drag(&balls, [200.0, 50.0]).unwrap();
        assert_eq!(hold.velocity.map(|v| v.magnitude), Some(0.0));

        // holding still afterwards keeps whatever velocity the ball has
        assert_eq!(pointer.drag(&balls, [200.0, 50.0]).unwrap().velocity, None);
    }

    #[test]
    fn press_on_empty_space_drops_selection() {
        let balls = balls();
        let mut pointer = Pointer::new();
        pointer.press(&balls, [50.0, 50.0]);
        assert_eq!(pointer.press(&balls, [500.0, 500.0]), None);
        assert_eq!(pointer.held(), None);
    }
}
