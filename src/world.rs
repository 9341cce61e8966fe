use crate::collision::resolve;
use crate::config::{ConfigError, Settings};
use crate::interaction::Hold;
use crate::items::{Ball, Tint};

/// What the renderer needs from a ball after a tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BallView {
    pub position: [f64; 2],
    pub radius: f64,
    pub tint: Tint,
}

/// Fixed population of balls on a walled canvas. Balls are identified by
/// their index, which never changes during a run.
pub struct World {
    settings: Settings,
    balls: Vec<Ball>,
    ticks: u64,
}

impl World {
    /// Builds a world after validating `settings`, so a bad canvas or an
    /// out-of-range elasticity is rejected here and low elasticity is logged.
    ///
    /// # Arguments
    ///
    /// * `settings` - Canvas size, gravity, elasticity and air density
    /// * `balls` - Starting population; indices stay fixed for the whole run
    pub fn new(settings: Settings, balls: Vec<Ball>) -> Result<World, ConfigError> {
        settings.validate()?;
        tracing::debug!(
            balls = balls.len(),
            width = settings.width,
            height = settings.height,
            "world created"
        );
        Ok(World { settings, balls, ticks: 0 })
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn balls(&self) -> &[Ball] {
        &self.balls
    }

    pub fn ball_mut(&mut self, index: usize) -> Option<&mut Ball> {
        self.balls.get_mut(index)
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn snapshot(&self) -> Vec<BallView> {
        self.balls
            .iter()
            .map(|b| BallView {
                position: b.position,
                radius: b.radius(),
                tint: b.tint,
            })
            .collect()
    }

    fn apply_hold(&mut self, hold: &Hold) -> Option<usize> {
        let Some(ball) = self.balls.get_mut(hold.index) else {
            tracing::warn!(index = hold.index, "hold refers to a missing ball, ignoring");
            return None;
        };
        ball.position = hold.position;
        if let Some(velocity) = hold.velocity {
            ball.velocity = velocity;
        }
        if let Some(tint) = hold.tint {
            ball.tint = tint;
        }
        Some(hold.index)
    }

    /// Advances the world by one frame and returns how many pairs collided.
    ///
    /// The held ball (if any) is placed by `hold` and skips integration, but
    /// still collides. Pairs are visited as (i, j) with i < j and each
    /// overlapping pair is resolved immediately; later pairs see the already
    /// corrected balls and earlier pairs are not re-checked, so a ball hit
    /// twice in one frame may be left overlapping its first partner.
    pub fn tick(&mut self, hold: Option<&Hold>) -> usize {
        let held = hold.and_then(|h| self.apply_hold(h));
        let Settings { width, height, gravity, elasticity, .. } = self.settings;

        for (i, ball) in self.balls.iter_mut().enumerate() {
            if Some(i) == held {
                continue;
            }
            ball.move_ball(gravity);
            ball.bounce(width, height, elasticity);
        }

        let mut resolved = 0;
        let n = self.balls.len();
        for i in 0..n {
            for j in (i + 1)..n {
                let Ok([a, b]) = self.balls.get_disjoint_mut([i, j]) else {
                    continue;
                };
                if a.is_colliding(b) {
                    resolve(a, b);
                    resolved += 1;
                }
            }
        }

        self.ticks += 1;
        tracing::trace!(tick = self.ticks, resolved, "tick");
        resolved
    }
}
