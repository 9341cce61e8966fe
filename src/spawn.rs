use crate::config::{ConfigError, Settings};
use crate::items::{Ball, Tint};
use crate::library::Vector2P;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::f64::consts::PI;

/// RNG for a fresh world: seeded when the settings ask for it.
pub fn rng_for(settings: &Settings) -> StdRng {
    match settings.spawn.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    }
}

/// Denser balls get darker tints.
fn tint_for_density<R: Rng>(density: u32, rng: &mut R) -> Tint {
    let mut channel = || {
        let k: u32 = rng.random_range(1..=10);
        230u32.saturating_sub(density.saturating_mul(k)) as u8
    };
    Tint(channel(), channel(), channel())
}

/// Uniform coordinate keeping a ball of radius `r` inside `[0, extent]`.
fn coordinate<R: Rng>(extent: f64, r: f64, rng: &mut R) -> f64 {
    let hi = extent - r;
    if hi <= r {
        return extent / 2.0;
    }
    rng.random_range(r..=hi)
}

/// Generates the starting population described by `settings`.
///
/// # Arguments
///
/// * `settings` - Canvas size, air density, particle count and spawn ranges;
///   validated first, so hand-built settings fail here instead of panicking
/// * `rng` - Source of randomness, seed it for reproducible layouts
pub fn spawn_balls<R: Rng>(settings: &Settings, rng: &mut R) -> Result<Vec<Ball>, ConfigError> {
    settings.validate()?;
    let spawn = &settings.spawn;
    let mut balls = Vec::with_capacity(settings.particles);

    for _ in 0..settings.particles {
        let radius: u32 = rng.random_range(spawn.radius[0]..=spawn.radius[1]);
        let density: u32 = rng.random_range(spawn.density[0]..=spawn.density[1]);
        let r = f64::from(radius);
        let position = [
            coordinate(settings.width, r, rng),
            coordinate(settings.height, r, rng),
        ];
        let mass = f64::from(density) * r * r;
        let tint = tint_for_density(density, rng);

        let speed = if spawn.max_speed > 0.0 {
            rng.random_range(0.0..spawn.max_speed)
        } else {
            0.0
        };
        let angle = rng.random_range(-PI..PI);

        let ball = Ball::new(position, r, mass, settings.air_density, tint)?
            .with_velocity(Vector2P::new(angle, speed));
        balls.push(ball);
    }

    tracing::debug!(count = balls.len(), "spawned balls");
    Ok(balls)
}
