//! Simulation settings, loadable from YAML.
//!
//! Every field is optional; missing ones fall back to the classic demo
//! values. A complete file looks like:
//!
//! ```yaml
//! width: 600.0
//! height: 400.0
//! gravity:
//!   angle: -1.5707963267948966   # straight down the screen
//!   magnitude: 0.0
//! elasticity: 0.98               # 1 = perfectly elastic
//! air_density: 0.08              # higher means more drag
//! particles: 3
//! spawn:
//!   radius: [19, 30]
//!   density: [1, 23]
//!   max_speed: 0.6
//!   seed: 42                     # omit for a fresh random layout
//! ```

use crate::items::BallError;
use crate::library::Vector2P;
use serde::Deserialize;
use std::f64::consts::FRAC_PI_2;
use std::fmt;
use std::path::Path;

/// Elasticity below this is accepted but logged: the collision response
/// assumes elastic collisions and gets increasingly wrong down here.
pub const ELASTICITY_WARN_BELOW: f64 = 0.5;

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(serde_yaml::Error),
    Invalid { field: &'static str, reason: String },
    Ball(BallError),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "cannot read settings: {e}"),
            ConfigError::Parse(e) => write!(f, "malformed settings: {e}"),
            ConfigError::Invalid { field, reason } => write!(f, "invalid `{field}`: {reason}"),
            ConfigError::Ball(e) => write!(f, "cannot build ball: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io(e) => Some(e),
            ConfigError::Parse(e) => Some(e),
            ConfigError::Ball(e) => Some(e),
            ConfigError::Invalid { .. } => None,
        }
    }
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::Io(e)
    }
}

impl From<BallError> for ConfigError {
    fn from(e: BallError) -> Self {
        ConfigError::Ball(e)
    }
}

impl From<serde_yaml::Error> for ConfigError {
    fn from(e: serde_yaml::Error) -> Self {
        ConfigError::Parse(e)
    }
}

fn invalid(field: &'static str, reason: impl Into<String>) -> ConfigError {
    ConfigError::Invalid { field, reason: reason.into() }
}

/// Ranges used to generate the starting population.
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct SpawnConfig {
    pub radius: [u32; 2],  // inclusive integer range
    pub density: [u32; 2], // mass = density * radius^2
    pub max_speed: f64,
    pub seed: Option<u64>,
}

impl Default for SpawnConfig {
    fn default() -> Self {
        SpawnConfig {
            radius: [19, 30],
            density: [1, 23],
            max_speed: 0.6,
            seed: None,
        }
    }
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    pub width: f64,
    pub height: f64,
    pub gravity: Vector2P,
    pub elasticity: f64,
    pub air_density: f64,
    pub particles: usize,
    pub spawn: SpawnConfig,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            width: 600.0,
            height: 400.0,
            gravity: Vector2P::new(-FRAC_PI_2, 0.0),
            elasticity: 0.98,
            air_density: 0.08,
            particles: 3,
            spawn: SpawnConfig::default(),
        }
    }
}

impl Settings {
    pub fn from_yaml_str(text: &str) -> Result<Settings, ConfigError> {
        let settings: Settings = serde_yaml::from_str(text)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Settings, ConfigError> {
        let path = path.as_ref();
        tracing::debug!(path = %path.display(), "loading settings");
        let text = std::fs::read_to_string(path)?;
        Settings::from_yaml_str(&text)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        for (field, value) in [("width", self.width), ("height", self.height)] {
            if !(value.is_finite() && value > 0.0) {
                return Err(invalid(field, format!("must be positive, got {value}")));
            }
        }
        if !(0.0..=1.0).contains(&self.elasticity) {
            return Err(invalid("elasticity", format!("must lie in [0, 1], got {}", self.elasticity)));
        }
        if self.elasticity < ELASTICITY_WARN_BELOW {
            tracing::warn!(
                elasticity = self.elasticity,
                "collisions are modelled as elastic; low elasticity gives unphysical results"
            );
        }
        if !(self.air_density.is_finite() && self.air_density >= 0.0) {
            return Err(invalid(
                "air_density",
                format!("must be non-negative, got {}", self.air_density),
            ));
        }
        if self.particles == 0 {
            return Err(invalid("particles", "need at least one particle"));
        }
        let g = self.gravity;
        if !(g.angle.is_finite() && g.magnitude.is_finite() && g.magnitude >= 0.0) {
            return Err(invalid("gravity", format!("bad vector {g:?}")));
        }
        self.spawn.validate()
    }
}

impl SpawnConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let [rmin, rmax] = self.radius;
        if rmin == 0 || rmin > rmax {
            return Err(invalid("spawn.radius", format!("bad range [{rmin}, {rmax}]")));
        }
        let [dmin, dmax] = self.density;
        if dmin == 0 || dmin > dmax {
            return Err(invalid("spawn.density", format!("bad range [{dmin}, {dmax}]")));
        }
        if !(self.max_speed.is_finite() && self.max_speed >= 0.0) {
            return Err(invalid("spawn.max_speed", format!("got {}", self.max_speed)));
        }
        Ok(())
    }
}
