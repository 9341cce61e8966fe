//! Classical mechanics of circular particles ("balls") on a 2D canvas.
//!
//! Balls fall under gravity, lose speed to air drag, bounce off the canvas
//! edges and collide elastically with each other. Velocities are carried in
//! polar form (angle, speed); see [`library::add_vector`].

pub mod collision;
pub mod config;
pub mod interaction;
pub mod items;
pub mod spawn;
pub mod world;

pub use config::{ConfigError, Settings, SpawnConfig};
pub use interaction::{Hold, Pointer};
pub use items::{Ball, BallError, Tint};
pub use library::Vector2P;
pub use world::{BallView, World};

pub mod library {
    use serde::Deserialize;
    use std::f64::consts::FRAC_PI_2;

    /// A velocity or impulse as an (angle, magnitude) pair.
    ///
    /// The angle is not normalised, so two vectors pointing the same way may
    /// differ by a multiple of 2π.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Deserialize)]
    pub struct Vector2P {
        pub angle: f64,
        pub magnitude: f64,
    }

    impl Vector2P {
        pub const ZERO: Vector2P = Vector2P { angle: 0.0, magnitude: 0.0 };

        pub const fn new(angle: f64, magnitude: f64) -> Vector2P {
            Vector2P { angle, magnitude }
        }
    }

    pub fn add_vector(v1: Vector2P, v2: Vector2P) -> Vector2P {
        let x = v1.angle.sin() * v1.magnitude + v2.angle.sin() * v2.magnitude;
        let y = v1.angle.cos() * v1.magnitude + v2.angle.cos() * v2.magnitude;
        Vector2P {
            angle: FRAC_PI_2 - y.atan2(x),
            magnitude: x.hypot(y),
        }
    }

    pub fn distance(a: [f64; 2], b: [f64; 2]) -> f64 {
        (a[0] - b[0]).hypot(a[1] - b[1])
    }

    /// Angle of the line from `from` towards `to`, in canvas space
    /// (Y grows downward, so the vertical difference is flipped).
    pub fn heading(from: [f64; 2], to: [f64; 2]) -> f64 {
        let dx = from[0] - to[0];
        let dy = from[1] - to[1];
        dy.atan2(-dx)
    }

}
