//! Roto Box - balls tumbling inside a rotating square container
//!
//! Core modules:
//! - `sim`: Fixed timestep simulation (rotating-frame forces, collisions, state)
//! - `config`: Construction-time configuration and validation
//! - `error`: Configuration errors
//! - `extract`: Read-only presentation data (instances, counters)

pub mod config;
pub mod error;
pub mod extract;
pub mod sim;

pub use config::{ObstacleConfig, SimConfig};
pub use error::ConfigError;
pub use sim::{CollisionStrategy, Simulation, Tag, TagCounts};

use glam::Vec2;

/// Reference configuration constants
pub mod consts {
    /// Fixed simulation timestep (50 Hz)
    pub const SIM_DT: f32 = 0.02;

    /// Container half side length (pixels)
    pub const CONTAINER_HALF_SIZE: f32 = 200.0;
    /// Gravity magnitude in world frame (pixels/s², pointing down)
    pub const GRAVITY: f32 = 800.0;
    /// Container angular velocity (rad/s)
    pub const ANGULAR_VELOCITY: f32 = 2.0;

    /// Ball defaults
    pub const BALL_COUNT: usize = 100;
    pub const BALL_RADIUS: f32 = 10.0;
    /// Initial velocity is sampled in [-BALL_START_SPEED, BALL_START_SPEED] per axis
    pub const BALL_START_SPEED: f32 = 100.0;

    /// Base coefficient of restitution (0-1)
    pub const RESTITUTION: f32 = 0.6;
    /// Random spread applied around the base restitution
    pub const RESTITUTION_JITTER: f32 = 0.2;
    /// Velocity noise amplitude (pixels/s² scale, multiplied by dt)
    pub const NOISE_STRENGTH: f32 = 10.0;

    /// Obstacle half extent (40x40 squares)
    pub const OBSTACLE_HALF_EXTENT: f32 = 20.0;

    /// Denominator substituted for a zero contact distance in discrete collision
    pub const CONTACT_EPSILON: f32 = 0.001;
}

/// Normalized angle to [-π, π)
#[inline]
pub fn normalize_angle(mut angle: f32) -> f32 {
    use std::f32::consts::PI;
    while angle >= PI {
        angle -= 2.0 * PI;
    }
    while angle < -PI {
        angle += 2.0 * PI;
    }
    angle
}

/// Rotate a container-local point into the world frame by `theta` radians
#[inline]
pub fn local_to_world(local: Vec2, theta: f32) -> Vec2 {
    Vec2::from_angle(theta).rotate(local)
}

/// Rotate a world point into the container-local frame
#[inline]
pub fn world_to_local(world: Vec2, theta: f32) -> Vec2 {
    Vec2::from_angle(-theta).rotate(world)
}
