//! Simulation configuration
//!
//! Everything here is fixed for the lifetime of a run. Loaded from JSON or
//! built from [`SimConfig::default`], which reproduces the reference box.

use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::ConfigError;
use crate::sim::{Aabb, CollisionStrategy, Restitution, Tag};

/// A static obstacle anchored to the container frame
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ObstacleConfig {
    /// Center in container-local coordinates
    pub center: Vec2,
    /// Half side length of the square
    pub half_extent: f32,
    /// Tag handed to bodies that touch it
    pub tag: Tag,
}

impl ObstacleConfig {
    pub fn new(center: Vec2, half_extent: f32, tag: Tag) -> Self {
        Self {
            center,
            half_extent,
            tag,
        }
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::from_center_half_extents(self.center, Vec2::splat(self.half_extent))
    }
}

/// Construction-time configuration for a [`crate::Simulation`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Number of bodies
    pub population: usize,
    /// Container half side length
    pub half_size: f32,
    /// Radius shared by every body
    pub ball_radius: f32,
    /// Base coefficient of restitution (0-1)
    pub restitution: f32,
    /// Uniform spread around the base restitution (0-1)
    pub restitution_jitter: f32,
    /// Velocity noise amplitude
    pub noise_strength: f32,
    /// World-frame gravity magnitude
    pub gravity: f32,
    /// Container angular velocity (rad/s)
    pub angular_velocity: f32,
    /// Fixed timestep (s)
    pub dt: f32,
    /// Initial velocity range per axis
    pub initial_speed: f32,
    /// Obstacle collision strategy
    pub strategy: CollisionStrategy,
    /// RNG seed; `None` seeds from the thread RNG
    pub seed: Option<u64>,
    /// Obstacles, tested in this order every tick
    pub obstacles: Vec<ObstacleConfig>,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            population: BALL_COUNT,
            half_size: CONTAINER_HALF_SIZE,
            ball_radius: BALL_RADIUS,
            restitution: RESTITUTION,
            restitution_jitter: RESTITUTION_JITTER,
            noise_strength: NOISE_STRENGTH,
            gravity: GRAVITY,
            angular_velocity: ANGULAR_VELOCITY,
            dt: SIM_DT,
            initial_speed: BALL_START_SPEED,
            strategy: CollisionStrategy::default(),
            seed: None,
            obstacles: Self::reference_obstacles(),
        }
    }
}

/// Per-tick physics parameters copied out of the config for the hot loop
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimParams {
    pub dt: f32,
    pub gravity: f32,
    pub angular_velocity: f32,
    pub radius: f32,
    pub half_size: f32,
    pub restitution: Restitution,
    pub noise_strength: f32,
    pub strategy: CollisionStrategy,
}

impl SimConfig {
    /// The four colored squares of the reference layout
    pub fn reference_obstacles() -> Vec<ObstacleConfig> {
        let h = OBSTACLE_HALF_EXTENT;
        vec![
            ObstacleConfig::new(Vec2::new(-50.0, -150.0), h, Tag::Red),
            ObstacleConfig::new(Vec2::new(30.0, -130.0), h, Tag::Green),
            ObstacleConfig::new(Vec2::new(-20.0, 70.0), h, Tag::Blue),
            ObstacleConfig::new(Vec2::new(110.0, 150.0), h, Tag::Yellow),
        ]
    }

    /// Parse and validate a JSON configuration. Missing fields use defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: SimConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON configuration file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Check every field. Called by `Simulation::new`.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.population == 0 {
            return Err(ConfigError::ZeroPopulation);
        }

        let finite = [
            ("half_size", self.half_size),
            ("ball_radius", self.ball_radius),
            ("restitution", self.restitution),
            ("restitution_jitter", self.restitution_jitter),
            ("noise_strength", self.noise_strength),
            ("gravity", self.gravity),
            ("angular_velocity", self.angular_velocity),
            ("dt", self.dt),
            ("initial_speed", self.initial_speed),
        ];
        for (field, value) in finite {
            if !value.is_finite() {
                return Err(ConfigError::NonFinite { field });
            }
        }

        for (field, value) in [
            ("half_size", self.half_size),
            ("ball_radius", self.ball_radius),
            ("dt", self.dt),
        ] {
            if value <= 0.0 {
                return Err(ConfigError::NonPositive { field, value });
            }
        }

        for (field, value) in [
            ("restitution", self.restitution),
            ("restitution_jitter", self.restitution_jitter),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::OutOfUnitRange { field, value });
            }
        }

        for (field, value) in [
            ("noise_strength", self.noise_strength),
            ("initial_speed", self.initial_speed),
        ] {
            if value < 0.0 {
                return Err(ConfigError::Negative { field, value });
            }
        }

        if self.ball_radius >= self.half_size {
            return Err(ConfigError::RadiusTooLarge {
                radius: self.ball_radius,
                half_size: self.half_size,
            });
        }

        for (index, obstacle) in self.obstacles.iter().enumerate() {
            if !obstacle.center.is_finite() {
                return Err(ConfigError::NonFinite {
                    field: "obstacle center",
                });
            }
            if !obstacle.half_extent.is_finite() || obstacle.half_extent <= 0.0 {
                return Err(ConfigError::InvalidObstacle {
                    index,
                    half_extent: obstacle.half_extent,
                });
            }
        }

        Ok(())
    }

    pub fn params(&self) -> SimParams {
        SimParams {
            dt: self.dt,
            gravity: self.gravity,
            angular_velocity: self.angular_velocity,
            radius: self.ball_radius,
            half_size: self.half_size,
            restitution: Restitution::new(self.restitution, self.restitution_jitter),
            noise_strength: self.noise_strength,
            strategy: self.strategy,
        }
    }
}
