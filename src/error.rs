//! Error types for simulation construction.
//!
//! Only configuration can fail. Numeric degeneracies inside a tick are
//! handled locally and never surfaced.

use thiserror::Error;

/// Errors raised while loading or validating a [`crate::SimConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("population must be greater than zero")]
    ZeroPopulation,
    #[error("{field} must be positive, got {value}")]
    NonPositive { field: &'static str, value: f32 },
    #[error("{field} must be between 0.0 and 1.0, got {value}")]
    OutOfUnitRange { field: &'static str, value: f32 },
    #[error("{field} must not be negative, got {value}")]
    Negative { field: &'static str, value: f32 },
    #[error("{field} must be finite")]
    NonFinite { field: &'static str },
    #[error("ball radius {radius} does not fit inside container half size {half_size}")]
    RadiusTooLarge { radius: f32, half_size: f32 },
    #[error("obstacle {index} has invalid half extent {half_extent}")]
    InvalidObstacle { index: usize, half_extent: f32 },
    #[error("failed to read configuration: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse configuration: {0}")]
    Parse(#[from] serde_json::Error),
}
