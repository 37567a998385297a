//! Configuration errors raised when a simulation component is constructed.

use thiserror::Error;

/// A configuration value that cannot produce a stable simulation.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigError {
    /// A value that must be strictly positive was zero, negative or NaN.
    #[error("{field} must be positive, got {value}")]
    NotPositive { field: &'static str, value: f32 },

    /// A damping factor outside `(0, 1]`.
    #[error("{field} must be in (0, 1], got {value}")]
    FactorOutOfRange { field: &'static str, value: f32 },

    /// A `[min, max)` range with `min > max` or a negative bound.
    #[error("{field} range is invalid: [{min}, {max})")]
    InvalidRange {
        field: &'static str,
        min: f32,
        max: f32,
    },

    /// A spawn ring that reaches past the radius objects are culled at.
    #[error("{field} spawn distance {max} exceeds cull radius {cull_radius}")]
    SpawnBeyondCull {
        field: &'static str,
        max: f32,
        cull_radius: f32,
    },

    /// A capacity that must hold at least one element.
    #[error("{field} capacity must be at least 1")]
    ZeroCapacity { field: &'static str },
}

/// Fail with [`ConfigError::NotPositive`] unless `value > 0`.
pub fn ensure_positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value > 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::NotPositive { field, value })
    }
}

/// Fail with [`ConfigError::FactorOutOfRange`] unless `0 < value <= 1`.
pub fn ensure_factor(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value > 0.0 && value <= 1.0 {
        Ok(())
    } else {
        Err(ConfigError::FactorOutOfRange { field, value })
    }
}

/// Fail with [`ConfigError::InvalidRange`] unless `0 <= min <= max`.
pub fn ensure_range(field: &'static str, min: f32, max: f32) -> Result<(), ConfigError> {
    if min >= 0.0 && min <= max {
        Ok(())
    } else {
        Err(ConfigError::InvalidRange { field, min, max })
    }
}
