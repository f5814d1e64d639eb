//! Configuration errors
//!
//! Every numeric setting is checked once when a controller or session is
//! built. Runtime inputs are clamped instead, so nothing past construction
//! returns an error.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    /// Value must be finite and >= 0
    #[error("{name} must be finite and non-negative, got {value}")]
    Negative { name: &'static str, value: f32 },

    /// Value must be finite and > 0
    #[error("{name} must be finite and positive, got {value}")]
    NonPositive { name: &'static str, value: f32 },

    #[error("charge thresholds must be non-negative and strictly increasing, got {0:?}")]
    ThresholdOrder([f32; 3]),

    #[error("drone follow lerp must lie in (0, 1], got {0}")]
    FollowLerp(f32),

    #[error("spawner.interval_ms must be at least {min} ms, got {value}")]
    SpawnInterval { min: f32, value: f32 },

    #[error("player must start with at least one life")]
    NoLives,

    #[error("stage needs at least one checkpoint")]
    NoCheckpoints,

    #[error("checkpoints must be ascending, {prev} is followed by {next}")]
    CheckpointOrder { prev: f32, next: f32 },

    #[error("duplicate wave id '{0}'")]
    DuplicateWave(String),

    #[error("invalid config JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Reject negative or non-finite values
pub(crate) fn non_negative(name: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Negative { name, value })
    }
}

/// Reject zero, negative or non-finite values
pub(crate) fn positive(name: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NonPositive { name, value })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_range_checks() {
        assert!(non_negative("x", 0.0).is_ok());
        assert!(non_negative("x", -0.5).is_err());
        assert!(non_negative("x", f32::NAN).is_err());
        assert!(positive("x", 0.0).is_err());
        assert!(positive("x", f32::INFINITY).is_err());
        assert!(positive("x", 3.0).is_ok());
    }

    #[test]
    fn test_error_messages_name_the_field() {
        let err = positive("bullet.cooldown_ms", -1.0).unwrap_err();
        assert!(err.to_string().contains("bullet.cooldown_ms"));
    }
}
