//! Configuration errors.
//!
//! The simulation itself is total: once a [`Session`](crate::session::Session)
//! exists no tick can fail. Everything that can go wrong is caught here, at
//! construction time.

use thiserror::Error;

/// Rejected static configuration.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// The wave field needs at least one component.
    #[error("wave field has no components")]
    NoWaveComponents,

    /// A single wave component is out of range.
    #[error("wave component {index}: {reason}")]
    InvalidWave { index: usize, reason: String },

    /// The island registry needs at least one island.
    #[error("island registry is empty")]
    EmptyRegistry,

    /// Two islands share an id.
    #[error("duplicate island id '{0}'")]
    DuplicateIsland(String),

    /// The throttle ramp only works if the vessel slows before it arrives.
    #[error("arrive radius ({arrive_m} m) must be smaller than slow radius ({slow_m} m)")]
    RadiusOrder { arrive_m: f32, slow_m: f32 },

    /// Any other out-of-range tunable.
    #[error("{param} = {value} is out of range: {expected}")]
    OutOfRange {
        param: &'static str,
        value: f32,
        expected: &'static str,
    },
}

impl ConfigError {
    pub(crate) fn out_of_range(param: &'static str, value: f32, expected: &'static str) -> Self {
        Self::OutOfRange {
            param,
            value,
            expected,
        }
    }
}

/// Check `value > 0` and finite.
pub(crate) fn ensure_positive(param: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::out_of_range(param, value, "finite and > 0"))
    }
}

/// Check `value` lies in `[0, 1]`.
pub(crate) fn ensure_unit_interval(param: &'static str, value: f32) -> Result<(), ConfigError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::out_of_range(param, value, "within [0, 1]"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_positive_check() {
        assert!(ensure_positive("x", 1.0).is_ok());
        assert!(ensure_positive("x", 0.0).is_err());
        assert!(ensure_positive("x", f32::NAN).is_err());
        assert!(ensure_positive("x", f32::INFINITY).is_err());
    }

    #[test]
    fn test_radius_order_message() {
        let err = ConfigError::RadiusOrder {
            arrive_m: 15.0,
            slow_m: 8.0,
        };
        assert_eq!(
            err.to_string(),
            "arrive radius (15 m) must be smaller than slow radius (8 m)"
        );
    }
}
