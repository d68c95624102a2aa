//! Navigation timing and marker parameters.

use crate::error::{ensure_positive, ConfigError};

/// Navigation parameters
#[derive(Debug, Clone)]
pub struct NavigationParams {
    /// Pause at an arrived island before the guided tour moves on (seconds)
    pub dwell_delay_s: f32,

    /// Distance within which an island shows its marker (meters, XZ)
    pub marker_radius_m: f32,
}

impl Default for NavigationParams {
    fn default() -> Self {
        Self {
            dwell_delay_s: 6.0,
            marker_radius_m: 12.0,
        }
    }
}

impl NavigationParams {
    pub fn validate(&self) -> Result<(), ConfigError> {
        ensure_positive("dwell_delay_s", self.dwell_delay_s)?;
        ensure_positive("marker_radius_m", self.marker_radius_m)
    }
}
