//! Chase camera configuration.

use crate::error::ConfigError;

/// Follow-camera parameters
///
/// Rates are per tick, not per second: the rig is advanced once per rendered
/// frame.
#[derive(Debug, Clone)]
pub struct CameraParams {
    /// Offset from the vessel under manual control (meters)
    pub normal_offset: [f32; 3],

    /// Offset from the vessel while the autopilot steers (meters).
    /// Higher and closer for an overview of the approach.
    pub autopilot_offset: [f32; 3],

    /// Fraction of the remaining offset change applied per tick
    pub offset_lerp_per_tick: f32,

    /// Fraction of the remaining position / look-at error applied per tick
    pub follow_lerp_per_tick: f32,

    /// Camera position before the first tick (meters)
    pub initial_position: [f32; 3],

    /// Look-at point before the first tick (meters)
    pub initial_look_at: [f32; 3],
}

impl Default for CameraParams {
    fn default() -> Self {
        Self {
            normal_offset: [15.0, 12.0, 15.0],
            autopilot_offset: [12.0, 16.0, 12.0],
            offset_lerp_per_tick: 0.02,
            follow_lerp_per_tick: 0.05,
            initial_position: [15.0, 12.0, 15.0],
            initial_look_at: [0.0, 0.0, 0.0],
        }
    }
}

impl CameraParams {
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (param, rate) in [
            ("offset_lerp_per_tick", self.offset_lerp_per_tick),
            ("follow_lerp_per_tick", self.follow_lerp_per_tick),
        ] {
            if !(rate > 0.0 && rate <= 1.0) {
                return Err(ConfigError::out_of_range(param, rate, "within (0, 1]"));
            }
        }
        Ok(())
    }
}
