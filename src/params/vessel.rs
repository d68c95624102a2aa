//! Vessel handling and autopilot parameters.

use crate::error::{ensure_positive, ConfigError};

/// Vessel motion parameters
#[derive(Debug, Clone)]
pub struct VesselParams {
    /// Acceleration while thrust is held (m/s²)
    pub thrust_accel_m_per_s2: f32,

    /// Reverse thrust as a fraction of forward thrust (dimensionless)
    pub backward_thrust_factor: f32,

    /// Yaw rate while turning (rad/s)
    pub turn_rate_rad_per_s: f32,

    /// Hard horizontal speed cap (m/s)
    pub max_speed_m_per_s: f32,

    /// Exponential drag coefficient (1/s). Velocity decays by `exp(-d·dt)`.
    pub linear_damping_per_s: f32,

    /// Height of the hull reference point above the wave surface (meters)
    pub waterline_offset_m: f32,

    /// Autopilot arrival distance (meters, XZ)
    pub arrive_radius_m: f32,

    /// Autopilot starts throttling back inside this distance (meters, XZ)
    pub slow_radius_m: f32,

    /// Lowest autopilot throttle inside the slow radius (fraction of full)
    pub throttle_floor: f32,
}

impl Default for VesselParams {
    fn default() -> Self {
        Self {
            thrust_accel_m_per_s2: 10.0,
            backward_thrust_factor: 0.5,
            turn_rate_rad_per_s: 1.8,
            max_speed_m_per_s: 15.0,
            linear_damping_per_s: 1.5, // higher = stops sooner when keys are released
            waterline_offset_m: 0.3,
            arrive_radius_m: 8.0,
            slow_radius_m: 15.0,
            throttle_floor: 0.3,
        }
    }
}

impl VesselParams {
    pub fn validate(&self) -> Result<(), ConfigError> {
        ensure_positive("thrust_accel_m_per_s2", self.thrust_accel_m_per_s2)?;
        ensure_positive("turn_rate_rad_per_s", self.turn_rate_rad_per_s)?;
        ensure_positive("max_speed_m_per_s", self.max_speed_m_per_s)?;
        ensure_positive("arrive_radius_m", self.arrive_radius_m)?;
        ensure_positive("slow_radius_m", self.slow_radius_m)?;

        if !(self.linear_damping_per_s.is_finite() && self.linear_damping_per_s >= 0.0) {
            return Err(ConfigError::out_of_range(
                "linear_damping_per_s",
                self.linear_damping_per_s,
                "finite and >= 0",
            ));
        }
        if !(self.backward_thrust_factor.is_finite() && self.backward_thrust_factor >= 0.0) {
            return Err(ConfigError::out_of_range(
                "backward_thrust_factor",
                self.backward_thrust_factor,
                "finite and >= 0",
            ));
        }
        if !self.waterline_offset_m.is_finite() {
            return Err(ConfigError::out_of_range(
                "waterline_offset_m",
                self.waterline_offset_m,
                "finite",
            ));
        }
        if !(self.throttle_floor > 0.0 && self.throttle_floor <= 1.0) {
            return Err(ConfigError::out_of_range(
                "throttle_floor",
                self.throttle_floor,
                "within (0, 1]",
            ));
        }
        if self.arrive_radius_m >= self.slow_radius_m {
            return Err(ConfigError::RadiusOrder {
                arrive_m: self.arrive_radius_m,
                slow_m: self.slow_radius_m,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_vessel_is_valid() {
        assert!(VesselParams::default().validate().is_ok());
    }

    #[test]
    fn test_radius_order_enforced() {
        let params = VesselParams {
            arrive_radius_m: 15.0,
            slow_radius_m: 15.0,
            ..VesselParams::default()
        };
        assert!(matches!(
            params.validate(),
            Err(ConfigError::RadiusOrder { .. })
        ));
    }

    #[test]
    fn test_throttle_floor_range() {
        let params = VesselParams {
            throttle_floor: 0.0,
            ..VesselParams::default()
        };
        assert!(params.validate().is_err());
    }
}
