//! Parameter definitions with physical units and documented semantics.
//!
//! All magic numbers live here with:
//! - Physical units (meters, seconds, radians, etc.)
//! - Documented ranges and meanings
//! - A `validate()` that rejects values the simulation cannot handle

mod camera;
mod navigation;
mod ocean;
mod render;
mod vessel;

// Re-export all types
pub use camera::CameraParams;
pub use navigation::NavigationParams;
pub use ocean::{OceanParams, WaveComponent};
pub use render::{HeightmapConfig, RenderConfig};
pub use vessel::VesselParams;

use crate::error::{ensure_positive, ConfigError};

/// Everything a [`Session`](crate::session::Session) needs besides the island registry.
#[derive(Debug, Clone)]
pub struct SimulationParams {
    pub ocean: OceanParams,
    pub vessel: VesselParams,
    pub navigation: NavigationParams,
    pub camera: CameraParams,

    /// Longest tick the integrator accepts (seconds). Larger deltas, e.g.
    /// after the host was suspended, are clamped to this.
    pub max_delta_s: f32,

    /// Vessel start position (meters). `y` is overwritten on the first tick.
    pub start_position: [f32; 3],

    /// Vessel start heading (radians, 0 = facing +X)
    pub start_heading_rad: f32,
}

impl Default for SimulationParams {
    fn default() -> Self {
        Self {
            ocean: OceanParams::default(),
            vessel: VesselParams::default(),
            navigation: NavigationParams::default(),
            camera: CameraParams::default(),
            max_delta_s: 0.1,
            start_position: [0.0, 1.0, 0.0],
            start_heading_rad: 0.0,
        }
    }
}

impl SimulationParams {
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.ocean.validate()?;
        self.vessel.validate()?;
        self.navigation.validate()?;
        self.camera.validate()?;
        ensure_positive("max_delta_s", self.max_delta_s)?;

        if !self.start_position.iter().all(|c| c.is_finite()) {
            return Err(ConfigError::out_of_range(
                "start_position",
                f32::NAN,
                "finite coordinates",
            ));
        }
        if !self.start_heading_rad.is_finite() {
            return Err(ConfigError::out_of_range(
                "start_heading_rad",
                self.start_heading_rad,
                "finite",
            ));
        }
        Ok(())
    }
}
