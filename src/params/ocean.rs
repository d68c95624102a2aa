//! Wave field components and ocean mesh parameters.

use crate::error::{ensure_positive, ensure_unit_interval, ConfigError};

/// Tolerance on `|direction| == 1` when validating a component.
const DIRECTION_NORM_TOLERANCE: f32 = 1e-2;

/// One directional sinusoid of the wave field.
///
/// Immutable once the field is built. `direction` is not renormalised at the
/// use site, so it must already be (close to) unit length.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WaveComponent {
    /// Propagation direction in the XZ plane (unit vector)
    pub direction: [f32; 2],

    /// Peak height contribution (meters)
    pub amplitude_m: f32,

    /// Crest sharpness in [0, 1]. Carried with the component; the height
    /// model only uses vertical displacement, so it has no effect on height.
    pub steepness: f32,

    /// Crest-to-crest distance (meters, > 0)
    pub wavelength_m: f32,

    /// Phase speed multiplier on the deep-water dispersion relation (dimensionless)
    pub speed: f32,
}

impl WaveComponent {
    pub const fn new(
        direction: [f32; 2],
        amplitude_m: f32,
        steepness: f32,
        wavelength_m: f32,
        speed: f32,
    ) -> Self {
        Self {
            direction,
            amplitude_m,
            steepness,
            wavelength_m,
            speed,
        }
    }

    /// Check the component against the invariants the wave math relies on.
    pub fn validate(&self, index: usize) -> Result<(), ConfigError> {
        let invalid = |reason: String| ConfigError::InvalidWave { index, reason };

        let [dx, dz] = self.direction;
        let norm = (dx * dx + dz * dz).sqrt();
        if !norm.is_finite() || (norm - 1.0).abs() > DIRECTION_NORM_TOLERANCE {
            return Err(invalid(format!(
                "direction ({dx}, {dz}) is not a unit vector (length {norm})"
            )));
        }

        ensure_positive("amplitude_m", self.amplitude_m).map_err(|e| invalid(e.to_string()))?;
        ensure_positive("wavelength_m", self.wavelength_m).map_err(|e| invalid(e.to_string()))?;
        ensure_positive("speed", self.speed).map_err(|e| invalid(e.to_string()))?;
        ensure_unit_interval("steepness", self.steepness).map_err(|e| invalid(e.to_string()))?;
        Ok(())
    }
}

/// Ocean parameters: the wave set plus the render grid it displaces.
#[derive(Debug, Clone)]
pub struct OceanParams {
    /// Ordered wave components. Order is significant: both evaluation paths
    /// sum in this order.
    pub waves: Vec<WaveComponent>,

    /// Grid resolution (quads per side, 256 = 66,049 vertices)
    pub grid_size: usize,

    /// Spacing between grid vertices (meters)
    pub grid_spacing_m: f32,
}

impl Default for OceanParams {
    fn default() -> Self {
        Self {
            waves: vec![
                // Long swell from +X
                WaveComponent::new([1.0, 0.0], 0.5, 0.3, 20.0, 1.5),
                // Cross swell
                WaveComponent::new([0.894, 0.447], 0.3, 0.25, 12.0, 1.2),
                // Short chop
                WaveComponent::new([-0.707, 0.707], 0.2, 0.2, 8.0, 0.8),
            ],
            grid_size: 256,
            grid_spacing_m: 500.0 / 256.0, // 500m square
        }
    }
}

impl OceanParams {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.waves.is_empty() {
            return Err(ConfigError::NoWaveComponents);
        }
        for (index, wave) in self.waves.iter().enumerate() {
            wave.validate(index)?;
        }
        if self.grid_size == 0 {
            return Err(ConfigError::out_of_range("grid_size", 0.0, ">= 1"));
        }
        ensure_positive("grid_spacing_m", self.grid_spacing_m)
    }
}
