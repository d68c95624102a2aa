//! Rendering and heightmap export configuration.

/// Rendering configuration
#[derive(Debug, Clone)]
pub struct RenderConfig {
    /// Window width (pixels)
    pub window_width: u32,

    /// Window height (pixels)
    pub window_height: u32,

    /// Vertical field of view (degrees)
    /// 35° = narrow, almost isometric look over the archipelago
    pub fov_degrees: f32,

    /// Near clipping plane (meters)
    pub near_plane_m: f32,

    /// Far clipping plane (meters)
    pub far_plane_m: f32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            window_width: 1280,
            window_height: 720,
            fov_degrees: 35.0,
            near_plane_m: 0.1,
            far_plane_m: 1000.0, // Covers the 500m ocean plane from any corner
        }
    }
}

impl RenderConfig {
    pub fn aspect_ratio(&self) -> f32 {
        self.window_width as f32 / self.window_height.max(1) as f32
    }
}

/// Heightmap export configuration (CPU reference image of the wave field)
#[derive(Debug, Clone)]
pub struct HeightmapConfig {
    /// Output image size (width = height, pixels)
    pub size_px: u32,

    /// World extent covered by the image (meters per side, centred on origin)
    pub extent_m: f32,

    /// Wave time to sample (seconds)
    pub time_s: f32,
}

impl Default for HeightmapConfig {
    fn default() -> Self {
        Self {
            size_px: 256,
            extent_m: 100.0,
            time_s: 0.0,
        }
    }
}

impl HeightmapConfig {
    /// World XZ coordinate at the centre of pixel (px, py)
    pub fn pixel_to_world(&self, px: u32, py: u32) -> (f32, f32) {
        let step = self.extent_m / self.size_px as f32;
        let half = self.extent_m / 2.0;
        (
            (px as f32 + 0.5) * step - half,
            (py as f32 + 0.5) * step - half,
        )
    }
}
