//! Grayscale heightmap of the wave field, for checking the CPU path by eye
//! against a GPU capture.

use image::{GrayImage, Luma};

use super::waves::WaveField;
use crate::params::HeightmapConfig;

/// Render heights into an image. Black is `-ΣA`, white is `+ΣA`, so 128 is
/// still water.
pub fn render_heightmap(field: &WaveField, config: &HeightmapConfig) -> GrayImage {
    let bound = field.amplitude_bound();
    GrayImage::from_fn(config.size_px, config.size_px, |px, py| {
        let (x, z) = config.pixel_to_world(px, py);
        let h = field.height(x, z, config.time_s);
        let normalized = ((h / bound) * 0.5 + 0.5).clamp(0.0, 1.0);
        Luma([(normalized * 255.0).round() as u8])
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::OceanParams;

    #[test]
    fn test_heightmap_size_and_contrast() {
        let field = WaveField::from_params(&OceanParams::default()).unwrap();
        let config = HeightmapConfig {
            size_px: 64,
            ..HeightmapConfig::default()
        };
        let img = render_heightmap(&field, &config);
        assert_eq!(img.dimensions(), (64, 64));

        let min = img.pixels().map(|p| p.0[0]).min().unwrap();
        let max = img.pixels().map(|p| p.0[0]).max().unwrap();
        // 100 m covers several wavelengths of every component
        assert!(max - min > 80, "flat heightmap: {min}..{max}");
    }

    #[test]
    fn test_pixel_matches_field() {
        let field = WaveField::from_params(&OceanParams::default()).unwrap();
        let config = HeightmapConfig {
            size_px: 8,
            extent_m: 40.0,
            time_s: 3.0,
        };
        let img = render_heightmap(&field, &config);
        let (x, z) = config.pixel_to_world(5, 2);
        let h = field.height(x, z, 3.0);
        let expected = ((h / field.amplitude_bound()) * 0.5 + 0.5) * 255.0;
        let got = img.get_pixel(5, 2).0[0] as f32;
        assert!((got - expected).abs() <= 0.5 + 1e-3);
    }
}
