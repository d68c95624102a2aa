//! Ocean surface: the canonical wave field and everything derived from it.

mod heightmap;
mod mesh;
mod shader;
mod waves;

// Re-export public API
pub use heightmap::render_heightmap;
pub use mesh::{OceanGrid, Vertex};
pub use shader::{ocean_shader_descriptor, ocean_shader_source, OceanUniforms};
pub use waves::{WaveField, WaveTerm, GRAVITY_M_PER_S2};
