//! Ocean grid mesh, displaced on the CPU by the wave field.
//!
//! The GPU path uploads the grid flat and lets `wave_height` displace it in
//! the vertex shader. [`OceanGrid::displace`] runs the same field on the CPU,
//! as a fallback and as the reference the shader output is compared against.

use bytemuck::{Pod, Zeroable};
use glam::Vec2;

use super::waves::WaveField;
use crate::params::OceanParams;

/// Vertex data for ocean mesh (position + normal + UV coordinates)
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub uv: [f32; 2],
}

impl Vertex {
    const ATTRIBUTES: [wgpu::VertexAttribute; 3] =
        wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x3, 2 => Float32x2];

    /// Vertex buffer layout matching the `VertexInput` of the ocean shader
    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRIBUTES,
        }
    }
}

/// Square ocean grid centred on a movable origin
pub struct OceanGrid {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
    /// Flat XZ offset of every vertex from the grid origin
    rest_xz: Vec<Vec2>,
    grid_size: usize,
}

impl OceanGrid {
    /// Create a flat grid with `grid_size` quads per side
    pub fn new(params: &OceanParams) -> Self {
        let grid_size = params.grid_size;
        let grid_spacing = params.grid_spacing_m;
        let half_size = (grid_size as f32 * grid_spacing) / 2.0;

        let side = grid_size + 1;
        let mut vertices = Vec::with_capacity(side * side);
        let mut rest_xz = Vec::with_capacity(side * side);
        let mut indices = Vec::with_capacity(grid_size * grid_size * 6);

        // Generate flat XZ plane grid
        for z in 0..=grid_size {
            for x in 0..=grid_size {
                let x_pos = x as f32 * grid_spacing - half_size;
                let z_pos = z as f32 * grid_spacing - half_size;

                rest_xz.push(Vec2::new(x_pos, z_pos));
                vertices.push(Vertex {
                    position: [x_pos, 0.0, z_pos],
                    normal: [0.0, 1.0, 0.0],
                    uv: [x as f32 / grid_size as f32, z as f32 / grid_size as f32],
                });
            }
        }

        // Generate triangle indices (counter-clockwise winding seen from +Y)
        for z in 0..grid_size {
            for x in 0..grid_size {
                let top_left = (z * side + x) as u32;
                let top_right = top_left + 1;
                let bottom_left = ((z + 1) * side + x) as u32;
                let bottom_right = bottom_left + 1;

                indices.extend_from_slice(&[
                    top_left,
                    bottom_left,
                    top_right,
                    top_right,
                    bottom_left,
                    bottom_right,
                ]);
            }
        }

        Self {
            vertices,
            indices,
            rest_xz,
            grid_size,
        }
    }

    pub fn grid_size(&self) -> usize {
        self.grid_size
    }

    /// Re-centre the grid on `origin_xz` and displace it to the surface at `time_s`
    pub fn displace(&mut self, field: &WaveField, time_s: f32, origin_xz: Vec2) {
        for (vertex, rest) in self.vertices.iter_mut().zip(&self.rest_xz) {
            let world = origin_xz + *rest;
            vertex.position = [world.x, field.height(world.x, world.y, time_s), world.y];
            vertex.normal = field.normal(world.x, world.y, time_s).to_array();
        }
    }
}
