//! Ocean shader generation for the GPU evaluation path.
//!
//! The WGSL is assembled at startup from the live [`WaveField`], never kept as
//! a hand-written copy of the wave math.

use std::borrow::Cow;

use bytemuck::{Pod, Zeroable};

use super::waves::WaveField;

/// Uniform buffer for the ocean shader (view-projection matrix + wave time)
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct OceanUniforms {
    pub view_proj: [[f32; 4]; 4],
    pub time: f32,
    pub _padding: [f32; 3], // Padding for 16-byte alignment
}

impl OceanUniforms {
    pub fn new(view_proj: glam::Mat4, time: f32) -> Self {
        Self {
            view_proj: view_proj.to_cols_array_2d(),
            time,
            _padding: [0.0; 3],
        }
    }
}

const SHADER_HEADER: &str = r#"struct OceanUniforms {
    view_proj: mat4x4<f32>,
    time: f32,
    _pad0: f32,
    _pad1: f32,
    _pad2: f32,
};

@group(0) @binding(0)
var<uniform> uniforms: OceanUniforms;

struct VertexInput {
    @location(0) position: vec3<f32>,
    @location(1) normal: vec3<f32>,
    @location(2) uv: vec2<f32>,
};

struct VertexOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) world_pos: vec3<f32>,
    @location(1) normal: vec3<f32>,
    @location(2) elevation: f32,
};
"#;

const SHADER_STAGES: &str = r#"
@vertex
fn vs_main(in: VertexInput) -> VertexOutput {
    var out: VertexOutput;
    // Grid vertices are flat and already in world XZ
    let elevation = wave_height(in.position.x, in.position.z, uniforms.time);
    let world = vec3<f32>(in.position.x, in.position.y + elevation, in.position.z);
    out.clip_position = uniforms.view_proj * vec4<f32>(world, 1.0);
    out.world_pos = world;
    out.normal = wave_normal(in.position.x, in.position.z, uniforms.time);
    out.elevation = elevation;
    return out;
}

@fragment
fn fs_main(in: VertexOutput) -> @location(0) vec4<f32> {
    let deep_color = vec3<f32>(0.0, 0.20, 0.45);
    let shallow_color = vec3<f32>(0.0, 0.50, 0.75);
    let foam_color = vec3<f32>(0.92, 0.97, 1.0);

    // Blend deep/shallow by elevation, foam on crests
    var color = mix(deep_color, shallow_color, clamp(in.elevation + 0.5, 0.0, 1.0));
    let foam = smoothstep(0.25, 0.55, in.elevation);
    color = mix(color, foam_color, foam * 0.65);

    let shimmer = sin(in.world_pos.x * 3.1 + uniforms.time * 2.1)
        * sin(in.world_pos.z * 2.6 + uniforms.time * 1.8) * 0.04;
    color = color + vec3<f32>(shimmer);

    let sun = normalize(vec3<f32>(0.3, 1.0, 0.2));
    let diffuse = max(dot(normalize(in.normal), sun), 0.0);
    return vec4<f32>(color * (0.6 + 0.4 * diffuse), 0.93);
}
"#;

/// Complete ocean shader (vertex + fragment) for `field`.
///
/// Entry points: `vs_main`, `fs_main`. Bind group 0, binding 0 holds
/// [`OceanUniforms`].
pub fn ocean_shader_source(field: &WaveField) -> String {
    let waves = field.wgsl_functions();
    let mut src = String::with_capacity(SHADER_HEADER.len() + waves.len() + SHADER_STAGES.len() + 1);
    src.push_str(SHADER_HEADER);
    src.push('\n');
    src.push_str(&waves);
    src.push_str(SHADER_STAGES);
    src
}

/// Shader module descriptor ready for `wgpu::Device::create_shader_module`.
pub fn ocean_shader_descriptor(field: &WaveField) -> wgpu::ShaderModuleDescriptor<'static> {
    wgpu::ShaderModuleDescriptor {
        label: Some("Ocean Shader"),
        source: wgpu::ShaderSource::Wgsl(Cow::Owned(ocean_shader_source(field))),
    }
}
