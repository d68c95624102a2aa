//! Wave field: superposed directional sinusoids.
//!
//! One set of precomputed terms drives every consumer. The physics step calls
//! [`WaveField::height`] / [`WaveField::normal`] directly and the renderer
//! gets the same terms as WGSL source from [`WaveField::wgsl_functions`], so
//! the vessel always sits on the surface that is drawn beneath it.

use std::f32::consts::TAU;
use std::fmt::Write;

use glam::{Vec2, Vec3};

use crate::error::ConfigError;
use crate::params::{OceanParams, WaveComponent};

/// Gravitational acceleration for the deep-water dispersion relation (m/s²)
pub const GRAVITY_M_PER_S2: f32 = 9.81;

/// A wave component reduced to the constants the height formula uses.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WaveTerm {
    pub dir_x: f32,
    pub dir_z: f32,
    pub amplitude: f32,
    /// Wavenumber `2π / wavelength` (rad/m)
    pub k: f32,
    /// Angular frequency `speed · sqrt(g·k)` (rad/s)
    pub omega: f32,
}

impl WaveTerm {
    fn from_component(c: &WaveComponent) -> Self {
        let k = TAU / c.wavelength_m;
        Self {
            dir_x: c.direction[0],
            dir_z: c.direction[1],
            amplitude: c.amplitude_m,
            k,
            omega: c.speed * (GRAVITY_M_PER_S2 * k).sqrt(),
        }
    }

    #[inline]
    fn phase(&self, x: f32, z: f32, t: f32) -> f32 {
        self.k * (self.dir_x * x + self.dir_z * z) + self.omega * t
    }
}

/// Deterministic ocean surface, a pure function of `(x, z, t)`.
#[derive(Debug, Clone)]
pub struct WaveField {
    components: Vec<WaveComponent>,
    terms: Vec<WaveTerm>,
}

impl WaveField {
    /// Build a field from an ordered component list.
    pub fn new(components: Vec<WaveComponent>) -> Result<Self, ConfigError> {
        if components.is_empty() {
            return Err(ConfigError::NoWaveComponents);
        }
        for (index, component) in components.iter().enumerate() {
            component.validate(index)?;
        }
        let terms = components.iter().map(WaveTerm::from_component).collect();
        Ok(Self { components, terms })
    }

    pub fn from_params(params: &OceanParams) -> Result<Self, ConfigError> {
        Self::new(params.waves.clone())
    }

    pub fn components(&self) -> &[WaveComponent] {
        &self.components
    }

    pub fn terms(&self) -> &[WaveTerm] {
        &self.terms
    }

    /// Surface height at world position (x, z) and time t (meters)
    pub fn height(&self, x: f32, z: f32, t: f32) -> f32 {
        let mut h = 0.0;
        for term in &self.terms {
            h += term.amplitude * term.phase(x, z, t).sin();
        }
        h
    }

    /// Surface gradient (∂h/∂x, ∂h/∂z)
    pub fn slope(&self, x: f32, z: f32, t: f32) -> Vec2 {
        let mut dhdx = 0.0;
        let mut dhdz = 0.0;
        for term in &self.terms {
            let c = term.phase(x, z, t).cos();
            dhdx += term.amplitude * term.k * term.dir_x * c;
            dhdz += term.amplitude * term.k * term.dir_z * c;
        }
        Vec2::new(dhdx, dhdz)
    }

    /// Unit surface normal from the height-field gradient.
    ///
    /// First-order approximation, exact only for small slopes. The vertical
    /// component is always 1 before normalising, so the length is never 0.
    pub fn normal(&self, x: f32, z: f32, t: f32) -> Vec3 {
        let slope = self.slope(x, z, t);
        Vec3::new(-slope.x, 1.0, -slope.y).normalize()
    }

    /// Largest possible |height|: the sum of amplitudes
    pub fn amplitude_bound(&self) -> f32 {
        self.terms.iter().map(|t| t.amplitude).sum()
    }

    /// WGSL source for `wave_height(wx, wz, t) -> f32` and
    /// `wave_normal(wx, wz, t) -> vec3<f32>`.
    ///
    /// Loops are unrolled with the constants inlined, same order and same
    /// expression shape as the CPU path. Literals use the shortest
    /// round-trip representation with an `f` suffix so the shader compiler
    /// reads back exactly the `f32` values used here.
    pub fn wgsl_functions(&self) -> String {
        let mut src = String::new();

        src.push_str("fn wave_height(wx: f32, wz: f32, t: f32) -> f32 {\n");
        src.push_str("    var h: f32 = 0.0f;\n");
        for term in &self.terms {
            let _ = writeln!(
                src,
                "    h = h + {} * sin({});",
                wgsl_f32(term.amplitude),
                wgsl_phase(term)
            );
        }
        src.push_str("    return h;\n}\n\n");

        src.push_str("fn wave_normal(wx: f32, wz: f32, t: f32) -> vec3<f32> {\n");
        src.push_str("    var dhdx: f32 = 0.0f;\n");
        src.push_str("    var dhdz: f32 = 0.0f;\n");
        src.push_str("    var c: f32;\n");
        for term in &self.terms {
            let (a, k) = (wgsl_f32(term.amplitude), wgsl_f32(term.k));
            let _ = writeln!(src, "    c = cos({});", wgsl_phase(term));
            let _ = writeln!(
                src,
                "    dhdx = dhdx + {a} * {k} * {} * c;",
                wgsl_f32(term.dir_x)
            );
            let _ = writeln!(
                src,
                "    dhdz = dhdz + {a} * {k} * {} * c;",
                wgsl_f32(term.dir_z)
            );
        }
        src.push_str("    return normalize(vec3<f32>(-dhdx, 1.0f, -dhdz));\n}\n");

        src
    }
}

fn wgsl_phase(term: &WaveTerm) -> String {
    format!(
        "{} * ({} * wx + {} * wz) + {} * t",
        wgsl_f32(term.k),
        wgsl_f32(term.dir_x),
        wgsl_f32(term.dir_z),
        wgsl_f32(term.omega)
    )
}

/// Format an `f32` as a WGSL `f32` literal that parses back bit-identical.
pub(crate) fn wgsl_f32(value: f32) -> String {
    // `{:?}` is the shortest representation that round-trips and always
    // carries a decimal point or exponent.
    if value.is_sign_negative() {
        format!("({:?}f)", value)
    } else {
        format!("{:?}f", value)
    }
}
