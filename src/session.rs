//! Per-tick orchestration of the wave field, vessel, navigation and camera.
//!
//! The session is the only writer of simulation state. Each tick runs the
//! same fixed order: clock, motion against the target held *before* the
//! tick, navigation reaction, dwell poll, camera.

use glam::{Mat4, Vec3};
use log::{debug, warn};

use crate::camera::{CameraPose, CameraRig};
use crate::error::ConfigError;
use crate::islands::{IslandId, IslandRegistry};
use crate::navigation::{NavAction, NavigationState, Navigator};
use crate::ocean::{OceanUniforms, WaveField};
use crate::params::{RenderConfig, SimulationParams};
use crate::vessel::{
    InputSnapshot, MotionSignal, MotionStep, VesselController, VesselPose, VesselState,
};

/// What happened during one [`Session::tick`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickReport {
    /// Simulation time after the tick (seconds)
    pub time_s: f64,
    /// Delta actually integrated (0 when skipped)
    pub delta_s: f32,
    /// Delta was not finite or not positive; nothing moved
    pub skipped: bool,
    /// Delta exceeded `max_delta_s` and was clamped
    pub clamped: bool,
    /// Motion result, `None` when skipped
    pub motion: Option<MotionStep>,
    /// The dwell timer fired and the tour advanced
    pub tour_advanced: bool,
}

impl TickReport {
    fn skipped(time_s: f64) -> Self {
        Self {
            time_s,
            delta_s: 0.0,
            skipped: true,
            clamped: false,
            motion: None,
            tour_advanced: false,
        }
    }
}

pub struct Session {
    params: SimulationParams,
    field: WaveField,
    vessel: VesselController,
    navigator: Navigator,
    camera: CameraRig,
    /// Accumulated in f64 so long sessions keep advancing at 1/60 s steps
    time_s: f64,
    ticks: u64,
}

impl Session {
    pub fn new(params: SimulationParams, registry: IslandRegistry) -> Result<Self, ConfigError> {
        params.validate()?;
        let field = WaveField::from_params(&params.ocean)?;
        let vessel = VesselController::new(
            params.vessel.clone(),
            Vec3::from_array(params.start_position),
            params.start_heading_rad,
        );
        let navigator = Navigator::new(registry, &params.navigation);
        let camera = CameraRig::new(params.camera.clone());

        Ok(Self {
            params,
            field,
            vessel,
            navigator,
            camera,
            time_s: 0.0,
            ticks: 0,
        })
    }

    /// Advance the simulation by `delta_s` seconds of wall time
    pub fn tick(&mut self, input: InputSnapshot, delta_s: f32) -> TickReport {
        if !delta_s.is_finite() || delta_s <= 0.0 {
            warn!("Skipping tick with unusable delta {delta_s}");
            return TickReport::skipped(self.time_s);
        }
        let clamped = delta_s > self.params.max_delta_s;
        let delta_s = if clamped {
            debug!(
                "Clamping delta {delta_s:.3}s to {:.3}s",
                self.params.max_delta_s
            );
            self.params.max_delta_s
        } else {
            delta_s
        };

        self.time_s += f64::from(delta_s);
        self.ticks += 1;

        let target = self.navigator.autopilot_target();
        let motion = self
            .vessel
            .tick(&self.field, input, target, self.wave_time_s(), delta_s);
        match motion.signal {
            Some(signal) => self.navigator.react(signal, self.time_s),
            // Steering while paused at a tour stop abandons the tour too
            None if input.any() && self.navigator.dwell().is_pending() => {
                self.navigator.react(MotionSignal::Interrupted, self.time_s)
            }
            None => {}
        }

        let tour_advanced = self.navigator.poll(self.time_s);

        self.camera.update(
            self.vessel.state().position,
            self.navigator.state().autopilot_active(),
        );

        TickReport {
            time_s: self.time_s,
            delta_s,
            skipped: false,
            clamped,
            motion: Some(motion),
            tour_advanced,
        }
    }

    /// Destination boundary for UI collaborators (welcome screen, minimap,
    /// quick-nav, island panel)
    pub fn dispatch(&mut self, action: NavAction) {
        self.navigator.dispatch(action, self.time_s);
    }

    /// Quick-nav number key. Returns the island it resolved to, if any.
    pub fn hotkey(&mut self, number: u32) -> Option<IslandId> {
        let id = self.navigator.registry().by_hotkey(number)?;
        self.dispatch(NavAction::NavigateTo(id));
        Some(id)
    }

    pub fn params(&self) -> &SimulationParams {
        &self.params
    }

    pub fn time_s(&self) -> f64 {
        self.time_s
    }

    /// Simulation time as fed to the wave field and the ocean shader
    pub fn wave_time_s(&self) -> f32 {
        self.time_s as f32
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn wave_field(&self) -> &WaveField {
        &self.field
    }

    pub fn registry(&self) -> &IslandRegistry {
        self.navigator.registry()
    }

    pub fn navigation(&self) -> &NavigationState {
        self.navigator.state()
    }

    pub fn navigator(&self) -> &Navigator {
        &self.navigator
    }

    pub fn vessel(&self) -> &VesselState {
        self.vessel.state()
    }

    pub fn vessel_pose(&self) -> VesselPose {
        self.vessel.pose()
    }

    pub fn camera_pose(&self) -> CameraPose {
        self.camera.pose()
    }

    pub fn view_proj(&self, render_config: &RenderConfig) -> Mat4 {
        self.camera.view_proj(render_config)
    }

    /// Uniforms for the ocean shader at the current time
    pub fn ocean_uniforms(&self, render_config: &RenderConfig) -> OceanUniforms {
        OceanUniforms::new(self.view_proj(render_config), self.wave_time_s())
    }

    /// Islands close enough to the vessel to show their marker
    pub fn nearby_islands(&self) -> Vec<IslandId> {
        self.registry()
            .within(
                self.vessel.state().position,
                self.params.navigation.marker_radius_m,
            )
            .collect()
    }
}
