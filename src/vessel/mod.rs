//! Vessel motion controller.
//!
//! Ticked once per frame. Each tick is exactly one of:
//!
//! - **Manual**: no autopilot target, or input is held. Keys steer and thrust.
//! - **Autopilot**: a target and no input. Steers toward the target with a
//!   clamped turn rate and throttles back inside the slow radius.
//! - **Interrupt**: a target *and* input in the same tick. Emits
//!   [`MotionSignal::Interrupted`] and runs the manual step with that same
//!   input, so no frame of control is lost.
//!
//! The vessel never integrates vertically. After XZ moves, `y` is snapped to
//! the wave surface plus the waterline offset, and the surface normal tilts
//! the hull.

mod steering;

pub use steering::{bearing, cap_speed, forward, throttle, turn_toward, wrap_angle};

use glam::{Quat, Vec2, Vec3};
use log::debug;

use crate::islands::IslandId;
use crate::ocean::WaveField;
use crate::params::VesselParams;

/// Per-tick key state. "Any pressed" is derived, not stored.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InputSnapshot {
    pub forward: bool,
    pub backward: bool,
    pub left: bool,
    pub right: bool,
}

impl InputSnapshot {
    pub const IDLE: Self = Self {
        forward: false,
        backward: false,
        left: false,
        right: false,
    };

    pub fn any(&self) -> bool {
        self.forward || self.backward || self.left || self.right
    }
}

/// Authoritative vessel state. `position.y` is derived every tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VesselState {
    /// World position (meters)
    pub position: Vec3,
    /// Heading in `(-π, π]` (radians, 0 = +X)
    pub heading: f32,
    /// Horizontal velocity (vx, vz) (m/s)
    pub velocity: Vec2,
}

impl VesselState {
    pub fn position_xz(&self) -> Vec2 {
        Vec2::new(self.position.x, self.position.z)
    }

    /// Horizontal speed (m/s)
    pub fn speed(&self) -> f32 {
        self.velocity.length()
    }
}

/// Where the autopilot is heading, resolved from the island registry
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AutopilotTarget {
    pub id: IslandId,
    pub position_xz: Vec2,
}

/// Events the motion controller reports to navigation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MotionSignal {
    /// The autopilot reached the island and stopped
    Arrived(IslandId),
    /// Manual input took over from the autopilot
    Interrupted,
}

/// Which branch a tick ran
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlMode {
    Manual,
    Autopilot,
}

/// Result of one motion tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MotionStep {
    pub mode: ControlMode,
    pub signal: Option<MotionSignal>,
    /// Throttle applied this tick (1.0 under manual control)
    pub throttle: f32,
}

/// Visual placement of the hull
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VesselPose {
    pub position: Vec3,
    pub heading: f32,
    /// Heading rotation followed by the surface tilt
    pub orientation: Quat,
    /// Wave normal under the hull
    pub surface_normal: Vec3,
}

/// Integrates vessel motion. The single writer of [`VesselState`].
pub struct VesselController {
    params: VesselParams,
    state: VesselState,
    surface_normal: Vec3,
}

impl VesselController {
    pub fn new(params: VesselParams, start_position: Vec3, start_heading: f32) -> Self {
        Self {
            params,
            state: VesselState {
                position: start_position,
                heading: wrap_angle(start_heading),
                velocity: Vec2::ZERO,
            },
            surface_normal: Vec3::Y,
        }
    }

    pub fn params(&self) -> &VesselParams {
        &self.params
    }

    pub fn state(&self) -> &VesselState {
        &self.state
    }

    pub fn pose(&self) -> VesselPose {
        VesselPose {
            position: self.state.position,
            heading: self.state.heading,
            orientation: orientation(self.state.heading, self.surface_normal),
            surface_normal: self.surface_normal,
        }
    }

    /// Advance one tick.
    ///
    /// `target` is the navigation target as it stood *before* this tick.
    /// `delta_s` must already be sanitised (finite, positive, bounded).
    pub fn tick(
        &mut self,
        field: &WaveField,
        input: InputSnapshot,
        target: Option<AutopilotTarget>,
        time_s: f32,
        delta_s: f32,
    ) -> MotionStep {
        let step = match target {
            Some(target) if input.any() => {
                debug!("manual input interrupts autopilot toward {}", target.id);
                self.steer_manual(input, delta_s);
                MotionStep {
                    mode: ControlMode::Manual,
                    signal: Some(MotionSignal::Interrupted),
                    throttle: 1.0,
                }
            }
            Some(target) => self.steer_autopilot(target, delta_s),
            None => {
                self.steer_manual(input, delta_s);
                MotionStep {
                    mode: ControlMode::Manual,
                    signal: None,
                    throttle: 1.0,
                }
            }
        };

        self.integrate(field, time_s, delta_s);
        step
    }

    fn steer_manual(&mut self, input: InputSnapshot, delta_s: f32) {
        let p = &self.params;
        let turn = p.turn_rate_rad_per_s * delta_s;
        let mut heading = self.state.heading;
        if input.left {
            heading += turn;
        }
        if input.right {
            heading -= turn;
        }
        self.state.heading = wrap_angle(heading);

        let dir = forward(self.state.heading);
        let mut velocity = self.damped_velocity(delta_s);
        if input.forward {
            velocity += dir * p.thrust_accel_m_per_s2 * delta_s;
        }
        if input.backward {
            velocity -= dir * p.thrust_accel_m_per_s2 * p.backward_thrust_factor * delta_s;
        }
        self.state.velocity = cap_speed(velocity, p.max_speed_m_per_s);
    }

    fn steer_autopilot(&mut self, target: AutopilotTarget, delta_s: f32) -> MotionStep {
        let p = &self.params;
        let to_target = target.position_xz - self.state.position_xz();
        let distance = to_target.length();

        if distance < p.arrive_radius_m {
            self.state.velocity = Vec2::ZERO;
            return MotionStep {
                mode: ControlMode::Autopilot,
                signal: Some(MotionSignal::Arrived(target.id)),
                throttle: 0.0,
            };
        }

        self.state.heading = turn_toward(
            self.state.heading,
            bearing(to_target),
            p.turn_rate_rad_per_s * delta_s,
        );

        let throttle = throttle(distance, p.slow_radius_m, p.throttle_floor);
        let thrust = forward(self.state.heading) * p.thrust_accel_m_per_s2 * throttle * delta_s;
        let velocity = self.damped_velocity(delta_s) + thrust;
        self.state.velocity = cap_speed(velocity, p.max_speed_m_per_s * throttle);

        MotionStep {
            mode: ControlMode::Autopilot,
            signal: None,
            throttle,
        }
    }

    /// Exponential drag, frame-rate independent
    fn damped_velocity(&self, delta_s: f32) -> Vec2 {
        self.state.velocity * (-self.params.linear_damping_per_s * delta_s).exp()
    }

    fn integrate(&mut self, field: &WaveField, time_s: f32, delta_s: f32) {
        let position = &mut self.state.position;
        position.x += self.state.velocity.x * delta_s;
        position.z += self.state.velocity.y * delta_s;

        // Ride the surface; y is never integrated
        position.y = field.height(position.x, position.z, time_s) + self.params.waterline_offset_m;
        self.surface_normal = field.normal(position.x, position.z, time_s);
    }
}

/// Heading first, then align the up vector with the wave normal, so the
/// tilt never fights the steering.
pub fn orientation(heading: f32, surface_normal: Vec3) -> Quat {
    Quat::from_rotation_arc(Vec3::Y, surface_normal) * Quat::from_rotation_y(heading)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::OceanParams;
    use approx::assert_relative_eq;
    use proptest::prelude::*;

    const DT: f32 = 1.0 / 60.0;

    fn field() -> WaveField {
        WaveField::from_params(&OceanParams::default()).unwrap()
    }

    fn controller() -> VesselController {
        VesselController::new(VesselParams::default(), Vec3::new(0.0, 1.0, 0.0), 0.0)
    }

    fn target(x: f32, z: f32) -> AutopilotTarget {
        AutopilotTarget {
            id: IslandId("about"),
            position_xz: Vec2::new(x, z),
        }
    }

    const FORWARD: InputSnapshot = InputSnapshot {
        forward: true,
        ..InputSnapshot::IDLE
    };

    #[test]
    fn test_y_follows_surface() {
        let field = field();
        let mut vessel = controller();
        vessel.tick(&field, InputSnapshot::IDLE, None, 2.5, DT);
        let p = vessel.state().position;
        assert_eq!(p.y, field.height(p.x, p.z, 2.5) + 0.3);
    }

    #[test]
    fn test_forward_thrust_moves_along_heading() {
        let field = field();
        let mut vessel = controller();
        for i in 0..30 {
            vessel.tick(&field, FORWARD, None, i as f32 * DT, DT);
        }
        let s = vessel.state();
        assert!(s.position.x > 0.0);
        assert_relative_eq!(s.position.z, 0.0);
        assert!(s.velocity.x > 0.0);
    }

    #[test]
    fn test_backward_thrust_is_half() {
        let field = field();
        let mut ahead = controller();
        let mut astern = controller();
        let back = InputSnapshot {
            backward: true,
            ..InputSnapshot::IDLE
        };
        ahead.tick(&field, FORWARD, None, 0.0, DT);
        astern.tick(&field, back, None, 0.0, DT);
        assert_relative_eq!(
            astern.state().velocity.x,
            -0.5 * ahead.state().velocity.x,
            epsilon = 1e-6
        );
    }

    #[test]
    fn test_left_turns_positive() {
        let field = field();
        let mut vessel = controller();
        let left = InputSnapshot {
            left: true,
            ..InputSnapshot::IDLE
        };
        vessel.tick(&field, left, None, 0.0, 0.1);
        assert_relative_eq!(vessel.state().heading, 0.18, epsilon = 1e-6);
    }

    #[test]
    fn test_drag_decays_velocity() {
        let field = field();
        let mut vessel = controller();
        vessel.state.velocity = Vec2::new(10.0, 0.0);
        vessel.tick(&field, InputSnapshot::IDLE, None, 0.0, 1.0);
        assert_relative_eq!(vessel.state().velocity.x, 10.0 * (-1.5_f32).exp(), epsilon = 1e-5);
    }

    #[test]
    fn test_arrival_stops_and_signals() {
        let field = field();
        let mut vessel = controller();
        vessel.state.velocity = Vec2::new(3.0, 0.0);
        let step = vessel.tick(&field, InputSnapshot::IDLE, Some(target(5.0, 0.0)), 0.0, DT);
        assert_eq!(step.signal, Some(MotionSignal::Arrived(IslandId("about"))));
        assert_eq!(step.mode, ControlMode::Autopilot);
        assert_eq!(vessel.state().velocity, Vec2::ZERO);
    }

    #[test]
    fn test_input_interrupts_and_still_steers() {
        let field = field();
        let mut vessel = controller();
        let step = vessel.tick(&field, FORWARD, Some(target(100.0, 0.0)), 0.0, DT);
        assert_eq!(step.signal, Some(MotionSignal::Interrupted));
        assert_eq!(step.mode, ControlMode::Manual);
        // Same-tick input was applied
        assert!(vessel.state().velocity.x > 0.0);
    }

    #[test]
    fn test_autopilot_turns_gradually() {
        let field = field();
        let mut vessel = controller();
        // Target directly behind: needs a half turn
        vessel.tick(&field, InputSnapshot::IDLE, Some(target(-50.0, 0.0)), 0.0, DT);
        assert_relative_eq!(vessel.state().heading.abs(), 1.8 * DT, epsilon = 1e-6);
    }

    #[test]
    fn test_autopilot_throttles_inside_slow_radius() {
        let field = field();
        let mut vessel = controller();
        let far = vessel.tick(&field, InputSnapshot::IDLE, Some(target(100.0, 0.0)), 0.0, DT);
        assert_eq!(far.throttle, 1.0);

        let mut vessel = controller();
        let near = vessel.tick(&field, InputSnapshot::IDLE, Some(target(12.0, 0.0)), 0.0, DT);
        assert!(near.throttle < 1.0 && near.throttle >= 0.3);
    }

    #[test]
    fn test_pose_tilt_follows_heading_then_normal() {
        let normal = Vec3::new(0.2, 1.0, 0.0).normalize();
        let q = orientation(0.7, normal);
        // Up vector lands on the surface normal regardless of heading
        let up = q * Vec3::Y;
        assert_relative_eq!(up.x, normal.x, epsilon = 1e-5);
        assert_relative_eq!(up.y, normal.y, epsilon = 1e-5);
        // Flat water: pure heading rotation
        let flat = orientation(0.7, Vec3::Y) * Vec3::X;
        assert_relative_eq!(flat.x, 0.7_f32.cos(), epsilon = 1e-5);
        assert_relative_eq!(flat.z, -(0.7_f32.sin()), epsilon = 1e-5);
    }

    fn any_input() -> impl Strategy<Value = InputSnapshot> {
        (any::<bool>(), any::<bool>(), any::<bool>(), any::<bool>()).prop_map(
            |(forward, backward, left, right)| InputSnapshot {
                forward,
                backward,
                left,
                right,
            },
        )
    }

    proptest! {
        #[test]
        fn manual_speed_never_exceeds_cap(
            inputs in prop::collection::vec(any_input(), 1..200),
            dt in 0.001f32..0.1,
        ) {
            let field = field();
            let mut vessel = controller();
            let cap = vessel.params().max_speed_m_per_s;
            for (i, input) in inputs.into_iter().enumerate() {
                vessel.tick(&field, input, None, i as f32 * dt, dt);
                prop_assert!(vessel.state().speed() <= cap * (1.0 + 1e-5));
            }
        }

        #[test]
        fn autopilot_respects_throttled_cap_and_turn_rate(
            tx in -80.0f32..80.0,
            tz in -80.0f32..80.0,
            heading in -3.1f32..3.1,
            vx in -15.0f32..15.0,
            vz in -15.0f32..15.0,
            dt in 0.001f32..0.1,
        ) {
            let field = field();
            let mut vessel = VesselController::new(VesselParams::default(), Vec3::ZERO, heading);
            vessel.state.velocity = cap_speed(Vec2::new(vx, vz), 15.0);
            let max_speed = vessel.params().max_speed_m_per_s;
            let max_turn = vessel.params().turn_rate_rad_per_s * dt;

            for i in 0..120 {
                let before = vessel.state().heading;
                let step = vessel.tick(&field, InputSnapshot::IDLE, Some(target(tx, tz)), i as f32 * dt, dt);
                let turned = wrap_angle(vessel.state().heading - before).abs();
                prop_assert!(turned <= max_turn + 1e-5, "turned {} > {}", turned, max_turn);
                prop_assert!(vessel.state().speed() <= max_speed * step.throttle * (1.0 + 1e-5) + 1e-6);
                if step.signal.is_some() {
                    break;
                }
            }
        }
    }
}
