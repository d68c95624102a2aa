//! Steering helpers for the motion controller.
//!
//! Plain functions on `glam` values so the autopilot rules can be tested
//! without a vessel.

use std::f32::consts::{PI, TAU};

use glam::Vec2;

/// Speeds below this are treated as stationary when rescaling
const MIN_RESCALE_SPEED: f32 = 1e-6;

/// Unit forward vector in XZ for a heading (0 = +X, positive turns toward -Z)
#[inline]
pub fn forward(heading: f32) -> Vec2 {
    Vec2::new(heading.cos(), -heading.sin())
}

/// Heading that points along `to_target` (inverse of [`forward`])
#[inline]
pub fn bearing(to_target: Vec2) -> f32 {
    (-to_target.y).atan2(to_target.x)
}

/// Wrap an angle into `(-π, π]`
pub fn wrap_angle(angle: f32) -> f32 {
    let wrapped = (angle + PI).rem_euclid(TAU) - PI;
    if wrapped <= -PI {
        wrapped + TAU
    } else {
        wrapped
    }
}

/// Turn from `heading` toward `bearing` by the shortest way, at most
/// `max_turn` radians. Never snaps.
pub fn turn_toward(heading: f32, bearing: f32, max_turn: f32) -> f32 {
    let diff = wrap_angle(bearing - heading);
    wrap_angle(heading + diff.clamp(-max_turn, max_turn))
}

/// Autopilot throttle: full outside `slow_radius`, then a linear ramp down
/// to `floor`.
pub fn throttle(distance: f32, slow_radius: f32, floor: f32) -> f32 {
    (distance / slow_radius).clamp(floor, 1.0)
}

/// Uniformly rescale `velocity` so its length does not exceed `cap`.
/// Direction is preserved; near-zero velocities are left alone.
pub fn cap_speed(velocity: Vec2, cap: f32) -> Vec2 {
    let speed = velocity.length();
    if speed > cap && speed > MIN_RESCALE_SPEED {
        velocity * (cap / speed)
    } else {
        velocity
    }
}
