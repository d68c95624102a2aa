//! Chase camera that follows the vessel with exponential smoothing.

use glam::{Mat4, Vec3};

use crate::params::{CameraParams, RenderConfig};

/// Where the camera is and what it looks at
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraPose {
    pub position: Vec3,
    pub look_at: Vec3,
}

/// Follow rig. Reads the vessel, never writes it.
pub struct CameraRig {
    params: CameraParams,
    pose: CameraPose,
    /// Offset currently in use, easing between the manual and autopilot ones
    offset: Vec3,
}

impl CameraRig {
    pub fn new(params: CameraParams) -> Self {
        let pose = CameraPose {
            position: Vec3::from_array(params.initial_position),
            look_at: Vec3::from_array(params.initial_look_at),
        };
        let offset = Vec3::from_array(params.normal_offset);
        Self {
            params,
            pose,
            offset,
        }
    }

    pub fn pose(&self) -> CameraPose {
        self.pose
    }

    pub fn offset(&self) -> Vec3 {
        self.offset
    }

    /// Offset the rig is easing toward
    pub fn target_offset(&self, autopilot_active: bool) -> Vec3 {
        if autopilot_active {
            Vec3::from_array(self.params.autopilot_offset)
        } else {
            Vec3::from_array(self.params.normal_offset)
        }
    }

    /// Advance one tick toward the vessel
    pub fn update(&mut self, vessel_position: Vec3, autopilot_active: bool) -> CameraPose {
        let p = &self.params;
        self.offset = self
            .offset
            .lerp(self.target_offset(autopilot_active), p.offset_lerp_per_tick);

        let desired = vessel_position + self.offset;
        self.pose.position = self.pose.position.lerp(desired, p.follow_lerp_per_tick);
        self.pose.look_at = self
            .pose
            .look_at
            .lerp(vessel_position, p.follow_lerp_per_tick);
        self.pose
    }

    /// View-projection matrix for the current pose
    pub fn view_proj(&self, render_config: &RenderConfig) -> Mat4 {
        // Y is always up; the camera never rolls
        let view = Mat4::look_at_rh(self.pose.position, self.pose.look_at, Vec3::Y);
        let proj = Mat4::perspective_rh(
            render_config.fov_degrees.to_radians(),
            render_config.aspect_ratio(),
            render_config.near_plane_m,
            render_config.far_plane_m,
        );
        proj * view
    }
}
