//! Desktop orbit camera
//!
//! Rotates and zooms around a target point. While disabled (an immersive
//! session owns the camera) input is ignored.

use glam::{Mat4, Vec2, Vec3};

use crate::config::CameraConfig;

/// Orbit camera controller
pub struct OrbitController {
    /// Configuration
    pub config: CameraConfig,
    /// Whether desktop input drives the camera
    enabled: bool,
    /// Yaw around the target in radians (0 = looking down -Z)
    yaw: f32,
    /// Pitch above the target's horizon in radians
    pitch: f32,
    /// Distance from the target
    distance: f32,
    /// Camera world position
    position: Vec3,
    /// Point the camera orbits and looks at
    target: Vec3,
}

impl OrbitController {
    /// Create a controller at the configured default pose
    pub fn new(config: CameraConfig) -> Self {
        let mut controller = Self {
            enabled: true,
            yaw: 0.0,
            pitch: 0.0,
            distance: 0.0,
            position: config.default_position,
            target: config.default_target,
            config,
        };
        controller.set_pose(controller.position, controller.target);
        controller
    }

    /// Place the camera. Position and target are stored exactly as given.
    pub fn set_pose(&mut self, position: Vec3, target: Vec3) {
        self.position = position;
        self.target = target;

        let offset = position - target;
        self.distance = offset.length();
        if self.distance > f32::EPSILON {
            self.pitch = (offset.y / self.distance).clamp(-1.0, 1.0).asin();
            self.yaw = offset.x.atan2(offset.z);
        }
    }

    /// Get the camera's current world position
    pub fn position(&self) -> Vec3 {
        self.position
    }

    /// Get the point the camera is looking at
    pub fn target(&self) -> Vec3 {
        self.target
    }

    pub fn distance(&self) -> f32 {
        self.distance
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// Get the view matrix
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.target, Vec3::Y)
    }

    /// Get a projection matrix
    pub fn projection_matrix(&self, aspect_ratio: f32) -> Mat4 {
        Mat4::perspective_rh(
            self.config.fov.to_radians(),
            aspect_ratio,
            self.config.near,
            self.config.far,
        )
    }

    /// Orbit around the target from a mouse drag
    pub fn handle_mouse_look(&mut self, mouse_delta: Vec2) {
        if !self.enabled {
            return;
        }
        self.yaw -= mouse_delta.x * self.config.sensitivity;

        self.pitch += mouse_delta.y * self.config.sensitivity;
        let pitch_min = self.config.pitch_min.to_radians();
        let pitch_max = self.config.pitch_max.to_radians();
        self.pitch = self.pitch.clamp(pitch_min, pitch_max);

        self.update_position();
    }

    /// Dolly towards or away from the target from the scroll wheel
    pub fn handle_zoom(&mut self, scroll_delta: f32) {
        if !self.enabled {
            return;
        }
        self.distance -= scroll_delta * self.config.zoom_speed;
        self.distance = self
            .distance
            .clamp(self.config.min_distance, self.config.max_distance);

        self.update_position();
    }

    fn update_position(&mut self) {
        let cos_pitch = self.pitch.cos();
        let offset = Vec3::new(
            self.yaw.sin() * cos_pitch,
            self.pitch.sin(),
            self.yaw.cos() * cos_pitch,
        );
        self.position = self.target + offset * self.distance;
    }
}
