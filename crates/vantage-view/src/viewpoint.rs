//! Desktop camera pose and immersive world offset

use glam::Vec3;
use serde::Serialize;
use vantage_core::BoundingVolume;

use crate::config::CameraConfig;
use crate::policy::Framing;

/// Camera pose plus the vertical offset applied to the scene root.
///
/// `world_offset` is `-eye_height` while an immersive session is active and
/// zero otherwise.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ViewpointState {
    pub camera_position: Vec3,
    pub camera_target: Vec3,
    pub world_offset: f32,
}

impl ViewpointState {
    /// The configured startup pose
    pub fn from_config(config: &CameraConfig) -> Self {
        Self {
            camera_position: config.default_position,
            camera_target: config.default_target,
            world_offset: 0.0,
        }
    }
}

/// Frame normalized bounds for the desktop camera.
///
/// Degenerate bounds would put the camera on top of its target, so they get
/// the configured default pose instead.
pub fn plan_desktop(bounds: &BoundingVolume, framing: &Framing, config: &CameraConfig) -> ViewpointState {
    if bounds.is_degenerate() {
        return ViewpointState::from_config(config);
    }

    let center = bounds.center();
    let size = bounds.size();
    let camera_position = center + size * framing.camera;
    let camera_target = Vec3::new(center.x, center.y + size.y * framing.target_height, center.z);

    if camera_position.distance_squared(camera_target) <= f32::EPSILON {
        return ViewpointState::from_config(config);
    }

    ViewpointState {
        camera_position,
        camera_target,
        world_offset: 0.0,
    }
}

/// Offset for the scene root during an immersive session.
///
/// The head-tracked camera's height belongs to the presentation layer, so
/// the scene moves down instead: a viewer standing at the physical floor
/// sees the asset from `eye_height` above its ground.
pub fn plan_immersive_offset(eye_height: f32) -> f32 {
    -eye_height
}

#[cfg(test)]
mod tests {
    use super::*;

    fn room() -> BoundingVolume {
        BoundingVolume::new(Vec3::new(-5.0, 0.0, -4.0), Vec3::new(5.0, 3.0, 4.0))
    }

    #[test]
    fn interior_framing_matches_fractions() {
        let plan = plan_desktop(&room(), &Framing::interior(), &CameraConfig::default());
        assert!((plan.camera_position - Vec3::new(2.0, 2.4, 2.4)).length() < 1e-5);
        assert!((plan.camera_target - Vec3::new(0.0, 2.1, 0.0)).length() < 1e-5);
        assert_eq!(plan.world_offset, 0.0);
    }

    #[test]
    fn exterior_framing_looks_down_from_outside() {
        let plan = plan_desktop(&room(), &Framing::exterior(), &CameraConfig::default());
        assert!(plan.camera_position.y > room().max.y);
        assert!(plan.camera_position.z > room().max.z);
        assert!(plan.camera_target.y < plan.camera_position.y);
    }

    #[test]
    fn degenerate_bounds_use_default_pose() {
        let config = CameraConfig::default();
        let plan = plan_desktop(&BoundingVolume::default(), &Framing::interior(), &config);
        assert_eq!(plan.camera_position, config.default_position);
        assert_eq!(plan.camera_target, config.default_target);
    }

    #[test]
    fn framing_onto_target_uses_default_pose() {
        let config = CameraConfig::default();
        let framing = Framing {
            camera: Vec3::ZERO,
            target_height: 0.0,
        };
        let plan = plan_desktop(&room(), &framing, &config);
        assert_eq!(plan.camera_position, config.default_position);
    }

    #[test]
    fn immersive_offset_is_negated_eye_height() {
        for h in [0.01, 1.6, 3.2, 250.0] {
            assert_eq!(plan_immersive_offset(h), -h);
        }
    }
}
