//! Viewer state
//!
//! Everything that changes while viewing lives here, owned by one viewer
//! instance: the active asset, its calibration and the camera.

use vantage_assets::Asset;
use vantage_core::BoundingVolume;

use crate::animation::AnimationPlayer;
use crate::config::ViewerConfig;
use crate::orbit::OrbitController;
use crate::session::ImmersionSession;
use crate::viewpoint::ViewpointState;

/// The asset currently shown, with its placement results
#[derive(Debug)]
pub struct ActiveAsset {
    /// Catalogue identifier it was selected by
    pub identifier: String,
    pub asset: Asset,
    /// World-space bounds right after placement
    pub bounds: BoundingVolume,
}

/// Mutable state of one viewer
pub struct ViewerState {
    pub active: Option<ActiveAsset>,
    /// Current eye-height estimate, in scene units
    pub eye_height: f32,
    pub orbit: OrbitController,
    /// Vertical offset of the scene root
    pub world_offset: f32,
    pub session: ImmersionSession,
    pub animation: Option<AnimationPlayer>,
}

impl ViewerState {
    pub fn new(config: &ViewerConfig) -> Self {
        Self {
            active: None,
            eye_height: config.eye_height.standing_eye_height,
            orbit: OrbitController::new(config.camera.clone()),
            world_offset: 0.0,
            session: ImmersionSession::default(),
            animation: None,
        }
    }

    /// Identifier of the active asset
    pub fn active_identifier(&self) -> Option<&str> {
        self.active.as_ref().map(|a| a.identifier.as_str())
    }

    pub fn active_asset(&self) -> Option<&Asset> {
        self.active.as_ref().map(|a| &a.asset)
    }

    pub fn active_asset_mut(&mut self) -> Option<&mut Asset> {
        self.active.as_mut().map(|a| &mut a.asset)
    }

    /// Current camera pose and scene offset
    pub fn viewpoint(&self) -> ViewpointState {
        ViewpointState {
            camera_position: self.orbit.position(),
            camera_target: self.orbit.target(),
            world_offset: self.world_offset,
        }
    }
}
