//! The viewer: asset selection, calibration and per-frame updates
//!
//! Loads are requested through an [`AssetSource`] and polled once per
//! frame. When one completes, the new asset replaces the active one and runs
//! through placement, eye-height estimation, viewpoint planning and texture
//! recovery before it is shown.

use tracing::{info, warn};
use vantage_assets::{Asset, AssetSource, MorphControl, PendingLoad};
use vantage_core::{FrameTime, Timer};

use crate::animation::AnimationPlayer;
use crate::config::ViewerConfig;
use crate::error::ViewError;
use crate::state::{ActiveAsset, ViewerState};
use crate::texture_recovery::{RecoveryPass, RecoverySummary, TextureRecovery};
use crate::viewpoint::{plan_desktop, ViewpointState};
use crate::{eye_height, fixtures, placement};

struct InFlight {
    identifier: String,
    pending: PendingLoad<Asset>,
}

/// A single asset viewer
pub struct Viewer<S: AssetSource> {
    config: ViewerConfig,
    source: S,
    state: ViewerState,
    recovery: TextureRecovery,
    loading: Option<InFlight>,
    settle: Option<Timer>,
    time: FrameTime,
    last_error: Option<String>,
}

impl<S: AssetSource> Viewer<S> {
    pub fn new(config: ViewerConfig, source: S) -> Self {
        Self {
            state: ViewerState::new(&config),
            recovery: TextureRecovery::new(config.textures.clone()),
            time: FrameTime::new(config.time.clone()),
            loading: None,
            settle: None,
            last_error: None,
            config,
            source,
        }
    }

    pub fn config(&self) -> &ViewerConfig {
        &self.config
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn state(&self) -> &ViewerState {
        &self.state
    }

    pub fn frame_time(&self) -> &FrameTime {
        &self.time
    }

    /// Current camera pose and scene offset
    pub fn viewpoint(&self) -> ViewpointState {
        self.state.viewpoint()
    }

    /// Message of the most recent failed load, cleared by the next success
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Start loading an asset from the catalogue. A load already in flight
    /// is abandoned; the active asset stays visible until the new one is
    /// ready.
    pub fn select_asset(&mut self, identifier: &str) -> Result<(), ViewError> {
        if !self.config.is_known(identifier) {
            return Err(ViewError::UnknownAsset(identifier.to_string()));
        }

        if let Some(previous) = self.loading.take() {
            info!("Abandoning load of '{}'", previous.identifier);
        }
        info!("Loading asset '{}'", identifier);
        self.loading = Some(InFlight {
            identifier: identifier.to_string(),
            pending: self.source.request_asset(identifier),
        });
        Ok(())
    }

    /// Whether an asset load is in flight
    pub fn is_loading(&self) -> bool {
        self.loading.is_some()
    }

    /// True once the active asset's textures have been re-verified and no
    /// texture work remains.
    pub fn is_settled(&self) -> bool {
        self.settle.as_ref().map_or(true, Timer::is_finished) && self.recovery.in_flight() == 0
    }

    /// Advance one frame.
    pub fn update(&mut self, raw_delta: f32) {
        self.time.update(raw_delta);
        let delta = self.time.delta_time;

        self.poll_load();

        if let Some(animation) = self.state.animation.as_mut() {
            animation.update(delta);
        }

        self.recovery
            .poll(self.state.active.as_mut().map(|a| &mut a.asset), &self.source);

        let settled_now = self.settle.as_mut().is_some_and(|t| t.tick(delta));
        if settled_now {
            if let Some(active) = self.state.active.as_mut() {
                self.recovery
                    .scan(&mut active.asset, RecoveryPass::Settled, &self.source);
            }
        }
    }

    fn poll_load(&mut self) {
        let Some(result) = self.loading.as_ref().and_then(|l| l.pending.try_recv()) else {
            return;
        };
        let Some(InFlight { identifier, .. }) = self.loading.take() else {
            return;
        };

        match result {
            Ok(asset) => {
                self.last_error = None;
                self.install(identifier, asset);
            }
            Err(e) => {
                warn!("Failed to load '{}': {}", identifier, e);
                self.last_error = Some(e.to_string());
            }
        }
    }

    fn install(&mut self, identifier: String, mut asset: Asset) {
        if let Some(previous) = self.state.active.take() {
            let report = previous.asset.dispose();
            info!(
                "Disposed '{}': {} meshes, {} materials, {} textures, {} skins",
                previous.identifier, report.meshes, report.materials, report.textures, report.skins
            );
            self.source.release_unused();
        }
        self.state.animation = None;
        self.settle = None;

        let policy = self.config.policies.for_asset(&identifier).clone();
        let bounds = placement::normalize(&mut asset, policy.scale, self.config.environment.ground_y);
        let eye_height = eye_height::estimate(&bounds, &self.config.eye_height);
        let planned = plan_desktop(&bounds, &policy.framing, &self.config.camera);

        if policy.window_fixtures && !bounds.is_degenerate() {
            let unit = eye_height / self.config.eye_height.standing_eye_height;
            fixtures::add_windows(&mut asset, &bounds, unit);
        }

        let state = &mut self.state;
        state.eye_height = eye_height;
        if !state.session.reframe(
            planned.camera_position,
            planned.camera_target,
            &mut state.world_offset,
            eye_height,
        ) {
            state.orbit.set_pose(planned.camera_position, planned.camera_target);
        }

        state.animation = AnimationPlayer::for_clips(&asset.animations);
        if let Some(animation) = &state.animation {
            info!("Playing animation '{}'", animation.clip().name);
        }

        self.recovery.set_texture_root(policy.texture_root.as_deref());
        self.recovery.begin(&asset, &self.source);
        self.recovery.scan(&mut asset, RecoveryPass::Initial, &self.source);
        self.settle = Some(Timer::new(self.config.textures.settle_delay_secs));

        info!(
            "Showing '{}': eye height {:.3}, camera {:?} -> {:?}",
            identifier, eye_height, planned.camera_position, planned.camera_target
        );
        self.state.active = Some(ActiveAsset {
            identifier,
            asset,
            bounds,
        });
    }

    /// Handle an immersive session start.
    pub fn session_start(&mut self) -> bool {
        let state = &mut self.state;
        state
            .session
            .start(&mut state.orbit, &mut state.world_offset, state.eye_height)
    }

    /// Handle an immersive session end.
    pub fn session_end(&mut self) -> bool {
        let state = &mut self.state;
        state.session.end(&mut state.orbit, &mut state.world_offset)
    }

    /// Desktop orbit input; ignored during an immersive session
    pub fn handle_mouse_look(&mut self, delta: glam::Vec2) {
        self.state.orbit.handle_mouse_look(delta);
    }

    /// Desktop zoom input; ignored during an immersive session
    pub fn handle_zoom(&mut self, delta: f32) {
        self.state.orbit.handle_zoom(delta);
    }

    pub fn morph_controls(&self) -> Vec<MorphControl> {
        self.state
            .active_asset()
            .map(Asset::morph_controls)
            .unwrap_or_default()
    }

    pub fn set_morph_weight(&mut self, node: usize, target: usize, weight: f32) -> bool {
        self.state
            .active_asset_mut()
            .is_some_and(|a| a.set_morph_weight(node, target, weight))
    }

    /// Texture binding counts for the active asset
    pub fn texture_summary(&self) -> Option<RecoverySummary> {
        self.state.active_asset().map(RecoverySummary::of)
    }
}
