//! Desktop / immersive session transitions
//!
//! Entering an immersive session snapshots the desktop camera and scene
//! offset, takes control authority away from the orbit controller and lowers
//! the scene root by the eye height. Leaving restores the snapshot verbatim.

use glam::Vec3;
use tracing::{info, warn};

use crate::orbit::OrbitController;
use crate::viewpoint::plan_immersive_offset;

/// Desktop state saved for the duration of one immersive session
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SessionSnapshot {
    pub camera_position: Vec3,
    pub camera_target: Vec3,
    pub world_offset: f32,
}

/// Current viewing mode
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SessionMode {
    Desktop,
    Immersive { snapshot: SessionSnapshot },
}

/// Immersion session state machine
#[derive(Debug, Clone)]
pub struct ImmersionSession {
    mode: SessionMode,
}

impl Default for ImmersionSession {
    fn default() -> Self {
        Self {
            mode: SessionMode::Desktop,
        }
    }
}

impl ImmersionSession {
    pub fn mode(&self) -> SessionMode {
        self.mode
    }

    pub fn is_immersive(&self) -> bool {
        matches!(self.mode, SessionMode::Immersive { .. })
    }

    /// Handle a session-start event. Returns false, changing nothing, if a
    /// session is already active.
    pub fn start(&mut self, orbit: &mut OrbitController, world_offset: &mut f32, eye_height: f32) -> bool {
        if self.is_immersive() {
            warn!("Session start while already immersive, ignoring");
            return false;
        }

        let snapshot = SessionSnapshot {
            camera_position: orbit.position(),
            camera_target: orbit.target(),
            world_offset: *world_offset,
        };
        orbit.set_enabled(false);
        *world_offset = plan_immersive_offset(eye_height);
        self.mode = SessionMode::Immersive { snapshot };

        info!("Immersive session started (eye height {:.3})", eye_height);
        true
    }

    /// Handle a session-end event. Returns false, changing nothing, if no
    /// session is active.
    pub fn end(&mut self, orbit: &mut OrbitController, world_offset: &mut f32) -> bool {
        let SessionMode::Immersive { snapshot } = self.mode else {
            warn!("Session end while on desktop, ignoring");
            return false;
        };

        orbit.set_pose(snapshot.camera_position, snapshot.camera_target);
        *world_offset = snapshot.world_offset;
        orbit.set_enabled(true);
        self.mode = SessionMode::Desktop;

        info!("Immersive session ended");
        true
    }

    /// A new asset was installed mid-session: restore its desktop pose at
    /// session end instead, and re-apply the offset for its eye height.
    /// Returns false on desktop.
    pub fn reframe(&mut self, position: Vec3, target: Vec3, world_offset: &mut f32, eye_height: f32) -> bool {
        let SessionMode::Immersive { snapshot } = &mut self.mode else {
            return false;
        };
        snapshot.camera_position = position;
        snapshot.camera_target = target;
        *world_offset = plan_immersive_offset(eye_height);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CameraConfig;

    fn orbit_at(position: Vec3, target: Vec3) -> OrbitController {
        let mut orbit = OrbitController::new(CameraConfig::default());
        orbit.set_pose(position, target);
        orbit
    }

    #[test]
    fn start_then_end_restores_exactly() {
        let position = Vec3::new(2.000_001, 2.4, 2.399_999_8);
        let target = Vec3::new(0.0, 2.1, 1e-7);
        let mut orbit = orbit_at(position, target);
        let mut offset = 0.0;
        let mut session = ImmersionSession::default();

        assert!(session.start(&mut orbit, &mut offset, 1.6));
        assert!(session.is_immersive());
        assert!(!orbit.is_enabled());
        assert_eq!(offset, -1.6);

        assert!(session.end(&mut orbit, &mut offset));
        assert_eq!(orbit.position().to_array().map(f32::to_bits), position.to_array().map(f32::to_bits));
        assert_eq!(orbit.target().to_array().map(f32::to_bits), target.to_array().map(f32::to_bits));
        assert_eq!(offset, 0.0);
        assert!(orbit.is_enabled());
        assert_eq!(session.mode(), SessionMode::Desktop);
    }

    #[test]
    fn desktop_input_is_ignored_during_session() {
        let mut orbit = orbit_at(Vec3::new(0.0, 10.0, 30.0), Vec3::ZERO);
        let mut offset = 0.0;
        let mut session = ImmersionSession::default();

        session.start(&mut orbit, &mut offset, 1.6);
        orbit.handle_mouse_look(glam::Vec2::new(100.0, 0.0));
        assert_eq!(orbit.position(), Vec3::new(0.0, 10.0, 30.0));
    }

    #[test]
    fn second_start_is_ignored() {
        let mut orbit = orbit_at(Vec3::new(1.0, 1.0, 1.0), Vec3::ZERO);
        let mut offset = 0.0;
        let mut session = ImmersionSession::default();

        assert!(session.start(&mut orbit, &mut offset, 1.6));
        assert!(!session.start(&mut orbit, &mut offset, 3.0));
        assert_eq!(offset, -1.6);

        session.end(&mut orbit, &mut offset);
        assert_eq!(offset, 0.0);
    }

    #[test]
    fn reframe_replaces_restored_pose() {
        let mut orbit = orbit_at(Vec3::new(1.0, 1.0, 1.0), Vec3::ZERO);
        let mut offset = 0.0;
        let mut session = ImmersionSession::default();
        assert!(!session.reframe(Vec3::ONE, Vec3::ZERO, &mut offset, 2.0));

        session.start(&mut orbit, &mut offset, 1.6);
        assert!(session.reframe(Vec3::new(5.0, 5.0, 5.0), Vec3::Y, &mut offset, 2.0));
        assert_eq!(offset, -2.0);

        session.end(&mut orbit, &mut offset);
        assert_eq!(orbit.position(), Vec3::new(5.0, 5.0, 5.0));
        assert_eq!(orbit.target(), Vec3::Y);
        assert_eq!(offset, 0.0);
    }

    #[test]
    fn end_without_start_is_ignored() {
        let mut orbit = orbit_at(Vec3::new(1.0, 1.0, 1.0), Vec3::ZERO);
        let mut offset = 0.0;
        let mut session = ImmersionSession::default();
        assert!(!session.end(&mut orbit, &mut offset));
        assert!(orbit.is_enabled());
    }
}
