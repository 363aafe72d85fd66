//! Vantage View - Spatial calibration and viewpoint placement
//!
//! Takes a loaded [`Asset`](vantage_assets::Asset) and makes it viewable:
//! - Bounds analysis and ground-plane placement
//! - Eye-height estimation for head-tracked viewing
//! - Desktop camera framing and immersive world offset
//! - Texture recovery for broken or missing bindings
//! - Desktop / immersive session transitions
//!
//! [`Viewer`] ties these together around a single active asset.

pub mod animation;
pub mod bounds;
pub mod config;
mod error;
pub mod eye_height;
pub mod fixtures;
pub mod orbit;
pub mod placement;
pub mod policy;
pub mod session;
pub mod state;
pub mod texture_recovery;
pub mod viewer;
pub mod viewpoint;

pub use animation::AnimationPlayer;
pub use config::{
    CameraConfig, EnvironmentConfig, EyeHeightConfig, RecoveryRule, TextureConfig, ViewerConfig,
};
pub use error::ViewError;
pub use orbit::OrbitController;
pub use policy::{AssetClassPolicy, Framing, PolicyTable};
pub use session::{ImmersionSession, SessionMode, SessionSnapshot};
pub use state::{ActiveAsset, ViewerState};
pub use texture_recovery::{BindingStatus, RecoveryPass, RecoverySummary, TextureRecovery};
pub use viewer::Viewer;
pub use viewpoint::{plan_desktop, plan_immersive_offset, ViewpointState};
