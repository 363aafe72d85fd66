//! Per-asset-class placement and framing policy
//!
//! The table is keyed by asset identifier. Identifiers without an entry
//! use the table's default policy.

use std::collections::BTreeMap;
use std::path::PathBuf;

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Where the desktop camera starts relative to the normalized bounds.
///
/// All values are fractions of the bounding volume's size: the camera sits
/// at `center + size * camera`, and looks at the horizontal center raised by
/// `size.y * target_height`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Framing {
    pub camera: Vec3,
    pub target_height: f32,
}

impl Framing {
    /// From inside the volume, near a wall, at roughly standing height
    pub fn interior() -> Self {
        Self {
            camera: Vec3::new(0.2, 0.3, 0.3),
            target_height: 0.2,
        }
    }

    /// From an elevated vantage outside the volume, looking down at it
    pub fn exterior() -> Self {
        Self {
            camera: Vec3::new(0.0, 1.0, 1.5),
            target_height: 0.0,
        }
    }
}

/// Placement and framing rules for one class of asset
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssetClassPolicy {
    /// Uniform scale applied before grounding
    pub scale: f32,
    pub framing: Framing,
    /// Add procedural window fixtures to the walls after placement
    pub window_fixtures: bool,
    /// Directory searched when repairing texture references; falls back to
    /// the global texture root
    pub texture_root: Option<PathBuf>,
}

impl Default for AssetClassPolicy {
    fn default() -> Self {
        Self {
            scale: 1.0,
            framing: Framing::exterior(),
            window_fixtures: false,
            texture_root: None,
        }
    }
}

impl AssetClassPolicy {
    /// Policy for a room-scale interior authored at 1/20 scale
    pub fn classroom() -> Self {
        Self {
            scale: 20.0,
            framing: Framing::interior(),
            ..Default::default()
        }
    }
}

/// Policy lookup keyed by asset identifier
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PolicyTable {
    pub default: AssetClassPolicy,
    pub classes: BTreeMap<String, AssetClassPolicy>,
}

impl Default for PolicyTable {
    fn default() -> Self {
        let mut classes = BTreeMap::new();
        classes.insert(
            "Aula".to_string(),
            AssetClassPolicy {
                window_fixtures: true,
                ..AssetClassPolicy::classroom()
            },
        );
        classes.insert("Aula1".to_string(), AssetClassPolicy::classroom());
        Self {
            default: AssetClassPolicy::default(),
            classes,
        }
    }
}

impl PolicyTable {
    /// The policy for an asset identifier
    pub fn for_asset(&self, identifier: &str) -> &AssetClassPolicy {
        self.classes.get(identifier).unwrap_or(&self.default)
    }
}
