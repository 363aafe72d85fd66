//! Viewer configuration
//!
//! Every section has defaults matching the stock viewer, so a partial TOML
//! file only needs to name what it changes.

use std::path::PathBuf;

use glam::Vec3;
use serde::{Deserialize, Serialize};
use vantage_assets::WrapMode;
use vantage_core::{Color, TimeConfig};

use crate::policy::PolicyTable;

/// Complete viewer configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    /// Directory holding `<identifier>.glb` / `.gltf` files
    pub models_dir: PathBuf,
    /// Asset identifiers that may be selected
    pub catalogue: Vec<String>,
    /// Asset loaded at startup
    pub default_asset: String,
    pub eye_height: EyeHeightConfig,
    pub camera: CameraConfig,
    pub environment: EnvironmentConfig,
    pub textures: TextureConfig,
    pub policies: PolicyTable,
    pub time: TimeConfig,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            models_dir: PathBuf::from("models"),
            catalogue: [
                "Aula1",
                "Aula",
                "Samba Dancing",
                "morph_test",
                "monkey",
                "monkey_embedded_texture",
                "vCube",
            ]
            .into_iter()
            .map(String::from)
            .collect(),
            default_asset: "Aula1".to_string(),
            eye_height: EyeHeightConfig::default(),
            camera: CameraConfig::default(),
            environment: EnvironmentConfig::default(),
            textures: TextureConfig::default(),
            policies: PolicyTable::default(),
            time: TimeConfig::default(),
        }
    }
}

impl ViewerConfig {
    /// Whether an identifier is in the catalogue
    pub fn is_known(&self, identifier: &str) -> bool {
        self.catalogue.iter().any(|a| a == identifier)
    }
}

/// Eye-height heuristic parameters.
///
/// The plausible range and reference height have no derivation beyond
/// "a classroom is about three metres tall"; treat them as tunables.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EyeHeightConfig {
    /// Eye height of a standing adult, in metres
    pub standing_eye_height: f32,
    /// Real-world height that a typical asset's vertical extent represents
    pub reference_height: f32,
    /// Vertical sizes at or below this are not trusted (exclusive)
    pub plausible_min: f32,
    /// Vertical sizes at or above this are not trusted (exclusive)
    pub plausible_max: f32,
}

impl Default for EyeHeightConfig {
    fn default() -> Self {
        Self {
            standing_eye_height: 1.6,
            reference_height: 3.0,
            plausible_min: 0.1,
            plausible_max: 100.0,
        }
    }
}

/// Desktop camera configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Vertical field of view in degrees
    pub fov: f32,
    pub near: f32,
    pub far: f32,
    /// Pose used before any asset is framed, and for degenerate assets
    pub default_position: Vec3,
    pub default_target: Vec3,
    /// Orbit sensitivity (radians per pixel)
    pub sensitivity: f32,
    /// Minimum pitch angle in degrees
    pub pitch_min: f32,
    /// Maximum pitch angle in degrees
    pub pitch_max: f32,
    /// Zoom speed (scroll sensitivity)
    pub zoom_speed: f32,
    pub min_distance: f32,
    pub max_distance: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            fov: 45.0,
            near: 1.0,
            far: 2000.0,
            default_position: Vec3::new(0.0, 10.0, 30.0),
            default_target: Vec3::ZERO,
            sensitivity: 0.005,
            pitch_min: -89.0,
            pitch_max: 89.0,
            zoom_speed: 1.0,
            min_distance: 0.1,
            max_distance: 1000.0,
        }
    }
}

/// Ground, lighting and atmosphere the asset is placed into
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EnvironmentConfig {
    /// Height of the reference ground plane
    pub ground_y: f32,
    pub ground_size: f32,
    pub ground_color: Color,
    pub grid_divisions: u32,
    pub grid_opacity: f32,
    pub background: Color,
    pub fog_near: f32,
    pub fog_far: f32,
    pub hemisphere_sky: Color,
    pub hemisphere_ground: Color,
    pub hemisphere_intensity: f32,
    pub sun_position: Vec3,
    pub sun_intensity: f32,
}

impl Default for EnvironmentConfig {
    fn default() -> Self {
        Self {
            ground_y: 0.0,
            ground_size: 2000.0,
            ground_color: Color::from_hex(0x999999),
            grid_divisions: 20,
            grid_opacity: 0.2,
            background: Color::from_hex(0xa0a0a0),
            fog_near: 200.0,
            fog_far: 1000.0,
            hemisphere_sky: Color::from_hex(0xffffff),
            hemisphere_ground: Color::from_hex(0x444444),
            hemisphere_intensity: 5.0,
            sun_position: Vec3::new(0.0, 200.0, 100.0),
            sun_intensity: 5.0,
        }
    }
}

/// One entry of the texture fallback table: any keyword found in a mesh or
/// material name (case-insensitive) selects `texture`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecoveryRule {
    pub keywords: Vec<String>,
    pub texture: String,
}

impl RecoveryRule {
    pub fn new(keywords: &[&str], texture: &str) -> Self {
        Self {
            keywords: keywords.iter().map(|k| k.to_string()).collect(),
            texture: texture.to_string(),
        }
    }

    /// True if any keyword occurs in any of the names
    pub fn matches(&self, names: &[&str]) -> bool {
        names.iter().any(|name| {
            let name = name.to_lowercase();
            self.keywords
                .iter()
                .any(|k| !k.is_empty() && name.contains(&k.to_lowercase()))
        })
    }
}

/// Texture recovery parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TextureConfig {
    /// Directory searched for repaired and fallback textures
    pub texture_root: PathBuf,
    /// Seconds to wait before re-verifying texture bindings
    pub settle_delay_secs: f32,
    /// Ordered fallback table for materials with no texture reference
    pub rules: Vec<RecoveryRule>,
    /// Last fallback when no rule matches or every match fails
    pub default_texture: Option<String>,
    /// Wrap mode applied to satisfied bindings
    pub wrap: WrapMode,
    /// Vertical flip applied to satisfied bindings
    pub flip_y: bool,
}

impl Default for TextureConfig {
    fn default() -> Self {
        Self {
            texture_root: PathBuf::from("models/textures"),
            settle_delay_secs: 1.0,
            rules: vec![
                RecoveryRule::new(&["wall", "pared", "muro"], "wall.jpg"),
                RecoveryRule::new(&["door", "puerta"], "door.jpg"),
                RecoveryRule::new(&["floor", "piso", "suelo"], "floor.jpg"),
                RecoveryRule::new(&["ceiling", "techo"], "ceiling.jpg"),
                RecoveryRule::new(&["window", "ventana"], "window.jpg"),
            ],
            default_texture: Some("default.jpg".to_string()),
            wrap: WrapMode::Repeat,
            flip_y: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rule_matching_is_case_insensitive() {
        let rule = RecoveryRule::new(&["wall", "pared"], "wall.jpg");
        assert!(rule.matches(&["North_WALL_01"]));
        assert!(rule.matches(&["mesh", "Pared_Este"]));
        assert!(!rule.matches(&["Desk"]));
        assert!(!rule.matches(&[]));
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let config: ViewerConfig = toml::from_str(
            r#"
            default_asset = "monkey"

            [eye_height]
            reference_height = 2.5
            "#,
        )
        .unwrap();
        assert_eq!(config.default_asset, "monkey");
        assert_eq!(config.eye_height.reference_height, 2.5);
        assert_eq!(config.eye_height.standing_eye_height, 1.6);
        assert_eq!(config.policies.for_asset("Aula1").scale, 20.0);
    }

    #[test]
    fn config_roundtrips_through_toml() {
        let text = toml::to_string_pretty(&ViewerConfig::default()).unwrap();
        let back: ViewerConfig = toml::from_str(&text).unwrap();
        assert_eq!(back.catalogue, ViewerConfig::default().catalogue);
        assert_eq!(back.textures.rules, TextureConfig::default().rules);
    }

    #[test]
    fn catalogue_lookup() {
        let config = ViewerConfig::default();
        assert!(config.is_known("Aula1"));
        assert!(!config.is_known("aula1"));
    }
}
