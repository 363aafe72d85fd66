//! Viewer settings with persistence
//!
//! Settings are saved to `~/.config/vantage/viewer.toml`

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{info, warn};
use vantage_view::ViewerConfig;

/// Get the config directory path
fn config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("vantage"))
}

/// Get the default settings file path
pub fn settings_path() -> Option<PathBuf> {
    config_dir().map(|p| p.join("viewer.toml"))
}

/// Load settings from `path`, or the default location, falling back to
/// defaults when the file is missing or invalid
pub fn load(path: Option<&Path>) -> ViewerConfig {
    let Some(path) = path.map(Path::to_path_buf).or_else(settings_path) else {
        warn!("Could not determine config directory");
        return ViewerConfig::default();
    };

    if !path.exists() {
        info!("No settings file at {:?}, using defaults", path);
        return ViewerConfig::default();
    }

    match fs::read_to_string(&path) {
        Ok(content) => parse(&content).unwrap_or_else(|e| {
            warn!("Failed to parse settings: {}, using defaults", e);
            ViewerConfig::default()
        }),
        Err(e) => {
            warn!("Failed to read settings file: {}, using defaults", e);
            ViewerConfig::default()
        }
    }
}

fn parse(content: &str) -> Result<ViewerConfig, toml::de::Error> {
    let config = toml::from_str(content)?;
    info!("Loaded viewer settings");
    Ok(config)
}

/// Save settings to `path`, or the default location
pub fn save(config: &ViewerConfig, path: Option<&Path>) -> anyhow::Result<PathBuf> {
    let Some(path) = path.map(Path::to_path_buf).or_else(settings_path) else {
        anyhow::bail!("Could not determine config directory");
    };

    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        if !dir.exists() {
            fs::create_dir_all(dir)?;
        }
    }

    let content = toml::to_string_pretty(config)?;
    fs::write(&path, content)?;
    info!("Saved settings to {:?}", path);
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_gives_defaults() {
        let config = load(Some(Path::new("/nonexistent/vantage/viewer.toml")));
        assert_eq!(config.default_asset, "Aula1");
    }

    #[test]
    fn save_then_load() {
        let dir = std::env::temp_dir().join(format!("vantage-settings-{}", std::process::id()));
        let path = dir.join("viewer.toml");

        let mut config = ViewerConfig::default();
        config.default_asset = "monkey".to_string();
        config.textures.settle_delay_secs = 2.5;
        save(&config, Some(&path)).unwrap();

        let back = load(Some(&path));
        assert_eq!(back.default_asset, "monkey");
        assert_eq!(back.textures.settle_delay_secs, 2.5);

        let _ = fs::remove_dir_all(dir);
    }

    #[test]
    fn invalid_file_gives_defaults() {
        let dir = std::env::temp_dir().join(format!("vantage-invalid-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("viewer.toml");
        fs::write(&path, "default_asset = [").unwrap();

        assert_eq!(load(Some(&path)).default_asset, "Aula1");
        let _ = fs::remove_dir_all(dir);
    }
}
