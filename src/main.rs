//! Vantage - headless calibration driver for the scene viewer
//!
//! Loads one asset through the full placement pipeline and prints what the
//! viewer would show as JSON.

mod settings;

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use vantage_assets::AssetServer;
use vantage_core::{BoundingVolume, Transform, Vec3};
use vantage_view::{RecoverySummary, Viewer, ViewpointState};

/// Fixed frame step for the update pump
const FRAME: Duration = Duration::from_micros(16_667);

/// Give up waiting after this many frames (30 seconds)
const MAX_FRAMES: u64 = 1800;

#[derive(Parser, Debug)]
#[command(name = "vantage")]
#[command(about = "Place a glTF asset for desktop and immersive viewing and report the result")]
struct Cli {
    /// Catalogue identifier of the asset; defaults to the configured one
    asset: Option<String>,

    /// Settings file to use instead of ~/.config/vantage/viewer.toml
    #[arg(long)]
    config: Option<PathBuf>,

    /// Run one immersive session start/end after loading
    #[arg(long)]
    immersive: bool,

    /// Write the effective settings to the settings file and exit
    #[arg(long)]
    write_config: bool,
}

#[derive(Debug, Serialize)]
struct BoundsReport {
    min: Vec3,
    max: Vec3,
    center: Vec3,
    size: Vec3,
}

impl From<BoundingVolume> for BoundsReport {
    fn from(b: BoundingVolume) -> Self {
        Self {
            min: b.min,
            max: b.max,
            center: b.center(),
            size: b.size(),
        }
    }
}

#[derive(Debug, Serialize)]
struct ImmersiveReport {
    /// Viewpoint while the session was active
    during: ViewpointState,
    /// Whether ending the session restored the desktop viewpoint exactly
    restored: bool,
}

#[derive(Debug, Serialize)]
struct Report {
    asset: String,
    loaded: bool,
    error: Option<String>,
    frames: u64,
    transform: Option<Transform>,
    bounds: Option<BoundsReport>,
    eye_height: f32,
    viewpoint: ViewpointState,
    textures: Option<RecoverySummary>,
    animation: Option<String>,
    immersive: Option<ImmersiveReport>,
}

fn main() -> Result<()> {
    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber).context("Failed to set subscriber")?;

    let args = Cli::parse();
    let config = settings::load(args.config.as_deref());

    if args.write_config {
        let path = settings::save(&config, args.config.as_deref())?;
        info!("Wrote settings to {:?}", path);
        return Ok(());
    }

    info!("Starting vantage...");

    let asset = args.asset.clone().unwrap_or_else(|| config.default_asset.clone());
    let server = AssetServer::new(config.models_dir.clone()).context("Failed to start asset server")?;
    let mut viewer = Viewer::new(config, server);
    viewer.select_asset(&asset)?;

    let mut frames = 0;
    while frames < MAX_FRAMES {
        viewer.update(FRAME.as_secs_f32());
        frames += 1;
        if !viewer.is_loading() && viewer.is_settled() {
            break;
        }
        std::thread::sleep(FRAME);
    }
    if frames >= MAX_FRAMES {
        warn!("Gave up waiting for '{}' after {} frames", asset, frames);
    }

    let immersive = if args.immersive && viewer.state().active.is_some() {
        let desktop = viewer.viewpoint();
        viewer.session_start();
        let during = viewer.viewpoint();
        viewer.session_end();
        Some(ImmersiveReport {
            during,
            restored: viewer.viewpoint() == desktop,
        })
    } else {
        None
    };

    let state = viewer.state();
    let active = state.active.as_ref();
    let report = Report {
        asset: asset.clone(),
        loaded: active.is_some(),
        error: viewer.last_error().map(String::from),
        frames,
        transform: active.map(|a| a.asset.transform),
        bounds: active.map(|a| a.bounds.into()),
        eye_height: state.eye_height,
        viewpoint: viewer.viewpoint(),
        textures: viewer.texture_summary(),
        animation: state.animation.as_ref().map(|a| a.clip().name.clone()),
        immersive,
    };
    println!("{}", serde_json::to_string_pretty(&report)?);

    if !report.loaded {
        anyhow::bail!("Failed to load '{}'", asset);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    fn parse(args: &[&str]) -> Result<Cli, clap::Error> {
        Cli::try_parse_from(std::iter::once("vantage").chain(args.iter().copied()))
    }

    #[test]
    fn cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn no_arguments() {
        let cli = parse(&[]).unwrap();
        assert!(cli.asset.is_none());
        assert!(cli.config.is_none());
        assert!(!cli.immersive);
        assert!(!cli.write_config);
    }

    #[test]
    fn all_options() {
        let cli = parse(&["Aula", "--config", "my.toml", "--immersive"]).unwrap();
        assert_eq!(cli.asset.as_deref(), Some("Aula"));
        assert_eq!(cli.config, Some(PathBuf::from("my.toml")));
        assert!(cli.immersive);
        assert!(!cli.write_config);
        assert!(parse(&["--write-config"]).unwrap().write_config);
    }

    #[test]
    fn asset_names_may_contain_spaces() {
        let cli = parse(&["Samba Dancing"]).unwrap();
        assert_eq!(cli.asset.as_deref(), Some("Samba Dancing"));
    }

    #[test]
    fn bad_arguments_are_rejected() {
        assert!(parse(&["--config"]).is_err());
        assert!(parse(&["--verbose"]).is_err());
        assert!(parse(&["Aula", "Aula1"]).is_err());
    }
}
