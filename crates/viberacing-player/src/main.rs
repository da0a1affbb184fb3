//! VibeRacing: two-player split-keyboard racing on a figure-eight course
//!
//! Architecture:
//!   engine/ : window, keyboard, frame timer, software rasteriser
//!   render/ : course, cars and start-sequence overlay
//!   hud     : lap readout in the window title
//!
//! Simulation rules live in `viberacing-sim`; this binary only samples keys,
//! measures frame time and draws what the simulation reports.

mod engine;
mod hud;
mod render;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;
use viberacing_common::AppConfig;

#[derive(Debug, Parser)]
#[command(name = "viberacing", version, about = "Two-player split-keyboard figure-eight racer")]
struct Args {
    /// TOML config file; built-in defaults are used when absent
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the target frame rate
    #[arg(long)]
    fps: Option<u32>,

    /// Log filter, e.g. "debug" or "viberacing_sim=trace" (beats RUST_LOG)
    #[arg(long)]
    log_level: Option<String>,
}

fn load_config(args: &Args) -> Result<AppConfig> {
    let mut config = match &args.config {
        Some(path) => AppConfig::load(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => AppConfig::default(),
    };
    if let Some(fps) = args.fps {
        config.window.target_fps = fps;
    }
    if let Some(level) = &args.log_level {
        config.log_level = level.clone();
    }
    config.validate().context("Invalid configuration")?;
    Ok(config)
}

/// `--log-level`, then RUST_LOG, then the config file
fn log_filter(args: &Args, config: &AppConfig) -> Result<EnvFilter> {
    let filter = match &args.log_level {
        Some(level) => EnvFilter::try_new(level)?,
        None => EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(&config.log_level))?,
    };
    Ok(filter)
}

fn main() -> Result<()> {
    let args = Args::parse();
    let config = load_config(&args)?;

    tracing_subscriber::fmt()
        .with_env_filter(log_filter(&args, &config).context("Invalid log filter")?)
        .init();

    tracing::info!("VibeRacing v{}", env!("CARGO_PKG_VERSION"));
    match &args.config {
        Some(path) => tracing::info!("Config: {}", path.display()),
        None => tracing::info!("Config: built-in defaults"),
    }

    engine::run(&config)
}
