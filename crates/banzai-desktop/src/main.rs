//! Banzai Desktop - native entry point
//!
//! Runs the same scene as the web build in a desktop window.

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser, Debug)]
#[command(name = "banzai")]
#[command(about = "Interactive cel-shaded 3D shapes demo")]
#[command(version)]
struct Args {
    /// Path to scene configuration file
    #[arg(short, long, default_value = "banzai.toml")]
    config: PathBuf,

    /// Directory holding the `models/` folder
    #[arg(short, long, default_value = "crates/banzai-web/assets")]
    assets: PathBuf,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info")]
    log_level: String,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    let level = match args.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    info!("banzai v{}", env!("CARGO_PKG_VERSION"));

    let config = banzai_core::load_config(&args.config)?;
    info!(
        mode = ?config.scene.mode,
        themes = config.themes.len(),
        "Configuration loaded"
    );

    // Bevy resolves relative asset paths against the crate directory, not the cwd
    let assets = std::env::current_dir()?.join(&args.assets);
    if !assets.is_dir() {
        warn!(path = %assets.display(), "Asset directory not found, models will fail to load");
    }

    banzai_web::run(config, &assets.to_string_lossy());
    Ok(())
}
