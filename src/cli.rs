//! Command-line interface.
//!
//! One positional argument selects the device profile; everything else
//! has defaults matching the tool's observed behavior. An unrecognized
//! or missing profile aborts with a usage diagnostic before any I/O.

use crate::{Config, DeviceProfile};
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Parser)]
#[command(name = "shotlist")]
#[command(about = "Batch device-profile screenshots for a list of URLs")]
#[command(version)]
pub struct Cli {
    /// Device profile to capture with
    #[arg(value_enum)]
    pub profile: DeviceProfile,

    #[arg(long, help = "Configuration file path (JSON)")]
    pub config: Option<PathBuf>,

    #[arg(short, long, help = "Input file of URLs, one per line")]
    pub input: Option<PathBuf>,

    #[arg(short, long, help = "Output directory for screenshots")]
    pub output: Option<PathBuf>,

    #[arg(long, help = "Settle delay in seconds for full-page captures")]
    pub settle_secs: Option<u64>,

    #[arg(long, help = "Pause between URLs in milliseconds")]
    pub delay_ms: Option<u64>,

    #[arg(
        long,
        help = "Ceiling on navigation time in seconds (default: unbounded)"
    )]
    pub navigation_timeout_secs: Option<u64>,

    #[arg(long, help = "Chrome executable path")]
    pub chrome_path: Option<String>,

    #[arg(long, help = "Enable verbose logging")]
    pub verbose: bool,
}

/// Builds the effective configuration: file values (when `--config` is
/// given) overridden by explicit CLI flags.
pub async fn load_config(args: &Cli) -> anyhow::Result<Config> {
    let mut config = if let Some(config_path) = &args.config {
        let config_content = tokio::fs::read_to_string(config_path).await?;
        serde_json::from_str(&config_content)?
    } else {
        Config::default()
    };

    if let Some(input) = &args.input {
        config.input = input.clone();
    }
    if let Some(output) = &args.output {
        config.output_dir = output.clone();
    }
    if let Some(secs) = args.settle_secs {
        config.settle_delay = Duration::from_secs(secs);
    }
    if let Some(ms) = args.delay_ms {
        config.iteration_delay = Duration::from_millis(ms);
    }
    if let Some(secs) = args.navigation_timeout_secs {
        config.navigation_timeout = Some(Duration::from_secs(secs));
    }
    if let Some(chrome_path) = &args.chrome_path {
        config.chrome_path = Some(chrome_path.clone());
    }

    config.validate()?;

    Ok(config)
}

pub fn setup_logging(verbose: bool) -> anyhow::Result<()> {
    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };

    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .init();

    Ok(())
}
