//! Configuration management with serde serialization/deserialization
//!
//! Device-profile presets, runtime settings, and the Chrome launch
//! configuration used by the capture driver.

use crate::CaptureError;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Named viewport preset selected once at process start.
///
/// `Full` is a sentinel: no viewport override is applied and the capture
/// spans the entire rendered page height instead of a fixed window.
///
/// # Examples
///
/// ```rust
/// use shotlist::DeviceProfile;
///
/// let profile = DeviceProfile::Desktop;
/// let viewport = profile.viewport().unwrap();
/// assert_eq!(viewport.width, 1920);
/// assert_eq!(profile.as_str(), "desktop");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DeviceProfile {
    /// Whole-page capture at default viewport, with an extra settle delay
    Full,
    /// 1920x1080 desktop viewport
    Desktop,
    /// 1366x1024 tablet viewport
    Tablet,
    /// 430x932 phone viewport
    Mobile,
}

impl DeviceProfile {
    /// Viewport preset for this profile, or `None` for `Full`.
    pub fn viewport(&self) -> Option<Viewport> {
        match self {
            DeviceProfile::Full => None,
            DeviceProfile::Desktop => Some(Viewport {
                width: 1920,
                height: 1080,
                device_scale_factor: 2.0,
            }),
            DeviceProfile::Tablet => Some(Viewport {
                width: 1366,
                height: 1024,
                device_scale_factor: 2.0,
            }),
            DeviceProfile::Mobile => Some(Viewport {
                width: 430,
                height: 932,
                device_scale_factor: 2.0,
            }),
        }
    }

    /// Pixel-density multiplier, defined for every profile including `Full`.
    pub fn device_scale_factor(&self) -> f64 {
        self.viewport().map(|v| v.device_scale_factor).unwrap_or(2.0)
    }

    /// Whether the capture spans the whole scrollable page height.
    pub fn full_page(&self) -> bool {
        matches!(self, DeviceProfile::Full)
    }

    /// Lowercase name used in output filenames and on the command line.
    pub fn as_str(&self) -> &'static str {
        match self {
            DeviceProfile::Full => "full",
            DeviceProfile::Desktop => "desktop",
            DeviceProfile::Tablet => "tablet",
            DeviceProfile::Mobile => "mobile",
        }
    }
}

impl std::fmt::Display for DeviceProfile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Browser viewport dimensions and pixel density for sized profiles.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct Viewport {
    /// Viewport width in pixels
    pub width: u32,

    /// Viewport height in pixels
    pub height: u32,

    /// Device pixel ratio, also drives the output JPEG DPI tag
    pub device_scale_factor: f64,
}

/// Runtime settings for the batch run.
///
/// Defaults reproduce the observed behavior of the tool: `list.txt` input,
/// `screenshots/` output, a 50 second settle delay for full-page captures,
/// a 1 second pause between URLs, and no ceiling on navigation time.
///
/// # Examples
///
/// ```rust
/// use shotlist::Config;
/// use std::time::Duration;
///
/// let config = Config {
///     settle_delay: Duration::from_secs(5),
///     ..Default::default()
/// };
/// assert_eq!(config.jpeg_quality, 100);
/// ```
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    /// File of newline-delimited URLs, scheme optional (default: list.txt)
    pub input: PathBuf,

    /// Directory screenshots are written into (default: screenshots)
    pub output_dir: PathBuf,

    /// Extra wait after network settle for full-page captures (default: 50s)
    ///
    /// Network idle alone is not enough for lazy-loaded or animated pages;
    /// the fixed delay lets deferred content finish rendering.
    pub settle_delay: Duration,

    /// Pause between consecutive URLs (default: 1s)
    ///
    /// Crude rate limit protecting both remote hosts and the local
    /// browser-launch subsystem.
    pub iteration_delay: Duration,

    /// Ceiling on navigation time (default: None, wait forever)
    ///
    /// The unbounded default matches the observed behavior: a page that
    /// never settles blocks the batch. Set a value to cap it.
    pub navigation_timeout: Option<Duration>,

    /// JPEG encoding quality, 1-100 (default: 100)
    pub jpeg_quality: u8,

    /// User-agent sent with every navigation (default: desktop Chrome)
    ///
    /// A fixed desktop UA keeps rendering consistent across host systems
    /// and avoids mobile-variant pages for the desktop-class profiles.
    pub user_agent: String,

    /// Path to Chrome/Chromium executable (default: auto-detect)
    pub chrome_path: Option<String>,
}

pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) \
    AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

impl Default for Config {
    fn default() -> Self {
        Self {
            input: PathBuf::from("list.txt"),
            output_dir: PathBuf::from("screenshots"),
            settle_delay: Duration::from_secs(50),
            iteration_delay: Duration::from_secs(1),
            navigation_timeout: None,
            jpeg_quality: 100,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            chrome_path: None,
        }
    }
}

impl Config {
    /// Rejects settings that would make the run meaningless. Called once
    /// at startup, before any filesystem or browser I/O.
    pub fn validate(&self) -> Result<(), CaptureError> {
        if self.jpeg_quality == 0 || self.jpeg_quality > 100 {
            return Err(CaptureError::Configuration(format!(
                "jpeg_quality must be 1-100, got {}",
                self.jpeg_quality
            )));
        }
        if self.user_agent.trim().is_empty() {
            return Err(CaptureError::Configuration(
                "user_agent must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

pub fn get_chrome_args() -> Vec<String> {
    let unique_id = format!("{}-{}", std::process::id(), uuid::Uuid::new_v4());

    vec![
        "--headless".to_string(),
        "--no-sandbox".to_string(),
        "--disable-dev-shm-usage".to_string(),
        "--disable-gpu".to_string(),
        "--disable-extensions".to_string(),
        "--disable-default-apps".to_string(),
        "--disable-sync".to_string(),
        "--no-first-run".to_string(),
        "--ignore-certificate-errors".to_string(),
        // Unique user data directory so sequential launches never trip
        // over a stale singleton lock
        format!("--user-data-dir=/tmp/shotlist-{unique_id}"),
    ]
}

pub fn create_browser_config(config: &Config) -> Result<chromiumoxide::browser::BrowserConfig, CaptureError> {
    use chromiumoxide::browser::BrowserConfig;

    let mut builder = BrowserConfig::builder().args(get_chrome_args());

    if let Some(chrome_path) = &config.chrome_path {
        builder = builder.chrome_executable(chrome_path);
    }

    builder.build().map_err(CaptureError::BrowserLaunchFailed)
}
