//! Top-level batch orchestration.
//!
//! Strictly sequential: validate a line, skip it if its output already
//! exists, capture, finalize, write, pause, next line. Per-URL failures
//! are logged and the loop keeps going; only startup configuration
//! problems abort a run.

use crate::{
    density_for_scale, finalize_jpeg, normalize_url, open_url_list, output_path, validate_url,
    CaptureDriver, CaptureError, Config, DeviceProfile,
};
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::time::sleep;
use tracing::{info, warn};
use url::Url;

/// What the batch loop decided to do with one input line.
#[derive(Debug)]
pub enum LinePlan {
    /// Blank line, nothing to do
    Empty,
    /// Line did not normalize into a well-formed web URL
    Invalid(String),
    /// Output file already present; the capture is authoritative and
    /// never redone
    AlreadyExists { url: Url, path: PathBuf },
    /// Capture required
    Capture { url: Url, path: PathBuf },
}

/// Pure planning step for one line: trim, normalize the scheme, validate,
/// derive the output path, and check the completion ledger.
pub fn plan_line(line: &str, profile: DeviceProfile, output_dir: &Path) -> LinePlan {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return LinePlan::Empty;
    }

    let normalized = normalize_url(trimmed);
    let url = match validate_url(&normalized) {
        Ok(url) => url,
        Err(_) => return LinePlan::Invalid(normalized),
    };

    let path = output_path(&url, profile, output_dir);
    if path.exists() {
        LinePlan::AlreadyExists { url, path }
    } else {
        LinePlan::Capture { url, path }
    }
}

/// Outcome counts for one full pass over the input list.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct BatchSummary {
    pub saved: usize,
    pub already_existed: usize,
    pub invalid: usize,
    pub failed: usize,
}

impl BatchSummary {
    pub fn processed(&self) -> usize {
        self.saved + self.already_existed + self.invalid + self.failed
    }
}

/// Owns one sequential pass over the URL list for a fixed device profile.
pub struct BatchRunner {
    config: Config,
    profile: DeviceProfile,
    driver: CaptureDriver,
}

impl BatchRunner {
    pub fn new(config: Config, profile: DeviceProfile) -> Self {
        let driver = CaptureDriver::new(config.clone(), profile);
        Self {
            config,
            profile,
            driver,
        }
    }

    /// Processes every line of the input file and returns the tally.
    /// Errors out only when the list itself cannot be read.
    pub async fn run(&self) -> Result<BatchSummary, CaptureError> {
        fs::create_dir_all(&self.config.output_dir).await?;

        let mut lines = open_url_list(&self.config.input).await?;
        let mut summary = BatchSummary::default();

        while let Some(line) = lines.next_line().await? {
            match plan_line(&line, self.profile, &self.config.output_dir) {
                LinePlan::Empty => continue,
                LinePlan::Invalid(candidate) => {
                    warn!("invalid URL: {candidate}");
                    summary.invalid += 1;
                }
                LinePlan::AlreadyExists { url, .. } => {
                    info!("screenshot for {url} already exists, skipping");
                    summary.already_existed += 1;
                }
                LinePlan::Capture { url, path } => {
                    match self.capture_one(&url, &path).await {
                        Ok(()) => {
                            info!("screenshot for {url} saved to {}", path.display());
                            summary.saved += 1;
                        }
                        Err(e) => {
                            warn!("error with {url}: {e}");
                            summary.failed += 1;
                        }
                    }
                    sleep(self.config.iteration_delay).await;
                }
            }
        }

        info!(
            "done: {} saved, {} already existed, {} invalid, {} failed",
            summary.saved, summary.already_existed, summary.invalid, summary.failed
        );

        Ok(summary)
    }

    /// Per-URL pipeline: capture, re-encode, write. Any error here is the
    /// caller's to log; no partial or sentinel file is ever left behind,
    /// so a later run simply re-attempts the URL.
    async fn capture_one(&self, url: &Url, path: &Path) -> Result<(), CaptureError> {
        let raster = self.driver.capture(url).await?;

        let dpi = density_for_scale(Some(self.profile.device_scale_factor()));
        let jpeg = finalize_jpeg(&raster, self.config.jpeg_quality, dpi)?;

        fs::write(path, &jpeg).await?;
        Ok(())
    }
}
