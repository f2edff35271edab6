//! # shotlist
//!
//! Batch screenshot utility: reads newline-delimited URLs from a file and
//! writes one device-profile-specific JPEG per URL into an output
//! directory, skipping URLs that already have an output file.
//!
//! The pipeline is strictly sequential. Each URL gets its own isolated
//! headless Chrome session (launched and torn down per capture), the
//! raster is re-encoded as a quality-100 JPEG tagged with a DPI derived
//! from the profile's pixel density, and the filesystem doubles as the
//! completion ledger — an existing output file is never overwritten.
//!
//! ## CLI usage
//!
//! ```bash
//! shotlist desktop                  # list.txt -> screenshots/
//! shotlist full --settle-secs 20    # whole-page captures, shorter settle
//! ```
//!
//! ## Library usage
//!
//! ```rust,no_run
//! use shotlist::{BatchRunner, Config, DeviceProfile};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let runner = BatchRunner::new(Config::default(), DeviceProfile::Desktop);
//!     let summary = runner.run().await?;
//!     println!("{} screenshots saved", summary.saved);
//!     Ok(())
//! }
//! ```

/// Device profiles, runtime settings, and Chrome launch configuration
pub mod config;

/// Error types for the capture pipeline
pub mod error;

/// Reading and validating the URL list
pub mod url_list;

/// Output path derivation and filename sanitization
pub mod output;

/// Per-URL browser session driving
pub mod capture;

/// JPEG re-encoding and DPI tagging
pub mod finalize;

/// Sequential batch orchestration
pub mod batch;

/// Command-line interface
pub mod cli;

#[cfg(test)]
mod tests;

pub use batch::*;
pub use capture::*;
pub use cli::*;
pub use config::*;
pub use error::*;
pub use finalize::*;
pub use output::*;
pub use url_list::*;
