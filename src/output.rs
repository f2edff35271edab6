//! Output path derivation.
//!
//! The filesystem is the completion ledger: a (URL, profile) pair always
//! maps to the same path, and an existing file at that path means the
//! capture already happened.

use crate::DeviceProfile;
use std::path::{Path, PathBuf};
use url::Url;

/// Replaces every character outside `[A-Za-z0-9-]` with `_`.
pub fn sanitize_component(raw: &str) -> String {
    raw.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' {
                c
            } else {
                '_'
            }
        })
        .collect()
}

/// Deterministic output path for a validated URL and profile:
/// `<output_dir>/<sanitized host+path>_<profile>.jpg`.
pub fn output_path(url: &Url, profile: DeviceProfile, output_dir: &Path) -> PathBuf {
    let host = url.host_str().unwrap_or_default();
    // A bare host parses with path "/"; trimming the trailing slash keeps
    // the sanitized stem from picking up a trailing `_`
    let path = url.path().trim_end_matches('/');
    let stem = sanitize_component(&format!("{host}{path}"));
    output_dir.join(format!("{}_{}.jpg", stem, profile.as_str()))
}
