//! Reading and validating the newline-delimited URL list.

use crate::CaptureError;
use std::path::Path;
use tokio::fs::File;
use tokio::io::{AsyncBufReadExt, BufReader, Lines};

/// Opens the input file as a lazy line stream. Lines are consumed one at
/// a time so arbitrarily large lists never load fully into memory.
pub async fn open_url_list(path: &Path) -> Result<Lines<BufReader<File>>, CaptureError> {
    let file = File::open(path).await?;
    Ok(BufReader::new(file).lines())
}

/// Prepends `https://` when the candidate has no explicit scheme.
/// Existing `http://`/`https://` prefixes pass through unchanged.
pub fn normalize_url(candidate: &str) -> String {
    let trimmed = candidate.trim();
    if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
        trimmed.to_string()
    } else {
        format!("https://{trimmed}")
    }
}

/// Accepts only well-formed absolute web URLs: http(s) scheme with a host.
/// Anything else is discarded by the caller, never retried.
pub fn validate_url(candidate: &str) -> Result<url::Url, CaptureError> {
    let parsed =
        url::Url::parse(candidate).map_err(|_| CaptureError::InvalidUrl(candidate.to_string()))?;

    match parsed.scheme() {
        "http" | "https" => {}
        _ => return Err(CaptureError::InvalidUrl(candidate.to_string())),
    }

    if parsed.host_str().is_none() {
        return Err(CaptureError::InvalidUrl(candidate.to_string()));
    }

    Ok(parsed)
}
