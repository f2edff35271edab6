use thiserror::Error;

/// Errors raised while turning one URL into one screenshot file.
///
/// Everything except `Configuration` is recoverable at the batch level:
/// the failing URL is logged and the loop moves on, leaving no output
/// file so a later run re-attempts it.
#[derive(Debug, Error)]
pub enum CaptureError {
    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    #[error("browser launch failed: {0}")]
    BrowserLaunchFailed(String),

    #[error("navigation failed: {0}")]
    NavigationFailed(String),

    #[error("screenshot capture failed: {0}")]
    CaptureFailed(String),

    #[error("image encoding failed: {0}")]
    EncodeFailed(String),

    #[error("configuration error: {0}")]
    Configuration(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<chromiumoxide::error::CdpError> for CaptureError {
    fn from(err: chromiumoxide::error::CdpError) -> Self {
        CaptureError::NavigationFailed(err.to_string())
    }
}

impl From<image::ImageError> for CaptureError {
    fn from(err: image::ImageError) -> Self {
        CaptureError::EncodeFailed(err.to_string())
    }
}
