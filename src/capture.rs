//! Capture driver: one isolated browser session per URL.
//!
//! Sessions are deliberately never reused across URLs. A fresh launch per
//! capture costs startup time but rules out state leaking between pages,
//! whether cookies or a degraded renderer left behind by a prior failure.

use crate::{create_browser_config, CaptureError, Config, DeviceProfile};
use chromiumoxide::browser::Browser;
use chromiumoxide::cdp::browser_protocol::emulation::SetDeviceMetricsOverrideParams;
use chromiumoxide::cdp::browser_protocol::page::CaptureScreenshotFormat;
use chromiumoxide::page::{Page, ScreenshotParams};
use futures::StreamExt;
use tokio::time::{sleep, timeout};
use tracing::debug;
use url::Url;

/// Drives a headless browser through load, settle, and raster capture
/// for a single validated URL.
pub struct CaptureDriver {
    config: Config,
    profile: DeviceProfile,
}

impl CaptureDriver {
    pub fn new(config: Config, profile: DeviceProfile) -> Self {
        Self { config, profile }
    }

    /// Renders `url` and returns the raw raster capture buffer.
    ///
    /// The browser is closed and its CDP handler task aborted on every
    /// exit path, success or failure.
    pub async fn capture(&self, url: &Url) -> Result<Vec<u8>, CaptureError> {
        let browser_config = create_browser_config(&self.config)?;
        let (mut browser, mut handler) = Browser::launch(browser_config)
            .await
            .map_err(|e| CaptureError::BrowserLaunchFailed(e.to_string()))?;

        let handler_task = tokio::spawn(async move { while handler.next().await.is_some() {} });

        let result = self.capture_page(&browser, url).await;

        let _ = browser.close().await;
        handler_task.abort();

        result
    }

    async fn capture_page(&self, browser: &Browser, url: &Url) -> Result<Vec<u8>, CaptureError> {
        let page = browser.new_page("about:blank").await?;

        page.set_user_agent(self.config.user_agent.as_str()).await?;

        if let Some(viewport) = self.profile.viewport() {
            let params = SetDeviceMetricsOverrideParams::builder()
                .width(viewport.width as i64)
                .height(viewport.height as i64)
                .device_scale_factor(viewport.device_scale_factor)
                .mobile(false)
                .build()
                .map_err(CaptureError::CaptureFailed)?;
            page.execute(params).await?;
        }

        self.navigate(&page, url).await?;

        // Network settle alone misses lazy-loaded content; full-page mode
        // gives deferred renders a fixed window to finish
        if self.profile.full_page() {
            debug!(
                "waiting {:?} for {} to finish rendering",
                self.config.settle_delay, url
            );
            sleep(self.config.settle_delay).await;
        }

        let params = ScreenshotParams::builder()
            .format(CaptureScreenshotFormat::Png)
            .full_page(self.profile.full_page())
            .build();

        page.screenshot(params)
            .await
            .map_err(|e| CaptureError::CaptureFailed(e.to_string()))
    }

    /// Navigates and waits for network activity to settle. With no
    /// configured timeout this waits forever; a page that never goes idle
    /// blocks the batch, which matches the tool's documented behavior.
    async fn navigate(&self, page: &Page, url: &Url) -> Result<(), CaptureError> {
        let nav = async {
            page.goto(url.as_str()).await?;
            page.wait_for_navigation().await?;
            Ok::<(), chromiumoxide::error::CdpError>(())
        };

        match self.config.navigation_timeout {
            Some(limit) => timeout(limit, nav).await.map_err(|_| {
                CaptureError::NavigationFailed(format!(
                    "navigation did not settle within {limit:?}"
                ))
            })??,
            None => nav.await?,
        }

        Ok(())
    }
}
