//! Chromium-backed [`BrowserSession`] using chromiumoxide

use crate::capture::browser::{BrowserError, BrowserSession, NavigationResponse};
use crate::config::CaptureConfig;
use async_trait::async_trait;
use chromiumoxide::cdp::browser_protocol::page::CaptureScreenshotFormat;
use chromiumoxide::handler::viewport::Viewport;
use chromiumoxide::page::ScreenshotParams;
use chromiumoxide::{Browser, BrowserConfig, Page};
use futures::StreamExt;
use std::time::Duration;
use tokio::task::JoinHandle;

/// Extra time granted to CDP requests on top of the navigation timeout, so
/// the executor's own timeout fires first
const REQUEST_TIMEOUT_MARGIN: Duration = Duration::from_secs(10);

/// A headless Chromium with a single page
pub struct ChromeSession {
    browser: Browser,
    page: Page,
    handler: JoinHandle<()>,
    closed: bool,
}

impl ChromeSession {
    /// Launches headless Chromium and opens the page used for the whole run
    pub async fn launch(config: &CaptureConfig) -> Result<Self, BrowserError> {
        let viewport = Viewport {
            width: config.viewport_width,
            height: config.viewport_height,
            ..Viewport::default()
        };

        let mut builder = BrowserConfig::builder()
            .window_size(config.viewport_width, config.viewport_height)
            .viewport(viewport)
            .request_timeout(
                Duration::from_secs(config.navigation_timeout_secs) + REQUEST_TIMEOUT_MARGIN,
            );
        if let Some(ref bin) = config.chrome_executable {
            builder = builder.chrome_executable(bin);
        }
        let browser_config = builder.build().map_err(BrowserError::Launch)?;

        tracing::debug!(
            "Launching headless browser ({}x{})",
            config.viewport_width,
            config.viewport_height
        );

        let (mut browser, mut handler) = Browser::launch(browser_config)
            .await
            .map_err(|e| BrowserError::Launch(e.to_string()))?;

        let handler = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if let Err(e) = event {
                    tracing::debug!("Browser event loop stopped: {}", e);
                    break;
                }
            }
        });

        let page = match browser.new_page("about:blank").await {
            Ok(page) => page,
            Err(e) => {
                if let Err(close_err) = browser.close().await {
                    tracing::debug!("Failed to close browser after launch error: {}", close_err);
                }
                handler.abort();
                return Err(BrowserError::Launch(format!("failed to open page: {}", e)));
            }
        };

        Ok(Self {
            browser,
            page,
            handler,
            closed: false,
        })
    }

    async fn evaluate_f64(&self, script: &str) -> Result<f64, BrowserError> {
        self.page
            .evaluate(script)
            .await
            .map_err(|e| BrowserError::Evaluation(e.to_string()))?
            .into_value::<f64>()
            .map_err(|e| BrowserError::Evaluation(e.to_string()))
    }

    async fn run_script(&self, script: &str) -> Result<(), BrowserError> {
        self.page
            .evaluate(script)
            .await
            .map(|_| ())
            .map_err(|e| BrowserError::Evaluation(e.to_string()))
    }
}

#[async_trait]
impl BrowserSession for ChromeSession {
    async fn navigate(&mut self, url: &str) -> Result<NavigationResponse, BrowserError> {
        self.page
            .goto(url)
            .await
            .map_err(|e| BrowserError::NavigateFailed {
                url: url.to_string(),
                details: e.to_string(),
            })?;

        let request = self
            .page
            .wait_for_navigation_response()
            .await
            .map_err(|e| BrowserError::NavigateFailed {
                url: url.to_string(),
                details: e.to_string(),
            })?;

        let status = request
            .as_ref()
            .and_then(|req| req.response.as_ref())
            .and_then(|resp| u16::try_from(resp.status).ok());

        Ok(NavigationResponse { status })
    }

    async fn scroll_height(&mut self) -> Result<u64, BrowserError> {
        let height = self.evaluate_f64("document.body.scrollHeight").await?;
        Ok(height.max(0.0) as u64)
    }

    async fn scroll_by(&mut self, dy: u64) -> Result<(), BrowserError> {
        self.run_script(&format!("window.scrollBy(0, {})", dy)).await
    }

    async fn scroll_to_top(&mut self) -> Result<(), BrowserError> {
        self.run_script("window.scrollTo(0, 0)").await
    }

    async fn capture_full_page(&mut self) -> Result<Vec<u8>, BrowserError> {
        let params = ScreenshotParams::builder()
            .format(CaptureScreenshotFormat::Png)
            .full_page(true)
            .build();

        self.page
            .screenshot(params)
            .await
            .map_err(|e| BrowserError::Screenshot(e.to_string()))
    }

    async fn close(&mut self) -> Result<(), BrowserError> {
        if self.closed {
            return Ok(());
        }
        self.closed = true;

        let result = self
            .browser
            .close()
            .await
            .map(|_| ())
            .map_err(|e| BrowserError::Internal(e.to_string()));
        if result.is_ok() {
            if let Err(e) = self.browser.wait().await {
                tracing::debug!("Browser process did not exit cleanly: {}", e);
            }
        }
        self.handler.abort();

        tracing::debug!("Browser closed");
        result
    }
}
