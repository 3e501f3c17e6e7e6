//! The headless browser seen by the capture executor
//!
//! The executor drives one page through this trait; the Chromium-backed
//! implementation lives in `chrome`, and tests substitute scripted sessions.

use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BrowserError {
    #[error("Failed to launch browser: {0}")]
    Launch(String),

    #[error("Failed to navigate to {url}: {details}")]
    NavigateFailed { url: String, details: String },

    #[error("Script evaluation failed: {0}")]
    Evaluation(String),

    #[error("Screenshot failed: {0}")]
    Screenshot(String),

    #[error("Browser internal error: {0}")]
    Internal(String),
}

/// What the browser learned about the main document of a navigation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NavigationResponse {
    /// HTTP status of the main document; `None` when the browser saw no
    /// network response (e.g. served from cache or a non-HTTP URL)
    pub status: Option<u16>,
}

impl NavigationResponse {
    pub fn with_status(status: u16) -> Self {
        Self {
            status: Some(status),
        }
    }

    /// A missing status counts as success
    pub fn is_success(&self) -> bool {
        self.status.map_or(true, |s| (200..300).contains(&s))
    }
}

/// One browser page, reused for every job of a run
#[async_trait]
pub trait BrowserSession: Send {
    /// Loads `url` and waits for the page to finish loading
    async fn navigate(&mut self, url: &str) -> Result<NavigationResponse, BrowserError>;

    /// Current `document.body.scrollHeight`, in CSS pixels
    async fn scroll_height(&mut self) -> Result<u64, BrowserError>;

    async fn scroll_by(&mut self, dy: u64) -> Result<(), BrowserError>;

    async fn scroll_to_top(&mut self) -> Result<(), BrowserError>;

    /// Full-page PNG screenshot of the current document
    async fn capture_full_page(&mut self) -> Result<Vec<u8>, BrowserError>;

    /// Shuts the browser down; called exactly once, at the end of a run
    async fn close(&mut self) -> Result<(), BrowserError>;
}
