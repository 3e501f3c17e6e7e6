use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

/// Main configuration structure for Sitemap-Shot
///
/// Every section and key is optional; a missing config file behaves like an
/// empty one.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct Config {
    pub generator: GeneratorConfig,
    pub capture: CaptureConfig,
    pub output: OutputConfig,
}

/// Settings for crawling a site when no sitemap is supplied
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct GeneratorConfig {
    /// Name of the crawler, used in the User-Agent header
    pub crawler_name: String,

    /// Version of the crawler
    pub crawler_version: String,

    /// URL with information about the crawler
    pub contact_url: String,

    /// Minimum time between two requests (milliseconds)
    pub request_delay_ms: u64,

    /// Maximum number of pages recorded in a generated sitemap
    pub max_pages: usize,

    /// Whether robots.txt directives are honoured
    pub respect_robots: bool,

    /// Per-request timeout (seconds)
    pub request_timeout_secs: u64,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            crawler_name: "SitemapShot".to_string(),
            crawler_version: env!("CARGO_PKG_VERSION").to_string(),
            contact_url: "https://github.com/sitemap-shot/sitemap-shot".to_string(),
            request_delay_ms: 100,
            max_pages: 50_000,
            respect_robots: true,
            request_timeout_secs: 30,
        }
    }
}

impl GeneratorConfig {
    /// Formats the User-Agent header: `Name/Version (+ContactURL)`
    pub fn user_agent(&self) -> String {
        format!(
            "{}/{} (+{})",
            self.crawler_name, self.crawler_version, self.contact_url
        )
    }

    pub fn request_delay(&self) -> Duration {
        Duration::from_millis(self.request_delay_ms)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

/// Headless browser and settle protocol settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct CaptureConfig {
    pub viewport_width: u32,

    pub viewport_height: u32,

    /// Navigation timeout; a navigation that hangs longer counts as a failed capture
    pub navigation_timeout_secs: u64,

    /// Wait before and after the lazy-load scroll (milliseconds)
    pub settle_delay_ms: u64,

    /// Distance scrolled per step (pixels)
    pub scroll_step_px: u64,

    /// Pause between scroll steps (milliseconds)
    pub scroll_interval_ms: u64,

    /// Explicit Chrome/Chromium binary; auto-detected when unset
    pub chrome_executable: Option<PathBuf>,
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            viewport_width: 1920,
            viewport_height: 1080,
            navigation_timeout_secs: 30,
            settle_delay_ms: 1000,
            scroll_step_px: 100,
            scroll_interval_ms: 100,
            chrome_executable: None,
        }
    }
}

/// Working directory layout
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct OutputConfig {
    /// Directory holding the sitemap, session metadata and screenshots
    pub dist_dir: PathBuf,

    /// Directory receiving the zip archives
    pub output_dir: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dist_dir: PathBuf::from("dist"),
            output_dir: PathBuf::from("output"),
        }
    }
}
