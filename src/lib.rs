//! Sitemap-Shot: sitemap-driven full-page screenshot capture
//!
//! This crate merges or generates a site's sitemap, orders it by path depth,
//! selects a bounded crawl plan from it, captures one full-page screenshot per
//! planned URL with a headless browser, and packages the results into a zip
//! archive.

pub mod archive;
pub mod capture;
pub mod config;
pub mod crawler;
pub mod output;
pub mod plan;
pub mod robots;
pub mod session;
pub mod sitemap;
pub mod url;
pub mod workspace;

use std::time::Duration;
use thiserror::Error;

/// Main error type for Sitemap-Shot operations
#[derive(Debug, Error)]
pub enum ShotError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Sitemap format error: {0}")]
    Format(#[from] FormatError),

    #[error("Sitemap fetch error: {0}")]
    Fetch(#[from] FetchError),

    #[error("Packaging error: {0}")]
    Packaging(#[from] PackagingError),

    #[error("Browser error: {0}")]
    Browser(#[from] capture::BrowserError),

    #[error("URL error: {0}")]
    UrlError(#[from] UrlError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Malformed, empty, or unexpectedly shaped sitemap documents
#[derive(Debug, Error)]
pub enum FormatError {
    #[error("sitemap document is empty")]
    Empty,

    #[error("malformed sitemap XML: {0}")]
    Xml(String),

    #[error("unexpected root element <{0}>, expected <urlset> or <sitemapindex>")]
    UnexpectedRoot(String),

    #[error("expected a flat <urlset> sitemap at {0}, found a sitemap index")]
    NotFlat(String),
}

/// Failures while retrieving a sitemap document
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("HTTP {status} while fetching {location}")]
    Status { location: String, status: u16 },

    #[error("failed to fetch {location}: {message}")]
    Transport { location: String, message: String },
}

impl FetchError {
    /// The location that failed to fetch
    pub fn location(&self) -> &str {
        match self {
            Self::Status { location, .. } | Self::Transport { location, .. } => location,
        }
    }
}

/// Per-URL capture failures
///
/// These are the only recoverable errors in a run: the capture executor
/// decides, per failure, whether to continue with the next URL or abort.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CaptureFailure {
    #[error("HTTP {status} returned for {url}")]
    Status { url: String, status: u16 },

    #[error("navigation to {url} timed out after {timeout:?}")]
    Timeout { url: String, timeout: Duration },

    #[error("navigation to {url} failed: {details}")]
    Navigation { url: String, details: String },

    #[error("capture of {url} failed: {details}")]
    Browser { url: String, details: String },
}

impl CaptureFailure {
    /// The URL whose capture failed
    pub fn url(&self) -> &str {
        match self {
            Self::Status { url, .. }
            | Self::Timeout { url, .. }
            | Self::Navigation { url, .. }
            | Self::Browser { url, .. } => url,
        }
    }
}

/// Errors raised while packaging generated output
#[derive(Debug, Error)]
pub enum PackagingError {
    #[error("session metadata not found at {0}; run the plan command first")]
    MissingSession(String),

    #[error("session metadata at {path} is invalid: {message}")]
    InvalidSession { path: String, message: String },

    #[error("failed to write archive: {0}")]
    Zip(#[from] zip::result::ZipError),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// URL-specific errors
#[derive(Debug, Error)]
pub enum UrlError {
    #[error("Failed to parse URL: {0}")]
    Parse(String),

    #[error("Invalid URL scheme: {0}")]
    InvalidScheme(String),

    #[error("Missing domain in URL")]
    MissingDomain,
}

/// Result type alias for Sitemap-Shot operations
pub type Result<T> = std::result::Result<T, ShotError>;

// Re-export commonly used types
pub use config::Config;
pub use plan::{select, sort_by_depth, SelectionLimits};
pub use session::SessionConfig;
pub use sitemap::{SitemapDocument, SitemapModel, UrlRecord};
