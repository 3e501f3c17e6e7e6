//! Session metadata shared between the plan and package commands
//!
//! The plan command records which site was crawled; the package command
//! reads it back to name the archive. The file lives in the dist directory
//! but is never included in the archive.

use crate::url::extract_domain;
use crate::{PackagingError, Result, UrlError};
use serde::{Deserialize, Serialize};
use std::path::Path;
use url::Url;

/// File name of the session metadata inside the dist directory
pub const SESSION_FILE_NAME: &str = ".config.json";

/// The crawled site, as resolved by the plan command
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionConfig {
    pub domain: String,
    pub url: String,
}

impl SessionConfig {
    /// Resolves the session from the target URL given to the plan command
    ///
    /// # Examples
    ///
    /// ```
    /// use sitemap_shot::SessionConfig;
    ///
    /// let session = SessionConfig::from_url("https://www.Example.com/start").unwrap();
    /// assert_eq!(session.domain, "www.example.com");
    /// assert_eq!(session.url, "https://www.Example.com/start");
    /// ```
    pub fn from_url(target: &str) -> std::result::Result<Self, UrlError> {
        let parsed = Url::parse(target).map_err(|e| UrlError::Parse(e.to_string()))?;

        if parsed.scheme() != "http" && parsed.scheme() != "https" {
            return Err(UrlError::InvalidScheme(parsed.scheme().to_string()));
        }

        let domain = extract_domain(&parsed).ok_or(UrlError::MissingDomain)?;

        Ok(Self {
            domain,
            url: target.to_string(),
        })
    }

    /// Writes the session metadata into `dist_dir` as pretty JSON
    pub async fn save(&self, dist_dir: &Path) -> Result<()> {
        tokio::fs::create_dir_all(dist_dir).await?;
        let json = serde_json::to_string_pretty(self)?;
        tokio::fs::write(dist_dir.join(SESSION_FILE_NAME), json).await?;
        Ok(())
    }

    /// Reads the session metadata written by [`SessionConfig::save`]
    ///
    /// # Errors
    ///
    /// * `PackagingError::MissingSession` - the plan step never ran
    /// * `PackagingError::InvalidSession` - the file is not valid session JSON
    pub fn load(dist_dir: &Path) -> std::result::Result<Self, PackagingError> {
        let path = dist_dir.join(SESSION_FILE_NAME);
        let content = std::fs::read_to_string(&path)
            .map_err(|_| PackagingError::MissingSession(path.display().to_string()))?;

        serde_json::from_str(&content).map_err(|e| PackagingError::InvalidSession {
            path: path.display().to_string(),
            message: e.to_string(),
        })
    }
}
