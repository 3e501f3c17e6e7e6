//! Working directory layout
//!
//! ```text
//! <root>/
//!   dist/
//!     sitemap.xml
//!     .config.json
//!     screenshot/
//!   output/
//!     <domain>_generated_<timestamp>.zip
//! ```

use crate::config::OutputConfig;
use crate::session::SESSION_FILE_NAME;
use crate::sitemap::SITEMAP_FILE_NAME;
use crate::Result;
use std::path::{Path, PathBuf};

/// Name of the artifact directory inside dist
pub const SCREENSHOT_DIR_NAME: &str = "screenshot";

/// Resolved paths of one working directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Workspace {
    pub root: PathBuf,
    pub dist: PathBuf,
    pub screenshots: PathBuf,
    pub output: PathBuf,
}

impl Workspace {
    /// Resolves the configured directories against `root`
    ///
    /// Absolute directories in the config are used as-is.
    pub fn new(root: &Path, config: &OutputConfig) -> Self {
        let dist = root.join(&config.dist_dir);
        Self {
            root: root.to_path_buf(),
            screenshots: dist.join(SCREENSHOT_DIR_NAME),
            output: root.join(&config.output_dir),
            dist,
        }
    }

    pub fn sitemap_path(&self) -> PathBuf {
        self.dist.join(SITEMAP_FILE_NAME)
    }

    pub fn session_path(&self) -> PathBuf {
        self.dist.join(SESSION_FILE_NAME)
    }

    /// Creates the directory tree and empties dist
    ///
    /// Archives in the output directory are kept.
    pub async fn setup(&self) -> Result<()> {
        tracing::info!("Creating directories under {}", self.root.display());
        tokio::fs::create_dir_all(&self.dist).await?;
        tokio::fs::create_dir_all(&self.output).await?;

        tracing::info!("Cleaning {}", self.dist.display());
        let mut entries = tokio::fs::read_dir(&self.dist).await?;
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if entry.file_type().await?.is_dir() {
                tokio::fs::remove_dir_all(&path).await?;
            } else {
                tokio::fs::remove_file(&path).await?;
            }
        }

        tokio::fs::create_dir_all(&self.screenshots).await?;
        Ok(())
    }
}
