//! Sitemap module for Sitemap-Shot
//!
//! This module provides:
//! - The canonical in-memory URL set (`UrlRecord`, `SitemapModel`)
//! - Conversion to and from the sitemap XML wire format
//! - Resolution of sitemap indexes into one flat URL set
//! - Reading and writing the persisted `sitemap.xml`

mod merge;
mod model;
mod xml;

pub use merge::{merge_sitemap, DocumentSource, HttpSource};
pub use model::{
    RecordDefaults, SitemapDocument, SitemapModel, UrlRecord, DEFAULT_CHANGE_FREQUENCY,
    DEFAULT_PRIORITY,
};
pub use xml::{escape_xml, parse_sitemap, to_xml, SITEMAP_NAMESPACE};

use crate::{FormatError, Result};
use std::path::Path;

/// File name of the persisted sitemap inside the dist directory
pub const SITEMAP_FILE_NAME: &str = "sitemap.xml";

/// Reads a persisted sitemap, which must be a flat `<urlset>`
///
/// # Errors
///
/// * `ShotError::Io` - the file cannot be read
/// * `ShotError::Format` - the file is empty, malformed, or a sitemap index
pub async fn read_sitemap_file(path: &Path) -> Result<SitemapModel> {
    let content = tokio::fs::read_to_string(path).await?;

    match parse_sitemap(&content)? {
        SitemapDocument::UrlSet(records) => Ok(records),
        SitemapDocument::Index(_) => Err(FormatError::NotFlat(path.display().to_string()).into()),
    }
}

/// Writes a flat sitemap as `<urlset>` XML, creating parent directories
pub async fn write_sitemap_file(path: &Path, model: &[UrlRecord]) -> Result<()> {
    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent).await?;
    }
    tokio::fs::write(path, to_xml(model)).await?;
    Ok(())
}
