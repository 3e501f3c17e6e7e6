//! Sitemap merge engine
//!
//! Resolves a sitemap URL into a single flat URL set. A flat `<urlset>` is
//! used as-is; a `<sitemapindex>` is resolved by fetching every child sitemap
//! in index order and concatenating their entries in document order.
//!
//! Merging is all-or-nothing: the first failed fetch or malformed child
//! aborts the whole merge. There are no retries, and URLs listed by more than
//! one child are kept as many times as they appear.

use crate::sitemap::model::{SitemapDocument, SitemapModel};
use crate::sitemap::xml::parse_sitemap;
use crate::{FetchError, FormatError, ShotError};
use async_trait::async_trait;
use reqwest::Client;

/// Something that can retrieve a sitemap document by location
#[async_trait]
pub trait DocumentSource: Send + Sync {
    /// Fetches the document body as text
    async fn fetch(&self, location: &str) -> Result<String, FetchError>;
}

/// [`DocumentSource`] backed by an HTTP client
pub struct HttpSource {
    client: Client,
}

impl HttpSource {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl DocumentSource for HttpSource {
    async fn fetch(&self, location: &str) -> Result<String, FetchError> {
        let response = self
            .client
            .get(location)
            .send()
            .await
            .map_err(|e| FetchError::Transport {
                location: location.to_string(),
                message: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                location: location.to_string(),
                status: status.as_u16(),
            });
        }

        response.text().await.map_err(|e| FetchError::Transport {
            location: location.to_string(),
            message: e.to_string(),
        })
    }
}

/// Fetches `location` and resolves it into one flat sitemap
///
/// # Arguments
///
/// * `source` - Where documents are fetched from
/// * `location` - URL of a `<urlset>` or `<sitemapindex>` document
///
/// # Returns
///
/// * `Ok(SitemapModel)` - Every URL entry, in child-index order then document order
/// * `Err(ShotError::Fetch)` - A document could not be retrieved
/// * `Err(ShotError::Format)` - A document was malformed, or a child was itself an index
///
/// # Example
///
/// ```no_run
/// use sitemap_shot::sitemap::{merge_sitemap, HttpSource};
///
/// # async fn example() -> sitemap_shot::Result<()> {
/// let source = HttpSource::new(reqwest::Client::new());
/// let urls = merge_sitemap(&source, "https://example.com/sitemap_index.xml").await?;
/// println!("{} URLs", urls.len());
/// # Ok(())
/// # }
/// ```
pub async fn merge_sitemap(
    source: &dyn DocumentSource,
    location: &str,
) -> Result<SitemapModel, ShotError> {
    let content = source.fetch(location).await?;

    match parse_sitemap(&content)? {
        SitemapDocument::UrlSet(records) => {
            tracing::info!("{} is a flat sitemap with {} URLs", location, records.len());
            Ok(records)
        }
        SitemapDocument::Index(children) => {
            tracing::info!(
                "{} is a sitemap index, merging {} child sitemaps",
                location,
                children.len()
            );
            merge_children(source, &children).await
        }
    }
}

/// Fetches each child sitemap in order and concatenates their entries
async fn merge_children(
    source: &dyn DocumentSource,
    children: &[String],
) -> Result<SitemapModel, ShotError> {
    let mut merged = SitemapModel::new();

    for child in children {
        tracing::info!("Fetching child sitemap {}", child);
        let content = source.fetch(child).await?;

        match parse_sitemap(&content)? {
            SitemapDocument::UrlSet(records) => {
                tracing::debug!("{} contributed {} URLs", child, records.len());
                merged.extend(records);
            }
            SitemapDocument::Index(_) => {
                return Err(FormatError::NotFlat(child.clone()).into());
            }
        }
    }

    Ok(merged)
}
