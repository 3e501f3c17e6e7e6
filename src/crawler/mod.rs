//! Sitemap generator
//!
//! Builds a sitemap for sites that do not publish one, by crawling them:
//! - HTTP fetching with the crawler's User-Agent
//! - HTML link extraction
//! - Breadth-first crawl coordination

mod coordinator;
mod fetcher;
mod parser;

pub use coordinator::{generate_sitemap, GenerateOptions, Generator};
pub use fetcher::{build_http_client, fetch_url, FetchResult};
pub use parser::extract_links;
