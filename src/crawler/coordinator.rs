//! Sitemap generator - breadth-first crawl of a single site
//!
//! This module contains the crawl loop used when no sitemap is supplied:
//! - Fetching robots.txt once for the start URL's origin
//! - Managing the FIFO frontier and the visited set
//! - Fetching pages one at a time with a politeness delay
//! - Turning every reachable HTML page into a sitemap record

use crate::config::GeneratorConfig;
use crate::crawler::parser::extract_links;
use crate::crawler::{build_http_client, fetch_url, FetchResult};
use crate::robots::{fetch_robots, RobotsPolicy};
use crate::sitemap::{RecordDefaults, SitemapModel, UrlRecord};
use crate::url::{is_same_site, normalize_url};
use crate::{FetchError, Result};
use reqwest::Client;
use std::collections::{HashSet, VecDeque};
use std::time::{Duration, Instant};
use url::Url;

/// Per-run options that do not belong in the config file
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GenerateOptions {
    /// Log transport failures at debug instead of warn
    pub suppress_transport_warnings: bool,
}

/// Crawl state for one sitemap generation
pub struct Generator {
    client: Client,
    origin: Url,
    agent: String,
    robots: RobotsPolicy,
    delay: Duration,
    max_pages: usize,
    options: GenerateOptions,
    frontier: VecDeque<Url>,
    seen: HashSet<String>,
    records: SitemapModel,
    defaults: RecordDefaults,
}

impl Generator {
    /// Creates a generator for `start_url`, fetching robots.txt when enabled
    pub async fn new(
        start_url: &str,
        config: &GeneratorConfig,
        options: GenerateOptions,
    ) -> Result<Self> {
        let origin = normalize_url(start_url)?;
        let client = build_http_client(config)?;

        let robots = if config.respect_robots {
            fetch_robots(&client, &origin).await
        } else {
            RobotsPolicy::allow_all()
        };

        let agent = config.crawler_name.clone();
        let delay = robots
            .crawl_delay(&agent)
            .map_or(config.request_delay(), |d| d.max(config.request_delay()));

        let mut frontier = VecDeque::new();
        let mut seen = HashSet::new();
        seen.insert(origin.to_string());
        frontier.push_back(origin.clone());

        Ok(Self {
            client,
            origin,
            agent,
            robots,
            delay,
            max_pages: config.max_pages,
            options,
            frontier,
            seen,
            records: Vec::new(),
            defaults: RecordDefaults::now(),
        })
    }

    /// Runs the crawl until the frontier empties or `max_pages` records exist
    ///
    /// # Errors
    ///
    /// Fails with `FetchError` only when the start URL itself cannot be
    /// fetched. Every later failure is logged and skipped.
    pub async fn run(mut self) -> Result<SitemapModel> {
        tracing::info!("Generating sitemap from {}", self.origin);

        let start_time = Instant::now();
        let mut fetched = 0usize;

        while let Some(url) = self.frontier.pop_front() {
            if self.records.len() >= self.max_pages {
                tracing::info!("Reached the limit of {} pages", self.max_pages);
                break;
            }

            if !self.robots.is_allowed(url.as_str(), &self.agent) {
                tracing::debug!("{} disallowed by robots.txt", url);
                continue;
            }

            if fetched > 0 && !self.delay.is_zero() {
                tokio::time::sleep(self.delay).await;
            }
            fetched += 1;

            let result = fetch_url(&self.client, &url).await;
            let is_start = fetched == 1;
            self.process(&url, result, is_start)?;

            if fetched % 25 == 0 {
                tracing::info!(
                    "Progress: {} pages fetched, {} recorded, {} queued",
                    fetched,
                    self.records.len(),
                    self.frontier.len()
                );
            }
        }

        tracing::info!(
            "Sitemap generated: {} pages recorded from {} fetched in {:?}",
            self.records.len(),
            fetched,
            start_time.elapsed()
        );

        Ok(self.records)
    }

    fn process(&mut self, url: &Url, result: FetchResult, is_start: bool) -> Result<()> {
        match result {
            FetchResult::Html { final_url, body } => {
                let Ok(final_url) = normalize_url(final_url.as_str()) else {
                    return Ok(());
                };

                if !is_same_site(&self.origin, &final_url) {
                    tracing::debug!("{} redirected off site to {}", url, final_url);
                    return Ok(());
                }

                // A redirect target may already be recorded under its own URL
                if final_url != *url && !self.seen.insert(final_url.to_string()) {
                    return Ok(());
                }

                self.records
                    .push(UrlRecord::with_defaults(final_url.as_str(), &self.defaults));

                for link in extract_links(&body, &final_url) {
                    self.enqueue(link);
                }
            }

            FetchResult::NotHtml { content_type } => {
                tracing::debug!("Skipping {} ({})", url, content_type);
            }

            FetchResult::Status { status_code } => {
                if is_start {
                    return Err(FetchError::Status {
                        location: url.to_string(),
                        status: status_code,
                    }
                    .into());
                }
                tracing::debug!("Skipping {}: HTTP {}", url, status_code);
            }

            FetchResult::Transport { error } => {
                if is_start {
                    return Err(FetchError::Transport {
                        location: url.to_string(),
                        message: error,
                    }
                    .into());
                }
                if self.options.suppress_transport_warnings {
                    tracing::debug!("Failed to fetch {}: {}", url, error);
                } else {
                    tracing::warn!("Failed to fetch {}: {}", url, error);
                }
            }
        }

        Ok(())
    }

    fn enqueue(&mut self, link: Url) {
        if !is_same_site(&self.origin, &link) {
            return;
        }
        if self.seen.insert(link.to_string()) {
            tracing::trace!("Queued {}", link);
            self.frontier.push_back(link);
        }
    }
}

/// Generates a sitemap by crawling the site behind `start_url`
///
/// # Example
///
/// ```no_run
/// use sitemap_shot::config::GeneratorConfig;
/// use sitemap_shot::crawler::{generate_sitemap, GenerateOptions};
///
/// # async fn example() -> sitemap_shot::Result<()> {
/// let model = generate_sitemap(
///     "https://example.com/",
///     &GeneratorConfig::default(),
///     GenerateOptions::default(),
/// )
/// .await?;
/// println!("{} pages", model.len());
/// # Ok(())
/// # }
/// ```
pub async fn generate_sitemap(
    start_url: &str,
    config: &GeneratorConfig,
    options: GenerateOptions,
) -> Result<SitemapModel> {
    Generator::new(start_url, config, options).await?.run().await
}
