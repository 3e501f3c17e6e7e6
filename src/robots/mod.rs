//! Robots.txt handling module
//!
//! The generator fetches robots.txt once per crawl, for the start URL's
//! origin, and checks every candidate page against it.

mod parser;

pub use parser::RobotsPolicy;

use reqwest::Client;
use url::Url;

/// Fetches and parses robots.txt for the origin of `site`
///
/// A missing or unreachable robots.txt allows everything; only a 2xx
/// response body is treated as rules. Errors are logged and never fatal.
pub async fn fetch_robots(client: &Client, site: &Url) -> RobotsPolicy {
    let robots_url = match site.join("/robots.txt") {
        Ok(url) => url,
        Err(e) => {
            tracing::debug!("Cannot build robots.txt URL for {}: {}", site, e);
            return RobotsPolicy::allow_all();
        }
    };

    tracing::debug!("Fetching {}", robots_url);

    let response = match client.get(robots_url.as_str()).send().await {
        Ok(response) => response,
        Err(e) => {
            tracing::debug!("robots.txt unavailable at {}: {}", robots_url, e);
            return RobotsPolicy::allow_all();
        }
    };

    if !response.status().is_success() {
        tracing::debug!(
            "robots.txt at {} returned HTTP {}, allowing all",
            robots_url,
            response.status().as_u16()
        );
        return RobotsPolicy::allow_all();
    }

    match response.text().await {
        Ok(body) => RobotsPolicy::from_content(&body),
        Err(e) => {
            tracing::debug!("Failed to read robots.txt body from {}: {}", robots_url, e);
            RobotsPolicy::allow_all()
        }
    }
}
