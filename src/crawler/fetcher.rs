//! HTTP fetcher for the sitemap generator
//!
//! This module handles the page requests made while generating a sitemap:
//! - Building the HTTP client with the crawler's User-Agent
//! - GET requests that follow redirects
//! - Classification of the response into HTML, non-HTML, status or transport outcomes

use crate::config::GeneratorConfig;
use reqwest::{redirect::Policy, Client};
use std::time::Duration;
use url::Url;

/// Maximum redirect hops followed for a single page
const MAX_REDIRECTS: usize = 10;

/// Outcome of fetching one page
#[derive(Debug)]
pub enum FetchResult {
    /// A 2xx HTML page
    Html {
        /// URL after redirects
        final_url: Url,
        body: String,
    },

    /// A 2xx response that is not HTML
    NotHtml { content_type: String },

    /// A non-2xx response
    Status { status_code: u16 },

    /// Connection, timeout or body read failure
    Transport { error: String },
}

/// Builds the HTTP client shared by the generator, robots.txt and sitemap merging
///
/// # Example
///
/// ```
/// use sitemap_shot::config::GeneratorConfig;
/// use sitemap_shot::crawler::build_http_client;
///
/// let client = build_http_client(&GeneratorConfig::default()).unwrap();
/// ```
pub fn build_http_client(config: &GeneratorConfig) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(config.user_agent())
        .timeout(config.request_timeout())
        .connect_timeout(Duration::from_secs(10))
        .redirect(Policy::limited(MAX_REDIRECTS))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches a page and classifies the response
pub async fn fetch_url(client: &Client, url: &Url) -> FetchResult {
    let response = match client.get(url.as_str()).send().await {
        Ok(response) => response,
        Err(e) => {
            let error = if e.is_timeout() {
                "request timeout".to_string()
            } else if e.is_connect() {
                "connection refused".to_string()
            } else if e.is_redirect() {
                "too many redirects".to_string()
            } else {
                e.to_string()
            };
            return FetchResult::Transport { error };
        }
    };

    let status = response.status();
    if !status.is_success() {
        return FetchResult::Status {
            status_code: status.as_u16(),
        };
    }

    let content_type = response
        .headers()
        .get(reqwest::header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
        .to_string();

    if !is_html(&content_type) {
        return FetchResult::NotHtml { content_type };
    }

    let final_url = response.url().clone();
    match response.text().await {
        Ok(body) => FetchResult::Html { final_url, body },
        Err(e) => FetchResult::Transport {
            error: e.to_string(),
        },
    }
}

/// Missing Content-Type headers are treated as HTML
fn is_html(content_type: &str) -> bool {
    let mime = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_lowercase();
    mime.is_empty() || mime == "text/html" || mime == "application/xhtml+xml"
}
