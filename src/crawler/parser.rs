//! HTML link extraction
//!
//! Discovered links feed the generator's frontier. Links are taken from:
//! - `<a href="...">` tags without a `download` attribute
//! - `<link rel="canonical" href="...">`
//!
//! Every link is resolved against the page URL and normalized; links that
//! cannot become sitemap entries are dropped.

use crate::url::resolve_link;
use scraper::{Html, Selector};
use url::Url;

/// Extracts the normalized links of an HTML page, in document order
///
/// A `<base href>` element, when present, replaces `page_url` as the base
/// for relative links.
///
/// # Example
///
/// ```
/// use sitemap_shot::crawler::extract_links;
/// use url::Url;
///
/// let html = r#"<a href="/about?ref=nav#team">About</a>"#;
/// let page = Url::parse("https://example.com/").unwrap();
/// let links = extract_links(html, &page);
/// assert_eq!(links[0].as_str(), "https://example.com/about");
/// ```
pub fn extract_links(html: &str, page_url: &Url) -> Vec<Url> {
    let document = Html::parse_document(html);
    let base = document_base(&document, page_url);
    let mut links = Vec::new();

    if let Ok(anchors) = Selector::parse("a[href]") {
        for element in document.select(&anchors) {
            if element.value().attr("download").is_some() {
                continue;
            }
            if let Some(link) = element
                .value()
                .attr("href")
                .and_then(|href| resolve_link(&base, href))
            {
                links.push(link);
            }
        }
    }

    if let Ok(canonical) = Selector::parse("link[rel='canonical'][href]") {
        for element in document.select(&canonical) {
            if let Some(link) = element
                .value()
                .attr("href")
                .and_then(|href| resolve_link(&base, href))
            {
                links.push(link);
            }
        }
    }

    links
}

fn document_base(document: &Html, page_url: &Url) -> Url {
    Selector::parse("base[href]")
        .ok()
        .and_then(|selector| {
            document
                .select(&selector)
                .next()
                .and_then(|element| element.value().attr("href"))
                .and_then(|href| page_url.join(href.trim()).ok())
        })
        .unwrap_or_else(|| page_url.clone())
}
