use crate::UrlError;
use url::Url;

/// Normalizes a discovered URL for inclusion in a generated sitemap
///
/// # Normalization Steps
///
/// 1. Parse the URL; reject if malformed
/// 2. Reject anything but http and https
/// 3. Reject URLs without a host
/// 4. Remove the fragment (everything after #)
/// 5. Remove the query string
///
/// Host lowercasing, dot-segment removal, and the empty-path-to-`/` rule are
/// applied by the `url` parser itself. Trailing slashes are kept, since the
/// site decides whether `/a` and `/a/` are the same page.
///
/// # Examples
///
/// ```
/// use sitemap_shot::url::normalize_url;
///
/// let url = normalize_url("http://EXAMPLE.COM/a/../b/?page=2#top").unwrap();
/// assert_eq!(url.as_str(), "http://example.com/b/");
/// ```
pub fn normalize_url(url_str: &str) -> Result<Url, UrlError> {
    let mut url = Url::parse(url_str).map_err(|e| UrlError::Parse(e.to_string()))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(UrlError::InvalidScheme(url.scheme().to_string()));
    }

    if url.host_str().is_none() {
        return Err(UrlError::MissingDomain);
    }

    url.set_fragment(None);
    url.set_query(None);

    Ok(url)
}

/// Resolves an href found on `base` and normalizes the result
///
/// Returns `None` for links that cannot become sitemap entries: javascript,
/// mailto, tel and data links, bare fragments, and anything that fails
/// normalization.
pub fn resolve_link(base: &Url, href: &str) -> Option<Url> {
    let href = href.trim();

    if href.is_empty()
        || href.starts_with('#')
        || href.starts_with("javascript:")
        || href.starts_with("mailto:")
        || href.starts_with("tel:")
        || href.starts_with("data:")
    {
        return None;
    }

    let resolved = base.join(href).ok()?;
    normalize_url(resolved.as_str()).ok()
}
