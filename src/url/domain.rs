use url::Url;

/// Extracts the lowercase host of a URL
///
/// # Examples
///
/// ```
/// use url::Url;
/// use sitemap_shot::url::extract_domain;
///
/// let url = Url::parse("https://EXAMPLE.COM:8080/path").unwrap();
/// assert_eq!(extract_domain(&url), Some("example.com".to_string()));
/// ```
pub fn extract_domain(url: &Url) -> Option<String> {
    url.host_str().map(|h| h.to_lowercase())
}

/// The host used to decide whether two URLs belong to the same site
///
/// This is the lowercase host with any leading `www.` removed.
pub fn site_host(url: &Url) -> Option<String> {
    extract_domain(url).map(|host| match host.strip_prefix("www.") {
        Some(stripped) => stripped.to_string(),
        None => host,
    })
}

/// Returns true when `candidate` is on the same site as `origin`
///
/// The scheme is ignored. Explicit ports must match, so a local server on
/// another port is a different site.
pub fn is_same_site(origin: &Url, candidate: &Url) -> bool {
    site_host(origin).is_some()
        && site_host(origin) == site_host(candidate)
        && origin.port() == candidate.port()
}
