//! Depth model derived from URL paths
//!
//! Depth is the number of non-empty `/`-separated path segments; the root
//! path has depth 0. Sibling groups are keyed by depth plus parent path.

use crate::sitemap::UrlRecord;
use url::Url;

/// Parent path used for the root page and for paths with no parent segments
pub const ROOT_PARENT: &str = "root";

/// Returns the non-empty path segments of a URL
///
/// Unparseable URLs have no segments.
fn path_segments(url: &str) -> Vec<String> {
    match Url::parse(url) {
        Ok(parsed) => parsed
            .path()
            .split('/')
            .filter(|segment| !segment.is_empty())
            .map(str::to_string)
            .collect(),
        Err(_) => Vec::new(),
    }
}

/// Computes the path depth of a URL
///
/// # Examples
///
/// ```
/// use sitemap_shot::plan::url_depth;
///
/// assert_eq!(url_depth("https://example.com/"), 0);
/// assert_eq!(url_depth("https://example.com/blog"), 1);
/// assert_eq!(url_depth("https://example.com/blog/2024/post/"), 3);
/// assert_eq!(url_depth("not a url"), 0);
/// ```
pub fn url_depth(url: &str) -> usize {
    path_segments(url).len()
}

/// Computes the parent path that keys a URL's sibling group
///
/// * depth 0 → `root`
/// * depth 1 → the single segment itself
/// * depth n ≥ 2 → the first n-1 segments joined with `/`
pub fn parent_path(url: &str, depth: usize) -> String {
    if depth == 0 {
        return ROOT_PARENT.to_string();
    }

    let segments = path_segments(url);
    let joined = if depth == 1 {
        segments.first().cloned().unwrap_or_default()
    } else {
        segments
            .iter()
            .take(depth - 1)
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join("/")
    };

    if joined.is_empty() {
        ROOT_PARENT.to_string()
    } else {
        joined
    }
}

/// Sibling-group key: `<depth>:<parent path>`
pub fn group_key(url: &str) -> String {
    let depth = url_depth(url);
    format!("{}:{}", depth, parent_path(url, depth))
}

/// Sorts records into canonical depth-then-lexical order
///
/// The sort is stable, so records with identical locations keep their
/// relative order.
pub fn sort_by_depth(records: &mut [UrlRecord]) {
    records.sort_by_cached_key(|record| (url_depth(&record.location), record.location.clone()));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sitemap::RecordDefaults;

    fn records(locations: &[&str]) -> Vec<UrlRecord> {
        let defaults = RecordDefaults::now();
        locations
            .iter()
            .map(|l| UrlRecord::with_defaults(*l, &defaults))
            .collect()
    }

    #[test]
    fn test_url_depth() {
        assert_eq!(url_depth("https://example.com"), 0);
        assert_eq!(url_depth("https://example.com/"), 0);
        assert_eq!(url_depth("https://example.com/a"), 1);
        assert_eq!(url_depth("https://example.com/a/"), 1);
        assert_eq!(url_depth("https://example.com//a//b"), 2);
        assert_eq!(url_depth("https://example.com/a/b/c?x=1/2#y/z"), 3);
    }

    #[test]
    fn test_parent_path() {
        assert_eq!(parent_path("https://example.com/", 0), "root");
        assert_eq!(parent_path("https://example.com/hoge", 1), "hoge");
        assert_eq!(parent_path("https://example.com/hoge/foo", 2), "hoge");
        assert_eq!(parent_path("https://example.com/hoge/foo/bar", 3), "hoge/foo");
        assert_eq!(parent_path("not a url", 2), "root");
    }

    #[test]
    fn test_group_key() {
        assert_eq!(group_key("https://example.com/"), "0:root");
        assert_eq!(group_key("https://example.com/about"), "1:about");
        assert_eq!(group_key("https://example.com/blog/a"), "2:blog");
        assert_eq!(group_key("https://example.com/blog/b"), "2:blog");
        assert_eq!(group_key("https://example.com/news/a"), "2:news");
        assert_eq!(group_key("https://example.com/blog/2024/a"), "3:blog/2024");
    }

    #[test]
    fn test_depth_one_pages_are_separate_groups() {
        assert_ne!(
            group_key("https://example.com/about"),
            group_key("https://example.com/contact")
        );
    }

    #[test]
    fn test_sort_by_depth() {
        let mut model = records(&[
            "https://example.com/b/c",
            "https://example.com/z",
            "https://example.com/",
            "https://example.com/a/b/c",
            "https://example.com/a",
            "https://example.com/a/a",
        ]);
        sort_by_depth(&mut model);

        let sorted: Vec<&str> = model.iter().map(|r| r.location.as_str()).collect();
        assert_eq!(
            sorted,
            vec![
                "https://example.com/",
                "https://example.com/a",
                "https://example.com/z",
                "https://example.com/a/a",
                "https://example.com/b/c",
                "https://example.com/a/b/c",
            ]
        );
    }

    #[test]
    fn test_sorted_order_is_monotonic() {
        let mut model = records(&[
            "https://example.com/x/y",
            "https://example.com/docs/",
            "https://example.com/docs",
            "https://example.com/Docs",
            "https://example.com/x/y/z/w",
            "https://example.com",
            "https://example.com/a%20b/c",
        ]);
        sort_by_depth(&mut model);

        for pair in model.windows(2) {
            let (da, db) = (url_depth(&pair[0].location), url_depth(&pair[1].location));
            assert!(da <= db);
            if da == db {
                assert!(pair[0].location <= pair[1].location);
            }
        }
    }

    #[test]
    fn test_sort_keeps_duplicates() {
        let mut model = records(&[
            "https://example.com/a",
            "https://example.com/",
            "https://example.com/a",
        ]);
        sort_by_depth(&mut model);
        assert_eq!(model.len(), 3);
        assert_eq!(model[1].location, model[2].location);
    }
}
