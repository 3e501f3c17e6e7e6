//! Artifact file names
//!
//! Names sort in capture order because the sequence number comes first and
//! is zero-padded to four digits.

use url::Url;

/// Stem used for URLs whose path is empty after trimming
pub const INDEX_STEM: &str = "index";

/// Builds the artifact file name for the `sequence`-th successful capture
///
/// # Examples
///
/// ```
/// use sitemap_shot::capture::artifact_file_name;
///
/// assert_eq!(artifact_file_name(1, "https://example.com/"), "0001_index.png");
/// assert_eq!(
///     artifact_file_name(12, "https://example.com/blog/post/"),
///     "0012_blog__post.png"
/// );
/// ```
pub fn artifact_file_name(sequence: usize, url: &str) -> String {
    let path = match Url::parse(url) {
        Ok(parsed) => parsed.path().to_string(),
        Err(_) => url.to_string(),
    };

    let stem = path.trim_matches('/').replace('/', "__");
    let stem = if stem.is_empty() { INDEX_STEM } else { stem.as_str() };

    format!("{:04}_{}.png", sequence, stem)
}
