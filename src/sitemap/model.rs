//! In-memory sitemap representation

use chrono::{SecondsFormat, Utc};

/// Default `<changefreq>` for entries that do not carry one
pub const DEFAULT_CHANGE_FREQUENCY: &str = "weekly";

/// Default `<priority>` for entries that do not carry one
pub const DEFAULT_PRIORITY: &str = "0.5";

/// A single sitemap entry with every field populated
///
/// Identity is the `location`; the remaining fields are carried through
/// verbatim so a persisted sitemap round-trips.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlRecord {
    pub location: String,
    pub last_modified: String,
    pub change_frequency: String,
    pub priority: String,
}

impl UrlRecord {
    /// Builds a record, filling absent optional fields from `defaults`
    pub fn from_parts(
        location: impl Into<String>,
        last_modified: Option<String>,
        change_frequency: Option<String>,
        priority: Option<String>,
        defaults: &RecordDefaults,
    ) -> Self {
        Self {
            location: location.into(),
            last_modified: last_modified.unwrap_or_else(|| defaults.last_modified.clone()),
            change_frequency: change_frequency
                .unwrap_or_else(|| defaults.change_frequency.clone()),
            priority: priority.unwrap_or_else(|| defaults.priority.clone()),
        }
    }

    /// Builds a record for a location with every optional field defaulted
    pub fn with_defaults(location: impl Into<String>, defaults: &RecordDefaults) -> Self {
        Self::from_parts(location, None, None, None, defaults)
    }
}

/// Values used for missing `<lastmod>`, `<changefreq>` and `<priority>`
///
/// Captured once per parse so every defaulted record of one document shares
/// the same timestamp.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordDefaults {
    pub last_modified: String,
    pub change_frequency: String,
    pub priority: String,
}

impl RecordDefaults {
    /// Defaults stamped with the current UTC time
    pub fn now() -> Self {
        Self {
            last_modified: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
            change_frequency: DEFAULT_CHANGE_FREQUENCY.to_string(),
            priority: DEFAULT_PRIORITY.to_string(),
        }
    }
}

/// An ordered, flat set of sitemap entries
pub type SitemapModel = Vec<UrlRecord>;

/// A parsed sitemap document
///
/// An index is never persisted; it is resolved into a flat [`SitemapModel`]
/// by the merge engine before planning.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SitemapDocument {
    /// A `<urlset>` listing page URLs directly
    UrlSet(SitemapModel),

    /// A `<sitemapindex>` listing child sitemap locations
    Index(Vec<String>),
}

impl SitemapDocument {
    pub fn is_index(&self) -> bool {
        matches!(self, Self::Index(_))
    }
}
