//! Crawl selector
//!
//! Streams the depth-ordered URL set once and keeps a bounded, order
//! preserving subset of it.

use crate::plan::depth::{group_key, url_depth};
use crate::sitemap::UrlRecord;
use std::collections::HashMap;

/// The three independent bounds applied by [`select`]
///
/// A value of 0 disables the corresponding bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectionLimits {
    /// Exclusive depth ceiling: only URLs with `depth < max_depth` are kept
    pub max_depth: usize,

    /// Maximum number of URLs kept per sibling group
    pub repeat_cap: usize,

    /// Maximum number of URLs kept overall
    pub global_limit: usize,
}

impl SelectionLimits {
    pub fn new(max_depth: usize, repeat_cap: usize, global_limit: usize) -> Self {
        Self {
            max_depth,
            repeat_cap,
            global_limit,
        }
    }

    fn depth_allows(&self, depth: usize) -> bool {
        self.max_depth == 0 || depth < self.max_depth
    }

    fn is_full(&self, accepted: usize) -> bool {
        self.global_limit > 0 && accepted >= self.global_limit
    }
}

/// Selects the crawl plan from a depth-ordered URL sequence
///
/// For each record, in input order:
///
/// 1. Stop scanning entirely once `global_limit` records were accepted
/// 2. Reject it when `depth >= max_depth`
/// 3. Reject it when its sibling group already holds `repeat_cap` accepted
///    records, otherwise count it against the group
///
/// Depth rejections happen before the group counter is touched, so they never
/// consume repeat-cap budget.
///
/// # Example
///
/// ```
/// use sitemap_shot::plan::{select, SelectionLimits};
/// use sitemap_shot::sitemap::{RecordDefaults, UrlRecord};
///
/// let defaults = RecordDefaults::now();
/// let urls: Vec<UrlRecord> = ["https://a.com/", "https://a.com/x", "https://a.com/x/y"]
///     .iter()
///     .map(|l| UrlRecord::with_defaults(*l, &defaults))
///     .collect();
///
/// // A ceiling of 2 keeps depths 0 and 1 only
/// let plan = select(&urls, SelectionLimits::new(2, 0, 100));
/// assert_eq!(plan.len(), 2);
/// ```
pub fn select(records: &[UrlRecord], limits: SelectionLimits) -> Vec<UrlRecord> {
    let mut selected = Vec::new();
    let mut group_counts: HashMap<String, usize> = HashMap::new();

    for record in records {
        if limits.is_full(selected.len()) {
            break;
        }

        let depth = url_depth(&record.location);
        if !limits.depth_allows(depth) {
            tracing::trace!("Depth {} excludes {}", depth, record.location);
            continue;
        }

        if limits.repeat_cap > 0 {
            let key = group_key(&record.location);
            let count = group_counts.entry(key).or_insert(0);
            if *count >= limits.repeat_cap {
                tracing::trace!("Sibling group full, skipping {}", record.location);
                continue;
            }
            *count += 1;
        }

        selected.push(record.clone());
    }

    tracing::debug!(
        "Selected {} of {} URLs (depth < {}, repeat {}, limit {})",
        selected.len(),
        records.len(),
        limits.max_depth,
        limits.repeat_cap,
        limits.global_limit
    );

    selected
}
