//! Crawl planning
//!
//! This module turns a flat sitemap into a crawl plan:
//! - `depth`: path depth, sibling-group keys, and the canonical sort
//! - `selector`: the bounded, grouped selection of URLs to capture

mod depth;
mod selector;

pub use depth::{group_key, parent_path, sort_by_depth, url_depth, ROOT_PARENT};
pub use selector::{select, SelectionLimits};
