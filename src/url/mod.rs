//! URL handling module for Sitemap-Shot
//!
//! This module provides the URL normalization and host comparison used by
//! the sitemap generator.

mod domain;
mod normalize;

pub use domain::{extract_domain, is_same_site, site_host};
pub use normalize::{normalize_url, resolve_link};
