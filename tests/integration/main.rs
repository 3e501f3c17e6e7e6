//! Integration tests for Sitemap-Shot
//!
//! HTTP interactions are served by wiremock; the headless browser is
//! replaced by an in-memory `BrowserSession`.

mod capture_tests;
mod generator_tests;
mod merge_tests;
mod package_tests;
