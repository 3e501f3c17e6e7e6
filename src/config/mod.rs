//! Configuration module for Sitemap-Shot
//!
//! This module handles loading, parsing, and validating the optional TOML
//! configuration file. Every key has a default, so the tool runs without one.
//!
//! # Example
//!
//! ```no_run
//! use sitemap_shot::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("sitemap-shot.toml")).unwrap();
//! println!("Navigation timeout: {}s", config.capture.navigation_timeout_secs);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{CaptureConfig, Config, GeneratorConfig, OutputConfig};

// Re-export parser functions
pub use parser::{load_config, load_config_or_default, parse_config};
