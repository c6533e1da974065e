//! Configuration module for Meta-Harvest
//!
//! This module handles loading, parsing, and validating the crawl input
//! document. Parsing goes through a loosely-typed [`RawConfig`] which is then
//! validated into the strongly-typed [`CrawlConfig`].
//!
//! # Example
//!
//! ```no_run
//! use meta_harvest::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("data/inputs.sample.json")).unwrap();
//! println!("Seeds: {:?}", config.start_urls);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{
    CrawlConfig, RawConfig, StartUrl, DEFAULT_MAX_REQUESTS, DEFAULT_OUTPUT_FILE,
    DEFAULT_TIMEOUT_SECONDS,
};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash, parse_config};
