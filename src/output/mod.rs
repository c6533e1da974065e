//! Output module for crawl results
//!
//! This module handles:
//! - Writing the record array to its JSON destination
//! - The one-line run summary
//! - Recording crawl statistics

mod json;
pub mod stats;
mod traits;

pub use json::{write_json, JsonOutput};
pub use stats::{log_statistics, CrawlStatistics};
pub use traits::{OutputError, OutputHandler, OutputResult, RunSummary};
