//! Crawler module for web page fetching and processing
//!
//! This module contains the core crawling logic, including:
//! - HTTP fetching with redirect following and a timeout
//! - HTML link discovery
//! - The FIFO frontier and request budget
//! - Overall crawl coordination

mod coordinator;
mod fetcher;
mod frontier;
mod parser;

pub use coordinator::{Coordinator, StepOutcome, StopReason};
pub use fetcher::{
    build_http_client, fetch_url, FetchResult, HttpFetcher, PageFetcher, DEFAULT_USER_AGENT,
};
pub use frontier::{Frontier, FrontierEntry, RequestBudget};
pub use parser::discover_links;

use crate::config::CrawlConfig;
use crate::extract::PageRecord;
use crate::output::CrawlStatistics;
use crate::HarvestError;

/// Everything a finished crawl produced
#[derive(Debug)]
pub struct CrawlOutcome {
    /// Records in completion order
    pub records: Vec<PageRecord>,
    pub stats: CrawlStatistics,
    pub stop_reason: StopReason,
}

/// Runs a complete crawl operation
///
/// This is the main entry point for starting a crawl. It will:
/// 1. Build the HTTP client
/// 2. Seed the frontier from the start URLs
/// 3. Fetch, classify and extract pages until the frontier or budget runs out
///
/// # Arguments
///
/// * `config` - The validated crawl configuration
///
/// # Returns
///
/// * `Ok(CrawlOutcome)` - Crawl completed
/// * `Err(HarvestError)` - The HTTP client could not be built
pub async fn crawl(config: CrawlConfig) -> Result<CrawlOutcome, HarvestError> {
    let mut coordinator = Coordinator::new(config)?;
    let stop_reason = coordinator.run().await;
    let (records, stats) = coordinator.into_parts();

    Ok(CrawlOutcome {
        records,
        stats,
        stop_reason,
    })
}
