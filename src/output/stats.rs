//! Statistics gathered during a crawl run
//!
//! The coordinator updates a [`CrawlStatistics`] as it goes; the totals are
//! logged when the run ends.

use crate::state::PageState;
use chrono::{DateTime, Utc};
use std::collections::HashMap;

/// Crawl statistics summary
#[derive(Debug, Clone)]
pub struct CrawlStatistics {
    /// When the run started
    pub started_at: DateTime<Utc>,

    /// When the run stopped; None while running
    pub finished_at: Option<DateTime<Utc>>,

    /// Number of fetch attempts, successful or not
    pub fetch_attempts: u32,

    /// Count of dequeued URLs by terminal state
    pub pages_by_state: HashMap<PageState, u64>,

    /// Records appended to the results
    pub records: u64,

    /// Discovered links that were added to the frontier
    pub links_enqueued: u64,

    /// Content pages whose extraction failed
    pub extraction_failures: u64,
}

impl Default for CrawlStatistics {
    fn default() -> Self {
        Self::new()
    }
}

impl CrawlStatistics {
    pub fn new() -> Self {
        Self {
            started_at: Utc::now(),
            finished_at: None,
            fetch_attempts: 0,
            pages_by_state: HashMap::new(),
            records: 0,
            links_enqueued: 0,
            extraction_failures: 0,
        }
    }

    /// Counts one dequeued URL in its terminal state
    pub fn record_state(&mut self, state: PageState) {
        *self.pages_by_state.entry(state).or_insert(0) += 1;
        if state.consumed_budget() {
            self.fetch_attempts += 1;
        }
    }

    pub fn count(&self, state: PageState) -> u64 {
        self.pages_by_state.get(&state).copied().unwrap_or(0)
    }

    pub fn finish(&mut self) {
        self.finished_at = Some(Utc::now());
    }

    /// Seconds between start and finish, None while running
    pub fn duration_seconds(&self) -> Option<f64> {
        self.finished_at
            .map(|finished| (finished - self.started_at).num_milliseconds() as f64 / 1000.0)
    }

    /// Percentage of fetch attempts that produced a usable page
    pub fn success_rate(&self) -> f64 {
        if self.fetch_attempts == 0 {
            return 0.0;
        }
        (self.count(PageState::Processed) as f64 / self.fetch_attempts as f64) * 100.0
    }
}

/// Logs statistics at info level
pub fn log_statistics(stats: &CrawlStatistics) {
    tracing::info!(
        "Crawl finished: {} fetch attempts, {} records, {} links enqueued in {:.1}s",
        stats.fetch_attempts,
        stats.records,
        stats.links_enqueued,
        stats.duration_seconds().unwrap_or_default()
    );

    let mut state_counts: Vec<_> = stats.pages_by_state.iter().collect();
    state_counts.sort_by(|a, b| b.1.cmp(a.1));
    for (state, count) in state_counts {
        tracing::info!("  {}: {}", state, count);
    }

    if stats.extraction_failures > 0 {
        tracing::warn!("{} content pages failed extraction", stats.extraction_failures);
    }

    tracing::info!(
        "Success rate: {:.1}% ({} / {} fetches usable)",
        stats.success_rate(),
        stats.count(PageState::Processed),
        stats.fetch_attempts
    );
}
