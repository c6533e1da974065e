//! Crawler coordinator - main crawl orchestration logic
//!
//! This module contains the control loop that owns all crawl state:
//! - Seeding the frontier from the configured start URLs
//! - Dequeuing, fetching, classifying and extracting one URL at a time
//! - Discovering links on index pages and re-enqueuing them
//! - Stopping when the frontier is empty or the budget is spent

use crate::config::CrawlConfig;
use crate::crawler::fetcher::{FetchResult, HttpFetcher, PageFetcher};
use crate::crawler::frontier::{Frontier, FrontierEntry, RequestBudget};
use crate::crawler::parser::discover_links;
use crate::extract::{MetadataExtractor, PageRecord};
use crate::output::{log_statistics, CrawlStatistics};
use crate::state::PageState;
use crate::url::{normalize_url, same_host, PageKind, UrlRules};
use crate::HarvestError;
use std::fmt;
use std::time::Instant;
use tracing::Instrument;
use url::Url;

/// Progress is logged after this many fetch attempts
const PROGRESS_INTERVAL: u32 = 10;

/// Why the control loop stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    FrontierEmpty,
    BudgetExhausted,
}

impl fmt::Display for StopReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FrontierEmpty => f.write_str("frontier empty"),
            Self::BudgetExhausted => f.write_str("request budget exhausted"),
        }
    }
}

/// Result of a single [`Coordinator::step`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepOutcome {
    /// Nothing was dequeued; the crawl is over
    Finished(StopReason),

    /// The dequeued URL had already been visited and was discarded
    Duplicate(Url),

    /// The dequeued URL was processed to a terminal state
    Visited { url: Url, state: PageState },
}

/// Main crawler coordinator structure
///
/// Generic over the fetch capability so tests can crawl an in-memory site.
pub struct Coordinator<F = HttpFetcher> {
    config: CrawlConfig,
    rules: UrlRules,
    frontier: Frontier,
    budget: RequestBudget,
    fetcher: F,
    extractor: MetadataExtractor,
    results: Vec<PageRecord>,
    stats: CrawlStatistics,
    span: tracing::Span,
}

impl Coordinator {
    /// Creates a coordinator that fetches over HTTP
    ///
    /// # Arguments
    ///
    /// * `config` - Validated crawl configuration
    ///
    /// # Returns
    ///
    /// * `Ok(Coordinator)` - Ready to run
    /// * `Err(HarvestError)` - The HTTP client or the extractor could not be built
    pub fn new(config: CrawlConfig) -> Result<Self, HarvestError> {
        let fetcher = HttpFetcher::from_config(&config)?;
        let extractor = MetadataExtractor::readability()?;
        Ok(Self::with_fetcher(config, fetcher, extractor))
    }
}

impl<F: PageFetcher> Coordinator<F> {
    pub fn with_fetcher(config: CrawlConfig, fetcher: F, extractor: MetadataExtractor) -> Self {
        let span = tracing::info_span!(
            "crawl",
            max_requests = config.max_requests_per_crawl,
            seeds = config.start_urls.len()
        );

        Self {
            rules: UrlRules::from_config(&config),
            frontier: Frontier::new(),
            budget: RequestBudget::new(config.max_requests_per_crawl),
            fetcher,
            extractor,
            results: Vec::new(),
            stats: CrawlStatistics::new(),
            span,
            config,
        }
    }

    /// Normalizes and enqueues the configured start URLs
    ///
    /// Entries that fail to normalize are dropped. Returns how many URLs
    /// were added to the frontier.
    pub fn seed(&mut self) -> usize {
        let _guard = self.span.enter();
        let mut seeded = 0;

        for raw in &self.config.start_urls {
            match normalize_url(raw) {
                Ok(url) => {
                    if self.frontier.enqueue(url, None) {
                        seeded += 1;
                    }
                }
                Err(e) => tracing::debug!("Dropping start URL {:?}: {}", raw, e),
            }
        }

        seeded
    }

    /// Runs the control loop until the frontier or the budget is exhausted
    ///
    /// Per-URL failures are logged and never end the run.
    pub async fn run(&mut self) -> StopReason {
        let span = self.span.clone();

        async {
            let seeded = self.seed();
            tracing::info!(
                "Starting crawl with {} seed URLs, budget {}",
                seeded,
                self.budget.max()
            );

            let start_time = Instant::now();
            let reason = loop {
                match self.advance().await {
                    StepOutcome::Finished(reason) => break reason,
                    StepOutcome::Visited { state, .. } if state.consumed_budget() => {
                        let used = self.budget.used();
                        if used % PROGRESS_INTERVAL == 0 {
                            tracing::info!(
                                "Progress: {} fetches, {} records, {} in frontier, {:.2} fetches/sec",
                                used,
                                self.results.len(),
                                self.frontier.len(),
                                used as f64 / start_time.elapsed().as_secs_f64().max(f64::EPSILON)
                            );
                        }
                    }
                    _ => {}
                }
            };

            tracing::info!("Crawl stopped: {}", reason);
            self.stats.finish();
            log_statistics(&self.stats);
            reason
        }
        .instrument(span)
        .await
    }

    /// Processes the oldest frontier entry
    pub async fn step(&mut self) -> StepOutcome {
        let span = self.span.clone();
        self.advance().instrument(span).await
    }

    async fn advance(&mut self) -> StepOutcome {
        if self.budget.is_exhausted() {
            return StepOutcome::Finished(StopReason::BudgetExhausted);
        }

        let Some(entry) = self.frontier.pop() else {
            return StepOutcome::Finished(StopReason::FrontierEmpty);
        };

        if !self.frontier.mark_visited(&entry.url) {
            tracing::debug!("Already visited {}", entry.url);
            return StepOutcome::Duplicate(entry.url);
        }

        let state = self.visit(&entry).await;
        self.frontier.record(&entry.url, state);
        self.stats.record_state(state);

        StepOutcome::Visited {
            url: entry.url,
            state,
        }
    }

    /// Takes one visited entry to its terminal state
    async fn visit(&mut self, entry: &FrontierEntry) -> PageState {
        let url = &entry.url;

        if self.rules.is_ignored(url) {
            tracing::debug!("Ignoring {}", url);
            return PageState::Ignored;
        }

        self.budget.record_attempt();

        let (final_url, status_code, body) = match self.fetcher.fetch(url).await {
            FetchResult::Fetched {
                final_url,
                status_code,
                body,
            } => (final_url, status_code, body),
            FetchResult::NetworkError { error, timed_out } => {
                if timed_out {
                    tracing::warn!("Timed out fetching {}: {}", url, error);
                } else {
                    tracing::warn!("Failed to fetch {}: {}", url, error);
                }
                return PageState::FetchFailed;
            }
        };

        if !(200..300).contains(&status_code) || body.trim().is_empty() {
            tracing::debug!("Unusable response from {} (status {})", url, status_code);
            return PageState::Unusable;
        }

        if !self.config.delay.is_zero() {
            tokio::time::sleep(self.config.delay).await;
        }

        let canonical = normalize_url(&final_url).unwrap_or_else(|_| url.clone());
        let redirected = canonical != *url;
        if redirected && !self.frontier.mark_visited(&canonical) {
            tracing::debug!("{} redirected to already visited {}", url, canonical);
            return PageState::Processed;
        }

        self.process(&canonical, entry.referrer.as_ref(), &body);

        if redirected {
            self.frontier.record(&canonical, PageState::Processed);
        }
        PageState::Processed
    }

    /// Classifies a usable page, extracts it and/or mines its links
    fn process(&mut self, page: &Url, referrer: Option<&Url>, body: &str) {
        let kind = self.rules.classify(page);
        tracing::info!(
            "Fetched [{}] {} (referrer={})",
            kind,
            page,
            referrer.map_or("-", Url::as_str)
        );

        if self.rules.is_content(kind) {
            match self.extractor.extract(body, page) {
                Ok(record) => {
                    self.results.push(record);
                    self.stats.records += 1;
                }
                Err(e) => {
                    tracing::error!("Extraction failed for {}: {}", page, e);
                    self.stats.extraction_failures += 1;
                }
            }
        }

        if kind.follows_links() {
            self.enqueue_links(page, body);
        }
    }

    fn enqueue_links(&mut self, page: &Url, body: &str) {
        let links = match discover_links(body, page) {
            Ok(links) => links,
            Err(e) => {
                tracing::debug!("Link discovery failed for {}: {}", page, e);
                return;
            }
        };

        let mut added = 0;
        for link in links {
            if self.frontier.state_of(&link) != PageState::Unseen {
                continue;
            }
            if self.rules.is_ignored(&link) {
                tracing::debug!("Skipping ignored link {}", link);
                continue;
            }

            let follow = match self.rules.classify(&link) {
                PageKind::Detail | PageKind::Pagination => true,
                PageKind::Unknown => same_host(&link, page),
            };

            if follow && self.frontier.enqueue(link, Some(page.clone())) {
                added += 1;
            }
        }

        self.stats.links_enqueued += added;
        tracing::debug!("Enqueued {} links from {}", added, page);
    }

    /// Records produced so far, in completion order
    pub fn results(&self) -> &[PageRecord] {
        &self.results
    }

    pub fn into_results(self) -> Vec<PageRecord> {
        self.results
    }

    /// Consumes the coordinator, returning its records and statistics
    pub fn into_parts(self) -> (Vec<PageRecord>, CrawlStatistics) {
        (self.results, self.stats)
    }

    pub fn stats(&self) -> &CrawlStatistics {
        &self.stats
    }

    pub fn frontier(&self) -> &Frontier {
        &self.frontier
    }

    pub fn budget(&self) -> &RequestBudget {
        &self.budget
    }

    pub fn config(&self) -> &CrawlConfig {
        &self.config
    }
}
