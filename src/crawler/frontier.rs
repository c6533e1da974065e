//! Frontier queue, per-URL state and request budget
//!
//! This module handles:
//! - FIFO (breadth-first) ordering of URLs to crawl
//! - Tracking each normalized URL through its lifecycle
//! - Counting fetch attempts against the configured maximum
//!
//! Everything here is owned by a single coordinator and needs no locking.

use crate::state::PageState;
use std::collections::{HashMap, VecDeque};
use url::Url;

/// A URL waiting to be fetched
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrontierEntry {
    /// Normalized URL
    pub url: Url,

    /// Page on which the URL was discovered; None for seeds
    pub referrer: Option<Url>,
}

/// FIFO queue of URLs plus the state of every URL ever enqueued
#[derive(Debug, Default)]
pub struct Frontier {
    queue: VecDeque<FrontierEntry>,
    states: HashMap<String, PageState>,
}

impl Frontier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a URL to the back of the queue
    ///
    /// Returns false without changing anything if the URL is already queued
    /// or has been visited.
    pub fn enqueue(&mut self, url: Url, referrer: Option<Url>) -> bool {
        if self.state_of(&url) != PageState::Unseen {
            return false;
        }

        self.states.insert(url.as_str().to_string(), PageState::Queued);
        self.queue.push_back(FrontierEntry { url, referrer });
        true
    }

    /// Removes the oldest entry
    pub fn pop(&mut self) -> Option<FrontierEntry> {
        self.queue.pop_front()
    }

    /// Marks a URL visited before anything is known about its fetch
    ///
    /// Returns false if it was already visited. A URL that was never queued
    /// (e.g. a redirect target) can be marked as well.
    pub fn mark_visited(&mut self, url: &Url) -> bool {
        if self.is_visited(url) {
            return false;
        }
        self.states.insert(url.as_str().to_string(), PageState::Visited);
        true
    }

    /// Records the terminal state of a visited URL
    pub fn record(&mut self, url: &Url, state: PageState) {
        self.states.insert(url.as_str().to_string(), state);
    }

    pub fn state_of(&self, url: &Url) -> PageState {
        self.states
            .get(url.as_str())
            .copied()
            .unwrap_or(PageState::Unseen)
    }

    pub fn is_visited(&self, url: &Url) -> bool {
        self.state_of(url).is_visited()
    }

    /// Number of entries still in the queue
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn visited_count(&self) -> usize {
        self.states.values().filter(|s| s.is_visited()).count()
    }
}

/// Monotonic count of fetch attempts, capped at a maximum
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestBudget {
    used: u32,
    max: u32,
}

impl RequestBudget {
    pub fn new(max: u32) -> Self {
        Self { used: 0, max }
    }

    /// Counts one fetch attempt, whatever its outcome
    pub fn record_attempt(&mut self) {
        debug_assert!(self.used < self.max, "fetch attempted with exhausted budget");
        self.used = self.used.saturating_add(1).min(self.max);
    }

    pub fn is_exhausted(&self) -> bool {
        self.used >= self.max
    }

    pub fn used(&self) -> u32 {
        self.used
    }

    pub fn max(&self) -> u32 {
        self.max
    }

    pub fn remaining(&self) -> u32 {
        self.max - self.used
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn url(s: &str) -> Url {
        Url::parse(s).unwrap()
    }

    #[test]
    fn test_fifo_order() {
        let mut frontier = Frontier::new();
        frontier.enqueue(url("http://x.com/1"), None);
        frontier.enqueue(url("http://x.com/2"), None);
        frontier.enqueue(url("http://x.com/3"), None);

        assert_eq!(frontier.pop().unwrap().url.as_str(), "http://x.com/1");
        assert_eq!(frontier.pop().unwrap().url.as_str(), "http://x.com/2");
        assert_eq!(frontier.pop().unwrap().url.as_str(), "http://x.com/3");
        assert!(frontier.pop().is_none());
    }

    #[test]
    fn test_enqueue_rejects_queued_duplicate() {
        let mut frontier = Frontier::new();
        assert!(frontier.enqueue(url("http://x.com/a"), None));
        assert!(!frontier.enqueue(url("http://x.com/a"), Some(url("http://x.com/"))));
        assert_eq!(frontier.len(), 1);
    }

    #[test]
    fn test_enqueue_rejects_visited() {
        let mut frontier = Frontier::new();
        frontier.enqueue(url("http://x.com/a"), None);
        let entry = frontier.pop().unwrap();
        assert!(frontier.mark_visited(&entry.url));
        frontier.record(&entry.url, PageState::FetchFailed);

        assert!(!frontier.enqueue(url("http://x.com/a"), None));
        assert!(frontier.is_empty());
    }

    #[test]
    fn test_mark_visited_once() {
        let mut frontier = Frontier::new();
        let a = url("http://x.com/a");
        assert!(frontier.mark_visited(&a));
        assert!(!frontier.mark_visited(&a));
        assert_eq!(frontier.state_of(&a), PageState::Visited);
    }

    #[test]
    fn test_state_lifecycle() {
        let mut frontier = Frontier::new();
        let a = url("http://x.com/a");
        assert_eq!(frontier.state_of(&a), PageState::Unseen);

        frontier.enqueue(a.clone(), None);
        assert_eq!(frontier.state_of(&a), PageState::Queued);

        frontier.pop();
        frontier.mark_visited(&a);
        frontier.record(&a, PageState::Processed);
        assert_eq!(frontier.state_of(&a), PageState::Processed);
        assert_eq!(frontier.visited_count(), 1);
    }

    #[test]
    fn test_referrer_kept() {
        let mut frontier = Frontier::new();
        frontier.enqueue(url("http://x.com/a"), Some(url("http://x.com/")));
        let entry = frontier.pop().unwrap();
        assert_eq!(entry.referrer.unwrap().as_str(), "http://x.com/");
    }

    #[test]
    fn test_budget() {
        let mut budget = RequestBudget::new(2);
        assert!(!budget.is_exhausted());
        budget.record_attempt();
        assert_eq!(budget.remaining(), 1);
        budget.record_attempt();
        assert!(budget.is_exhausted());
        assert_eq!(budget.used(), 2);
        assert_eq!(budget.max(), 2);
    }
}
