/// Page state definitions for tracking crawl progress
///
/// Every normalized URL moves through `Unseen -> Queued -> Visited` and then
/// into exactly one terminal state.
use std::fmt;

/// Represents the current state of a URL in the crawl process
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PageState {
    // ===== Active States =====
    /// URL has not been seen yet
    Unseen,

    /// URL is in the frontier waiting to be dequeued
    Queued,

    /// URL has been dequeued and marked visited; outcome not yet known
    Visited,

    // ===== Terminal States =====
    /// URL matched an ignore pattern and was never fetched
    Ignored,

    /// Transport error or timeout
    FetchFailed,

    /// Non-success status code or empty body
    Unusable,

    /// Response was usable and the page was classified, extracted and/or
    /// mined for links
    Processed,
}

impl PageState {
    /// Returns true if this is a terminal state (no further processing needed)
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::Unseen | Self::Queued | Self::Visited)
    }

    /// Returns true once the URL has left the frontier
    pub fn is_visited(&self) -> bool {
        !matches!(self, Self::Unseen | Self::Queued)
    }

    /// Returns true if this represents a successful completion
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Processed)
    }

    /// Returns true if a fetch was attempted for this URL
    pub fn consumed_budget(&self) -> bool {
        matches!(self, Self::FetchFailed | Self::Unusable | Self::Processed)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Unseen => "unseen",
            Self::Queued => "queued",
            Self::Visited => "visited",
            Self::Ignored => "ignored",
            Self::FetchFailed => "fetch_failed",
            Self::Unusable => "unusable",
            Self::Processed => "processed",
        }
    }
}

impl fmt::Display for PageState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
