//! State module for tracking crawl progress
//!
//! # Components
//!
//! - `PageState`: lifecycle of a single normalized URL (queued, ignored,
//!   fetch failed, unusable, processed)

mod page_state;

// Re-export main types
pub use page_state::PageState;
