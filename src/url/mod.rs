//! URL handling module for Meta-Harvest
//!
//! This module provides URL normalization, host comparison, glob matching,
//! and page classification.

mod domain;
mod matcher;
mod normalize;

use crate::config::CrawlConfig;
use std::fmt;
use url::Url;

// Re-export main functions
pub use domain::{extract_host, same_host};
pub use matcher::{matches_any, GlobPattern, GlobSet};
pub use normalize::normalize_url;

/// What a URL is expected to hold
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PageKind {
    /// Content page - metadata is extracted, links are not followed
    Detail,
    /// Index page - links are followed
    Pagination,
    /// Matches neither list
    Unknown,
}

impl PageKind {
    /// Returns true if outbound links of this page should be discovered
    pub fn follows_links(&self) -> bool {
        matches!(self, Self::Pagination | Self::Unknown)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Detail => "detail",
            Self::Pagination => "pagination",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for PageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Compiled scrape, pagination and ignore patterns for one crawl
#[derive(Debug, Clone, Default)]
pub struct UrlRules {
    pub scrape: GlobSet,
    pub pagination: GlobSet,
    pub ignore: GlobSet,
}

impl UrlRules {
    pub fn from_config(config: &CrawlConfig) -> Self {
        Self {
            scrape: GlobSet::new(&config.scrape_url_globs),
            pagination: GlobSet::new(&config.pagination_url_globs),
            ignore: GlobSet::new(&config.ignore_url_globs),
        }
    }

    /// Classifies a URL; scrape patterns win over pagination patterns
    pub fn classify(&self, url: &Url) -> PageKind {
        let target = url.as_str();
        if self.scrape.is_match(target) {
            PageKind::Detail
        } else if self.pagination.is_match(target) {
            PageKind::Pagination
        } else {
            PageKind::Unknown
        }
    }

    pub fn is_ignored(&self, url: &Url) -> bool {
        self.ignore.is_match(url.as_str())
    }

    /// Returns true if a fetched page of this kind should yield a record
    ///
    /// Detail pages always do. With no scrape patterns configured at all,
    /// every page that is not pagination does too.
    pub fn is_content(&self, kind: PageKind) -> bool {
        kind == PageKind::Detail || (self.scrape.is_empty() && kind != PageKind::Pagination)
    }
}

/// Classifies a URL according to the configuration's pattern lists
///
/// # Examples
///
/// ```
/// use meta_harvest::config::CrawlConfig;
/// use meta_harvest::url::{classify_url, normalize_url, PageKind};
///
/// let mut config = CrawlConfig::new(["http://example.com"]);
/// config.scrape_url_globs = vec!["http://example.com/articles/*".to_string()];
/// config.pagination_url_globs = vec!["http://example.com/*".to_string()];
///
/// let url = normalize_url("http://example.com/articles/1").unwrap();
/// assert_eq!(classify_url(&url, &config), PageKind::Detail);
/// ```
pub fn classify_url(url: &Url, config: &CrawlConfig) -> PageKind {
    UrlRules::from_config(config).classify(url)
}
