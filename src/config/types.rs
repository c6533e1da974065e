use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

/// Default number of fetch attempts per crawl
pub const DEFAULT_MAX_REQUESTS: u32 = 100;

/// Default output path for the record array
pub const DEFAULT_OUTPUT_FILE: &str = "data/output.json";

/// Default per-request timeout in seconds
pub const DEFAULT_TIMEOUT_SECONDS: f64 = 20.0;

/// Input document as written by the user, before validation
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawConfig {
    pub start_urls: Option<Vec<StartUrl>>,

    #[serde(default)]
    pub scrape_url_globs: Vec<String>,

    #[serde(default)]
    pub pagination_url_globs: Vec<String>,

    #[serde(default)]
    pub ignore_url_globs: Vec<String>,

    #[serde(default = "default_max_requests")]
    pub max_requests_per_crawl: u32,

    #[serde(default = "default_output_file")]
    pub output_file: String,

    #[serde(default)]
    pub delay_seconds: f64,

    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: f64,

    /// Overrides the browser-like default User-Agent header
    #[serde(default)]
    pub user_agent: Option<String>,
}

/// A start URL entry: either a plain string or a `{ "url": ... }` record
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum StartUrl {
    Plain(String),
    Record { url: String },
}

impl StartUrl {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Plain(url) => url,
            Self::Record { url } => url,
        }
    }
}

fn default_max_requests() -> u32 {
    DEFAULT_MAX_REQUESTS
}

fn default_output_file() -> String {
    DEFAULT_OUTPUT_FILE.to_string()
}

fn default_timeout_seconds() -> f64 {
    DEFAULT_TIMEOUT_SECONDS
}

/// Validated crawl configuration
///
/// Built once by [`crate::config::load_config`] and handed to the
/// coordinator, which never mutates it.
#[derive(Debug, Clone)]
pub struct CrawlConfig {
    /// Seed URLs as written; normalization happens when seeding
    pub start_urls: Vec<String>,

    /// Patterns for content (detail) pages
    pub scrape_url_globs: Vec<String>,

    /// Patterns for index (pagination) pages
    pub pagination_url_globs: Vec<String>,

    /// Patterns for URLs that must never be fetched
    pub ignore_url_globs: Vec<String>,

    /// Maximum number of fetch attempts, successful or not
    pub max_requests_per_crawl: u32,

    /// Where the record array is written
    pub output_file: PathBuf,

    /// Pause after every fetch that produced a response
    pub delay: Duration,

    /// Per-request timeout
    pub timeout: Duration,

    pub user_agent: Option<String>,
}

impl CrawlConfig {
    /// Builds a configuration with defaults for everything but the seeds
    pub fn new<I, S>(start_urls: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            start_urls: start_urls.into_iter().map(Into::into).collect(),
            scrape_url_globs: Vec::new(),
            pagination_url_globs: Vec::new(),
            ignore_url_globs: Vec::new(),
            max_requests_per_crawl: DEFAULT_MAX_REQUESTS,
            output_file: PathBuf::from(DEFAULT_OUTPUT_FILE),
            delay: Duration::ZERO,
            timeout: Duration::from_secs_f64(DEFAULT_TIMEOUT_SECONDS),
            user_agent: None,
        }
    }

    /// Applies command-line overrides on top of the loaded file
    pub fn with_overrides(mut self, output_file: Option<PathBuf>, max_requests: Option<u32>) -> Self {
        if let Some(path) = output_file {
            self.output_file = path;
        }
        if let Some(max) = max_requests {
            self.max_requests_per_crawl = max;
        }
        self
    }
}
