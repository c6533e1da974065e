//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests for the crawler, including:
//! - Building the HTTP client with browser-like headers and a timeout
//! - GET requests with redirect following
//! - Error classification (transport failure vs. response)

use crate::config::CrawlConfig;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE};
use reqwest::{redirect::Policy, Client};
use std::future::Future;
use std::time::Duration;
use url::Url;

/// User agent sent unless the configuration overrides it
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
     AppleWebKit/537.36 (KHTML, like Gecko) Chrome/122.0.0.0 Safari/537.36";

const ACCEPT_HTML: &str = "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8";

const MAX_REDIRECTS: usize = 10;

/// Result of a fetch operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchResult {
    /// The server answered; the status may still be an error status
    Fetched {
        /// Final URL after redirects
        final_url: String,
        /// HTTP status code
        status_code: u16,
        /// Page body content
        body: String,
    },

    /// Network error (connection refused, timeout, unreadable body, etc.)
    NetworkError {
        /// Error description
        error: String,
        /// True if the request hit the configured timeout
        timed_out: bool,
    },
}

impl FetchResult {
    /// Convenience constructor for a 200 response with no redirect
    pub fn ok(url: &str, body: impl Into<String>) -> Self {
        Self::Fetched {
            final_url: url.to_string(),
            status_code: 200,
            body: body.into(),
        }
    }
}

/// Something that can GET a page
///
/// The coordinator awaits one fetch at a time.
pub trait PageFetcher {
    fn fetch(&self, url: &Url) -> impl Future<Output = FetchResult>;
}

/// Builds an HTTP client with proper configuration
///
/// # Example
///
/// ```no_run
/// use meta_harvest::config::CrawlConfig;
/// use meta_harvest::crawler::build_http_client;
///
/// let config = CrawlConfig::new(["https://example.com"]);
/// let client = build_http_client(&config).unwrap();
/// ```
pub fn build_http_client(config: &CrawlConfig) -> Result<Client, reqwest::Error> {
    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, HeaderValue::from_static(ACCEPT_HTML));
    headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("en-US,en;q=0.9"));

    let user_agent = config.user_agent.as_deref().unwrap_or(DEFAULT_USER_AGENT);

    Client::builder()
        .user_agent(user_agent)
        .default_headers(headers)
        .timeout(config.timeout)
        .connect_timeout(config.timeout.min(Duration::from_secs(10)))
        .redirect(Policy::limited(MAX_REDIRECTS))
        .gzip(true)
        .brotli(true)
        .build()
}

/// reqwest-backed fetcher
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    pub fn from_config(config: &CrawlConfig) -> Result<Self, reqwest::Error> {
        Ok(Self::new(build_http_client(config)?))
    }
}

impl PageFetcher for HttpFetcher {
    async fn fetch(&self, url: &Url) -> FetchResult {
        fetch_url(&self.client, url.as_str()).await
    }
}

/// Fetches a URL, following redirects
///
/// Any answer from the server, whatever its status, is `Fetched`; only
/// transport problems (DNS, refused connection, TLS, timeout, too many
/// redirects, unreadable body) are `NetworkError`. No retries.
pub async fn fetch_url(client: &Client, url: &str) -> FetchResult {
    match client.get(url).send().await {
        Ok(response) => {
            let status_code = response.status().as_u16();
            let final_url = response.url().to_string();

            match response.text().await {
                Ok(body) => FetchResult::Fetched {
                    final_url,
                    status_code,
                    body,
                },
                Err(e) => network_error(e),
            }
        }
        Err(e) => network_error(e),
    }
}

fn network_error(e: reqwest::Error) -> FetchResult {
    if e.is_timeout() {
        FetchResult::NetworkError {
            error: "Request timeout".to_string(),
            timed_out: true,
        }
    } else if e.is_connect() {
        FetchResult::NetworkError {
            error: format!("Connection failed: {}", e),
            timed_out: false,
        }
    } else {
        FetchResult::NetworkError {
            error: e.to_string(),
            timed_out: false,
        }
    }
}
