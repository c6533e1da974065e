//! HTML link discovery
//!
//! Extracts the outbound links of a page as normalized, de-duplicated URLs.

use crate::url::normalize_url;
use scraper::{Html, Selector};
use std::collections::HashSet;
use url::Url;

/// Extracts all followable links from an HTML page
///
/// # Link Extraction Rules
///
/// **Include:** `<a href="...">` resolved against `base_url`, http(s) only
///
/// **Exclude:**
/// - `javascript:`, `mailto:`, `tel:` links
/// - Data URIs
/// - Fragment-only anchors
///
/// Results are normalized and de-duplicated, keeping first-seen order.
///
/// # Example
///
/// ```
/// use meta_harvest::crawler::discover_links;
/// use url::Url;
///
/// let html = r##"<a href="/a">A</a><a href="/a#top">A again</a><a href="#x">skip</a>"##;
/// let base_url = Url::parse("http://x.com/").unwrap();
/// let links = discover_links(html, &base_url).unwrap();
/// assert_eq!(links.len(), 1);
/// assert_eq!(links[0].as_str(), "http://x.com/a");
/// ```
pub fn discover_links(html: &str, base_url: &Url) -> Result<Vec<Url>, String> {
    let document = Html::parse_document(html);
    let selector =
        Selector::parse("a[href]").map_err(|e| format!("Invalid link selector: {:?}", e))?;

    let mut seen = HashSet::new();
    let mut links = Vec::new();

    for element in document.select(&selector) {
        let Some(href) = element.value().attr("href") else {
            continue;
        };
        let Some(absolute_url) = resolve_link(href, base_url) else {
            continue;
        };
        let Ok(normalized) = normalize_url(&absolute_url) else {
            continue;
        };

        if seen.insert(normalized.as_str().to_string()) {
            links.push(normalized);
        }
    }

    Ok(links)
}

/// Resolves a link href to an absolute URL and validates it
///
/// Returns None if the link should be excluded:
/// - javascript:, mailto:, tel: schemes
/// - data: URIs
/// - Invalid URLs
/// - Non-HTTP(S) URLs after resolution
fn resolve_link(href: &str, base_url: &Url) -> Option<String> {
    let href = href.trim();

    if href.is_empty() {
        return None;
    }

    if href.starts_with("javascript:")
        || href.starts_with("mailto:")
        || href.starts_with("tel:")
        || href.starts_with("data:")
    {
        return None;
    }

    // Same-page anchors
    if href.starts_with('#') {
        return None;
    }

    match base_url.join(href) {
        Ok(absolute_url) => {
            if absolute_url.scheme() == "http" || absolute_url.scheme() == "https" {
                Some(absolute_url.to_string())
            } else {
                None
            }
        }
        Err(_) => None,
    }
}
