//! Article body resolution
//!
//! The body is resolved in stages, each tried only if the previous one
//! produced nothing:
//!
//! 1. Main-content (boilerplate removal) algorithm
//! 2. `<article>`, else `<main>` container
//! 3. First ten non-empty paragraphs joined with a space

use crate::extract::meta::Selectors;
use crate::extract::text::visible_text;
use crate::extract::ExtractError;
use scraper::Html;
use std::panic::{self, AssertUnwindSafe};
use url::Url;

/// Number of paragraphs kept by the paragraph stage
pub const MAX_PARAGRAPHS: usize = 10;

/// A main-content (boilerplate removal) algorithm
pub trait MainContentExtractor: Send + Sync {
    /// Returns the visible text of the page's main content
    fn extract_main(&self, html: &str, url: &Url) -> Result<String, ExtractError>;
}

/// Mozilla Readability, via the `readability` crate
#[derive(Debug, Clone, Copy, Default)]
pub struct ReadabilityExtractor;

impl MainContentExtractor for ReadabilityExtractor {
    fn extract_main(&self, html: &str, url: &Url) -> Result<String, ExtractError> {
        let product = readability::extractor::extract(&mut html.as_bytes(), url)
            .map_err(|e| ExtractError::MainContent(format!("{:?}", e)))?;

        let fragment = Html::parse_fragment(&product.content);
        Ok(visible_text(fragment.root_element()).unwrap_or_default())
    }
}

/// Stage 1: main-content algorithm
///
/// An error or a panic inside the algorithm is logged and yields nothing.
pub(crate) fn main_content(
    extractor: &dyn MainContentExtractor,
    html: &str,
    url: &Url,
) -> Option<String> {
    let outcome = panic::catch_unwind(AssertUnwindSafe(|| extractor.extract_main(html, url)))
        .unwrap_or_else(|_| Err(ExtractError::MainContent("algorithm panicked".to_string())));

    match outcome {
        Ok(text) => Some(text),
        Err(e) => {
            tracing::debug!("Main-content extraction failed for {}: {}", url, e);
            None
        }
    }
}

/// Stage 2: semantic `<article>` container, else `<main>`
pub(crate) fn semantic_container(document: &Html, selectors: &Selectors) -> Option<String> {
    document
        .select(&selectors.article)
        .next()
        .or_else(|| document.select(&selectors.main).next())
        .and_then(visible_text)
}

/// Stage 3: leading paragraphs in document order
pub(crate) fn leading_paragraphs(document: &Html, selectors: &Selectors) -> Option<String> {
    let paragraphs: Vec<String> = document
        .select(&selectors.paragraph)
        .filter_map(visible_text)
        .take(MAX_PARAGRAPHS)
        .collect();

    if paragraphs.is_empty() {
        None
    } else {
        Some(paragraphs.join(" "))
    }
}
