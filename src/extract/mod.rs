//! Metadata extraction pipeline
//!
//! Every field of a [`PageRecord`] is resolved through an ordered chain of
//! lookups. The first lookup yielding non-blank text wins; later lookups are
//! not evaluated.
//!
//! | Field | Chain |
//! |-------|-------|
//! | title | `og:title`, `twitter:title`, `dc.title`, `<title>`, first `<h1>` |
//! | description | `description`, `og:description`, `twitter:description` |
//! | heading | first `<h1>`, first `<h2>` |
//! | article | main-content algorithm, `<article>`/`<main>`, leading `<p>`s |

mod article;
mod meta;
mod text;

pub use article::{MainContentExtractor, ReadabilityExtractor, MAX_PARAGRAPHS};
pub use meta::{DESCRIPTION_META_KEYS, TITLE_META_KEYS};
pub use text::{normalize_whitespace, visible_text};

use meta::Selectors;
use scraper::Html;
use serde::{Deserialize, Serialize};
use std::panic::{self, AssertUnwindSafe};
use thiserror::Error;
use url::Url;

/// Errors that can occur while extracting metadata
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("Invalid selector {0}")]
    Selector(String),

    #[error("Main-content extraction failed: {0}")]
    MainContent(String),

    #[error("Extraction aborted: {0}")]
    Aborted(String),
}

/// Metadata extracted from one content page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRecord {
    /// Canonical (post-redirect, normalized) URL
    pub url: String,
    pub title: Option<String>,
    pub description: Option<String>,
    pub heading: Option<String>,
    pub article: Option<String>,
}

/// One lookup in a fallback chain
pub type Lookup<'a> = Box<dyn FnOnce() -> Option<String> + 'a>;

/// Evaluates lookups in order and returns the first non-blank result
///
/// Results are whitespace-normalized; a lookup returning only whitespace
/// counts as nothing and the chain moves on.
pub fn first_present<'a, I>(lookups: I) -> Option<String>
where
    I: IntoIterator<Item = Lookup<'a>>,
{
    lookups
        .into_iter()
        .find_map(|lookup| lookup().as_deref().and_then(normalize_whitespace))
}

/// Extracts page metadata with a pluggable main-content algorithm
///
/// Selectors are parsed once, when the extractor is built.
pub struct MetadataExtractor {
    main_content: Box<dyn MainContentExtractor>,
    selectors: Selectors,
}

impl MetadataExtractor {
    pub fn new(main_content: Box<dyn MainContentExtractor>) -> Result<Self, ExtractError> {
        Ok(Self {
            main_content,
            selectors: Selectors::parse()?,
        })
    }

    /// Extractor backed by the Readability algorithm
    pub fn readability() -> Result<Self, ExtractError> {
        Self::new(Box::new(ReadabilityExtractor))
    }

    /// Extracts a record from an HTML document
    ///
    /// A fault in the main-content stage only skips that stage. A fault
    /// anywhere else aborts the page with [`ExtractError::Aborted`].
    ///
    /// # Arguments
    ///
    /// * `html` - The raw document
    /// * `url` - The canonical URL stored in the record and used as the
    ///   main-content algorithm's base
    pub fn extract(&self, html: &str, url: &Url) -> Result<PageRecord, ExtractError> {
        panic::catch_unwind(AssertUnwindSafe(|| self.resolve(html, url))).map_err(|payload| {
            let reason = payload
                .downcast_ref::<&str>()
                .map(|s| s.to_string())
                .or_else(|| payload.downcast_ref::<String>().cloned())
                .unwrap_or_else(|| "panic".to_string());
            ExtractError::Aborted(reason)
        })
    }

    fn resolve(&self, html: &str, url: &Url) -> PageRecord {
        let document = Html::parse_document(html);
        let doc = &document;
        let sel = &self.selectors;

        let mut title_chain: Vec<Lookup<'_>> = TITLE_META_KEYS
            .iter()
            .map(|key| meta_lookup(doc, sel, key))
            .collect();
        title_chain.push(Box::new(|| meta::title_element(doc, sel)));
        title_chain.push(Box::new(|| meta::first_h1(doc, sel)));
        let title = first_present(title_chain);

        let description = first_present(
            DESCRIPTION_META_KEYS
                .iter()
                .map(|key| meta_lookup(doc, sel, key)),
        );

        let heading_chain: [Lookup<'_>; 2] = [
            Box::new(|| meta::first_h1(doc, sel)),
            Box::new(|| meta::first_h2(doc, sel)),
        ];
        let heading = first_present(heading_chain);

        let main_content = self.main_content.as_ref();
        let article_chain: [Lookup<'_>; 3] = [
            Box::new(move || article::main_content(main_content, html, url)),
            Box::new(|| article::semantic_container(doc, sel)),
            Box::new(|| article::leading_paragraphs(doc, sel)),
        ];
        let article = first_present(article_chain);

        PageRecord {
            url: url.to_string(),
            title,
            description,
            heading,
            article,
        }
    }
}

fn meta_lookup<'a>(document: &'a Html, selectors: &'a Selectors, key: &'a str) -> Lookup<'a> {
    Box::new(move || meta::meta_content(document, selectors, key))
}

/// Extracts a record using the Readability main-content algorithm
///
/// # Example
///
/// ```
/// use meta_harvest::extract::extract_metadata;
/// use url::Url;
///
/// let html = r#"<html><head><meta property="og:title" content="Hello"></head>
///               <body><h1>Welcome</h1><p>Body text.</p></body></html>"#;
/// let url = Url::parse("https://example.com/post").unwrap();
/// let record = extract_metadata(html, &url).unwrap();
/// assert_eq!(record.title.as_deref(), Some("Hello"));
/// assert_eq!(record.heading.as_deref(), Some("Welcome"));
/// ```
pub fn extract_metadata(html: &str, url: &Url) -> Result<PageRecord, ExtractError> {
    MetadataExtractor::readability()?.extract(html, url)
}
