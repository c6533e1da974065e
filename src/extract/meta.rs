//! Metadata lookups used by the title, description and heading chains

use crate::extract::text::{normalize_whitespace, visible_text};
use crate::extract::ExtractError;
use scraper::{Html, Selector};

/// Social and bibliographic title tags, in priority order
pub const TITLE_META_KEYS: &[&str] = &["og:title", "twitter:title", "dc.title"];

/// Description tags, in priority order
pub const DESCRIPTION_META_KEYS: &[&str] = &["description", "og:description", "twitter:description"];

/// Selectors shared by every lookup on one document
pub(crate) struct Selectors {
    pub meta: Selector,
    pub title: Selector,
    pub h1: Selector,
    pub h2: Selector,
    pub article: Selector,
    pub main: Selector,
    pub paragraph: Selector,
}

impl Selectors {
    pub fn parse() -> Result<Self, ExtractError> {
        Ok(Self {
            meta: selector("meta")?,
            title: selector("title")?,
            h1: selector("h1")?,
            h2: selector("h2")?,
            article: selector("article")?,
            main: selector("main")?,
            paragraph: selector("p")?,
        })
    }
}

fn selector(css: &str) -> Result<Selector, ExtractError> {
    Selector::parse(css).map_err(|e| ExtractError::Selector(format!("{}: {:?}", css, e)))
}

/// Content of the first `<meta>` whose `name` (then `property`) equals `key`
///
/// Tags with blank content are skipped.
pub(crate) fn meta_content(document: &Html, selectors: &Selectors, key: &str) -> Option<String> {
    ["name", "property"].iter().find_map(|attr| {
        document
            .select(&selectors.meta)
            .filter(|meta| meta.value().attr(attr) == Some(key))
            .find_map(|meta| meta.value().attr("content").and_then(normalize_whitespace))
    })
}

/// Text of the document's `<title>` element
pub(crate) fn title_element(document: &Html, selectors: &Selectors) -> Option<String> {
    document.select(&selectors.title).next().and_then(visible_text)
}

pub(crate) fn first_h1(document: &Html, selectors: &Selectors) -> Option<String> {
    document.select(&selectors.h1).next().and_then(visible_text)
}

pub(crate) fn first_h2(document: &Html, selectors: &Selectors) -> Option<String> {
    document.select(&selectors.h2).next().and_then(visible_text)
}
