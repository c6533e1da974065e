use crate::UrlError;
use url::{ParseError, Url};

/// Normalizes a URL string into the canonical form used as the dedup key
///
/// # Normalization Steps
///
/// 1. Trim surrounding whitespace; reject empty input
/// 2. Parse the URL; reject input without a scheme
/// 3. Remove fragment (everything after #)
/// 4. Give a bare `scheme://host` the root path `/`
///
/// Host lowercasing, default-port removal and percent-encoding come from the
/// WHATWG parser. The result is stable under re-normalization.
///
/// # Examples
///
/// ```
/// use meta_harvest::url::normalize_url;
///
/// let url = normalize_url("  http://Example.com#top ").unwrap();
/// assert_eq!(url.as_str(), "http://example.com/");
///
/// assert!(normalize_url("example.com/page").is_err());
/// ```
pub fn normalize_url(raw: &str) -> Result<Url, UrlError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(UrlError::Empty);
    }

    let mut url = Url::parse(trimmed).map_err(|e| match e {
        ParseError::RelativeUrlWithoutBase => UrlError::MissingScheme(trimmed.to_string()),
        other => UrlError::Parse(format!("{}: {}", trimmed, other)),
    })?;

    url.set_fragment(None);

    if url.has_host() && url.path().is_empty() {
        url.set_path("/");
    }

    Ok(url)
}
