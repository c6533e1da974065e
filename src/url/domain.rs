use url::Url;

/// Extracts the lowercase host from a URL
///
/// Returns None for URLs without a host (e.g. `mailto:`).
///
/// # Examples
///
/// ```
/// use url::Url;
/// use meta_harvest::url::extract_host;
///
/// let url = Url::parse("https://EXAMPLE.COM:8080/path").unwrap();
/// assert_eq!(extract_host(&url), Some("example.com".to_string()));
/// ```
pub fn extract_host(url: &Url) -> Option<String> {
    url.host_str().map(|h| h.to_lowercase())
}

/// Returns true if both URLs have the same host
///
/// Scheme and port are not compared, so `http://h/x` and `https://h:8443/y`
/// count as the same host. Two host-less URLs never match.
pub fn same_host(a: &Url, b: &Url) -> bool {
    match (extract_host(a), extract_host(b)) {
        (Some(x), Some(y)) => x == y,
        _ => false,
    }
}
