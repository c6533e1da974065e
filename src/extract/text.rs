use scraper::ElementRef;

/// Elements whose text is never shown to a reader
const INVISIBLE_ELEMENTS: &[&str] = &["script", "style", "noscript", "template"];

/// Collapses every whitespace run to a single space and trims
///
/// Returns None when nothing but whitespace remains.
///
/// # Examples
///
/// ```
/// use meta_harvest::extract::normalize_whitespace;
///
/// assert_eq!(normalize_whitespace("  a\n\tb  "), Some("a b".to_string()));
/// assert_eq!(normalize_whitespace(""), None);
/// ```
pub fn normalize_whitespace(text: &str) -> Option<String> {
    let collapsed = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if collapsed.is_empty() {
        None
    } else {
        Some(collapsed)
    }
}

/// Visible text of an element with whitespace normalized
///
/// Text nodes are joined with a space, so `<p>a</p><p>b</p>` reads "a b".
pub fn visible_text(element: ElementRef<'_>) -> Option<String> {
    let mut pieces: Vec<&str> = Vec::new();

    for node in element.descendants() {
        let Some(text) = node.value().as_text() else {
            continue;
        };

        let hidden = node.ancestors().any(|ancestor| {
            ancestor
                .value()
                .as_element()
                .is_some_and(|e| INVISIBLE_ELEMENTS.contains(&e.name()))
        });
        if !hidden {
            pieces.push(text);
        }
    }

    normalize_whitespace(&pieces.join(" "))
}
