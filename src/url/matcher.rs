use regex::Regex;

/// A single shell-style wildcard pattern compiled for URL matching
///
/// Supported syntax:
/// - `*` matches any run of characters, including `/`
/// - `**` is the same as `*`; URLs are matched as flat strings
/// - `?` matches exactly one character
/// - `[abc]`, `[a-z]` and `[!abc]` match one character from (or outside) a set
///
/// An unclosed `[` is taken literally. A pattern whose translation does not
/// compile falls back to exact string comparison.
#[derive(Debug, Clone)]
pub enum GlobPattern {
    Compiled(Regex),
    Literal(String),
}

impl GlobPattern {
    /// Compiles a pattern; never fails
    pub fn new(pattern: &str) -> Self {
        match Regex::new(&translate(pattern)) {
            Ok(regex) => Self::Compiled(regex),
            Err(e) => {
                tracing::debug!("Glob '{}' did not compile ({}), matching literally", pattern, e);
                Self::Literal(pattern.to_string())
            }
        }
    }

    pub fn is_match(&self, target: &str) -> bool {
        match self {
            Self::Compiled(regex) => regex.is_match(target),
            Self::Literal(literal) => literal == target,
        }
    }
}

/// An ordered collection of patterns; matches when any member matches
#[derive(Debug, Clone, Default)]
pub struct GlobSet {
    patterns: Vec<GlobPattern>,
}

impl GlobSet {
    pub fn new<S: AsRef<str>>(patterns: &[S]) -> Self {
        Self {
            patterns: patterns.iter().map(|p| GlobPattern::new(p.as_ref())).collect(),
        }
    }

    /// Returns true if any pattern matches; an empty set never matches
    pub fn is_match(&self, target: &str) -> bool {
        self.patterns.iter().any(|p| p.is_match(target))
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }
}

/// Checks a target string against a list of wildcard patterns
///
/// Compiles the patterns on every call; the crawl loop keeps a [`GlobSet`]
/// instead.
///
/// # Examples
///
/// ```
/// use meta_harvest::url::matches_any;
///
/// let patterns = ["https://example.com/articles/*"];
/// assert!(matches_any("https://example.com/articles/2024/01/post", &patterns));
/// assert!(!matches_any("https://example.com/about", &patterns));
///
/// let none: [&str; 0] = [];
/// assert!(!matches_any("https://example.com/", &none));
/// ```
pub fn matches_any<S: AsRef<str>>(target: &str, patterns: &[S]) -> bool {
    GlobSet::new(patterns).is_match(target)
}

/// Translates a wildcard pattern into an anchored regular expression
fn translate(pattern: &str) -> String {
    let chars: Vec<char> = pattern.chars().collect();
    let len = chars.len();
    let mut out = String::from("(?s)^");
    let mut i = 0;

    while i < len {
        let c = chars[i];
        i += 1;

        match c {
            '*' => {
                // Collapse runs so `**` behaves like `*`
                while i < len && chars[i] == '*' {
                    i += 1;
                }
                out.push_str(".*");
            }
            '?' => out.push('.'),
            '[' => {
                let mut j = i;
                if j < len && chars[j] == '!' {
                    j += 1;
                }
                if j < len && chars[j] == ']' {
                    j += 1;
                }
                while j < len && chars[j] != ']' {
                    j += 1;
                }

                if j >= len {
                    out.push_str(r"\[");
                } else {
                    out.push_str(&translate_class(&chars[i..j]));
                    i = j + 1;
                }
            }
            other => {
                let mut buf = [0u8; 4];
                out.push_str(&regex::escape(other.encode_utf8(&mut buf)));
            }
        }
    }

    out.push('$');
    out
}

/// Translates the body of a `[...]` set (brackets excluded)
fn translate_class(body: &[char]) -> String {
    let mut class = String::from("[");
    let mut rest = body;

    match rest.first() {
        Some('!') => {
            class.push('^');
            rest = &rest[1..];
        }
        Some('^') => {
            class.push_str(r"\^");
            rest = &rest[1..];
        }
        _ => {}
    }

    for &ch in rest {
        if matches!(ch, '\\' | '[' | ']' | '&' | '~' | '|') {
            class.push('\\');
        }
        class.push(ch);
    }

    class.push(']');
    class
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_star_spans_slashes() {
        let glob = GlobPattern::new("https://example.com/articles/*");
        assert!(glob.is_match("https://example.com/articles/1"));
        assert!(glob.is_match("https://example.com/articles/2024/01/post"));
        assert!(glob.is_match("https://example.com/articles/"));
        assert!(!glob.is_match("https://example.com/article"));
    }

    #[test]
    fn test_double_star_same_as_single() {
        let single = GlobPattern::new("https://example.com/*/page");
        let double = GlobPattern::new("https://example.com/**/page");
        for target in [
            "https://example.com/a/page",
            "https://example.com/a/b/c/page",
            "https://example.com/page",
        ] {
            assert_eq!(single.is_match(target), double.is_match(target), "{}", target);
        }
    }

    #[test]
    fn test_question_mark_single_char() {
        let glob = GlobPattern::new("http://x.com/page/?");
        assert!(glob.is_match("http://x.com/page/2"));
        assert!(!glob.is_match("http://x.com/page/10"));
        assert!(!glob.is_match("http://x.com/page/"));
    }

    #[test]
    fn test_character_class() {
        let glob = GlobPattern::new("http://x.com/page/[0-9]");
        assert!(glob.is_match("http://x.com/page/7"));
        assert!(!glob.is_match("http://x.com/page/a"));
    }

    #[test]
    fn test_negated_character_class() {
        let glob = GlobPattern::new("http://x.com/[!a]*");
        assert!(glob.is_match("http://x.com/blog"));
        assert!(!glob.is_match("http://x.com/archive"));
    }

    #[test]
    fn test_regex_metacharacters_are_literal() {
        let glob = GlobPattern::new("https://example.com/search?q=(a+b)");
        assert!(glob.is_match("https://example.com/search?q=(a+b)"));
        assert!(glob.is_match("https://example.com/searchXq=(a+b)"));
        assert!(!glob.is_match("https://example.com/search?q=aab"));

        let dots = GlobPattern::new("https://example.com/*.pdf");
        assert!(dots.is_match("https://example.com/files/report.pdf"));
        assert!(!dots.is_match("https://example.com/files/reportXpdf"));
    }

    #[test]
    fn test_unclosed_bracket_is_literal() {
        let glob = GlobPattern::new("http://x.com/[draft*");
        assert!(glob.is_match("http://x.com/[draft-1"));
        assert!(!glob.is_match("http://x.com/draft-1"));
    }

    #[test]
    fn test_uncompilable_pattern_degrades_to_literal() {
        let glob = GlobPattern::new("http://x.com/[z-a]");
        assert!(matches!(glob, GlobPattern::Literal(_)));
        assert!(glob.is_match("http://x.com/[z-a]"));
        assert!(!glob.is_match("http://x.com/b"));
    }

    #[test]
    fn test_whole_string_anchoring() {
        let glob = GlobPattern::new("http://x.com/a");
        assert!(glob.is_match("http://x.com/a"));
        assert!(!glob.is_match("http://x.com/a/b"));
        assert!(!glob.is_match("xhttp://x.com/a"));
    }

    #[test]
    fn test_empty_pattern_list_never_matches() {
        let empty: Vec<String> = vec![];
        assert!(!matches_any("http://x.com/", &empty));
        assert!(GlobSet::new(&empty).is_empty());
    }

    #[test]
    fn test_matches_any_of_several() {
        let patterns = vec!["*.pdf".to_string(), "*/login*".to_string()];
        assert!(matches_any("http://x.com/doc.pdf", &patterns));
        assert!(matches_any("http://x.com/login?next=/", &patterns));
        assert!(!matches_any("http://x.com/home", &patterns));
    }

    #[test]
    fn test_case_sensitive() {
        let glob = GlobPattern::new("http://x.com/Blog/*");
        assert!(!glob.is_match("http://x.com/blog/post"));
    }
}
