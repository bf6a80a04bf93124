//! Video identifier extraction from watch-page, short-link and embed URLs.

use regex::Regex;
use std::sync::OnceLock;

/// URL shapes tried in order; the first pattern that matches wins.
const PATTERNS: [&str; 3] = [
    r"(?:youtube\.com/watch\?v=|youtu\.be/)([^&\s]+)",
    r"youtube\.com/embed/([^&\s]+)",
    r"youtube\.com/v/([^&\s]+)",
];

fn patterns() -> &'static [Regex] {
    static COMPILED: OnceLock<Vec<Regex>> = OnceLock::new();
    COMPILED.get_or_init(|| {
        PATTERNS
            .iter()
            .map(|p| Regex::new(p).expect("built-in video id pattern is valid"))
            .collect()
    })
}

/// Extracts the video identifier from `url`.
///
/// The identifier is the captured segment up to the first `&` or whitespace.
/// Returns `None` for empty input or when no known URL shape matches.
///
/// # Examples
///
/// - `extract_id("https://youtu.be/abc123")` → `Some("abc123")`
/// - `extract_id("https://www.youtube.com/watch?v=abc123&t=42")` → `Some("abc123")`
/// - `extract_id("https://vimeo.com/123")` → `None`
pub fn extract_id(url: &str) -> Option<&str> {
    if url.is_empty() {
        return None;
    }
    patterns()
        .iter()
        .find_map(|re| re.captures(url))
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}
