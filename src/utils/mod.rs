//! Utility functions and helpers.

pub mod http;
pub mod stars;

use regex::Regex;
use url::Url;

/// Resolve a potentially relative URL against a base URL.
pub fn resolve_url(base: &Url, href: &str) -> String {
    base.join(href)
        .map(|u| u.to_string())
        .unwrap_or_else(|_| href.to_string())
}

/// Last non-empty path segment of a URL, e.g. the film slug of a film page.
pub fn last_path_segment(url: &str) -> Option<String> {
    Url::parse(url)
        .ok()?
        .path_segments()?
        .rfind(|s| !s.is_empty())
        .map(str::to_string)
}

/// Concatenate every run of digits in `text` and parse the result.
///
/// `"12,345 members"` becomes 12345, which strips thousands separators.
pub fn joined_digits(text: &str) -> Option<u64> {
    let digits: String = text.chars().filter(char::is_ascii_digit).collect();
    digits.parse().ok()
}

/// All runs of ASCII digits in `text`, in order.
pub fn digit_groups(text: &str) -> Vec<&str> {
    Regex::new(r"\d+")
        .map(|re| re.find_iter(text).map(|m| m.as_str()).collect())
        .unwrap_or_default()
}

/// Collapse whitespace runs (including non-breaking spaces) into single spaces.
pub fn normalize_whitespace(s: &str) -> String {
    s.split(|c: char| c.is_whitespace() || c == '\u{a0}')
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}
