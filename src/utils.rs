//! Utility functions for file-name keys and log-friendly strings.
//!
//! - Slugification of free-text company names into file-system safe keys
//! - Ticker normalization for per-ticker output files
//! - String truncation for logging response bodies

use once_cell::sync::Lazy;
use regex::Regex;

static NON_ALNUM_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^a-z0-9]+").unwrap());

/// Convert a company name to a file-name slug.
///
/// Lowercases the input, collapses every run of characters outside
/// `[a-z0-9]` into a single hyphen and strips leading/trailing hyphens.
/// Non-ASCII letters count as separators.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(slugify("Apple Inc."), "apple-inc");
/// assert_eq!(slugify("  --AT&T--  "), "at-t");
/// ```
pub fn slugify(name: &str) -> String {
    let lowered = name.trim().to_lowercase();
    NON_ALNUM_RUN
        .replace_all(&lowered, "-")
        .trim_matches('-')
        .to_string()
}

/// File-name key for a ticker: trimmed and lowercased, otherwise untouched.
pub fn ticker_key(ticker: &str) -> String {
    ticker.trim().to_lowercase()
}

/// Truncate a string for logging purposes.
///
/// Long strings are cut to at most `max` bytes (backing off to a char
/// boundary) with an ellipsis and byte count appended.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(truncate_for_log("short", 100), "short");
/// assert_eq!(truncate_for_log(&"a".repeat(500), 10), "aaaaaaaaaa…(+490 bytes)");
/// ```
pub fn truncate_for_log(s: &str, max: usize) -> String {
    if s.len() <= max {
        return s.to_string();
    }
    let mut end = max;
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}…(+{} bytes)", &s[..end], s.len() - end)
}
