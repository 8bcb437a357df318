// file: src/utils/text.rs
// description: character-safe truncation, whitespace cleanup and filename slugs
// reference: https://docs.rs/regex

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref WHITESPACE_RUN: Regex =
        Regex::new(r"\s+").expect("WHITESPACE_RUN regex is valid");

    static ref NON_SLUG: Regex =
        Regex::new(r"[^a-z0-9]+").expect("NON_SLUG regex is valid");
}

const MAX_SLUG_LEN: usize = 60;
const FALLBACK_SLUG: &str = "research-report";

/// Returns the first `max_chars` characters of `text`, never splitting a
/// code point.
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

pub fn collapse_whitespace(text: &str) -> String {
    WHITESPACE_RUN.replace_all(text.trim(), " ").into_owned()
}

/// Lowercase ASCII slug suitable for a report filename.
pub fn slugify(text: &str) -> String {
    let lowered = text.to_lowercase();
    let slug = NON_SLUG.replace_all(&lowered, "-");
    let slug = truncate_chars(slug.trim_matches('-'), MAX_SLUG_LEN).trim_end_matches('-');

    if slug.is_empty() {
        FALLBACK_SLUG.to_string()
    } else {
        slug.to_string()
    }
}
