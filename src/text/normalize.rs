//! Whitespace normalization.

use once_cell::sync::Lazy;
use regex::Regex;

static WHITESPACE_RUN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s+").expect("whitespace pattern is valid"));

/// Collapse every maximal run of whitespace (spaces, tabs, line breaks and
/// other Unicode whitespace) into a single ASCII space.
///
/// Leading and trailing runs are collapsed, not removed.
pub fn normalize_whitespace(text: &str) -> String {
    WHITESPACE_RUN.replace_all(text, " ").into_owned()
}

/// True when `text` contains no whitespace other than isolated ASCII spaces.
pub fn is_normalized(text: &str) -> bool {
    let mut prev_ws = false;
    for c in text.chars() {
        if c.is_whitespace() {
            if prev_ws || c != ' ' {
                return false;
            }
            prev_ws = true;
        } else {
            prev_ws = false;
        }
    }
    true
}
