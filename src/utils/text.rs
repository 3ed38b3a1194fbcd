//! Plain-text normalisation helpers shared by the fetcher and prompt builders.

use regex::Regex;
use std::sync::LazyLock;

use super::constants::TRUNCATION_MARKER;

static WHITESPACE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("BUG: hardcoded regex '\\s+' is invalid"));

/// Collapse every whitespace run to a single space and trim both ends
#[must_use]
pub fn collapse_whitespace(text: &str) -> String {
    WHITESPACE_RE.replace_all(text, " ").trim().to_string()
}

/// Truncate `text` to at most `max_chars` characters, appending the
/// truncation marker only when something was cut
///
/// Counts `char`s rather than bytes so multi-byte text is never split
/// mid-codepoint.
#[must_use]
pub fn truncate_chars(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => {
            let mut out = String::with_capacity(byte_idx + TRUNCATION_MARKER.len());
            out.push_str(&text[..byte_idx]);
            out.push_str(TRUNCATION_MARKER);
            out
        }
        None => text.to_string(),
    }
}

/// Take a `max_chars` prefix without any marker (used for log previews)
#[must_use]
pub fn preview(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => &text[..byte_idx],
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collapses_mixed_whitespace() {
        assert_eq!(collapse_whitespace("  a \n\t b   c\r\n"), "a b c");
        assert_eq!(collapse_whitespace("\n\n"), "");
    }

    #[test]
    fn truncation_is_char_based() {
        assert_eq!(truncate_chars("héllo wörld", 5), "héllo...");
        assert_eq!(truncate_chars("short", 5), "short");
        assert_eq!(truncate_chars("short", 10), "short");
    }

    #[test]
    fn preview_never_adds_marker() {
        assert_eq!(preview("abcdef", 3), "abc");
        assert_eq!(preview("ab", 3), "ab");
    }
}
