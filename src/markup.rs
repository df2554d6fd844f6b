/*!
 * Inline markup handling for plain-text exports.
 *
 * The parser keeps `<i>`, `<b>`, `<font ...>` and friends untouched; exports
 * that cannot carry styling flatten them here instead.
 */

use once_cell::sync::Lazy;
use regex::Regex;

/// Emphasis spans rewritten to `(content)`, applied in order
static EMPHASIS_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    vec![
        // Italic
        Regex::new(r"(?is)<i[^>]*>(.*?)</i[^>]*>").unwrap(),
        // Bold
        Regex::new(r"(?is)<b[^>]*>(.*?)</b[^>]*>").unwrap(),
        // Underline
        Regex::new(r"(?is)<u[^>]*>(.*?)</u[^>]*>").unwrap(),
    ]
});

/// Any remaining tag
static ANY_TAG_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)<[^>]*>").unwrap()
});

static WHITESPACE_RUN_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\s+").unwrap()
});

/// Flatten subtitle markup into plain text.
///
/// Italic, bold and underline spans become `(content)`, every other tag is
/// dropped, and whitespace runs collapse to a single space.
pub fn strip_markup(text: &str) -> String {
    let mut result = text.to_string();

    for pattern in EMPHASIS_PATTERNS.iter() {
        result = pattern.replace_all(&result, "(${1})").into_owned();
    }

    let result = ANY_TAG_REGEX.replace_all(&result, "");
    WHITESPACE_RUN_REGEX.replace_all(&result, " ").trim().to_string()
}
