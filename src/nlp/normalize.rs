//! Text canonicalisation shared by tagging, matching, and deduplication.
//!
//! Paper text and label strings must go through the exact same
//! transform, otherwise token equality during tagging is meaningless.

use once_cell::sync::Lazy;
use regex::Regex;

static NON_ALNUM: Lazy<Regex> = Lazy::new(|| Regex::new("[^A-Za-z0-9]+").expect("valid regex"));
static MULTI_SPACE: Lazy<Regex> = Lazy::new(|| Regex::new(" +").expect("valid regex"));

/// Canonicalise `text` for matching: every maximal run of characters
/// outside `[A-Za-z0-9]` becomes a single space, then the result is
/// trimmed. With `lower` the text is case-folded first. With
/// `collapse_spaces` any remaining space run is collapsed as well,
/// which guards against double application.
pub fn normalize(text: &str, lower: bool, collapse_spaces: bool) -> String {
    let text = if lower {
        text.to_lowercase()
    } else {
        text.to_string()
    };
    let replaced = NON_ALNUM.replace_all(&text, " ");
    let trimmed = replaced.trim();
    if collapse_spaces {
        MULTI_SPACE.replace_all(trimmed, " ").into_owned()
    } else {
        trimmed.to_string()
    }
}

/// Split a segmentation unit into word tokens after normalisation.
///
/// Sub-word splitting belongs to the external model tokenizer; tokens
/// here are whole words as the exchange format expects.
pub fn tokenize(unit: &str) -> Vec<String> {
    normalize(unit, false, false)
        .split_whitespace()
        .map(str::to_string)
        .collect()
}
