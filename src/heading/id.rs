use crate::doc::Block;
use regex::Regex;
use std::sync::LazyLock;

static PUNCTUATION_OR_SYMBOL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\p{P}\p{S}]").expect("Invalid punctuation regex"));

static WHITESPACE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("Invalid whitespace regex"));

/// Default heading id: the slug of the heading's text content.
pub fn default_heading_id(block: &Block) -> String {
    slugify(&block.text_content())
}

/// Strips Unicode punctuation and symbols, joins whitespace runs with a
/// single hyphen, lowercases, and trims hyphens from both ends.
pub fn slugify(text: &str) -> String {
    let stripped = PUNCTUATION_OR_SYMBOL.replace_all(text, "");
    let hyphenated = WHITESPACE_RUN.replace_all(&stripped, "-");
    hyphenated.to_lowercase().trim_matches('-').to_string()
}
