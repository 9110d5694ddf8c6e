//! Text Normalizer: turns raw document text into a display form and an
//! embedding-ready form.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Anything outside word characters, whitespace, `@`, `.`, `+`, `-`.
/// Keeps email addresses and phone-number-like tokens intact.
static DISALLOWED: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^\w\s@.+\-]").expect("static regex is valid"));

static WHITESPACE_RUN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s+").expect("static regex is valid"));

/// Both text variants of a single document. Built once at ingestion time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizedText {
    pub display: String,
    pub embedding_ready: String,
}

impl NormalizedText {
    pub fn from_raw(raw: Option<&str>) -> Self {
        let display = clean_opt(raw);
        let embedding_ready = display.to_lowercase();
        Self {
            display,
            embedding_ready,
        }
    }
}

/// Strips markup/bullets and collapses whitespace. Empty input yields "".
///
/// Removal runs before the whitespace collapse so that a stripped symbol
/// between two spaces never leaves a double space behind.
pub fn clean(text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }
    let stripped = DISALLOWED.replace_all(text, "");
    WHITESPACE_RUN
        .replace_all(&stripped, " ")
        .trim()
        .to_string()
}

/// `clean` for a possibly-missing input.
pub fn clean_opt(text: Option<&str>) -> String {
    text.map(clean).unwrap_or_default()
}

/// `clean`, then lowercase.
pub fn normalize_for_embedding(text: &str) -> String {
    clean(text).to_lowercase()
}
