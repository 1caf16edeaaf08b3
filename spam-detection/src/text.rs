//! Text normalization
//!
//! Training and inference both go through [`clean_text`]; the vectorizer's
//! vocabulary only matches inference input if the cleaning is identical.

use regex::Regex;
use std::sync::OnceLock;

fn non_alnum() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[^a-z0-9\s]+").expect("valid regex"))
}

fn multi_space() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\s+").expect("valid regex"))
}

/// Lowercase, trim and collapse whitespace runs into single spaces
pub fn normalize_case_and_spaces(text: &str) -> String {
    let lowered = text.to_lowercase();
    multi_space().replace_all(lowered.trim(), " ").into_owned()
}

/// Replace every run of characters outside `[a-z0-9\s]` with a space
pub fn remove_special_characters(text: &str) -> String {
    non_alnum().replace_all(text, " ").into_owned()
}

/// Canonical form of a message: lowercase alphanumerics separated by single spaces
pub fn clean_text(text: &str) -> String {
    let value = normalize_case_and_spaces(text);
    let value = remove_special_characters(&value);
    multi_space().replace_all(&value, " ").trim().to_string()
}

/// [`clean_text`] for values that may be missing; `None` becomes ""
pub fn clean_optional(text: Option<&str>) -> String {
    text.map(clean_text).unwrap_or_default()
}
