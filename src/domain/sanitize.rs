//! Pure sanitization of free-text and contact fields.
//!
//! Every function here is idempotent: sanitizing an already sanitized value
//! returns it unchanged. None of them reject input - deciding whether a
//! sanitized value is acceptable belongs to the validator in
//! [`crate::domain::lead`].

use once_cell::sync::Lazy;
use regex::Regex;

static MARKUP_TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]*>").expect("markup tag pattern"));

/// Strips markup and injection-prone characters from free text.
///
/// Removal order matters for idempotence: complete tags first, then stray
/// angle brackets, then quote marks and semicolons, then double-dash
/// sequences, then surrounding whitespace. Removing quotes before dashes
/// keeps a sequence like `-;-` from re-forming a `--` on a second pass.
pub fn sanitize_text(raw: &str) -> String {
    let without_tags = MARKUP_TAG.replace_all(raw, "");
    let without_metachars: String = without_tags
        .chars()
        .filter(|c| !matches!(c, '<' | '>' | '\'' | '"' | ';'))
        .collect();
    without_metachars.replace("--", "").trim().to_string()
}

/// Normalizes an email candidate: removes all whitespace and lowercases.
///
/// Shape validation (`local@domain`) happens in the lead validator.
pub fn sanitize_email(raw: &str) -> String {
    raw.chars()
        .filter(|c| !c.is_whitespace())
        .collect::<String>()
        .to_lowercase()
}

/// Reduces a phone candidate to its digits.
///
/// Returns `None` when the input holds no digits at all. Whether the digit
/// count is acceptable is the validator's call, not this function's.
pub fn sanitize_phone(raw: &str) -> Option<String> {
    let digits: String = raw.chars().filter(|c| c.is_ascii_digit()).collect();
    if digits.is_empty() {
        None
    } else {
        Some(digits)
    }
}
