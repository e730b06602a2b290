//! Customer contact-info formats.
//!
//! Shared regexes for the validator-derived DTOs in the db crate, plus
//! an email normalizer. Emails are stored lowercased so the unique
//! index catches case-variant duplicates.

use std::sync::LazyLock;

use regex::Regex;

/// US phone format as entered in the intake forms: `(xxx) xxx-xxxx`.
pub static PHONE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\(\d{3}\) \d{3}-\d{4}$").unwrap());

/// Five-digit zip code.
pub static ZIP_CODE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\d{5}$").unwrap());

/// Normalize an email for storage and lookup.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}
