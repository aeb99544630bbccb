//! Name normalization and title extraction.

use std::sync::LazyLock;

use regex::Regex;

use crate::enums::Title;

/// Honorific between the surname comma and the first period:
/// `"Braund, Mr. Owen Harris"` -> `"Mr"`.
static HONORIFIC: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r",\s*([^.]*)\.").expect("honorific pattern is valid"));

/// Trim and title-case a name: every run of letters starts upper-case and
/// continues lower-case (`"braund, MR. owen"` -> `"Braund, Mr. Owen"`).
#[must_use]
pub fn normalize_name(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut previous_is_alpha = false;
    for ch in raw.trim().chars() {
        if ch.is_alphabetic() {
            if previous_is_alpha {
                out.extend(ch.to_lowercase());
            } else {
                out.extend(ch.to_uppercase());
            }
            previous_is_alpha = true;
        } else {
            out.push(ch);
            previous_is_alpha = false;
        }
    }
    out
}

/// Raw honorific found in the name, if any.
#[must_use]
pub fn extract_honorific(name: &str) -> Option<&str> {
    HONORIFIC
        .captures(name)
        .and_then(|captures| captures.get(1))
        .map(|m| m.as_str().trim())
}

/// Title group for a (normalized) name. Names without an honorific are `Other`.
#[must_use]
pub fn extract_title(name: &str) -> Title {
    extract_honorific(name).map_or(Title::Other, Title::from_honorific)
}
