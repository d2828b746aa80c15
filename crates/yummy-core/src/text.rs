//! Normalization helpers for user-supplied text
//!
//! All user text goes through these before validation, storage, or
//! uniqueness comparison: emails are lowercased and trimmed, names are
//! whitespace-collapsed and title-cased.

/// Trim and lowercase an email address
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Collapse runs of whitespace into single spaces and trim the ends
pub fn collapse_whitespace(input: &str) -> String {
    input.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Title-case each whitespace-separated word
///
/// Only the first letter of each word is uppercased; the rest are
/// lowercased. Non-alphabetic leading characters are left as-is.
pub fn title_case(input: &str) -> String {
    input
        .split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => {
                    first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase()
                }
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Collapse whitespace and title-case in one pass (the display-name form)
pub fn normalize_name(input: &str) -> String {
    title_case(&collapse_whitespace(input))
}
