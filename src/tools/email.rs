//! Email address extraction.

use regex::Regex;
use std::sync::OnceLock;

static EMAIL_PATTERN: OnceLock<Regex> = OnceLock::new();

fn email_pattern() -> &'static Regex {
    EMAIL_PATTERN.get_or_init(|| {
        Regex::new(r"[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}")
            .expect("email pattern is valid")
    })
}

/// Extract email addresses from `text`, lowercased, in order of appearance.
/// Text without an address yields an empty vec.
pub fn extract_emails(text: &str) -> Vec<String> {
    email_pattern()
        .find_iter(text)
        .map(|m| m.as_str().to_lowercase())
        .collect()
}
