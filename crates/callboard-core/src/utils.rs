//! Formatting helpers shared by the presenter and metrics

use chrono::NaiveDateTime;
use std::fmt::Write;

/// Format a count with thousands separators (e.g., 12345 → "12,345")
#[must_use]
pub fn format_number(n: u64) -> String {
    let digits = n.to_string();
    let len = digits.len();
    let mut result = String::with_capacity(len + len / 3);

    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            result.push(',');
        }
        result.push(c);
    }

    result
}

/// Format seconds as a `m:ss` clock (e.g., 272 → "4:32")
#[must_use]
pub fn format_clock_duration(seconds: u32) -> String {
    format!("{}:{:02}", seconds / 60, seconds % 60)
}

/// Render a timestamp with a `strftime` pattern, or `None` if the pattern
/// cannot be rendered for this value
#[must_use]
pub fn format_timestamp(timestamp: &NaiveDateTime, pattern: &str) -> Option<String> {
    let mut out = String::new();
    write!(out, "{}", timestamp.format(pattern)).ok()?;
    Some(out)
}

/// Whether `pattern` is a usable `strftime` pattern
#[must_use]
pub fn is_valid_time_format(pattern: &str) -> bool {
    use chrono::format::{Item, StrftimeItems};

    !pattern.trim().is_empty() && !StrftimeItems::new(pattern).any(|item| matches!(item, Item::Error))
}

/// Keep only ASCII digits (e.g., "+1 (555) 234-5678" → "15552345678")
#[must_use]
pub fn digits_only(value: &str) -> String {
    value.chars().filter(char::is_ascii_digit).collect()
}
