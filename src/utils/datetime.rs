//! Date and time utility functions
//!
//! The backend hands out timestamps as opaque strings. This module parses the
//! formats it is known to emit and renders them in a human-readable way
//! (e.g. "today at 14:30", "Mar 01, 2024 at 09:15").

use chrono::{DateTime, Datelike, Local, NaiveDate, NaiveDateTime, TimeZone};

/// Formats tried, in order, for timestamps without an explicit offset
const NAIVE_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
];

/// Parse a server timestamp into local time
///
/// Accepts RFC 3339 (`2025-01-15T14:30:00Z`), RFC 2822 / HTTP dates
/// (`Wed, 15 Jan 2025 14:30:00 GMT`) and ISO 8601 without offset, with or
/// without fractional seconds. Offset-less values are taken as UTC.
pub fn parse_timestamp(value: &str) -> Option<DateTime<Local>> {
    let value = value.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Local));
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(value) {
        return Some(dt.with_timezone(&Local));
    }

    NAIVE_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
        .map(|naive| Local.from_utc_datetime(&naive))
}

/// Human-readable day relative to `today`
pub fn format_relative_date(date: NaiveDate, today: NaiveDate) -> String {
    match (date - today).num_days() {
        -1 => "yesterday".to_string(),
        0 => "today".to_string(),
        1 => "tomorrow".to_string(),
        diff if (-7..-1).contains(&diff) => format!("{} days ago", -diff),
        _ if date.year() == today.year() => date.format("%b %d").to_string(),
        _ => date.format("%b %d, %Y").to_string(),
    }
}

/// Format a server timestamp for display, or return it unchanged when it
/// cannot be parsed
pub fn format_timestamp(value: &str) -> String {
    match parse_timestamp(value) {
        Some(local) => {
            let today = Local::now().date_naive();
            format!(
                "{} at {}",
                format_relative_date(local.date_naive(), today),
                local.format("%H:%M")
            )
        }
        None => value.to_string(),
    }
}

/// Like [`format_timestamp`], with a placeholder for absent values
pub fn format_optional_timestamp(value: Option<&str>) -> String {
    value.map_or_else(|| "—".to_string(), format_timestamp)
}
