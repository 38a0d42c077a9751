//! Lenient timestamp parsing for record dates.
//!
//! The two sources never agreed on a timestamp format either, so parsing
//! accepts the three shapes seen in production data. An unparsable value
//! degrades the record's date-derived signals to `None` instead of failing.

use chrono::{NaiveDate, NaiveDateTime};

/// Parse a record timestamp.
///
/// Accepts:
/// - RFC3339 datetime (offset dropped, wall-clock time kept)
/// - Naive datetime YYYY-MM-DDTHH:MM:SS (optional fractional seconds)
/// - YYYY-MM-DD (time set to 00:00:00)
pub fn parse_timestamp(s: &str) -> Option<NaiveDateTime> {
    if let Ok(dt) = chrono::DateTime::parse_from_rfc3339(s) {
        return Some(dt.naive_local());
    }
    if let Ok(ndt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(ndt);
    }
    if let Ok(d) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return d.and_hms_opt(0, 0, 0);
    }
    None
}

/// Day-truncated timestamp, local calendar.
pub fn parse_day(s: &str) -> Option<NaiveDate> {
    parse_timestamp(s).map(|ndt| ndt.date())
}

/// Format for the summary contract: naive datetime without offset.
pub fn format_timestamp(ndt: NaiveDateTime) -> String {
    ndt.format("%Y-%m-%dT%H:%M:%S").to_string()
}
