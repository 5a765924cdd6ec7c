//! Timestamp rendering and length capping shared by every forecast category.
//!
//! Offsets are baked into the instant and the result is formatted as UTC, so
//! the output reads as the location's wall clock without a zone database.

use chrono::{DateTime, Utc};

/// Cap for every rendered category except minutely.
pub const MAX_RESPONSE_LENGTH: usize = 2000;

/// Cap for the minutely forecast.
pub const MAX_MINUTELY_LENGTH: usize = 1000;

const ELLIPSIS: &str = "...";

/// Placeholder for a timestamp chrono cannot represent.
const INVALID_TIME: &str = "No Data";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimePattern {
    /// `Tuesday`
    Weekday,
    /// `Tue 3:05 PM`
    HourlyStamp,
    /// `03:05 PM`
    ClockTime,
    /// `11/14/23, 03:05 PM`
    AlertStamp,
}

impl TimePattern {
    fn chrono_format(&self) -> &'static str {
        match self {
            TimePattern::Weekday => "%A",
            TimePattern::HourlyStamp => "%a %-I:%M %p",
            TimePattern::ClockTime => "%I:%M %p",
            TimePattern::AlertStamp => "%m/%d/%y, %I:%M %p",
        }
    }
}

/// Shift a Unix timestamp by the location's offset.
pub fn local_instant(unix_seconds: i64, timezone_offset: i64) -> Option<DateTime<Utc>> {
    let shifted = unix_seconds.checked_add(timezone_offset)?;
    DateTime::from_timestamp(shifted, 0)
}

pub fn format_instant(instant: DateTime<Utc>, pattern: TimePattern) -> String {
    instant.format(pattern.chrono_format()).to_string()
}

/// `local_instant` followed by `format_instant`.
pub fn format_local(unix_seconds: i64, timezone_offset: i64, pattern: TimePattern) -> String {
    local_instant(unix_seconds, timezone_offset)
        .map(|instant| format_instant(instant, pattern))
        .unwrap_or_else(|| INVALID_TIME.to_string())
}

/// Full weekday name in UTC. Daily labels ignore the location's offset.
pub fn format_weekday(unix_seconds: i64) -> String {
    format_local(unix_seconds, 0, TimePattern::Weekday)
}

/// Truncate `text` to at most `max` characters, ending in `...` when cut.
pub fn cap_length(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }

    if max <= ELLIPSIS.len() {
        return ELLIPSIS.to_string();
    }

    let mut capped: String = text.chars().take(max - ELLIPSIS.len()).collect();
    capped.push_str(ELLIPSIS);
    capped
}
