//! Date arithmetic, timestamp parsing and log helpers.
//!
//! Timestamp parsing always takes the format explicitly; there is no shared
//! formatter state.

use chrono::{DateTime, Days, FixedOffset, NaiveDate, NaiveTime, Utc};

/// Parse a raw `created_at` value with the given chrono format.
pub fn parse_timestamp(raw: &str, format: &str) -> Result<DateTime<FixedOffset>, chrono::ParseError> {
    DateTime::parse_from_str(raw.trim(), format)
}

/// Calendar day (UTC) of a timestamp as `YYYY-MM-DD`.
pub fn day_key(ts: &DateTime<FixedOffset>) -> String {
    ts.with_timezone(&Utc).format("%Y-%m-%d").to_string()
}

/// First day covered by a window of `day_range` days ending today.
///
/// A range of 1 means "today only". `day_range` must be at least 1.
pub fn window_start(today: NaiveDate, day_range: u32) -> NaiveDate {
    today
        .checked_sub_days(Days::new(u64::from(day_range.saturating_sub(1))))
        .unwrap_or(NaiveDate::MIN)
}

/// Instant before which items fall outside the window starting at `since`.
pub fn cutoff_instant(since: NaiveDate) -> DateTime<Utc> {
    since.and_time(NaiveTime::MIN).and_utc()
}

/// `YYYYMMDD`, as the article search expects.
pub fn compact_date(date: NaiveDate) -> String {
    date.format("%Y%m%d").to_string()
}

/// Truncate a string for logging purposes.
///
/// Long strings are cut to at most `max` bytes, on a character boundary,
/// with `"…(+N bytes)"` appended.
pub fn truncate_for_log(s: &str, max: usize) -> String {
    if s.len() <= max {
        return s.to_string();
    }
    let mut end = max;
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}…(+{} bytes)", &s[..end], s.len() - end)
}
