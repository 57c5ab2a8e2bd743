//! Timestamp helpers: the storage encoding of interval boundaries and
//! human-readable rendering for the CLI.

use chrono::{DateTime, Local, SecondsFormat, TimeDelta, Utc};

/// Encode a timestamp for storage.
///
/// Fixed millisecond precision in UTC, so text ordering in SQLite matches
/// chronological ordering.
pub fn to_db_timestamp(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Millis, true)
}

pub fn parse_db_timestamp(s: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

/// Local wall-clock rendering used in tables.
pub fn format_local(ts: &DateTime<Utc>) -> String {
    ts.with_timezone(&Local)
        .format("%Y-%m-%d %H:%M:%S")
        .to_string()
}

pub fn format_duration(d: TimeDelta) -> String {
    let mins = d.num_minutes();
    let sign = if mins < 0 { "-" } else { "" };
    let m = mins.abs();
    format!("{}{:02}h {:02}m", sign, m / 60, m % 60)
}
