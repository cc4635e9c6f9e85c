//! Date/time utilities: parsing stored timestamps and formatting them for display.

use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat, Utc};
use chrono_tz::Tz;

/// Format used for absolute timestamps.
pub const ABSOLUTE_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Timestamps older than this many days are shown in absolute form.
const RELATIVE_DAYS_LIMIT: i64 = 7;

/// Parse a stored timestamp.
///
/// Accepts RFC 3339 (with any offset, as returned by the hosted table-store)
/// and the SQLite `YYYY-MM-DD HH:MM:SS[.f]` form, which is taken as UTC.
pub fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc));
    }

    // PostgREST may render "+00" offsets without minutes.
    if let Ok(dt) = DateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f%#z") {
        return Some(dt.with_timezone(&Utc));
    }

    NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S%.f")
        .ok()
        .map(|naive| naive.and_utc())
}

/// Render a timestamp the way it is persisted: RFC 3339, UTC, microseconds.
///
/// The fixed width keeps lexical order equal to chronological order.
pub fn to_storage(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::Micros, true)
}

/// Format a UTC instant in the given timezone.
///
/// Falls back to UTC when the timezone name is unknown.
pub fn format_absolute(dt: &DateTime<Utc>, timezone: &str) -> String {
    match timezone.parse::<Tz>() {
        Ok(tz) => dt.with_timezone(&tz).format(ABSOLUTE_FORMAT).to_string(),
        Err(_) => dt.format(ABSOLUTE_FORMAT).to_string(),
    }
}

/// Format a timestamp relative to `now`.
///
/// - under a minute (or in the future): "방금 전"
/// - under an hour: "N분 전"
/// - under a day: "N시간 전"
/// - under a week: "N일 전"
/// - otherwise the absolute local time
pub fn format_relative(dt: &DateTime<Utc>, now: &DateTime<Utc>, timezone: &str) -> String {
    let elapsed = *now - *dt;

    if elapsed.num_minutes() < 1 {
        "방금 전".to_string()
    } else if elapsed.num_hours() < 1 {
        format!("{}분 전", elapsed.num_minutes())
    } else if elapsed.num_days() < 1 {
        format!("{}시간 전", elapsed.num_hours())
    } else if elapsed.num_days() < RELATIVE_DAYS_LIMIT {
        format!("{}일 전", elapsed.num_days())
    } else {
        format_absolute(dt, timezone)
    }
}

/// Today's date in the given timezone.
pub fn today_in(timezone: &str) -> NaiveDate {
    let now = Utc::now();
    match timezone.parse::<Tz>() {
        Ok(tz) => now.with_timezone(&tz).date_naive(),
        Err(_) => now.date_naive(),
    }
}
