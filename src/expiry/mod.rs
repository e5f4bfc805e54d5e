// Rental time parsing and display
use chrono::{DateTime, Duration, Local, NaiveDateTime};

/// How long an expired rental stays visible in the panel by default
pub const DEFAULT_RECENT_WINDOW_HOURS: i64 = 24;

/// Longest accepted recency window (one year)
pub const MAX_RECENT_WINDOW_HOURS: i64 = 24 * 366;

const LOCAL_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M"];

/// Current local wall-clock time, the reference every rental time is compared to
pub fn now() -> NaiveDateTime {
    Local::now().naive_local()
}

pub fn recent_window(hours: i64) -> Duration {
    Duration::hours(hours.clamp(0, MAX_RECENT_WINDOW_HOURS))
}

/// Parse a stored rental timestamp.
///
/// Stored times are local wall-clock strings like `2024-01-01 10:00:00`; the
/// first space is the date/time separator. Timestamps carrying an explicit
/// offset are converted to local time.
pub fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    let normalized = raw.trim().replacen(' ', "T", 1);

    for format in LOCAL_FORMATS {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(&normalized, format) {
            return Some(parsed);
        }
    }

    DateTime::parse_from_rfc3339(&normalized)
        .ok()
        .map(|parsed| parsed.with_timezone(&Local).naive_local())
}

/// Format a stored timestamp as `H:MM AM`.
///
/// Unparseable input is returned unchanged.
pub fn format_time_with_am_pm(raw: &str) -> String {
    match parse_timestamp(raw) {
        Some(parsed) => parsed.format("%-I:%M %p").to_string(),
        None => raw.to_string(),
    }
}

/// Split a formatted time into its clock part and its AM/PM part
pub fn split_meridiem(formatted: &str) -> (&str, Option<&str>) {
    match formatted.split_once(' ') {
        Some((clock, meridiem)) if !meridiem.contains(' ') => (clock, Some(meridiem)),
        _ => (formatted, None),
    }
}
