//! Relative rendering of provider timestamps

use chrono::{DateTime, TimeZone, Utc};

/// Phrase used when a message carries no usable timestamp
pub const UNKNOWN_TIME: &str = "Unknown time";

/// Format a timestamp relative to `now` (e.g., "5 minutes ago")
pub fn format_relative_time(ts: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let duration = now.signed_duration_since(ts);

    if duration.num_seconds() < 60 {
        return "Just now".to_string();
    }

    let (count, unit) = if duration.num_minutes() < 60 {
        (duration.num_minutes(), "minute")
    } else if duration.num_hours() < 24 {
        (duration.num_hours(), "hour")
    } else if duration.num_days() < 30 {
        (duration.num_days(), "day")
    } else if duration.num_days() < 365 {
        (duration.num_days() / 30, "month")
    } else {
        (duration.num_days() / 365, "year")
    };

    if count == 1 {
        format!("1 {} ago", unit)
    } else {
        format!("{} {}s ago", count, unit)
    }
}

/// Render a provider `internalDate` (milliseconds since epoch, as a string)
pub(crate) fn relative_from_internal_date(internal_date: Option<&str>, now: DateTime<Utc>) -> String {
    internal_date
        .and_then(|raw| raw.trim().parse::<i64>().ok())
        .and_then(|millis| Utc.timestamp_millis_opt(millis).single())
        .map(|ts| format_relative_time(ts, now))
        .unwrap_or_else(|| UNKNOWN_TIME.to_string())
}
