//! Display formatters for durations and call timestamps

use chrono::{DateTime, Utc};
use chrono_tz::Tz;

/// Format a talk duration as `m:ss`
///
/// Zero or absent durations render as `0:00`. Minutes are not wrapped into
/// hours.
pub fn format_duration(seconds: Option<i64>) -> String {
    match seconds {
        Some(secs) if secs > 0 => format!("{}:{:02}", secs / 60, secs % 60),
        _ => "0:00".to_string(),
    }
}

/// Format a call timestamp as `dd/mm/yy HH:MM` in `tz`
pub fn format_date_time(timestamp: DateTime<Utc>, tz: Tz) -> String {
    timestamp
        .with_timezone(&tz)
        .format("%d/%m/%y %H:%M")
        .to_string()
}
