//!
//! Text helpers for rendering feed items
//!

use time::{macros::format_description, OffsetDateTime};

pub const DEFAULT_TITLE: &str = "Notification";
pub const UNKNOWN_TIME: &str = "unknown date";

///
/// Human readable distance between `time` and `now`.
///
/// Anything older than a week is shown as a date e.g. `May 1, 2024`.
/// Times in the future are treated as `just now`.
///
pub fn relative_time(time: OffsetDateTime, now: OffsetDateTime) -> String {
    let elapsed = now - time;

    let minutes = elapsed.whole_minutes();
    let hours = elapsed.whole_hours();
    let days = elapsed.whole_days();

    if minutes < 1 {
        "just now".to_string()
    } else if hours < 1 {
        ago(minutes, "minute")
    } else if days < 1 {
        ago(hours, "hour")
    } else if days < 7 {
        ago(days, "day")
    } else {
        let format = format_description!("[month repr:short] [day padding:none], [year]");
        time.format(format)
            .unwrap_or_else(|_| UNKNOWN_TIME.to_string())
    }
}

fn ago(count: i64, unit: &str) -> String {
    match count {
        1 => format!("1 {unit} ago"),
        count => format!("{count} {unit}s ago"),
    }
}
