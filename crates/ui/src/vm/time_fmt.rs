use chrono::{DateTime, Utc};

/// `m:ss` below an hour, `h:mm:ss` above.
#[must_use]
pub fn format_countdown(seconds: u32) -> String {
    let hours = seconds / 3600;
    let minutes = (seconds % 3600) / 60;
    let remainder = seconds % 60;
    if hours > 0 {
        format!("{hours}:{minutes:02}:{remainder:02}")
    } else {
        format!("{minutes}:{remainder:02}")
    }
}

#[must_use]
pub fn format_started(value: DateTime<Utc>) -> String {
    value.format("Started %Y-%m-%d %H:%M UTC").to_string()
}
