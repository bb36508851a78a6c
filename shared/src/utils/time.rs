//! Time-related utilities

use chrono::{DateTime, Local};

/// Timestamp layout used by log line prefixes, e.g. `2024-05-01 13:04:05.123`
pub const LOG_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.3f";

/// Format a local time as a log line timestamp
pub fn format_log_timestamp(time: &DateTime<Local>) -> String {
    time.format(LOG_TIMESTAMP_FORMAT).to_string()
}

/// Current local time formatted as a log line timestamp
pub fn log_timestamp() -> String {
    format_log_timestamp(&Local::now())
}
