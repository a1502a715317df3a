//! Time formatting helpers.
//!
//! The wire protocol and the persisted delivery timestamp both use the
//! `yyyy-MM-dd HH:mm:ss` local-time format. Formatting goes through
//! [`chrono`] so the output is locale-independent (no comma decimal
//! separators, no localized month names).

use chrono::{DateTime, Local};

/// The wall-clock format used on the wire and in the state store.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Format a local timestamp as `yyyy-MM-dd HH:mm:ss`.
pub fn format_local(timestamp: DateTime<Local>) -> String {
    timestamp.format(TIMESTAMP_FORMAT).to_string()
}

/// Format the current wall-clock time as `yyyy-MM-dd HH:mm:ss`.
pub fn now_formatted() -> String {
    format_local(Local::now())
}
