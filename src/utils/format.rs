//! Format - Formatting Utilities

use chrono::{DateTime, Utc};

/// Format a UTC datetime for display.
///
/// Canonical forms feed search matching and CSV export, so this stays in UTC
/// rather than converting to the local timezone.
pub fn format_datetime(dt: &DateTime<Utc>) -> String {
    dt.format("%Y-%m-%d %H:%M:%S").to_string()
}
