//! Timestamp formatting.

use chrono::{DateTime, SecondsFormat};

/// Formats epoch milliseconds as ISO-8601 UTC with millisecond precision.
///
/// Out-of-range values clamp to the Unix epoch.
///
/// # Examples
///
/// ```
/// use logseq_export::infra::iso_timestamp;
///
/// assert_eq!(iso_timestamp(0), "1970-01-01T00:00:00.000Z");
/// ```
pub fn iso_timestamp(millis: i64) -> String {
    DateTime::from_timestamp_millis(millis)
        .unwrap_or_default()
        .to_rfc3339_opts(SecondsFormat::Millis, true)
}
