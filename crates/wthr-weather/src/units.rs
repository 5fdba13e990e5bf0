//! Display conversions for weather values.

use chrono::{DateTime, FixedOffset};

/// Metres per second to kilometres per hour.
pub fn mps_to_kmh(mps: f64) -> f64 {
    mps * 3.6
}

pub fn visibility_km(meters: u32) -> f64 {
    f64::from(meters) / 1000.0
}

/// `HH:MM` wall-clock time of a Unix timestamp at a UTC offset.
///
/// `None` if the timestamp or offset is out of range.
pub fn local_time_string(unix_seconds: i64, utc_offset_seconds: i32) -> Option<String> {
    let offset = FixedOffset::east_opt(utc_offset_seconds)?;
    let time = DateTime::from_timestamp(unix_seconds, 0)?.with_timezone(&offset);
    Some(time.format("%H:%M").to_string())
}
