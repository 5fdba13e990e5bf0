//! Time-of-day theme resolution.

use chrono::{DateTime, FixedOffset, Offset, Timelike, Utc};

use crate::settings::Theme;

/// Part of the day at the displayed location. Drives the `Auto` theme and
/// the background palette chosen by the rendering layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DayPeriod {
    Dawn,
    Morning,
    Noon,
    Evening,
    Sunset,
    Night,
}

impl DayPeriod {
    /// Period for an hour of the day (0-23).
    pub fn from_hour(hour: u32) -> Self {
        match hour {
            5..=6 => DayPeriod::Dawn,
            7..=10 => DayPeriod::Morning,
            11..=14 => DayPeriod::Noon,
            15..=18 => DayPeriod::Evening,
            19..=20 => DayPeriod::Sunset,
            _ => DayPeriod::Night,
        }
    }

    /// Period at `now` for a location `utc_offset_seconds` east of UTC.
    /// An out-of-range offset is treated as UTC.
    pub fn at(now: DateTime<Utc>, utc_offset_seconds: i32) -> Self {
        let offset = FixedOffset::east_opt(utc_offset_seconds).unwrap_or_else(|| {
            tracing::debug!("Invalid UTC offset {}, using UTC", utc_offset_seconds);
            Utc.fix()
        });
        Self::from_hour(now.with_timezone(&offset).hour())
    }

    pub fn is_dark(self) -> bool {
        matches!(self, DayPeriod::Sunset | DayPeriod::Night)
    }
}

impl Theme {
    /// Whether to render dark. `system_prefers_dark` is only consulted for
    /// [`Theme::System`].
    pub fn is_dark(self, period: DayPeriod, system_prefers_dark: bool) -> bool {
        match self {
            Theme::Light => false,
            Theme::Dark => true,
            Theme::System => system_prefers_dark,
            Theme::Auto => period.is_dark(),
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_period_boundaries() {
        assert_eq!(DayPeriod::from_hour(4), DayPeriod::Night);
        assert_eq!(DayPeriod::from_hour(5), DayPeriod::Dawn);
        assert_eq!(DayPeriod::from_hour(7), DayPeriod::Morning);
        assert_eq!(DayPeriod::from_hour(11), DayPeriod::Noon);
        assert_eq!(DayPeriod::from_hour(15), DayPeriod::Evening);
        assert_eq!(DayPeriod::from_hour(19), DayPeriod::Sunset);
        assert_eq!(DayPeriod::from_hour(21), DayPeriod::Night);
        assert_eq!(DayPeriod::from_hour(0), DayPeriod::Night);
    }

    #[test]
    fn test_period_uses_city_offset() {
        let noon_utc = Utc.with_ymd_and_hms(2025, 4, 11, 12, 0, 0).unwrap();
        assert_eq!(DayPeriod::at(noon_utc, 0), DayPeriod::Noon);
        // Tokyo, UTC+9: 21:00 local.
        assert_eq!(DayPeriod::at(noon_utc, 9 * 3600), DayPeriod::Night);
        // New York, UTC-4: 08:00 local.
        assert_eq!(DayPeriod::at(noon_utc, -4 * 3600), DayPeriod::Morning);
    }

    #[test]
    fn test_invalid_offset_is_utc() {
        let noon_utc = Utc.with_ymd_and_hms(2025, 4, 11, 12, 0, 0).unwrap();
        assert_eq!(DayPeriod::at(noon_utc, 200_000), DayPeriod::Noon);
    }

    #[test]
    fn test_theme_is_dark() {
        assert!(!Theme::Light.is_dark(DayPeriod::Night, true));
        assert!(Theme::Dark.is_dark(DayPeriod::Noon, false));
        assert!(Theme::System.is_dark(DayPeriod::Noon, true));
        assert!(!Theme::System.is_dark(DayPeriod::Night, false));
        assert!(Theme::Auto.is_dark(DayPeriod::Sunset, false));
        assert!(!Theme::Auto.is_dark(DayPeriod::Evening, true));
    }
}
