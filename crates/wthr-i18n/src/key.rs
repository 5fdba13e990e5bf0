//! Identifiers for every UI display string.

use chrono::Weekday;

macro_rules! localization_keys {
    ($($variant:ident => $name:literal,)+) => {
        /// UI string identifier. The `snake_case` name is the key used in
        /// the locale files.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum LocalizationKey {
            $($variant,)+
        }

        impl LocalizationKey {
            /// Every key, in declaration order.
            pub const ALL: &'static [LocalizationKey] = &[$(LocalizationKey::$variant,)+];

            /// Key name as written in the locale files.
            pub fn as_str(self) -> &'static str {
                match self {
                    $(LocalizationKey::$variant => $name,)+
                }
            }
        }
    };
}

localization_keys! {
    EnterCity => "enter_city",
    Show => "show",
    Loading => "loading",
    Temperature => "temperature",
    MinTemp => "min_temp",
    MaxTemp => "max_temp",
    FeelsLike => "feels_like",
    Description => "description",
    Humidity => "humidity",
    Wind => "wind",
    Pressure => "pressure",
    Visibility => "visibility",
    Sunrise => "sunrise",
    Sunset => "sunset",
    LastUpdated => "last_updated",
    Forecast => "forecast",
    Today => "today",
    Tomorrow => "tomorrow",
    Close => "close",
    SelectLanguage => "select_language",
    Monday => "monday",
    Tuesday => "tuesday",
    Wednesday => "wednesday",
    Thursday => "thursday",
    Friday => "friday",
    Saturday => "saturday",
    Sunday => "sunday",
    CurrentTime => "current_time",
    JsonData => "json_data",
    MoonPhase => "moon_phase",
    NewMoon => "new_moon",
    WaxingCrescent => "waxing_crescent",
    FirstQuarter => "first_quarter",
    WaxingGibbous => "waxing_gibbous",
    FullMoon => "full_moon",
    WaningGibbous => "waning_gibbous",
    LastQuarter => "last_quarter",
    WaningCrescent => "waning_crescent",
    Moon => "moon",
    MoonIllumination => "moon_illumination",
    MoonRise => "moon_rise",
    MoonSet => "moon_set",
    Settings => "settings",
    Language => "language",
    Units => "units",
    UseMetric => "use_metric",
    Notifications => "notifications",
    EnableNotifications => "enable_notifications",
    UpdateSettings => "update_settings",
    UpdateInterval => "update_interval",
    Minutes => "minutes",
    About => "about",
    Version => "version",
    Done => "done",
    Theme => "theme",
    ThemeAuto => "theme_auto",
    ThemeLight => "theme_light",
    ThemeDark => "theme_dark",
    ThemeSystem => "theme_system",
    SelectTheme => "select_theme",
    DataDisplay => "data_display",
    ShowMoonDetails => "show_moon_details",
    ShowWindDetails => "show_wind_details",
    ShowPressureDetails => "show_pressure_details",
    Animations => "animations",
    EnableAnimations => "enable_animations",
    AnimationSpeed => "animation_speed",
    AnimationSpeedFast => "animation_speed_fast",
    AnimationSpeedNormal => "animation_speed_normal",
    AnimationSpeedSlow => "animation_speed_slow",
    Privacy => "privacy",
    CollectUsageData => "collect_usage_data",
    LocationAccess => "location_access",
    ShowTemperature => "show_temperature",
    ShowHumidity => "show_humidity",
    ShowWind => "show_wind",
    Metric => "metric",
    Imperial => "imperial",
    ShowSunriseSunset => "show_sunrise_sunset",
    ShowVisibility => "show_visibility",
    ShowFeelsLike => "show_feels_like",
    Favorites => "favorites",
    NoFavorites => "no_favorites",
    AddToFavorites => "add_to_favorites",
    RemoveFromFavorites => "remove_from_favorites",
    Delete => "delete",
}

impl LocalizationKey {
    /// Look up a key by its locale-file name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|k| k.as_str() == name)
    }

    /// Key for a weekday name, used by forecast rows.
    pub fn weekday(day: Weekday) -> Self {
        match day {
            Weekday::Mon => Self::Monday,
            Weekday::Tue => Self::Tuesday,
            Weekday::Wed => Self::Wednesday,
            Weekday::Thu => Self::Thursday,
            Weekday::Fri => Self::Friday,
            Weekday::Sat => Self::Saturday,
            Weekday::Sun => Self::Sunday,
        }
    }
}

impl std::fmt::Display for LocalizationKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_names_are_unique() {
        let names: HashSet<&str> = LocalizationKey::ALL.iter().map(|k| k.as_str()).collect();
        assert_eq!(names.len(), LocalizationKey::ALL.len());
    }

    #[test]
    fn test_from_name() {
        assert_eq!(LocalizationKey::from_name("no_favorites"), Some(LocalizationKey::NoFavorites));
        assert_eq!(LocalizationKey::from_name("noFavorites"), None);
    }

    #[test]
    fn test_weekday_mapping() {
        assert_eq!(LocalizationKey::weekday(Weekday::Mon), LocalizationKey::Monday);
        assert_eq!(LocalizationKey::weekday(Weekday::Sun), LocalizationKey::Sunday);
    }
}
