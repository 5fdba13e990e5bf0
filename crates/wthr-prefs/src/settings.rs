//! Typed view over the scalar preferences.

use serde::{Deserialize, Serialize};
use wthr_i18n::{Language, LocalizationKey};

use crate::keys;
use crate::store::PreferenceStore;
use crate::value::PrefValue;

/// Theme preference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    /// Follow the time of day at the displayed location.
    #[default]
    Auto,
    Light,
    Dark,
    /// Follow the operating system appearance.
    System,
}

impl Theme {
    pub const ALL: [Theme; 4] = [Theme::Auto, Theme::Light, Theme::Dark, Theme::System];

    /// Persisted identifier.
    pub fn id(self) -> &'static str {
        match self {
            Theme::Auto => "auto",
            Theme::Light => "light",
            Theme::Dark => "dark",
            Theme::System => "system",
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.id() == id)
    }

    pub fn label_key(self) -> LocalizationKey {
        match self {
            Theme::Auto => LocalizationKey::ThemeAuto,
            Theme::Light => LocalizationKey::ThemeLight,
            Theme::Dark => LocalizationKey::ThemeDark,
            Theme::System => LocalizationKey::ThemeSystem,
        }
    }
}

/// Animation speed preference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum AnimationSpeed {
    Slow,
    #[default]
    Normal,
    Fast,
}

impl AnimationSpeed {
    pub const ALL: [AnimationSpeed; 3] =
        [AnimationSpeed::Slow, AnimationSpeed::Normal, AnimationSpeed::Fast];

    pub fn id(self) -> &'static str {
        match self {
            AnimationSpeed::Slow => "slow",
            AnimationSpeed::Normal => "normal",
            AnimationSpeed::Fast => "fast",
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.id() == id)
    }

    /// Factor applied to base animation durations.
    pub fn duration_multiplier(self) -> f64 {
        match self {
            AnimationSpeed::Slow => 1.5,
            AnimationSpeed::Normal => 1.0,
            AnimationSpeed::Fast => 0.5,
        }
    }

    pub fn label_key(self) -> LocalizationKey {
        match self {
            AnimationSpeed::Slow => LocalizationKey::AnimationSpeedSlow,
            AnimationSpeed::Normal => LocalizationKey::AnimationSpeedNormal,
            AnimationSpeed::Fast => LocalizationKey::AnimationSpeedFast,
        }
    }
}

/// Measurement system, persisted as the `useMetricUnits` flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum UnitSystem {
    #[default]
    Metric,
    Imperial,
}

impl UnitSystem {
    pub fn from_metric_flag(use_metric: bool) -> Self {
        if use_metric {
            UnitSystem::Metric
        } else {
            UnitSystem::Imperial
        }
    }

    pub fn is_metric(self) -> bool {
        self == UnitSystem::Metric
    }

    pub fn temperature_suffix(self) -> &'static str {
        match self {
            UnitSystem::Metric => "°C",
            UnitSystem::Imperial => "°F",
        }
    }
}

/// Which weather fields the main screen shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayToggles {
    pub temperature: bool,
    pub humidity: bool,
    pub wind: bool,
    pub feels_like: bool,
    pub sunrise_sunset: bool,
    pub visibility: bool,
    pub pressure_details: bool,
    pub wind_details: bool,
    pub moon_details: bool,
}

impl DisplayToggles {
    fn entries(&self) -> [(&'static str, bool); 9] {
        [
            (keys::SHOW_TEMPERATURE, self.temperature),
            (keys::SHOW_HUMIDITY, self.humidity),
            (keys::SHOW_WIND, self.wind),
            (keys::SHOW_FEELS_LIKE, self.feels_like),
            (keys::SHOW_SUNRISE_SUNSET, self.sunrise_sunset),
            (keys::SHOW_VISIBILITY, self.visibility),
            (keys::SHOW_PRESSURE_DETAILS, self.pressure_details),
            (keys::SHOW_WIND_DETAILS, self.wind_details),
            (keys::SHOW_MOON_DETAILS, self.moon_details),
        ]
    }

    fn load(store: &PreferenceStore) -> Self {
        let show = |key: &str| store.get(key, keys::DEFAULT_SHOW_FIELD);
        Self {
            temperature: show(keys::SHOW_TEMPERATURE),
            humidity: show(keys::SHOW_HUMIDITY),
            wind: show(keys::SHOW_WIND),
            feels_like: show(keys::SHOW_FEELS_LIKE),
            sunrise_sunset: show(keys::SHOW_SUNRISE_SUNSET),
            visibility: show(keys::SHOW_VISIBILITY),
            pressure_details: show(keys::SHOW_PRESSURE_DETAILS),
            wind_details: show(keys::SHOW_WIND_DETAILS),
            moon_details: show(keys::SHOW_MOON_DETAILS),
        }
    }
}

impl Default for DisplayToggles {
    fn default() -> Self {
        Self {
            temperature: keys::DEFAULT_SHOW_FIELD,
            humidity: keys::DEFAULT_SHOW_FIELD,
            wind: keys::DEFAULT_SHOW_FIELD,
            feels_like: keys::DEFAULT_SHOW_FIELD,
            sunrise_sunset: keys::DEFAULT_SHOW_FIELD,
            visibility: keys::DEFAULT_SHOW_FIELD,
            pressure_details: keys::DEFAULT_SHOW_FIELD,
            wind_details: keys::DEFAULT_SHOW_FIELD,
            moon_details: keys::DEFAULT_SHOW_FIELD,
        }
    }
}

/// Snapshot of every scalar setting, each resolved to its default when
/// absent or stored with the wrong type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    pub language: Language,
    pub theme: Theme,
    pub use_metric_units: bool,
    pub animations_enabled: bool,
    pub animation_speed: AnimationSpeed,
    pub notifications_enabled: bool,
    pub location_enabled: bool,
    pub device_data_enabled: bool,
    pub update_interval_minutes: u32,
    pub display: DisplayToggles,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            language: keys::DEFAULT_LANGUAGE,
            theme: Theme::default(),
            use_metric_units: keys::DEFAULT_USE_METRIC_UNITS,
            animations_enabled: keys::DEFAULT_ENABLE_ANIMATIONS,
            animation_speed: AnimationSpeed::default(),
            notifications_enabled: keys::DEFAULT_ENABLE_NOTIFICATIONS,
            location_enabled: keys::DEFAULT_LOCATION_ENABLED,
            device_data_enabled: keys::DEFAULT_DEVICE_DATA_ENABLED,
            update_interval_minutes: keys::DEFAULT_UPDATE_INTERVAL_MINUTES,
            display: DisplayToggles::default(),
        }
    }
}

impl Settings {
    pub fn unit_system(&self) -> UnitSystem {
        UnitSystem::from_metric_flag(self.use_metric_units)
    }

    /// Read every setting from the store.
    pub fn load(store: &PreferenceStore) -> Self {
        Self {
            language: store.language(),
            theme: store.theme(),
            use_metric_units: store.get(keys::USE_METRIC_UNITS, keys::DEFAULT_USE_METRIC_UNITS),
            animations_enabled: store.get(keys::ENABLE_ANIMATIONS, keys::DEFAULT_ENABLE_ANIMATIONS),
            animation_speed: store
                .get_text(keys::ANIMATION_SPEED)
                .and_then(|id| AnimationSpeed::from_id(&id))
                .unwrap_or_default(),
            notifications_enabled: store
                .get(keys::ENABLE_NOTIFICATIONS, keys::DEFAULT_ENABLE_NOTIFICATIONS),
            location_enabled: store.get(keys::LOCATION_ENABLED, keys::DEFAULT_LOCATION_ENABLED),
            device_data_enabled: store
                .get(keys::DEVICE_DATA_ENABLED, keys::DEFAULT_DEVICE_DATA_ENABLED),
            update_interval_minutes: store
                .get(keys::UPDATE_INTERVAL_MINUTES, keys::DEFAULT_UPDATE_INTERVAL_MINUTES),
            display: DisplayToggles::load(store),
        }
    }

    /// Write every setting back, announcing a single generic change.
    pub fn save(&self, store: &PreferenceStore) {
        let mut entries: Vec<(String, PrefValue)> = vec![
            (keys::LANGUAGE.into(), self.language.code().into()),
            (keys::THEME.into(), self.theme.id().into()),
            (keys::USE_METRIC_UNITS.into(), self.use_metric_units.into()),
            (keys::ENABLE_ANIMATIONS.into(), self.animations_enabled.into()),
            (keys::ANIMATION_SPEED.into(), self.animation_speed.id().into()),
            (keys::ENABLE_NOTIFICATIONS.into(), self.notifications_enabled.into()),
            (keys::LOCATION_ENABLED.into(), self.location_enabled.into()),
            (keys::DEVICE_DATA_ENABLED.into(), self.device_data_enabled.into()),
            (keys::UPDATE_INTERVAL_MINUTES.into(), self.update_interval_minutes.into()),
        ];
        entries.extend(
            self.display
                .entries()
                .into_iter()
                .map(|(k, v)| (k.to_string(), PrefValue::Bool(v))),
        );
        store.set_many(entries);
    }
}
