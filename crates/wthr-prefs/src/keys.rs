//! Persisted preference keys and their defaults.
//!
//! Key names are stable: they are what is written to the preference
//! database.

pub const LANGUAGE: &str = "selectedLanguage";
pub const THEME: &str = "selectedTheme";
pub const USE_METRIC_UNITS: &str = "useMetricUnits";
pub const ENABLE_ANIMATIONS: &str = "enableAnimations";
pub const ANIMATION_SPEED: &str = "animationSpeed";
pub const ENABLE_NOTIFICATIONS: &str = "enableNotifications";
pub const LOCATION_ENABLED: &str = "locationEnabled";
pub const DEVICE_DATA_ENABLED: &str = "deviceDataEnabled";
pub const UPDATE_INTERVAL_MINUTES: &str = "updateIntervalMinutes";

pub const SHOW_TEMPERATURE: &str = "showTemperature";
pub const SHOW_HUMIDITY: &str = "showHumidity";
pub const SHOW_WIND: &str = "showWind";
pub const SHOW_FEELS_LIKE: &str = "showFeelsLike";
pub const SHOW_SUNRISE_SUNSET: &str = "showSunriseSunset";
pub const SHOW_VISIBILITY: &str = "showVisibility";
pub const SHOW_PRESSURE_DETAILS: &str = "showPressureDetails";
pub const SHOW_WIND_DETAILS: &str = "showWindDetails";
pub const SHOW_MOON_DETAILS: &str = "showMoonDetails";

/// Serialized favorites list (JSON array).
pub const FAVORITES: &str = "favorites";

pub const DEFAULT_LANGUAGE: wthr_i18n::Language = wthr_i18n::Language::Serbian;
pub const DEFAULT_USE_METRIC_UNITS: bool = true;
pub const DEFAULT_ENABLE_ANIMATIONS: bool = true;
pub const DEFAULT_ENABLE_NOTIFICATIONS: bool = false;
pub const DEFAULT_LOCATION_ENABLED: bool = true;
pub const DEFAULT_DEVICE_DATA_ENABLED: bool = true;
pub const DEFAULT_UPDATE_INTERVAL_MINUTES: u32 = 15;
/// Every per-field display toggle starts enabled.
pub const DEFAULT_SHOW_FIELD: bool = true;
