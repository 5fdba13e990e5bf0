use chrono::{DateTime, Datelike, FixedOffset, NaiveDate, Offset, Utc, Weekday};
use serde::{Deserialize, Serialize};
use wthr_i18n::LocalizationKey;
use wthr_prefs::UnitSystem;

use crate::error::WeatherError;

/// Unit system requested from the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Units {
    #[default]
    Metric,
    Imperial,
}

impl Units {
    /// Value of the `units` query parameter.
    pub fn as_param(self) -> &'static str {
        match self {
            Units::Metric => "metric",
            Units::Imperial => "imperial",
        }
    }

    pub fn from_metric_flag(use_metric: bool) -> Self {
        if use_metric {
            Units::Metric
        } else {
            Units::Imperial
        }
    }
}

impl From<UnitSystem> for Units {
    fn from(system: UnitSystem) -> Self {
        match system {
            UnitSystem::Metric => Units::Metric,
            UnitSystem::Imperial => Units::Imperial,
        }
    }
}

/// What to fetch weather for.
#[derive(Debug, Clone, PartialEq)]
pub enum LocationQuery {
    City(String),
    Coordinates { latitude: f64, longitude: f64 },
}

impl LocationQuery {
    pub fn city(name: impl Into<String>) -> Self {
        LocationQuery::City(name.into())
    }

    pub fn coordinates(latitude: f64, longitude: f64) -> Self {
        LocationQuery::Coordinates { latitude, longitude }
    }

    pub(crate) fn params(&self) -> Vec<(&'static str, String)> {
        match self {
            LocationQuery::City(name) => vec![("q", name.clone())],
            LocationQuery::Coordinates { latitude, longitude } => vec![
                ("lat", latitude.to_string()),
                ("lon", longitude.to_string()),
            ],
        }
    }
}

impl std::fmt::Display for LocationQuery {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LocationQuery::City(name) => write!(f, "{}", name),
            LocationQuery::Coordinates { latitude, longitude } => {
                write!(f, "{:.4},{:.4}", latitude, longitude)
            }
        }
    }
}

/// Weather condition categories mapped from OpenWeather condition ids
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum WeatherCondition {
    #[default]
    Clear,
    PartlyCloudy,
    Cloudy,
    Fog,
    Drizzle,
    Rain,
    HeavyRain,
    Snow,
    Sleet,
    Thunderstorm,
}

impl WeatherCondition {
    /// See: https://openweathermap.org/weather-conditions
    pub fn from_condition_id(id: u16) -> Self {
        match id {
            200..=299 => Self::Thunderstorm,
            300..=399 => Self::Drizzle,
            502..=504 | 522 | 531 => Self::HeavyRain,
            511 => Self::Sleet, // Freezing rain
            500..=599 => Self::Rain,
            611..=616 => Self::Sleet,
            600..=699 => Self::Snow,
            700..=799 => Self::Fog,
            801..=802 => Self::PartlyCloudy,
            803..=804 => Self::Cloudy,
            _ => Self::Clear,
        }
    }

    pub fn icon_name(&self) -> &'static str {
        match self {
            Self::Clear => "sun",
            Self::PartlyCloudy => "cloud_sun",
            Self::Cloudy => "cloud",
            Self::Fog => "cloud_fog",
            Self::Drizzle | Self::Rain | Self::HeavyRain => "cloud_rain",
            Self::Snow | Self::Sleet => "cloud_snow",
            Self::Thunderstorm => "cloud_lightning",
        }
    }
}

/// Current conditions at one location.
///
/// Temperatures and wind speed are in the units the request asked for
/// (Celsius and m/s for metric, Fahrenheit and mph for imperial).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentConditions {
    pub city_name: String,
    pub country: String,
    pub temperature: f64,
    pub temp_min: f64,
    pub temp_max: f64,
    pub feels_like: f64,
    pub humidity: u8,
    /// hPa
    pub pressure: u32,
    pub wind_speed: f64,
    /// Degrees, meteorological
    pub wind_direction: u16,
    /// Meters. OpenWeather omits it for some stations.
    pub visibility: Option<u32>,
    pub description: String,
    pub icon: String,
    pub condition: WeatherCondition,
    pub observed_at: DateTime<Utc>,
    /// Unix seconds
    pub sunrise: i64,
    /// Unix seconds
    pub sunset: i64,
    pub utc_offset_seconds: i32,
    pub latitude: f64,
    pub longitude: f64,
    /// Response body as received, pretty-printed. Empty unless fetched.
    #[serde(skip)]
    pub raw_json: String,
}

/// One 3-hour forecast step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastEntry {
    pub timestamp: DateTime<Utc>,
    pub temperature: f64,
    pub temp_min: f64,
    pub temp_max: f64,
    pub feels_like: f64,
    pub humidity: u8,
    pub pressure: u32,
    pub wind_speed: f64,
    pub wind_direction: u16,
    pub description: String,
    pub icon: String,
    pub condition: WeatherCondition,
    /// Provider's own "YYYY-MM-DD HH:MM:SS" label (UTC).
    pub dt_txt: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Forecast {
    pub city_name: String,
    pub country: String,
    pub utc_offset_seconds: i32,
    pub entries: Vec<ForecastEntry>,
}

/// Forecast entries of one local calendar day, collapsed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailySummary {
    pub date: NaiveDate,
    pub weekday: Weekday,
    pub temp_min: f64,
    pub temp_max: f64,
    /// Description of the day's first entry.
    pub description: String,
    pub icon: String,
}

impl DailySummary {
    /// Heading for this day: today, tomorrow, or the weekday name.
    pub fn label_key(&self, today: NaiveDate) -> LocalizationKey {
        if self.date == today {
            LocalizationKey::Today
        } else if today.succ_opt() == Some(self.date) {
            LocalizationKey::Tomorrow
        } else {
            LocalizationKey::weekday(self.weekday)
        }
    }
}

impl Forecast {
    /// Calendar date at `now` in the city's local time.
    pub fn local_date(&self, now: DateTime<Utc>) -> NaiveDate {
        now.with_timezone(&self.offset()).date_naive()
    }

    /// Group entries by calendar date in the city's local time, in order.
    pub fn daily_summaries(&self) -> Vec<DailySummary> {
        let offset = self.offset();
        let mut days: Vec<DailySummary> = Vec::new();

        for entry in &self.entries {
            let date = entry.timestamp.with_timezone(&offset).date_naive();
            match days.last_mut() {
                Some(day) if day.date == date => {
                    day.temp_min = day.temp_min.min(entry.temp_min);
                    day.temp_max = day.temp_max.max(entry.temp_max);
                }
                _ => days.push(DailySummary {
                    date,
                    weekday: date.weekday(),
                    temp_min: entry.temp_min,
                    temp_max: entry.temp_max,
                    description: entry.description.clone(),
                    icon: entry.icon.clone(),
                }),
            }
        }
        days
    }

    fn offset(&self) -> FixedOffset {
        FixedOffset::east_opt(self.utc_offset_seconds).unwrap_or(Utc.fix())
    }
}

// ---------------------------------------------------------------------------
// OpenWeather wire format
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub(crate) struct ApiCurrentResponse {
    name: String,
    main: ApiMain,
    #[serde(default)]
    weather: Vec<ApiWeather>,
    wind: ApiWind,
    sys: ApiSys,
    visibility: Option<u32>,
    dt: i64,
    timezone: i32,
    coord: ApiCoord,
}

#[derive(Debug, Deserialize)]
struct ApiMain {
    temp: f64,
    feels_like: f64,
    temp_min: f64,
    temp_max: f64,
    pressure: u32,
    humidity: u8,
}

#[derive(Debug, Deserialize)]
struct ApiWeather {
    id: u16,
    description: String,
    icon: String,
}

#[derive(Debug, Deserialize)]
struct ApiWind {
    speed: f64,
    #[serde(default)]
    deg: u16,
}

#[derive(Debug, Deserialize)]
struct ApiSys {
    #[serde(default)]
    country: String,
    sunrise: i64,
    sunset: i64,
}

#[derive(Debug, Deserialize)]
struct ApiCoord {
    lat: f64,
    lon: f64,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ApiForecastResponse {
    list: Vec<ApiForecastItem>,
    city: ApiCity,
}

#[derive(Debug, Deserialize)]
struct ApiForecastItem {
    dt: i64,
    main: ApiMain,
    #[serde(default)]
    weather: Vec<ApiWeather>,
    wind: ApiWind,
    dt_txt: String,
}

#[derive(Debug, Deserialize)]
struct ApiCity {
    name: String,
    #[serde(default)]
    country: String,
    timezone: i32,
}

/// Error body, e.g. `{"cod":"404","message":"city not found"}`.
#[derive(Debug, Deserialize)]
pub(crate) struct ApiErrorBody {
    pub message: String,
}

fn timestamp(secs: i64) -> Result<DateTime<Utc>, WeatherError> {
    DateTime::from_timestamp(secs, 0)
        .ok_or_else(|| WeatherError::Parse(format!("timestamp out of range: {}", secs)))
}

/// Description, icon and condition of the first weather element.
fn summary(weather: &[ApiWeather]) -> (String, String, WeatherCondition) {
    weather
        .first()
        .map(|w| {
            (
                w.description.clone(),
                w.icon.clone(),
                WeatherCondition::from_condition_id(w.id),
            )
        })
        .unwrap_or_default()
}

impl TryFrom<ApiCurrentResponse> for CurrentConditions {
    type Error = WeatherError;

    fn try_from(api: ApiCurrentResponse) -> Result<Self, Self::Error> {
        let (description, icon, condition) = summary(&api.weather);
        Ok(Self {
            city_name: api.name,
            country: api.sys.country,
            temperature: api.main.temp,
            temp_min: api.main.temp_min,
            temp_max: api.main.temp_max,
            feels_like: api.main.feels_like,
            humidity: api.main.humidity,
            pressure: api.main.pressure,
            wind_speed: api.wind.speed,
            wind_direction: api.wind.deg,
            visibility: api.visibility,
            description,
            icon,
            condition,
            observed_at: timestamp(api.dt)?,
            sunrise: api.sys.sunrise,
            sunset: api.sys.sunset,
            utc_offset_seconds: api.timezone,
            latitude: api.coord.lat,
            longitude: api.coord.lon,
            raw_json: String::new(),
        })
    }
}

impl TryFrom<ApiForecastResponse> for Forecast {
    type Error = WeatherError;

    fn try_from(api: ApiForecastResponse) -> Result<Self, Self::Error> {
        let entries = api
            .list
            .into_iter()
            .map(|item| {
                let (description, icon, condition) = summary(&item.weather);
                Ok(ForecastEntry {
                    timestamp: timestamp(item.dt)?,
                    temperature: item.main.temp,
                    temp_min: item.main.temp_min,
                    temp_max: item.main.temp_max,
                    feels_like: item.main.feels_like,
                    humidity: item.main.humidity,
                    pressure: item.main.pressure,
                    wind_speed: item.wind.speed,
                    wind_direction: item.wind.deg,
                    description,
                    icon,
                    condition,
                    dt_txt: item.dt_txt,
                })
            })
            .collect::<Result<Vec<_>, WeatherError>>()?;

        Ok(Self {
            city_name: api.city.name,
            country: api.city.country,
            utc_offset_seconds: api.city.timezone,
            entries,
        })
    }
}
