use anyhow::Result;
use chrono::{DateTime, Utc};
use parking_lot::{Mutex, RwLock};
use std::path::Path;
use std::sync::Arc;

use wthr_i18n::LocalizationTable;
use wthr_prefs::{
    DayPeriod, FavoriteLocation, FavoritesRegistry, Localizer, MemoryPreferenceBackend,
    PreferenceBackend, PreferenceStore, Settings, SettingsBus, SqlitePreferenceBackend,
    SubscriptionHandle, Topic,
};
use wthr_weather::{
    DailySummary, FetchTracker, Forecast, LocationQuery, Units, WeatherClient, WeatherSnapshot,
};

use crate::{AppError, Config};

/// Main application state and lifecycle manager.
///
/// Owns the single instance of every service; views receive `Arc` handles
/// from the accessors instead of reaching for globals.
pub struct App {
    config: Arc<Config>,
    bus: Arc<SettingsBus>,
    store: Arc<PreferenceStore>,
    favorites: Arc<FavoritesRegistry>,
    localizer: Localizer,
    weather: Arc<RwLock<WeatherClient>>,
    tracker: FetchTracker,
    snapshot: Mutex<WeatherSnapshot>,
    subscriptions: Vec<SubscriptionHandle>,
}

impl App {
    /// Create the application with preferences stored at
    /// [`Config::preferences_path`].
    ///
    /// An unopenable preference database is logged and replaced by an
    /// in-memory one for this session.
    pub fn new(config: Config) -> Result<Self> {
        let path = config.preferences_path();
        let backend: Box<dyn PreferenceBackend> = match open_backend(&path) {
            Ok(backend) => {
                tracing::info!("Preferences at {}", path.display());
                Box::new(backend)
            }
            Err(e) => {
                tracing::error!(
                    "Failed to open preferences at {}: {}; changes will not be saved",
                    path.display(),
                    e
                );
                Box::new(MemoryPreferenceBackend::new())
            }
        };
        Self::with_backend(config, backend)
    }

    /// Application whose preferences live only as long as the process.
    pub fn in_memory(config: Config) -> Result<Self> {
        Self::with_backend(config, Box::new(MemoryPreferenceBackend::new()))
    }

    pub fn with_backend(config: Config, backend: Box<dyn PreferenceBackend>) -> Result<Self> {
        let bus = Arc::new(SettingsBus::new());
        let store = Arc::new(PreferenceStore::open(backend, Arc::clone(&bus)));
        let favorites = Arc::new(FavoritesRegistry::new(Arc::clone(&store)));
        let localizer = Localizer::new(LocalizationTable::bundled(), Arc::clone(&store));

        let units = Units::from(store.unit_system());
        let mut client = WeatherClient::new(&config.weather.api_key, units)
            .with_base_url(&config.weather.base_url);
        if let Some(timeout) = config.weather.request_timeout() {
            client = client.with_timeout(timeout)?;
        }

        let mut app = Self {
            config: Arc::new(config),
            bus,
            store,
            favorites,
            localizer,
            weather: Arc::new(RwLock::new(client)),
            tracker: FetchTracker::new(),
            snapshot: Mutex::new(WeatherSnapshot::default()),
            subscriptions: Vec::new(),
        };
        app.initialize();
        Ok(app)
    }

    /// Keep the weather client's unit system in step with the preference.
    fn initialize(&mut self) {
        // `Settings::save` only announces a generic change, so both topics
        // re-read the stored flag.
        for topic in [Topic::UnitsChanged, Topic::SettingsChanged] {
            let weather = Arc::clone(&self.weather);
            let store = Arc::clone(&self.store);
            let handle = self.bus.subscribe(topic, move |_| {
                let units = Units::from(store.unit_system());
                let mut client = weather.write();
                if client.units() != units {
                    tracing::info!("Weather units now {}", units.as_param());
                    client.set_units(units);
                }
            });
            self.subscriptions.push(handle);
        }

        tracing::info!(
            "Application initialized ({} favorites, language {})",
            self.favorites.len(),
            self.localizer.language()
        );
    }

    /// Shutdown the application, detaching internal subscribers
    pub fn shutdown(&mut self) -> Result<()> {
        tracing::info!("Shutting down application");
        self.detach();
        Ok(())
    }

    fn detach(&mut self) {
        for handle in self.subscriptions.drain(..) {
            self.bus.unsubscribe(handle);
        }
    }

    /// Get reference to application config
    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn bus(&self) -> &Arc<SettingsBus> {
        &self.bus
    }

    pub fn preferences(&self) -> &Arc<PreferenceStore> {
        &self.store
    }

    pub fn favorites(&self) -> &Arc<FavoritesRegistry> {
        &self.favorites
    }

    pub fn localizer(&self) -> &Localizer {
        &self.localizer
    }

    /// Current settings, resolved against their defaults.
    pub fn settings(&self) -> Settings {
        Settings::load(&self.store)
    }

    /// Units the next weather request will use.
    pub fn units(&self) -> Units {
        self.weather.read().units()
    }

    /// Query for the configured default city.
    pub fn default_query(&self) -> LocationQuery {
        LocationQuery::city(self.config.weather.default_city.clone())
    }

    /// Favorites are fetched by coordinates; their names may be user-edited.
    pub fn query_for_favorite(&self, favorite: &FavoriteLocation) -> LocationQuery {
        LocationQuery::coordinates(favorite.latitude, favorite.longitude)
    }

    /// Fetch current conditions and forecast for `query` into the snapshot.
    ///
    /// Returns false if a newer refresh started while this one was in
    /// flight; its result is then dropped.
    pub async fn refresh(&self, query: &LocationQuery) -> bool {
        let ticket = self.tracker.begin();
        let client = self.weather.read().clone();
        let (current, forecast) = client.fetch_all(query).await;

        let mut snapshot = self.snapshot.lock();
        match (current, forecast) {
            (Ok(current), Ok(forecast)) => {
                snapshot.apply_current(&self.tracker, ticket, current)
                    && snapshot.apply_forecast(&self.tracker, ticket, forecast)
            }
            (Err(e), _) | (_, Err(e)) => snapshot.apply_error(&self.tracker, ticket, &e),
        }
    }

    /// Copy of the weather state for rendering.
    pub fn snapshot(&self) -> WeatherSnapshot {
        self.snapshot.lock().clone()
    }

    /// Heading for a forecast day: today, tomorrow or the weekday, in the
    /// selected language. `now` is taken in the forecast city's local time.
    pub fn day_label(&self, forecast: &Forecast, day: &DailySummary, now: DateTime<Utc>) -> &str {
        self.localizer.text(day.label_key(forecast.local_date(now)))
    }

    /// Whether to render dark at `now`, using the displayed city's local time.
    pub fn is_dark(&self, now: DateTime<Utc>, system_prefers_dark: bool) -> bool {
        let offset = self
            .snapshot
            .lock()
            .current
            .as_ref()
            .map_or(0, |c| c.utc_offset_seconds);
        self.store
            .theme()
            .is_dark(DayPeriod::at(now, offset), system_prefers_dark)
    }
}

impl Drop for App {
    fn drop(&mut self) {
        // Subscribers hold the store, which holds the bus.
        self.detach();
    }
}

fn open_backend(path: &Path) -> Result<SqlitePreferenceBackend, AppError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    Ok(SqlitePreferenceBackend::open(path)?)
}
