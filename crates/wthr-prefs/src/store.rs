//! Process-wide preference store.
//!
//! Values are read from an in-memory snapshot loaded once at construction;
//! every write goes to the backend synchronously and is then announced on
//! the [`SettingsBus`]. Storage failures are logged, never returned.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::{Mutex, RwLock};
use wthr_i18n::Language;

use crate::backend::{MemoryPreferenceBackend, PreferenceBackend};
use crate::bus::{SettingsBus, SettingsEvent};
use crate::keys;
use crate::settings::{Theme, UnitSystem};
use crate::value::{PrefScalar, PrefValue};

pub struct PreferenceStore {
    backend: Mutex<Box<dyn PreferenceBackend>>,
    values: RwLock<HashMap<String, PrefValue>>,
    bus: Arc<SettingsBus>,
}

impl PreferenceStore {
    /// Load every entry from `backend`. A backend that fails to load
    /// leaves the store empty (all reads return defaults).
    pub fn open(backend: Box<dyn PreferenceBackend>, bus: Arc<SettingsBus>) -> Self {
        let values = match backend.load_all() {
            Ok(entries) => {
                tracing::debug!("Loaded {} preferences", entries.len());
                entries.into_iter().collect()
            }
            Err(e) => {
                tracing::warn!("Failed to load preferences, using defaults: {}", e);
                HashMap::new()
            }
        };

        Self {
            backend: Mutex::new(backend),
            values: RwLock::new(values),
            bus,
        }
    }

    /// Store with nothing persisted beyond the process lifetime.
    pub fn in_memory(bus: Arc<SettingsBus>) -> Self {
        Self::open(Box::new(MemoryPreferenceBackend::new()), bus)
    }

    /// Bus this store announces changes on.
    pub fn bus(&self) -> &Arc<SettingsBus> {
        &self.bus
    }

    /// Stored value for `key`, or `default` when the key is absent or holds
    /// a value of another type.
    pub fn get<T: PrefScalar>(&self, key: &str, default: T) -> T {
        match self.values.read().get(key) {
            Some(value) => T::from_pref(value).unwrap_or_else(|| {
                tracing::debug!("Preference '{}' has unexpected type {:?}", key, value);
                default
            }),
            None => default,
        }
    }

    pub fn get_bool(&self, key: &str, default: bool) -> bool {
        self.get(key, default)
    }

    pub fn get_int(&self, key: &str, default: i64) -> i64 {
        self.get(key, default)
    }

    pub fn get_value(&self, key: &str) -> Option<PrefValue> {
        self.values.read().get(key).cloned()
    }

    pub fn get_text(&self, key: &str) -> Option<String> {
        self.values
            .read()
            .get(key)
            .and_then(|v| v.as_text().map(str::to_string))
    }

    pub fn contains(&self, key: &str) -> bool {
        self.values.read().contains_key(key)
    }

    /// Active UI language.
    pub fn language(&self) -> Language {
        self.get_text(keys::LANGUAGE)
            .and_then(|code| Language::from_code(&code))
            .unwrap_or(keys::DEFAULT_LANGUAGE)
    }

    pub fn theme(&self) -> Theme {
        self.get_text(keys::THEME)
            .and_then(|id| Theme::from_id(&id))
            .unwrap_or_default()
    }

    pub fn use_metric_units(&self) -> bool {
        self.get_bool(keys::USE_METRIC_UNITS, keys::DEFAULT_USE_METRIC_UNITS)
    }

    pub fn unit_system(&self) -> UnitSystem {
        UnitSystem::from_metric_flag(self.use_metric_units())
    }

    /// Write `value` under `key` and announce it.
    ///
    /// Theme, units and language keys publish their dedicated topic; every
    /// other key publishes a generic settings change.
    pub fn set(&self, key: &str, value: impl Into<PrefValue>) {
        let value = value.into();
        self.write_through(key, &value);
        self.bus.publish(event_for(key, &value));
    }

    /// Write several entries, then publish one generic settings change.
    ///
    /// Entries are written independently: a failure part-way leaves the
    /// earlier ones in place.
    pub fn set_many<I, K>(&self, entries: I)
    where
        I: IntoIterator<Item = (K, PrefValue)>,
        K: AsRef<str>,
    {
        let mut written = 0usize;
        for (key, value) in entries {
            self.write_through(key.as_ref(), &value);
            written += 1;
        }
        tracing::debug!("Saved {} preferences", written);
        self.bus.publish(SettingsEvent::SettingsChanged { key: None });
    }

    /// Delete `key`; later reads return the caller's default.
    pub fn remove(&self, key: &str) {
        if self.values.write().remove(key).is_none() {
            return;
        }
        if let Err(e) = self.backend.lock().delete(key) {
            tracing::warn!("Failed to delete preference '{}': {}", key, e);
        }
        self.bus.publish(SettingsEvent::SettingsChanged {
            key: Some(key.to_string()),
        });
    }

    fn write_through(&self, key: &str, value: &PrefValue) {
        self.values.write().insert(key.to_string(), value.clone());
        if let Err(e) = self.backend.lock().write(key, value) {
            tracing::warn!("Failed to persist preference '{}': {}", key, e);
        }
    }
}

impl std::fmt::Debug for PreferenceStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PreferenceStore")
            .field("values", &self.values.read().len())
            .finish()
    }
}

fn event_for(key: &str, value: &PrefValue) -> SettingsEvent {
    let dedicated = match key {
        keys::THEME => value
            .as_text()
            .and_then(Theme::from_id)
            .map(SettingsEvent::ThemeChanged),
        keys::USE_METRIC_UNITS => value
            .as_bool()
            .map(|use_metric| SettingsEvent::UnitsChanged { use_metric }),
        keys::LANGUAGE => value
            .as_text()
            .and_then(Language::from_code)
            .map(SettingsEvent::LanguageChanged),
        _ => None,
    };
    dedicated.unwrap_or_else(|| SettingsEvent::SettingsChanged {
        key: Some(key.to_string()),
    })
}
