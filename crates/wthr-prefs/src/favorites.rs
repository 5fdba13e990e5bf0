//! Saved locations.
//!
//! The registry owns the ordered list of favorites and persists it as a
//! single JSON blob under [`keys::FAVORITES`] through the preference store.
//! Names are unique (exact, case-sensitive match).

use std::sync::Arc;

use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::bus::SettingsEvent;
use crate::keys;
use crate::store::PreferenceStore;

/// A user-saved location. Never mutated after creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FavoriteLocation {
    pub id: Uuid,
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub created_at: DateTime<Utc>,
}

impl FavoriteLocation {
    fn new(name: impl Into<String>, latitude: f64, longitude: f64) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            latitude,
            longitude,
            created_at: Utc::now(),
        }
    }
}

pub struct FavoritesRegistry {
    store: Arc<PreferenceStore>,
    favorites: RwLock<Vec<FavoriteLocation>>,
}

impl FavoritesRegistry {
    /// Load the persisted list. Missing or unreadable data starts empty.
    pub fn new(store: Arc<PreferenceStore>) -> Self {
        let favorites = load_favorites(&store);
        tracing::debug!("Loaded {} favorites", favorites.len());
        Self {
            store,
            favorites: RwLock::new(favorites),
        }
    }

    /// Append a favorite unless one named `name` already exists.
    ///
    /// Returns false (and changes nothing) for a duplicate name or a
    /// non-finite coordinate.
    pub fn add(&self, name: &str, latitude: f64, longitude: f64) -> bool {
        if !latitude.is_finite() || !longitude.is_finite() {
            tracing::warn!(
                "Rejecting favorite '{}' with invalid coordinates ({}, {})",
                name,
                latitude,
                longitude
            );
            return false;
        }
        let count = {
            let mut favorites = self.favorites.write();
            if favorites.iter().any(|f| f.name == name) {
                tracing::debug!("'{}' is already a favorite", name);
                return false;
            }
            favorites.push(FavoriteLocation::new(name, latitude, longitude));
            favorites.len()
        };
        tracing::info!("Added favorite '{}'", name);
        self.commit(count);
        true
    }

    /// Remove `location` by identifier.
    pub fn remove(&self, location: &FavoriteLocation) -> bool {
        self.remove_by_id(location.id)
    }

    pub fn remove_by_id(&self, id: Uuid) -> bool {
        let count = {
            let mut favorites = self.favorites.write();
            let before = favorites.len();
            favorites.retain(|f| f.id != id);
            if favorites.len() == before {
                tracing::debug!("No favorite with id {}", id);
                return false;
            }
            favorites.len()
        };
        tracing::info!("Removed favorite {}", id);
        self.commit(count);
        true
    }

    /// Remove the favorite named `name` if present, otherwise add it.
    /// Returns whether `name` is a favorite afterwards.
    pub fn toggle(&self, name: &str, latitude: f64, longitude: f64) -> bool {
        let existing = self
            .favorites
            .read()
            .iter()
            .find(|f| f.name == name)
            .map(|f| f.id);
        match existing {
            Some(id) => {
                self.remove_by_id(id);
                false
            }
            None => self.add(name, latitude, longitude),
        }
    }

    pub fn is_favorite(&self, name: &str) -> bool {
        self.favorites.read().iter().any(|f| f.name == name)
    }

    /// Snapshot of the favorites in insertion order.
    pub fn list(&self) -> Vec<FavoriteLocation> {
        self.favorites.read().clone()
    }

    pub fn get(&self, id: Uuid) -> Option<FavoriteLocation> {
        self.favorites.read().iter().find(|f| f.id == id).cloned()
    }

    pub fn len(&self) -> usize {
        self.favorites.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.favorites.read().is_empty()
    }

    /// Persist the current list and announce the new count.
    fn commit(&self, count: usize) {
        let encoded = serde_json::to_string(&*self.favorites.read());
        match encoded {
            Ok(json) => self.store.set(keys::FAVORITES, json),
            Err(e) => tracing::warn!("Failed to encode favorites: {}", e),
        }
        self.store
            .bus()
            .publish(SettingsEvent::FavoritesChanged { count });
    }
}

impl std::fmt::Debug for FavoritesRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FavoritesRegistry")
            .field("favorites", &self.len())
            .finish()
    }
}

fn load_favorites(store: &PreferenceStore) -> Vec<FavoriteLocation> {
    let Some(json) = store.get_text(keys::FAVORITES) else {
        if store.contains(keys::FAVORITES) {
            tracing::warn!("Favorites entry is not text, starting empty");
        }
        return Vec::new();
    };
    let entries: Vec<serde_json::Value> = match serde_json::from_str(&json) {
        Ok(entries) => entries,
        Err(e) => {
            tracing::warn!("Failed to decode favorites, starting empty: {}", e);
            return Vec::new();
        }
    };
    entries
        .into_iter()
        .filter_map(|entry| match serde_json::from_value::<FavoriteLocation>(entry) {
            Ok(favorite) => Some(favorite),
            Err(e) => {
                tracing::warn!("Skipping unreadable favorite: {}", e);
                None
            }
        })
        .collect()
}
