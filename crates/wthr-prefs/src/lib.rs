//! Preferences, favorites and settings propagation for wthr.
//!
//! - [`PreferenceStore`]: scalar settings, loaded once and flushed on every write
//! - [`FavoritesRegistry`]: de-duplicated saved locations, persisted through the store
//! - [`SettingsBus`]: synchronous publish/subscribe for settings changes
//! - [`Localizer`]: the string table bound to the language preference

pub mod backend;
pub mod bus;
pub mod error;
pub mod favorites;
pub mod keys;
pub mod localizer;
pub mod settings;
pub mod store;
pub mod theme;
pub mod value;

pub use backend::{MemoryPreferenceBackend, PreferenceBackend, SqlitePreferenceBackend};
pub use bus::{DeliveryReport, SettingsBus, SettingsEvent, SubscriptionHandle, Topic};
pub use error::{StorageError, StorageResult};
pub use favorites::{FavoriteLocation, FavoritesRegistry};
pub use localizer::Localizer;
pub use settings::{AnimationSpeed, DisplayToggles, Settings, Theme, UnitSystem};
pub use store::PreferenceStore;
pub use theme::DayPeriod;
pub use value::{PrefScalar, PrefValue};
