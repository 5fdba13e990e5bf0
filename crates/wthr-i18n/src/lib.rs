//! Localization tables for wthr.
//!
//! Display strings live in TOML files under `locales/`, one per language,
//! embedded at compile time and parsed once into a [`LocalizationTable`].
//! Lookups are total: a key missing from a translation resolves to the
//! English string, never to a third language.

pub mod key;
pub mod language;
pub mod table;

pub use key::LocalizationKey;
pub use language::Language;
pub use table::LocalizationTable;
