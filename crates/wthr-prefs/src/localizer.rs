//! Display strings in the user's selected language.

use std::sync::Arc;

use wthr_i18n::{Language, LocalizationKey, LocalizationTable};

use crate::keys;
use crate::store::PreferenceStore;

/// The localization table bound to the `selectedLanguage` preference.
///
/// The language is read from the store on every lookup, so a change made
/// anywhere through the store is visible immediately.
#[derive(Debug)]
pub struct Localizer {
    table: LocalizationTable,
    store: Arc<PreferenceStore>,
}

impl Localizer {
    pub fn new(table: LocalizationTable, store: Arc<PreferenceStore>) -> Self {
        Self { table, store }
    }

    pub fn language(&self) -> Language {
        self.store.language()
    }

    /// Persist `language`; subscribers get a language-changed event.
    pub fn set_language(&self, language: Language) {
        tracing::info!("Switching language to {}", language.display_name());
        self.store.set(keys::LANGUAGE, language.code());
    }

    pub fn text(&self, key: LocalizationKey) -> &str {
        self.table.lookup(key, self.language())
    }

    pub fn table(&self) -> &LocalizationTable {
        &self.table
    }
}
