//! Two-dimensional (language × key) string table.

use std::collections::HashMap;

use crate::{Language, LocalizationKey};

const EN: &str = include_str!("../locales/en.toml");
const DE: &str = include_str!("../locales/de.toml");
const RU: &str = include_str!("../locales/ru.toml");
const SR: &str = include_str!("../locales/sr.toml");

/// Resolved display strings for every supported language.
///
/// Fallback rule, applied once at build time:
/// - a key missing from a translation resolves to the English string;
/// - a key missing from English resolves to the key name itself.
///
/// Lookups never fail and never fall back to a third language.
#[derive(Debug, Clone)]
pub struct LocalizationTable {
    strings: HashMap<(Language, LocalizationKey), String>,
    missing: HashMap<Language, Vec<LocalizationKey>>,
}

impl LocalizationTable {
    /// Table built from the locale files bundled into the binary.
    pub fn bundled() -> Self {
        Self::from_sources(&[
            (Language::English, EN),
            (Language::German, DE),
            (Language::Russian, RU),
            (Language::Serbian, SR),
        ])
    }

    /// Build a table from TOML sources (flat `key = "text"` tables).
    ///
    /// Languages absent from `sources`, or whose source fails to parse,
    /// resolve entirely through the fallback rule.
    pub fn from_sources(sources: &[(Language, &str)]) -> Self {
        let parsed: HashMap<Language, HashMap<String, String>> = sources
            .iter()
            .map(|(lang, src)| (*lang, parse_source(*lang, src)))
            .collect();
        let empty = HashMap::new();

        let mut strings = HashMap::new();
        let mut missing: HashMap<Language, Vec<LocalizationKey>> = HashMap::new();

        let base = parsed.get(&Language::BASE).unwrap_or(&empty);
        for &key in LocalizationKey::ALL {
            let text = match base.get(key.as_str()) {
                Some(text) => text.clone(),
                None => {
                    tracing::warn!("Base locale is missing key '{}'", key);
                    missing.entry(Language::BASE).or_default().push(key);
                    key.as_str().to_string()
                }
            };
            strings.insert((Language::BASE, key), text);
        }

        for lang in Language::ALL.into_iter().filter(|l| *l != Language::BASE) {
            let table = parsed.get(&lang).unwrap_or(&empty);
            for &key in LocalizationKey::ALL {
                let text = match table.get(key.as_str()) {
                    Some(text) => text.clone(),
                    None => {
                        missing.entry(lang).or_default().push(key);
                        strings
                            .get(&(Language::BASE, key))
                            .cloned()
                            .unwrap_or_else(|| key.as_str().to_string())
                    }
                };
                strings.insert((lang, key), text);
            }
            if let Some(keys) = missing.get(&lang) {
                tracing::debug!("Locale '{}' falls back to English for {} keys", lang, keys.len());
            }
        }

        Self { strings, missing }
    }

    /// Display string for `key` in `language`.
    pub fn lookup(&self, key: LocalizationKey, language: Language) -> &str {
        self.strings
            .get(&(language, key))
            .map(String::as_str)
            .unwrap_or_else(|| key.as_str())
    }

    /// Keys of `language` that were resolved through the fallback rule.
    pub fn missing_keys(&self, language: Language) -> &[LocalizationKey] {
        self.missing.get(&language).map(Vec::as_slice).unwrap_or(&[])
    }
}

impl Default for LocalizationTable {
    fn default() -> Self {
        Self::bundled()
    }
}

fn parse_source(lang: Language, src: &str) -> HashMap<String, String> {
    let table: HashMap<String, String> = match toml::from_str(src) {
        Ok(t) => t,
        Err(e) => {
            tracing::warn!("Failed to parse locale '{}': {}", lang, e);
            return HashMap::new();
        }
    };

    for name in table.keys() {
        if LocalizationKey::from_name(name).is_none() {
            tracing::warn!("Locale '{}' has unknown key '{}'", lang, name);
        }
    }
    table
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bundled_tables_are_complete() {
        let table = LocalizationTable::bundled();
        for lang in Language::ALL {
            assert!(
                table.missing_keys(lang).is_empty(),
                "{} is missing {:?}",
                lang,
                table.missing_keys(lang)
            );
        }
    }

    #[test]
    fn test_every_key_resolves_for_every_language() {
        let table = LocalizationTable::bundled();
        for lang in Language::ALL {
            for &key in LocalizationKey::ALL {
                assert!(!table.lookup(key, lang).is_empty(), "{}/{} is empty", lang, key);
            }
        }
    }

    #[test]
    fn test_bundled_lookups() {
        let table = LocalizationTable::bundled();
        assert_eq!(table.lookup(LocalizationKey::Favorites, Language::English), "Favorites");
        assert_eq!(table.lookup(LocalizationKey::Favorites, Language::German), "Favoriten");
        assert_eq!(table.lookup(LocalizationKey::Done, Language::Serbian), "Gotovo");
    }

    #[test]
    fn test_russian_delete_is_russian() {
        let table = LocalizationTable::bundled();
        assert_eq!(table.lookup(LocalizationKey::Delete, Language::Russian), "Удалить");
    }

    #[test]
    fn test_missing_key_falls_back_to_english() {
        let table = LocalizationTable::from_sources(&[
            (Language::English, "done = \"Done\"\ndelete = \"Delete\""),
            (Language::Serbian, "delete = \"Obriši\""),
            (Language::Russian, "done = \"Готово\""),
        ]);

        assert_eq!(table.lookup(LocalizationKey::Delete, Language::Serbian), "Obriši");
        assert_eq!(table.lookup(LocalizationKey::Done, Language::Serbian), "Done");
        // Never borrowed from a third language.
        assert_eq!(table.lookup(LocalizationKey::Delete, Language::Russian), "Delete");
        assert!(table.missing_keys(Language::Serbian).contains(&LocalizationKey::Done));
    }

    #[test]
    fn test_missing_base_key_uses_key_name() {
        let table = LocalizationTable::from_sources(&[(Language::English, "done = \"Done\"")]);
        assert_eq!(table.lookup(LocalizationKey::Sunrise, Language::English), "sunrise");
        assert_eq!(table.lookup(LocalizationKey::Sunrise, Language::German), "sunrise");
        assert_eq!(table.lookup(LocalizationKey::Done, Language::German), "Done");
    }

    #[test]
    fn test_malformed_source_is_treated_as_empty() {
        let table = LocalizationTable::from_sources(&[
            (Language::English, "done = \"Done\""),
            (Language::German, "this is not toml ="),
        ]);
        assert_eq!(table.lookup(LocalizationKey::Done, Language::German), "Done");
        assert_eq!(
            table.missing_keys(Language::German).len(),
            LocalizationKey::ALL.len()
        );
    }
}
