//! Durable key/value backends behind the preference store.

use std::collections::HashMap;
use std::path::Path;

use rusqlite::{params, Connection};

use crate::error::{StorageError, StorageResult};
use crate::value::PrefValue;

/// Key/value persistence used by [`crate::PreferenceStore`].
///
/// Every write is applied immediately; there is no batching or
/// cross-key transaction.
pub trait PreferenceBackend: Send {
    /// Read every stored entry. Entries that cannot be decoded are skipped.
    fn load_all(&self) -> StorageResult<Vec<(String, PrefValue)>>;

    /// Insert or replace one entry.
    fn write(&mut self, key: &str, value: &PrefValue) -> StorageResult<()>;

    /// Delete one entry. Deleting a missing key is not an error.
    fn delete(&mut self, key: &str) -> StorageResult<()>;
}

/// SQLite-backed preference storage.
pub struct SqlitePreferenceBackend {
    conn: Connection,
}

impl SqlitePreferenceBackend {
    /// Open (or create) the preference database at the given path.
    pub fn open<P: AsRef<Path>>(path: P) -> StorageResult<Self> {
        let conn = Connection::open(path)?;
        let backend = Self { conn };
        backend.init_schema()?;
        Ok(backend)
    }

    /// Create an in-memory database. Contents are lost on drop.
    pub fn in_memory() -> StorageResult<Self> {
        let conn = Connection::open_in_memory()?;
        let backend = Self { conn };
        backend.init_schema()?;
        Ok(backend)
    }

    fn init_schema(&self) -> StorageResult<()> {
        self.conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS preferences (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL
            );
            "#,
        )?;
        Ok(())
    }
}

impl PreferenceBackend for SqlitePreferenceBackend {
    fn load_all(&self) -> StorageResult<Vec<(String, PrefValue)>> {
        let mut stmt = self.conn.prepare("SELECT key, value FROM preferences")?;
        let rows = stmt
            .query_map([], |row| Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?)))?
            .collect::<Result<Vec<_>, _>>()?;

        let mut entries = Vec::with_capacity(rows.len());
        for (key, raw) in rows {
            match serde_json::from_str::<PrefValue>(&raw) {
                Ok(value) => entries.push((key, value)),
                Err(e) => {
                    let err = StorageError::corrupt(&key, e.to_string());
                    tracing::warn!("Skipping preference: {}", err);
                }
            }
        }
        Ok(entries)
    }

    fn write(&mut self, key: &str, value: &PrefValue) -> StorageResult<()> {
        let raw = serde_json::to_string(value)?;
        self.conn.execute(
            "INSERT OR REPLACE INTO preferences (key, value) VALUES (?1, ?2)",
            params![key, raw],
        )?;
        tracing::trace!("Wrote preference: {}", key);
        Ok(())
    }

    fn delete(&mut self, key: &str) -> StorageResult<()> {
        self.conn
            .execute("DELETE FROM preferences WHERE key = ?1", params![key])?;
        Ok(())
    }
}

/// Non-durable backend for tests and throwaway sessions.
#[derive(Debug, Default, Clone)]
pub struct MemoryPreferenceBackend {
    entries: HashMap<String, PrefValue>,
}

impl MemoryPreferenceBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Backend pre-populated with entries, as if persisted by an earlier run.
    pub fn with_entries<I, K>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, PrefValue)>,
        K: Into<String>,
    {
        Self {
            entries: entries.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}

impl PreferenceBackend for MemoryPreferenceBackend {
    fn load_all(&self) -> StorageResult<Vec<(String, PrefValue)>> {
        Ok(self
            .entries
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect())
    }

    fn write(&mut self, key: &str, value: &PrefValue) -> StorageResult<()> {
        self.entries.insert(key.to_string(), value.clone());
        Ok(())
    }

    fn delete(&mut self, key: &str) -> StorageResult<()> {
        self.entries.remove(key);
        Ok(())
    }
}
