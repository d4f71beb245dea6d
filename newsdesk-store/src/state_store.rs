//! The durable key-value medium content and settings persist to.
//!
//! Uses a single SQLite file so app state survives restarts without
//! dragging in a full schema; everything is a string under a key.

use crate::error::{StoreError, StoreResult};
use rusqlite::{params, Connection, OptionalExtension};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Durable string-keyed storage.
///
/// The repository serializes the whole item set under one key and the
/// sync layer keeps its enable flags under another; neither cares
/// what medium sits behind this.
pub trait StateStore: Send + Sync {
    /// Reads the value under `key`, `None` when absent.
    fn read(&self, key: &str) -> StoreResult<Option<String>>;

    /// Writes `value` under `key`, replacing any previous value.
    fn write(&self, key: &str, value: &str) -> StoreResult<()>;

    /// Removes the value under `key`. Absent keys are not an error.
    fn remove(&self, key: &str) -> StoreResult<()>;
}

/// SQLite-backed state store.
pub struct SqliteStateStore {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteStateStore {
    /// Opens (or creates) a state store at the given path.
    pub fn new(path: &str) -> StoreResult<Self> {
        let conn = Connection::open(path)
            .map_err(|e| StoreError::Backend(format!("failed to open state store: {e}")))?;
        let store = Self {
            conn: Arc::new(Mutex::new(conn)),
        };
        store.init_schema()?;
        Ok(store)
    }

    /// Opens an in-memory state store (for testing).
    pub fn open_in_memory() -> StoreResult<Self> {
        let conn = Connection::open_in_memory()
            .map_err(|e| StoreError::Backend(format!("failed to open in-memory state store: {e}")))?;
        let store = Self {
            conn: Arc::new(Mutex::new(conn)),
        };
        store.init_schema()?;
        Ok(store)
    }

    fn init_schema(&self) -> StoreResult<()> {
        let conn = self.conn.lock().unwrap();
        conn.execute_batch(
            "
            CREATE TABLE IF NOT EXISTS app_state (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL
            );
            ",
        )
        .map_err(|e| StoreError::Backend(format!("failed to init state schema: {e}")))?;
        Ok(())
    }
}

impl StateStore for SqliteStateStore {
    fn read(&self, key: &str) -> StoreResult<Option<String>> {
        let conn = self.conn.lock().unwrap();
        conn.query_row(
            "SELECT value FROM app_state WHERE key = ?1",
            params![key],
            |row| row.get(0),
        )
        .optional()
        .map_err(|e| StoreError::Backend(format!("failed to read state key: {e}")))
    }

    fn write(&self, key: &str, value: &str) -> StoreResult<()> {
        let conn = self.conn.lock().unwrap();
        conn.execute(
            "INSERT OR REPLACE INTO app_state (key, value) VALUES (?1, ?2)",
            params![key, value],
        )
        .map_err(|e| StoreError::Backend(format!("failed to write state key: {e}")))?;
        Ok(())
    }

    fn remove(&self, key: &str) -> StoreResult<()> {
        let conn = self.conn.lock().unwrap();
        conn.execute("DELETE FROM app_state WHERE key = ?1", params![key])
            .map_err(|e| StoreError::Backend(format!("failed to remove state key: {e}")))?;
        Ok(())
    }
}

/// In-memory state store for tests and ephemeral runs.
#[derive(Default)]
pub struct MemoryStateStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStateStore {
    /// Creates an empty in-memory store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-loaded with the given key. Handy for
    /// exercising load paths in tests.
    #[must_use]
    pub fn with_entry(key: &str, value: &str) -> Self {
        let store = Self::new();
        store
            .entries
            .lock()
            .unwrap()
            .insert(key.to_string(), value.to_string());
        store
    }
}

impl StateStore for MemoryStateStore {
    fn read(&self, key: &str) -> StoreResult<Option<String>> {
        Ok(self.entries.lock().unwrap().get(key).cloned())
    }

    fn write(&self, key: &str, value: &str) -> StoreResult<()> {
        self.entries
            .lock()
            .unwrap()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> StoreResult<()> {
        self.entries.lock().unwrap().remove(key);
        Ok(())
    }
}
