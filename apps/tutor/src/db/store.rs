//! Key-value storage media behind the persistence gateway.

use crate::db::error::StoreError;
use crate::db::schema;
use rusqlite::{params, Connection, ErrorCode, OptionalExtension};
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard};

type Result<T> = std::result::Result<T, StoreError>;

/// A flat string-to-string store, the shape of a browser's local storage.
///
/// Implementations report failures as errors; absorbing them is the
/// gateway's job.
pub trait KeyValueStore: Send {
    fn get_item(&self, key: &str) -> Result<Option<String>>;
    fn set_item(&self, key: &str, value: &str) -> Result<()>;
    fn remove_item(&self, key: &str) -> Result<()>;
    fn keys(&self) -> Result<Vec<String>>;
    /// Sum of key and value byte lengths across the whole medium.
    fn used_bytes(&self) -> Result<u64>;
}

fn entry_bytes(key: &str, value: &str) -> u64 {
    (key.len() + value.len()) as u64
}

/// SQLite-backed store with an optional byte quota.
pub struct SqliteStore {
    conn: Connection,
    quota_bytes: Option<u64>,
}

impl SqliteStore {
    /// Open database at path, creating it and its directory if necessary.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        if let Some(parent) = path.as_ref().parent() {
            std::fs::create_dir_all(parent)?;
        }
        let conn = Connection::open(path)?;
        let store = Self {
            conn,
            quota_bytes: None,
        };
        store.initialize()?;
        Ok(store)
    }

    /// Open in-memory database (for testing).
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let store = Self {
            conn,
            quota_bytes: None,
        };
        store.initialize()?;
        Ok(store)
    }

    /// Reject writes that would push the table past `quota_bytes`.
    pub fn with_quota(mut self, quota_bytes: Option<u64>) -> Self {
        self.quota_bytes = quota_bytes;
        self
    }

    fn initialize(&self) -> Result<()> {
        self.conn.execute_batch(schema::SCHEMA)?;
        self.conn
            .pragma_update(None, "user_version", schema::SCHEMA_VERSION)?;
        Ok(())
    }

    fn check_quota(&self, key: &str, value: &str) -> Result<()> {
        let Some(quota) = self.quota_bytes else {
            return Ok(());
        };
        let others: i64 = self
            .conn
            .query_row(schema::USED_BYTES_EXCLUDING, params![key], |row| row.get(0))?;
        let requested = others.max(0) as u64 + entry_bytes(key, value);
        if requested > quota {
            return Err(StoreError::QuotaExceeded { requested, quota });
        }
        Ok(())
    }
}

impl KeyValueStore for SqliteStore {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        let value = self
            .conn
            .query_row("SELECT value FROM kv WHERE key = ?1", params![key], |row| {
                row.get(0)
            })
            .optional()?;
        Ok(value)
    }

    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        self.check_quota(key, value)?;
        self.conn
            .execute(
                "INSERT INTO kv (key, value) VALUES (?1, ?2)
                 ON CONFLICT(key) DO UPDATE SET value = excluded.value",
                params![key, value],
            )
            .map_err(|e| match e.sqlite_error_code() {
                Some(ErrorCode::DiskFull) => StoreError::QuotaExceeded {
                    requested: entry_bytes(key, value),
                    quota: self.quota_bytes.unwrap_or(0),
                },
                _ => StoreError::Sqlite(e),
            })?;
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<()> {
        self.conn
            .execute("DELETE FROM kv WHERE key = ?1", params![key])?;
        Ok(())
    }

    fn keys(&self) -> Result<Vec<String>> {
        let mut stmt = self.conn.prepare("SELECT key FROM kv ORDER BY key")?;
        let keys = stmt
            .query_map([], |row| row.get(0))?
            .collect::<std::result::Result<Vec<String>, _>>()?;
        Ok(keys)
    }

    fn used_bytes(&self) -> Result<u64> {
        let used: i64 = self
            .conn
            .query_row(schema::USED_BYTES, [], |row| row.get(0))?;
        Ok(used.max(0) as u64)
    }
}

#[derive(Default)]
struct MemoryInner {
    items: BTreeMap<String, String>,
    quota_bytes: Option<u64>,
    unavailable: bool,
}

/// In-memory store for tests and hosts without a disk.
///
/// Clones share the same contents, so a test can keep a handle after giving
/// the store to a gateway and then seed data or pull the medium away.
#[derive(Clone, Default)]
pub struct MemoryStore {
    inner: Arc<Mutex<MemoryInner>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_quota(quota_bytes: u64) -> Self {
        let store = Self::new();
        if let Ok(mut inner) = store.inner.lock() {
            inner.quota_bytes = Some(quota_bytes);
        }
        store
    }

    /// Write directly, bypassing quota checks.
    pub fn seed(&self, key: &str, value: &str) {
        if let Ok(mut inner) = self.inner.lock() {
            inner.items.insert(key.to_string(), value.to_string());
        }
    }

    /// Raw stored text, bypassing availability checks.
    pub fn raw(&self, key: &str) -> Option<String> {
        self.inner
            .lock()
            .ok()
            .and_then(|inner| inner.items.get(key).cloned())
    }

    /// Make every subsequent call fail as if the medium vanished.
    pub fn set_unavailable(&self, unavailable: bool) {
        if let Ok(mut inner) = self.inner.lock() {
            inner.unavailable = unavailable;
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, MemoryInner>> {
        let inner = self.inner.lock().map_err(|_| StoreError::Unavailable)?;
        if inner.unavailable {
            return Err(StoreError::Unavailable);
        }
        Ok(inner)
    }
}

impl KeyValueStore for MemoryStore {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        Ok(self.lock()?.items.get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        let mut inner = self.lock()?;
        if let Some(quota) = inner.quota_bytes {
            let others: u64 = inner
                .items
                .iter()
                .filter(|(k, _)| k.as_str() != key)
                .map(|(k, v)| entry_bytes(k, v))
                .sum();
            let requested = others + entry_bytes(key, value);
            if requested > quota {
                return Err(StoreError::QuotaExceeded { requested, quota });
            }
        }
        inner.items.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<()> {
        self.lock()?.items.remove(key);
        Ok(())
    }

    fn keys(&self) -> Result<Vec<String>> {
        Ok(self.lock()?.items.keys().cloned().collect())
    }

    fn used_bytes(&self) -> Result<u64> {
        Ok(self
            .lock()?
            .items
            .iter()
            .map(|(k, v)| entry_bytes(k, v))
            .sum())
    }
}
