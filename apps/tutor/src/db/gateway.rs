//! Persistence gateway: total key-value operations over a fallible medium.
//!
//! Every public method absorbs failures. Reads fall back to the caller's
//! default, writes and removals report `false`, and the cause is logged.

use crate::db::error::StoreError;
use crate::db::store::KeyValueStore;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

type Result<T> = std::result::Result<T, StoreError>;

/// Prefix shared by every key this application owns.
pub const NAMESPACE: &str = "linuxQuest_";

/// Highest lesson day answered correctly, as a decimal string.
pub const CURRENT_DAY_KEY: &str = "linuxQuest_currentDay";
/// JSON array of attempt records.
pub const MISTAKES_KEY: &str = "linuxQuest_mistakes";
/// JSON object of `day{N}` to "slides seen".
pub const SLIDE_PROGRESS_KEY: &str = "linuxQuest_slideProgress";

/// Usage report for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StorageInfo {
    pub available: bool,
    pub used_bytes: u64,
    pub used_mb: f64,
}

impl StorageInfo {
    fn unavailable() -> Self {
        Self {
            available: false,
            used_bytes: 0,
            used_mb: 0.0,
        }
    }
}

/// Total, logging wrapper around an optional storage medium.
pub struct StorageGateway {
    store: Option<Box<dyn KeyValueStore>>,
}

impl StorageGateway {
    pub fn new(store: impl KeyValueStore + 'static) -> Self {
        Self {
            store: Some(Box::new(store)),
        }
    }

    /// A gateway for a host with no storage at all.
    pub fn unavailable() -> Self {
        Self { store: None }
    }

    pub fn is_available(&self) -> bool {
        self.store.is_some()
    }

    fn store(&self) -> Result<&dyn KeyValueStore> {
        self.store.as_deref().ok_or(StoreError::Unavailable)
    }

    /// Stored value, or `default` when the medium is missing, the key is
    /// absent, or the stored text is not valid JSON where JSON was expected.
    pub fn get(&self, key: &str, default: Value) -> Value {
        match self.try_get(key) {
            Ok(Some(value)) => value,
            Ok(None) => default,
            Err(e) => {
                log_failure("read", key, &e);
                default
            }
        }
    }

    /// Stored value deserialized into `T`, or `default` on any failure,
    /// including a value of the wrong shape.
    pub fn get_or<T: DeserializeOwned>(&self, key: &str, default: T) -> T {
        match self.try_get(key) {
            Ok(Some(value)) => serde_json::from_value(value).unwrap_or_else(|e| {
                log_failure(
                    "read",
                    key,
                    &StoreError::Malformed {
                        key: key.to_string(),
                        reason: e.to_string(),
                    },
                );
                default
            }),
            Ok(None) => default,
            Err(e) => {
                log_failure("read", key, &e);
                default
            }
        }
    }

    fn try_get(&self, key: &str) -> Result<Option<Value>> {
        let Some(item) = self.store()?.get_item(key)? else {
            return Ok(None);
        };
        decode(key, item).map(Some)
    }

    /// Persist `value`. Strings are stored verbatim, everything else as JSON.
    ///
    /// A quota rejection triggers one sweep of foreign keys and one retry.
    pub fn set<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> bool {
        let encoded = match encode(value) {
            Ok(encoded) => encoded,
            Err(e) => {
                log_failure("encode", key, &e);
                return false;
            }
        };

        match self.write(key, &encoded) {
            Ok(()) => true,
            Err(e) if e.is_quota_exceeded() => {
                tracing::warn!(key, error = %e, "storage quota exceeded, reclaiming space");
                self.reclaim_space();
                match self.write(key, &encoded) {
                    Ok(()) => true,
                    Err(retry) => {
                        tracing::error!(key, error = %retry, "write retry failed");
                        false
                    }
                }
            }
            Err(e) => {
                log_failure("write", key, &e);
                false
            }
        }
    }

    fn write(&self, key: &str, encoded: &str) -> Result<()> {
        self.store()?.set_item(key, encoded)
    }

    /// Best-effort removal. A missing key is not an error.
    pub fn remove(&self, key: &str) -> bool {
        match self.store().and_then(|store| store.remove_item(key)) {
            Ok(()) => true,
            Err(e) => {
                log_failure("remove", key, &e);
                false
            }
        }
    }

    /// Remove every key outside this application's namespace.
    ///
    /// Returns the number of keys removed.
    fn reclaim_space(&self) -> usize {
        let store = match self.store() {
            Ok(store) => store,
            Err(e) => {
                log_failure("reclaim", NAMESPACE, &e);
                return 0;
            }
        };
        let keys = match store.keys() {
            Ok(keys) => keys,
            Err(e) => {
                log_failure("reclaim", NAMESPACE, &e);
                return 0;
            }
        };

        let mut removed = 0;
        for key in keys.iter().filter(|k| !k.starts_with(NAMESPACE)) {
            match store.remove_item(key) {
                Ok(()) => removed += 1,
                Err(e) => tracing::error!(key = %key, error = %e, "failed to remove key"),
            }
        }
        tracing::info!(removed, "cleared foreign storage items");
        removed
    }

    /// Whether the medium is usable and roughly how much of it is in use.
    pub fn info(&self) -> StorageInfo {
        let used = self.store().and_then(|store| store.used_bytes());
        match used {
            Ok(used_bytes) => StorageInfo {
                available: true,
                used_bytes,
                used_mb: used_bytes as f64 / 1024.0 / 1024.0,
            },
            Err(e) => {
                log_failure("inspect", NAMESPACE, &e);
                StorageInfo::unavailable()
            }
        }
    }
}

/// Only text that looks like a JSON object or array is parsed.
fn decode(key: &str, item: String) -> Result<Value> {
    if item.starts_with('{') || item.starts_with('[') {
        serde_json::from_str(&item).map_err(|e| StoreError::Malformed {
            key: key.to_string(),
            reason: e.to_string(),
        })
    } else {
        Ok(Value::String(item))
    }
}

fn encode<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    match serde_json::to_value(value)? {
        Value::String(s) => Ok(s),
        other => Ok(other.to_string()),
    }
}

fn log_failure(operation: &str, key: &str, error: &StoreError) {
    match error {
        StoreError::Unavailable | StoreError::Malformed { .. } => {
            tracing::warn!(operation, key, error = %error, "storage operation degraded")
        }
        _ => tracing::error!(operation, key, error = %error, "storage operation failed"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::store::{MemoryStore, SqliteStore};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn json_round_trip() {
        let gateway = StorageGateway::new(MemoryStore::new());
        assert!(gateway.set("linuxQuest_k", &json!({"a": 1})));
        assert_eq!(gateway.get("linuxQuest_k", Value::Null), json!({"a": 1}));
    }

    #[test]
    fn strings_are_stored_verbatim() {
        let store = MemoryStore::new();
        let gateway = StorageGateway::new(store.clone());
        assert!(gateway.set(CURRENT_DAY_KEY, "3"));
        assert_eq!(store.raw(CURRENT_DAY_KEY).as_deref(), Some("3"));
        assert_eq!(gateway.get(CURRENT_DAY_KEY, json!("0")), json!("3"));

        assert!(gateway.set(CURRENT_DAY_KEY, &3));
        assert_eq!(store.raw(CURRENT_DAY_KEY).as_deref(), Some("3"));
    }

    #[test]
    fn missing_key_returns_default() {
        let gateway = StorageGateway::new(MemoryStore::new());
        assert_eq!(gateway.get("linuxQuest_none", json!([])), json!([]));
        assert_eq!(gateway.get_or("linuxQuest_none", 7u32), 7);
    }

    #[test]
    fn malformed_json_returns_default_and_keeps_bytes() {
        let store = MemoryStore::new();
        let gateway = StorageGateway::new(store.clone());
        assert!(gateway.set(MISTAKES_KEY, &json!([1, 2])));
        store.seed(MISTAKES_KEY, "[1, 2");

        assert_eq!(gateway.get(MISTAKES_KEY, json!("fallback")), json!("fallback"));
        assert_eq!(store.raw(MISTAKES_KEY).as_deref(), Some("[1, 2"));
    }

    #[test]
    fn wrong_shape_falls_back_in_typed_read() {
        let gateway = StorageGateway::new(MemoryStore::new());
        assert!(gateway.set(SLIDE_PROGRESS_KEY, &json!([true])));
        let progress: std::collections::BTreeMap<String, bool> =
            gateway.get_or(SLIDE_PROGRESS_KEY, Default::default());
        assert!(progress.is_empty());
    }

    #[test]
    fn unavailable_medium_is_total() {
        let gateway = StorageGateway::unavailable();
        assert!(!gateway.is_available());
        assert_eq!(gateway.get("k", json!(5)), json!(5));
        assert!(!gateway.set("k", "v"));
        assert!(!gateway.remove("k"));
        assert_eq!(gateway.info(), StorageInfo::unavailable());
    }

    #[test]
    fn medium_failing_at_runtime_is_total() {
        let store = MemoryStore::new();
        let gateway = StorageGateway::new(store.clone());
        store.set_unavailable(true);
        assert_eq!(gateway.get("k", json!(null)), json!(null));
        assert!(!gateway.set("k", "v"));
        assert!(!gateway.info().available);
    }

    #[test]
    fn quota_reclaims_foreign_keys_and_retries() {
        let store = MemoryStore::with_quota(64);
        store.seed("otherApp_cache", &"x".repeat(40));
        store.seed(CURRENT_DAY_KEY, "2");
        let gateway = StorageGateway::new(store.clone());

        assert!(gateway.set(MISTAKES_KEY, &json!(["a", "b", "c"])));
        assert_eq!(store.raw("otherApp_cache"), None);
        assert_eq!(store.raw(CURRENT_DAY_KEY).as_deref(), Some("2"));
    }

    #[test]
    fn quota_retry_fails_when_namespace_is_full() {
        let store = MemoryStore::with_quota(32);
        store.seed(CURRENT_DAY_KEY, &"9".repeat(20));
        let gateway = StorageGateway::new(store.clone());

        assert!(!gateway.set(MISTAKES_KEY, &"x".repeat(30)));
        assert_eq!(store.raw(MISTAKES_KEY), None);
        assert!(store.raw(CURRENT_DAY_KEY).is_some());
    }

    #[test]
    fn info_reports_whole_medium() {
        let store = SqliteStore::open_in_memory().unwrap();
        let gateway = StorageGateway::new(store);
        assert!(gateway.set("abc", "12345"));
        assert!(gateway.set(CURRENT_DAY_KEY, "1"));

        let info = gateway.info();
        assert!(info.available);
        assert_eq!(info.used_bytes, 8 + CURRENT_DAY_KEY.len() as u64 + 1);
        assert!(info.used_mb > 0.0);
    }

    #[test]
    fn remove_missing_key_succeeds() {
        let gateway = StorageGateway::new(MemoryStore::new());
        assert!(gateway.remove("linuxQuest_never_set"));
    }
}
