//! Raw key-value access for hosts that keep their own data alongside ours.

use crate::db::StorageInfo;
use crate::state::AppState;
use serde_json::Value;

pub fn get_from_storage(key: &str, default: Value, state: &AppState) -> Value {
    state.storage.get(key, default)
}

pub fn set_to_storage(key: &str, value: &Value, state: &AppState) -> bool {
    let saved = state.storage.set(key, value);
    if saved {
        state.notifier.notify();
    }
    saved
}

pub fn remove_from_storage(key: &str, state: &AppState) -> bool {
    let removed = state.storage.remove(key);
    if removed {
        state.notifier.notify();
    }
    removed
}

pub fn storage_info(state: &AppState) -> StorageInfo {
    state.storage.info()
}
