//! Application state.

use crate::config::TutorConfig;
use crate::db::{
    MemoryStore, MistakeLedger, ProgressStore, SqliteStore, StatsAggregator, StorageGateway,
};
use crate::events::DataChangeNotifier;
use quest_core::DEFAULT_MISTAKE_LIMIT;

/// Everything the commands need, constructed once per process.
pub struct AppState {
    pub storage: StorageGateway,
    pub notifier: DataChangeNotifier,
    pub mistake_limit: usize,
}

impl AppState {
    pub fn new(storage: StorageGateway, mistake_limit: usize) -> Self {
        Self {
            storage,
            notifier: DataChangeNotifier::new(),
            mistake_limit,
        }
    }

    /// Open the configured SQLite store. If it cannot be opened the app
    /// still starts, with storage reported as unavailable.
    pub fn open(config: &TutorConfig) -> Self {
        let storage = match SqliteStore::open(&config.db_path) {
            Ok(store) => StorageGateway::new(store.with_quota(config.storage_quota_bytes)),
            Err(e) => {
                tracing::error!(
                    path = %config.db_path.display(),
                    error = %e,
                    "failed to open progress store, continuing without storage"
                );
                StorageGateway::unavailable()
            }
        };
        Self::new(storage, config.mistake_limit)
    }

    /// State backed by a fresh in-memory store.
    pub fn in_memory() -> Self {
        Self::new(StorageGateway::new(MemoryStore::new()), DEFAULT_MISTAKE_LIMIT)
    }

    pub fn ledger(&self) -> MistakeLedger<'_> {
        MistakeLedger::new(&self.storage, self.mistake_limit)
    }

    pub fn progress(&self) -> ProgressStore<'_> {
        ProgressStore::new(&self.storage)
    }

    pub fn stats(&self) -> StatsAggregator<'_> {
        StatsAggregator::new(&self.storage)
    }
}
