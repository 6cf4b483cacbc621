//! Local persistence: storage media, the total gateway over them, and the
//! ledger, progress and stats views built on the gateway.

pub mod error;
pub mod gateway;
pub mod ledger;
pub mod progress;
pub mod schema;
pub mod stats;
pub mod store;

pub use error::StoreError;
pub use gateway::{
    StorageGateway, StorageInfo, CURRENT_DAY_KEY, MISTAKES_KEY, NAMESPACE, SLIDE_PROGRESS_KEY,
};
pub use ledger::MistakeLedger;
pub use progress::ProgressStore;
pub use stats::StatsAggregator;
pub use store::{KeyValueStore, MemoryStore, SqliteStore};
