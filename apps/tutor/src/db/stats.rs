//! Read-only statistics over the ledger and progress marker.

use crate::db::gateway::StorageGateway;
use crate::db::ledger::MistakeLedger;
use crate::db::progress::ProgressStore;
use quest_core::StatsSnapshot;

pub struct StatsAggregator<'a> {
    storage: &'a StorageGateway,
}

impl<'a> StatsAggregator<'a> {
    pub fn new(storage: &'a StorageGateway) -> Self {
        Self { storage }
    }

    /// Summary counters. Ledger entries without a non-negative integer
    /// `attempts` field are ignored.
    pub fn compute_stats(&self) -> StatsSnapshot {
        // The retention limit is irrelevant for reads.
        let ledger = MistakeLedger::new(self.storage, usize::MAX);
        let total_mistakes = ledger
            .raw_entries()
            .iter()
            .filter_map(|entry| entry.get("attempts").and_then(|a| a.as_u64()))
            .fold(0u64, u64::saturating_add);
        let completed_days = ProgressStore::new(self.storage).current_day();

        StatsSnapshot::compute(total_mistakes, completed_days)
    }
}
