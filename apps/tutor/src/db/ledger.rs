//! Persisted mistake ledger.

use crate::db::gateway::{StorageGateway, MISTAKES_KEY};
use chrono::{DateTime, Utc};
use quest_core::mistakes::{apply_retention, for_day, merge_attempt};
use quest_core::AttemptRecord;
use serde_json::Value;

/// Deduplicated, size-bounded log of failed attempts.
pub struct MistakeLedger<'a> {
    storage: &'a StorageGateway,
    limit: usize,
}

impl<'a> MistakeLedger<'a> {
    pub fn new(storage: &'a StorageGateway, limit: usize) -> Self {
        Self { storage, limit }
    }

    /// Record a failed attempt at the current time.
    pub fn record(&self, user_input: &str, day: u32, expected_commands: &[String]) -> bool {
        self.record_at(user_input, day, expected_commands, Utc::now())
    }

    /// Record a failed attempt seen at `now`.
    ///
    /// Returns whether the mistake is now in the stored ledger. A failed save
    /// leaves the stored ledger as it was.
    pub fn record_at(
        &self,
        user_input: &str,
        day: u32,
        expected_commands: &[String],
        now: DateTime<Utc>,
    ) -> bool {
        let mut records = self.records();
        let idx = merge_attempt(&mut records, user_input, day, expected_commands, now);
        let attempts = records[idx].attempts;
        if apply_retention(&mut records, self.limit, Some(idx)).is_none() {
            tracing::debug!(day, "mistake older than every retained record, not recorded");
            return false;
        }

        let saved = self.storage.set(MISTAKES_KEY, &records);
        if saved {
            tracing::debug!(day, attempts, "mistake logged");
        } else {
            tracing::warn!(day, "mistake not recorded");
        }
        saved
    }

    /// Every readable record, in ledger order.
    ///
    /// Entries that are not valid records are skipped; they are dropped from
    /// storage the next time the ledger is written.
    pub fn records(&self) -> Vec<AttemptRecord> {
        let entries = self.raw_entries();
        let total = entries.len();
        let records: Vec<AttemptRecord> = entries
            .into_iter()
            .filter_map(|entry| serde_json::from_value(entry).ok())
            .collect();

        if records.len() < total {
            tracing::warn!(
                skipped = total - records.len(),
                "skipping malformed mistake records"
            );
        }
        records
    }

    /// Records for one lesson, for the attempt history display.
    pub fn for_day(&self, day: u32) -> Vec<AttemptRecord> {
        for_day(&self.records(), day)
    }

    /// Remove the whole ledger.
    pub fn clear(&self) -> bool {
        self.storage.remove(MISTAKES_KEY)
    }

    /// Stored entries without record validation. A non-list ledger reads as
    /// empty.
    pub(crate) fn raw_entries(&self) -> Vec<Value> {
        match self.storage.get(MISTAKES_KEY, Value::Array(Vec::new())) {
            Value::Array(entries) => entries,
            _ => {
                tracing::warn!("mistake ledger is not a list, treating as empty");
                Vec::new()
            }
        }
    }
}
