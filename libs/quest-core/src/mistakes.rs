//! Merge and retention rules for the mistake ledger.
//!
//! Pure functions over an in-memory list of records; loading and saving the
//! list is the caller's concern.

use crate::matching::normalize_input;
use crate::types::AttemptRecord;
use chrono::{DateTime, Utc};

/// Maximum number of records kept in the ledger.
pub const DEFAULT_MISTAKE_LIMIT: usize = 50;

/// Record a failed attempt, merging with an existing (day, input) row.
///
/// Returns the index of the merged or newly appended record.
pub fn merge_attempt(
    records: &mut Vec<AttemptRecord>,
    user_input: &str,
    day: u32,
    expected_commands: &[String],
    now: DateTime<Utc>,
) -> usize {
    let key = normalize_input(user_input);

    let position = records
        .iter()
        .position(|r| r.day == day && r.dedup_key() == key);

    match position {
        Some(idx) => {
            let record = &mut records[idx];
            record.attempts = record.attempts.saturating_add(1);
            record.timestamp = now;
            if record.normalized_key.is_empty() {
                record.normalized_key = key;
            }
            idx
        }
        None => {
            records.push(AttemptRecord {
                day,
                user_input: user_input.to_string(),
                normalized_key: key,
                expected_commands: expected_commands.to_vec(),
                attempts: 1,
                timestamp: now,
            });
            records.len() - 1
        }
    }
}

/// Keep only the `limit` most recent records.
///
/// Runs only when the ledger is over the limit, so an in-bounds ledger keeps
/// its insertion order. Among equal timestamps the `touched` record ranks
/// first and the rest keep their relative order.
///
/// Returns the position of `touched` afterwards, or `None` if it was evicted.
pub fn apply_retention(
    records: &mut Vec<AttemptRecord>,
    limit: usize,
    touched: Option<usize>,
) -> Option<usize> {
    if records.len() <= limit {
        return touched;
    }

    let mut ranked: Vec<(usize, AttemptRecord)> = records.drain(..).enumerate().collect();
    ranked.sort_by(|(i, a), (j, b)| {
        b.timestamp
            .cmp(&a.timestamp)
            .then_with(|| (Some(*j) == touched).cmp(&(Some(*i) == touched)))
    });
    ranked.truncate(limit);

    let kept = ranked.iter().position(|(idx, _)| Some(*idx) == touched);
    records.extend(ranked.into_iter().map(|(_, record)| record));
    kept
}

/// Records belonging to one lesson, in ledger order.
pub fn for_day(records: &[AttemptRecord], day: u32) -> Vec<AttemptRecord> {
    records.iter().filter(|r| r.day == day).cloned().collect()
}
