//! Summary counters for the progress display.

use crate::types::StatsSnapshot;

impl StatsSnapshot {
    /// Derive the snapshot from the summed ledger attempts and the progress
    /// marker.
    ///
    /// Each completed day counts as at least one successful attempt, so
    /// `total_attempts` is `total_mistakes + max(completed_days, 1)`. This is
    /// an approximation kept for display compatibility, not a real counter.
    ///
    /// Counts too large to add up yield the default snapshot.
    pub fn compute(total_mistakes: u64, completed_days: u32) -> Self {
        let Some(total_attempts) = total_mistakes.checked_add(u64::from(completed_days.max(1)))
        else {
            return Self::default();
        };
        let accuracy = if total_attempts > 0 {
            let correct = (total_attempts - total_mistakes) as f64;
            (correct / total_attempts as f64 * 100.0).round() as u32
        } else {
            100
        };

        Self {
            total_attempts,
            total_mistakes,
            completed_days,
            accuracy,
        }
    }
}
