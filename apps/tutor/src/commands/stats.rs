//! Statistics commands.

use crate::state::AppState;
use quest_core::StatsSnapshot;

/// Summary counters for the progress display.
pub fn compute_stats(state: &AppState) -> StatsSnapshot {
    state.stats().compute_stats()
}
