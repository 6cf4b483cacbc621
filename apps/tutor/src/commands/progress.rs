//! Lesson progress commands.

use crate::state::AppState;
use chrono::Utc;
use quest_core::{ProgressExport, SlideProgress};

pub fn current_day(state: &AppState) -> u32 {
    state.progress().current_day()
}

pub fn complete_day(day: u32, state: &AppState) -> bool {
    let saved = state.progress().complete_day(day);
    state.notifier.notify();
    saved
}

pub fn unlocked_day(total_days: u32, state: &AppState) -> u32 {
    state.progress().unlocked_day(total_days)
}

pub fn slide_progress(state: &AppState) -> SlideProgress {
    state.progress().slide_progress()
}

pub fn slides_seen(day: u32, state: &AppState) -> bool {
    state.progress().slides_seen(day)
}

pub fn mark_slides_seen(day: u32, state: &AppState) -> bool {
    let saved = state.progress().mark_slides_seen(day);
    if !saved {
        tracing::warn!(day, "failed to save slide progress");
    }
    state.notifier.notify();
    saved
}

/// Forget slide progress, the progress marker and the mistake ledger.
///
/// Each removal is attempted even if an earlier one fails. Returns whether
/// all three succeeded.
pub fn reset_progress(state: &AppState) -> bool {
    let progress = state.progress();
    let results = [
        progress.clear_slides(),
        progress.clear_current_day(),
        state.ledger().clear(),
    ];
    state.notifier.notify();

    let all_cleared = results.iter().all(|&ok| ok);
    if all_cleared {
        tracing::info!("learning progress reset");
    } else {
        tracing::warn!("learning progress only partially reset");
    }
    all_cleared
}

/// Snapshot of the progress marker and ledger for saving outside the app.
pub fn export_progress(state: &AppState) -> ProgressExport {
    ProgressExport::new(
        state.progress().current_day(),
        state.ledger().records(),
        Utc::now(),
    )
}
