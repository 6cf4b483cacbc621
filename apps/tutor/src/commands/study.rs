//! Practice commands: checking answers and recording mistakes.

use crate::state::AppState;
use quest_core::matching::classify;
use quest_core::{AttemptRecord, ValidationError, ValidationOutcome};

/// Check a submission without touching storage.
pub fn validate_input(input: &str, expected_commands: &[String]) -> ValidationOutcome {
    classify(input, expected_commands).unwrap_or_else(|e| {
        log_invalid_submission(&e);
        ValidationOutcome::mismatch(e.hint())
    })
}

fn log_invalid_submission(error: &ValidationError) {
    match error {
        ValidationError::MissingExpectedCommands => {
            tracing::error!(error = %error, "practice step is misconfigured")
        }
        ValidationError::EmptyInput => tracing::debug!(error = %error, "blank submission"),
    }
}

/// Record a failed attempt. Never fails; a storage problem only means the
/// mistake is not kept.
pub fn record_mistake(input: &str, day: u32, expected_commands: &[String], state: &AppState) {
    state.ledger().record(input, day, expected_commands);
    state.notifier.notify();
}

/// Check a submission and update progress: a match advances the progress
/// marker, every mismatch is recorded in the ledger.
///
/// Blank submissions and misconfigured steps count as mismatches too.
pub fn submit_answer(
    day: u32,
    input: &str,
    expected_commands: &[String],
    state: &AppState,
) -> ValidationOutcome {
    let outcome = validate_input(input, expected_commands);

    if outcome.matched {
        if !state.progress().complete_day(day) {
            tracing::warn!(day, "failed to save progress");
        }
    } else {
        state.ledger().record(input, day, expected_commands);
    }
    state.notifier.notify();

    outcome
}

/// Past mistakes for one lesson.
pub fn mistakes_for_day(day: u32, state: &AppState) -> Vec<AttemptRecord> {
    state.ledger().for_day(day)
}
