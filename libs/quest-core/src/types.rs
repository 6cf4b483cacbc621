//! Core types shared by the matcher, the mistake ledger and the stats display.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Outcome of checking one submission against the accepted answers.
///
/// `hint` is empty whenever `matched` is true.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationOutcome {
    pub matched: bool,
    pub hint: String,
}

impl ValidationOutcome {
    /// A successful match.
    pub fn matched() -> Self {
        Self {
            matched: true,
            hint: String::new(),
        }
    }

    /// A mismatch with feedback for the learner.
    pub fn mismatch(hint: impl Into<String>) -> Self {
        Self {
            matched: false,
            hint: hint.into(),
        }
    }
}

/// One row of the mistake ledger.
///
/// Field names follow the persisted JSON layout, so records written by older
/// builds (without `normalizedKey`) still load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttemptRecord {
    pub day: u32,
    pub user_input: String,
    #[serde(default)]
    pub normalized_key: String,
    #[serde(default)]
    pub expected_commands: Vec<String>,
    pub attempts: u32,
    pub timestamp: DateTime<Utc>,
}

impl AttemptRecord {
    /// Key used for deduplication. Falls back to normalizing `user_input` for
    /// legacy records that never stored one.
    pub fn dedup_key(&self) -> String {
        if self.normalized_key.is_empty() {
            crate::matching::normalize_input(&self.user_input)
        } else {
            self.normalized_key.clone()
        }
    }
}

/// Summary counters for the progress display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsSnapshot {
    pub total_attempts: u64,
    pub total_mistakes: u64,
    pub completed_days: u32,
    pub accuracy: u32,
}

impl Default for StatsSnapshot {
    fn default() -> Self {
        Self {
            total_attempts: 0,
            total_mistakes: 0,
            completed_days: 0,
            accuracy: 100,
        }
    }
}

/// Which lessons have had their slides viewed, keyed by `day{N}`.
pub type SlideProgress = BTreeMap<String, bool>;

/// Key under which a lesson's slide flag is stored.
pub fn slide_key(day: u32) -> String {
    format!("day{}", day)
}

/// Portable snapshot of a learner's progress.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressExport {
    pub current_day: u32,
    pub mistakes: Vec<AttemptRecord>,
    pub export_date: DateTime<Utc>,
    pub version: String,
}

/// Version tag written into every export.
pub const EXPORT_VERSION: &str = "1.0.0";

impl ProgressExport {
    pub fn new(current_day: u32, mistakes: Vec<AttemptRecord>, export_date: DateTime<Utc>) -> Self {
        Self {
            current_day,
            mistakes,
            export_date,
            version: EXPORT_VERSION.to_string(),
        }
    }

    pub fn to_pretty_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// File name a host should offer when saving the export.
    pub fn suggested_file_name(&self) -> String {
        format!(
            "linux-quest-progress-{}.json",
            self.export_date.format("%Y-%m-%d")
        )
    }
}
