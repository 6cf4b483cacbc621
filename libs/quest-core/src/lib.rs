//! Core library for the Linux Quest command tutor.
//!
//! Provides:
//! - Command matching with graded hints (exact, wrong-ecosystem, typo, fallback)
//! - Levenshtein distance for typo detection
//! - Mistake ledger merge and retention rules
//! - Shared types (AttemptRecord, ValidationOutcome, StatsSnapshot, etc.)
//!
//! Nothing here touches storage; the tutor app composes these with its
//! persistence layer.

pub mod error;
pub mod hints;
pub mod matching;
pub mod mistakes;
pub mod stats;
pub mod types;

pub use error::{Result, ValidationError};
pub use matching::{classify, levenshtein_distance, normalize_input, validate_input};
pub use mistakes::{apply_retention, merge_attempt, DEFAULT_MISTAKE_LIMIT};
pub use types::{
    slide_key, AttemptRecord, ProgressExport, SlideProgress, StatsSnapshot, ValidationOutcome,
    EXPORT_VERSION,
};
