//! Error types for quest-core.

use thiserror::Error;

/// Result type alias using ValidationError.
pub type Result<T> = std::result::Result<T, ValidationError>;

/// Invalid arguments handed to the matcher.
///
/// These never reach the caller of [`crate::validate_input`]; each one is
/// turned into a non-matching outcome carrying an explanatory hint.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("input is empty")]
    EmptyInput,

    #[error("no expected commands configured for this step")]
    MissingExpectedCommands,
}
