//! Interpretation error types.

use thiserror::Error;

/// Input-validation failure: the sentence lacks the one slot that cannot be
/// defaulted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ParseError {
    /// No `INC`/`PRB`/`CHG`/`TASK` number in an update command.
    #[error("no record identifier")]
    MissingRecordId,

    /// No `@name` token in a script command.
    #[error("no artifact name")]
    MissingArtifactName,
}

/// Convenience alias for interpretation results.
pub type ParseResult<T> = Result<T, ParseError>;
