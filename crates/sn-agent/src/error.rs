//! Agent error types.

use sn_nlp::ParseError;
use thiserror::Error;

/// Errors surfaced by planning or executing a natural-language command.
#[derive(Debug, Error)]
pub enum AgentError {
    /// The sentence could not be interpreted; echo the reason to the operator.
    #[error("could not interpret command: {0}")]
    Parse(#[from] ParseError),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("backend error: {0}")]
    Backend(String),

    #[error("config error: {0}")]
    Config(String),
}

/// Convenience alias.
pub type AgentResult<T> = Result<T, AgentError>;
