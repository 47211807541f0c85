//! Contract errors.

use crate::ledger::StateError;
use thiserror::Error;

/// Everything that can make an invocation fail.
///
/// The `Display` text is the message returned to the ledger, so it must stay
/// stable.
#[derive(Debug, Error)]
pub enum ContractError {
    /// The function name matched no handler
    #[error("Invalid function name")]
    InvalidFunctionName(String),

    /// Wrong number of positional arguments
    #[error("Incorrect number of arguments. Expecting {expected}: {params}")]
    InvalidArgumentCount {
        expected: usize,
        got: usize,
        params: &'static str,
    },

    /// An argument failed its type check
    #[error("{field} must be an integer")]
    InvalidArgument { field: &'static str, value: String },

    /// No record stored under the key
    #[error("Student not found")]
    NotFound(String),

    /// The record could not be encoded
    #[error("{0}")]
    Serialization(#[from] serde_json::Error),

    /// The world state refused the operation
    #[error("{0}")]
    State(#[from] StateError),
}

/// Result type for contract operations.
pub type ContractResult<T> = Result<T, ContractError>;
