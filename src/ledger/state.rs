//! World State Interface
//!
//! The contract never owns its storage. Every handler receives a
//! `WorldState` capability from the host and performs all reads and
//! writes through it. The host decides what sits behind the trait: the
//! committed state of a peer, a transaction overlay, or a test fake.

use bytes::Bytes;
use thiserror::Error;

/// Byte that opens the composite-key namespace. Simple keys may not start with it.
pub const COMPOSITE_KEY_NAMESPACE: char = '\u{0}';

/// Errors raised by a world-state backend.
///
/// The contract propagates these verbatim, so the `Display` text is what the
/// caller ends up seeing.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StateError {
    /// Writes and deletes require a non-empty key
    #[error("key must not be an empty string")]
    EmptyKey,

    /// The key collides with the composite-key namespace
    #[error("input key {0} is invalid")]
    InvalidKey(String),

    /// The backend could not service the request
    #[error("{0}")]
    Backend(String),
}

/// Result type for world-state operations.
pub type StateResult<T> = Result<T, StateError>;

/// Key-value access to the ledger's world state.
///
/// Implementations must satisfy:
/// - `get_state` returns `Ok(None)` for an absent key, never an error.
/// - `put_state` overwrites any existing value at the key.
/// - `del_state` on an absent key is not an error.
pub trait WorldState {
    /// Reads the value stored at `key`.
    fn get_state(&self, key: &str) -> StateResult<Option<Bytes>>;

    /// Writes `value` at `key`.
    fn put_state(&mut self, key: &str, value: Bytes) -> StateResult<()>;

    /// Removes `key`.
    fn del_state(&mut self, key: &str) -> StateResult<()>;
}

/// Checks that `key` may be used for a write or delete.
pub fn validate_simple_key(key: &str) -> StateResult<()> {
    if key.is_empty() {
        return Err(StateError::EmptyKey);
    }
    if key.starts_with(COMPOSITE_KEY_NAMESPACE) {
        return Err(StateError::InvalidKey(key.to_string()));
    }
    Ok(())
}
