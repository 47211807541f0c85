//! Ledger Module
//!
//! Everything on the host side of the contract boundary: the `WorldState`
//! capability handed to handlers, the in-memory committed state, the
//! transaction overlay, and the development `Peer` that ties them together.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                           Peer                              │
//! │                                                             │
//! │   invocation ──> Transaction ──> StudentContract            │
//! │                      │                                      │
//! │           Success ── commit ──┐   Error ── rollback         │
//! │                               ▼                             │
//! │                       MemoryWorldState                      │
//! └─────────────────────────────────────────────────────────────┘
//! ```

pub mod memory;
pub mod peer;
pub mod state;
pub mod tx;

pub use memory::{MemoryWorldState, StateStats, WriteSet};
pub use peer::Peer;
pub use state::{validate_simple_key, StateError, StateResult, WorldState};
pub use tx::Transaction;
