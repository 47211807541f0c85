//! Development Peer
//!
//! Hosts the contract against an in-memory world state. Each invocation runs
//! inside its own `Transaction`; the write-set is committed only when the
//! contract returns `Success`. A single commit lock serializes transactions,
//! so concurrent connections never interleave inside one.

use crate::contract::StudentContract;
use crate::ledger::memory::MemoryWorldState;
use crate::ledger::tx::Transaction;
use crate::protocol::{Invocation, Response};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use tracing::{debug, error};

/// A single-node ledger host for the contract.
#[derive(Debug)]
pub struct Peer {
    contract: StudentContract,
    state: Arc<MemoryWorldState>,
    commit_lock: Mutex<()>,
    next_tx_id: AtomicU64,
    committed: AtomicU64,
    rejected: AtomicU64,
}

impl Default for Peer {
    fn default() -> Self {
        Self::new(Arc::new(MemoryWorldState::new()))
    }
}

impl Peer {
    /// Creates a peer over `state` and runs the contract's init.
    pub fn new(state: Arc<MemoryWorldState>) -> Self {
        let peer = Self {
            contract: StudentContract::new(),
            state,
            commit_lock: Mutex::new(()),
            next_tx_id: AtomicU64::new(1),
            committed: AtomicU64::new(0),
            rejected: AtomicU64::new(0),
        };

        let init = peer.transact(|contract, tx| contract.init(tx));
        debug!(response = %init, "Contract instantiated");
        peer
    }

    /// The committed world state.
    pub fn state(&self) -> &Arc<MemoryWorldState> {
        &self.state
    }

    /// Runs one invocation as a transaction.
    pub fn execute(&self, invocation: &Invocation) -> Response {
        self.transact(|contract, tx| contract.execute(tx, invocation))
    }

    /// Number of transactions whose result was `Success`.
    pub fn committed(&self) -> u64 {
        self.committed.load(Ordering::Relaxed)
    }

    /// Number of transactions whose result was `Error`.
    pub fn rejected(&self) -> u64 {
        self.rejected.load(Ordering::Relaxed)
    }

    fn transact<F>(&self, run: F) -> Response
    where
        F: FnOnce(&StudentContract, &mut Transaction<'_>) -> Response,
    {
        // Writes only reach the map through apply(), so a poisoned lock is still safe to reuse
        let _guard = self
            .commit_lock
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        let tx_id = self.next_tx_id.fetch_add(1, Ordering::Relaxed);
        let mut tx = Transaction::new(&self.state, tx_id);
        let response = run(&self.contract, &mut tx);

        if response.is_error() {
            tx.rollback();
            self.rejected.fetch_add(1, Ordering::Relaxed);
            return response;
        }

        match tx.commit() {
            Ok(writes) => {
                debug!(tx_id, writes, "Transaction committed");
                self.committed.fetch_add(1, Ordering::Relaxed);
                response
            }
            Err(e) => {
                error!(tx_id, error = %e, "Commit failed");
                self.rejected.fetch_add(1, Ordering::Relaxed);
                Response::Error(e.to_string())
            }
        }
    }
}
