//! Transaction Overlay
//!
//! A transaction buffers writes on top of the committed world state. Reads
//! see the transaction's own pending writes first. Nothing reaches the
//! committed state until `commit`; dropping the transaction discards it.

use crate::ledger::memory::{MemoryWorldState, WriteSet};
use crate::ledger::state::{validate_simple_key, StateResult, WorldState};
use bytes::Bytes;
use tracing::trace;

/// A pending transaction against a `MemoryWorldState`.
#[derive(Debug)]
pub struct Transaction<'a> {
    base: &'a MemoryWorldState,
    tx_id: u64,
    writes: WriteSet,
}

impl<'a> Transaction<'a> {
    /// Opens a transaction over the committed state.
    pub fn new(base: &'a MemoryWorldState, tx_id: u64) -> Self {
        Self {
            base,
            tx_id,
            writes: WriteSet::new(),
        }
    }

    pub fn tx_id(&self) -> u64 {
        self.tx_id
    }

    /// The buffered write-set.
    pub fn write_set(&self) -> &WriteSet {
        &self.writes
    }

    /// Returns true if the transaction has not written anything.
    pub fn is_read_only(&self) -> bool {
        self.writes.is_empty()
    }

    /// Applies the write-set to the committed state.
    ///
    /// Returns the number of keys written or deleted.
    pub fn commit(self) -> StateResult<usize> {
        trace!(tx_id = self.tx_id, writes = self.writes.len(), "Committing");
        if self.writes.is_empty() {
            return Ok(0);
        }
        self.base.apply(self.writes)
    }

    /// Discards the write-set.
    pub fn rollback(self) {
        trace!(tx_id = self.tx_id, writes = self.writes.len(), "Rolling back");
    }
}

impl WorldState for Transaction<'_> {
    fn get_state(&self, key: &str) -> StateResult<Option<Bytes>> {
        match self.writes.get(key) {
            Some(pending) => Ok(pending.clone()),
            None => self.base.get(key),
        }
    }

    fn put_state(&mut self, key: &str, value: Bytes) -> StateResult<()> {
        validate_simple_key(key)?;
        self.writes.insert(key.to_string(), Some(value));
        Ok(())
    }

    fn del_state(&mut self, key: &str) -> StateResult<()> {
        validate_simple_key(key)?;
        self.writes.insert(key.to_string(), None);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::state::StateError;

    #[test]
    fn test_reads_own_writes() {
        let base = MemoryWorldState::new();
        base.put("k", Bytes::from("committed")).unwrap();

        let mut tx = Transaction::new(&base, 1);
        assert_eq!(tx.get_state("k").unwrap(), Some(Bytes::from("committed")));

        tx.put_state("k", Bytes::from("pending")).unwrap();
        assert_eq!(tx.get_state("k").unwrap(), Some(Bytes::from("pending")));
        assert_eq!(base.get("k").unwrap(), Some(Bytes::from("committed")));

        tx.del_state("k").unwrap();
        assert_eq!(tx.get_state("k").unwrap(), None);
        assert!(base.contains_key("k"));
    }

    #[test]
    fn test_commit_applies_writes() {
        let base = MemoryWorldState::new();

        let mut tx = Transaction::new(&base, 7);
        tx.put_state("a", Bytes::from("1")).unwrap();
        tx.put_state("b", Bytes::from("2")).unwrap();
        assert!(!tx.is_read_only());
        assert_eq!(tx.commit().unwrap(), 2);

        assert_eq!(base.get("a").unwrap(), Some(Bytes::from("1")));
        assert_eq!(base.len(), 2);
    }

    #[test]
    fn test_rollback_discards_writes() {
        let base = MemoryWorldState::new();

        let mut tx = Transaction::new(&base, 2);
        tx.put_state("a", Bytes::from("1")).unwrap();
        tx.rollback();

        assert!(base.is_empty());
        assert_eq!(base.stats().puts, 0);
    }

    #[test]
    fn test_validates_keys_on_write() {
        let base = MemoryWorldState::new();
        let mut tx = Transaction::new(&base, 3);

        assert_eq!(tx.put_state("", Bytes::from("x")), Err(StateError::EmptyKey));
        assert_eq!(tx.del_state(""), Err(StateError::EmptyKey));
        assert!(tx.is_read_only());
    }
}
