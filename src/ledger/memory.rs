//! In-Memory World State
//!
//! A `HashMap` behind an `RwLock`, plus operation counters. This is the
//! committed state of the development peer and the fake that contract tests
//! run against.
//!
//! ## Concurrency Model
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │              MemoryWorldState               │
//! │                                             │
//! │   RwLock<HashMap<String, Bytes>>            │
//! │     - many concurrent readers               │
//! │     - one writer (put / delete / apply)     │
//! │                                             │
//! │   AtomicU64 counters (gets, puts, deletes)  │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! `apply` installs a whole write-set under one write lock, so a committed
//! transaction is never observed half-applied.

use crate::ledger::state::{validate_simple_key, StateError, StateResult, WorldState};
use bytes::Bytes;
use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Pending writes keyed by state key. `None` marks a delete.
pub type WriteSet = BTreeMap<String, Option<Bytes>>;

/// Counters describing traffic against the world state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StateStats {
    /// Number of keys currently stored
    pub keys: u64,
    /// Total reads
    pub gets: u64,
    /// Total writes
    pub puts: u64,
    /// Total deletes
    pub deletes: u64,
}

impl StateStats {
    /// Total operations of any kind.
    pub fn total_ops(&self) -> u64 {
        self.gets + self.puts + self.deletes
    }
}

/// Thread-safe in-memory world state.
///
/// # Example
///
/// ```
/// use studentcc::ledger::MemoryWorldState;
/// use bytes::Bytes;
///
/// let state = MemoryWorldState::new();
/// state.put("s1", Bytes::from_static(b"{}")).unwrap();
/// assert_eq!(state.get("s1").unwrap(), Some(Bytes::from_static(b"{}")));
/// ```
#[derive(Default)]
pub struct MemoryWorldState {
    data: RwLock<HashMap<String, Bytes>>,
    get_count: AtomicU64,
    put_count: AtomicU64,
    del_count: AtomicU64,
}

impl std::fmt::Debug for MemoryWorldState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryWorldState")
            .field("get_count", &self.get_count.load(Ordering::Relaxed))
            .field("put_count", &self.put_count.load(Ordering::Relaxed))
            .field("del_count", &self.del_count.load(Ordering::Relaxed))
            .finish()
    }
}

impl MemoryWorldState {
    /// Creates an empty world state.
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> StateResult<RwLockReadGuard<'_, HashMap<String, Bytes>>> {
        self.data
            .read()
            .map_err(|_| StateError::Backend("world state lock poisoned".to_string()))
    }

    fn write(&self) -> StateResult<RwLockWriteGuard<'_, HashMap<String, Bytes>>> {
        self.data
            .write()
            .map_err(|_| StateError::Backend("world state lock poisoned".to_string()))
    }

    /// Reads the value at `key`. Absent keys, including the empty key, yield `None`.
    pub fn get(&self, key: &str) -> StateResult<Option<Bytes>> {
        self.get_count.fetch_add(1, Ordering::Relaxed);
        Ok(self.read()?.get(key).cloned())
    }

    /// Writes `value` at `key`, replacing any previous value.
    pub fn put(&self, key: &str, value: Bytes) -> StateResult<()> {
        validate_simple_key(key)?;
        self.put_count.fetch_add(1, Ordering::Relaxed);
        self.write()?.insert(key.to_string(), value);
        Ok(())
    }

    /// Removes `key`. Returns whether it was present.
    pub fn delete(&self, key: &str) -> StateResult<bool> {
        validate_simple_key(key)?;
        self.del_count.fetch_add(1, Ordering::Relaxed);
        Ok(self.write()?.remove(key).is_some())
    }

    /// Installs a write-set atomically. Returns the number of entries applied.
    pub fn apply(&self, writes: WriteSet) -> StateResult<usize> {
        for key in writes.keys() {
            validate_simple_key(key)?;
        }

        let mut data = self.write()?;
        let applied = writes.len();
        for (key, value) in writes {
            match value {
                Some(value) => {
                    self.put_count.fetch_add(1, Ordering::Relaxed);
                    data.insert(key, value);
                }
                None => {
                    self.del_count.fetch_add(1, Ordering::Relaxed);
                    data.remove(&key);
                }
            }
        }
        Ok(applied)
    }

    /// Checks for a key without touching the read counter.
    pub fn contains_key(&self, key: &str) -> bool {
        self.read().map(|d| d.contains_key(key)).unwrap_or(false)
    }

    /// Number of stored keys.
    pub fn len(&self) -> usize {
        self.read().map(|d| d.len()).unwrap_or(0)
    }

    /// Returns true if no keys are stored.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Snapshot of the operation counters.
    pub fn stats(&self) -> StateStats {
        StateStats {
            keys: self.len() as u64,
            gets: self.get_count.load(Ordering::Relaxed),
            puts: self.put_count.load(Ordering::Relaxed),
            deletes: self.del_count.load(Ordering::Relaxed),
        }
    }
}

impl WorldState for MemoryWorldState {
    fn get_state(&self, key: &str) -> StateResult<Option<Bytes>> {
        self.get(key)
    }

    fn put_state(&mut self, key: &str, value: Bytes) -> StateResult<()> {
        self.put(key, value)
    }

    fn del_state(&mut self, key: &str) -> StateResult<()> {
        self.delete(key).map(|_| ())
    }
}
