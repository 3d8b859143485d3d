//! Invocation-scoped write buffer
//!
//! Every ledger call runs against an [`Invocation`]: reads see the call's own
//! pending writes, and nothing reaches the underlying store until
//! [`Invocation::commit`]. Dropping an uncommitted invocation discards it.

use crate::storage::store::Store;
use std::collections::BTreeMap;

/// A pending write: `Some` for put, `None` for delete
type PendingWrite = Option<Vec<u8>>;

/// Atomic unit of work over a store
pub struct Invocation<'a, S: Store> {
    store: &'a mut S,
    writes: BTreeMap<Vec<u8>, PendingWrite>,
}

impl<'a, S: Store> Invocation<'a, S> {
    pub fn begin(store: &'a mut S) -> Self {
        Self {
            store,
            writes: BTreeMap::new(),
        }
    }

    /// Apply all buffered writes to the underlying store
    pub fn commit(self) -> usize {
        let count = self.writes.len();
        for (key, write) in self.writes {
            match write {
                Some(value) => self.store.put(&key, &value),
                None => self.store.delete(&key),
            }
        }
        count
    }
}

impl<S: Store> Store for Invocation<'_, S> {
    fn get(&self, key: &[u8]) -> Option<Vec<u8>> {
        match self.writes.get(key) {
            Some(write) => write.clone(),
            None => self.store.get(key),
        }
    }

    fn put(&mut self, key: &[u8], value: &[u8]) {
        self.writes.insert(key.to_vec(), Some(value.to_vec()));
    }

    fn delete(&mut self, key: &[u8]) {
        self.writes.insert(key.to_vec(), None);
    }
}
