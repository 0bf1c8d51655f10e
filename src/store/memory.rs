//! In-memory store for testing and ephemeral use.
//!
//! [`MemoryStore`] keeps records in a `BTreeMap` behind a `RwLock`, which
//! gives the same byte-lexicographic key order as the on-disk adapter.
//! Data is lost when the store is dropped.

use std::collections::BTreeMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use super::{KvPair, Store, StoreError, StoreIter, StoreResult};

/// An in-memory implementation of [`Store`].
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: RwLock<BTreeMap<Vec<u8>, Vec<u8>>>,
}

impl MemoryStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> StoreResult<RwLockReadGuard<'_, BTreeMap<Vec<u8>, Vec<u8>>>> {
        self.records
            .read()
            .map_err(|e| StoreError::Poisoned(e.to_string()))
    }

    fn write(&self) -> StoreResult<RwLockWriteGuard<'_, BTreeMap<Vec<u8>, Vec<u8>>>> {
        self.records
            .write()
            .map_err(|e| StoreError::Poisoned(e.to_string()))
    }
}

impl Store for MemoryStore {
    fn get(&self, key: &[u8]) -> StoreResult<Option<Vec<u8>>> {
        Ok(self.read()?.get(key).cloned())
    }

    fn insert(&self, key: &[u8], value: &[u8]) -> StoreResult<()> {
        self.write()?.insert(key.to_vec(), value.to_vec());
        Ok(())
    }

    fn contains_key(&self, key: &[u8]) -> StoreResult<bool> {
        Ok(self.read()?.contains_key(key))
    }

    fn remove(&self, key: &[u8]) -> StoreResult<bool> {
        Ok(self.write()?.remove(key).is_some())
    }

    fn clear(&self) -> StoreResult<()> {
        self.write()?.clear();
        Ok(())
    }

    fn len(&self) -> StoreResult<usize> {
        Ok(self.read()?.len())
    }

    /// Iterates over a snapshot taken when the iterator is created; the lock
    /// is not held while the caller consumes it.
    fn iter(&self) -> StoreIter<'_> {
        match self.read() {
            Ok(records) => {
                let snapshot: Vec<KvPair> = records
                    .iter()
                    .map(|(k, v)| (k.clone(), v.clone()))
                    .collect();
                Box::new(snapshot.into_iter().map(Ok))
            }
            Err(e) => Box::new(std::iter::once(Err(e))),
        }
    }
}
