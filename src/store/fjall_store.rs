//! Store adapter backed by a fjall keyspace.

use std::path::Path;

use fjall::{Keyspace, KeyspaceCreateOptions, PersistMode};

use crate::config::{DEFAULT_KEYSPACE, StoreConfig};
use crate::logging::{debug, info};

use super::{Store, StoreError, StoreIter, StoreResult};

/// A single fjall keyspace exposed through the [`Store`] contract.
///
/// Records are kept in key order by the LSM tree. Durability is only
/// guaranteed after [`Store::flush`], which persists the journal with
/// `SyncAll`.
pub struct FjallStore {
    db: fjall::Database,
    records: Keyspace,
}

impl FjallStore {
    /// Open (or create) a store at `path` using the default keyspace.
    pub fn open(path: &Path) -> StoreResult<Self> {
        Self::open_keyspace(path, DEFAULT_KEYSPACE)
    }

    /// Open (or create) a store as described by a [`StoreConfig`].
    pub fn open_with(config: &StoreConfig) -> StoreResult<Self> {
        Self::open_keyspace(&config.path, &config.keyspace)
    }

    /// Open (or create) a store at `path`, keeping records in keyspace `name`.
    pub fn open_keyspace(path: &Path, name: &str) -> StoreResult<Self> {
        let db = fjall::Database::builder(path).open()?;
        let records = db.keyspace(name, KeyspaceCreateOptions::default)?;
        info!(path = %path.display(), keyspace = name, "opened fjall store");
        Ok(Self { db, records })
    }
}

impl Store for FjallStore {
    fn get(&self, key: &[u8]) -> StoreResult<Option<Vec<u8>>> {
        Ok(self.records.get(key)?.map(|v| v.to_vec()))
    }

    fn insert(&self, key: &[u8], value: &[u8]) -> StoreResult<()> {
        self.records.insert(key, value)?;
        Ok(())
    }

    fn contains_key(&self, key: &[u8]) -> StoreResult<bool> {
        Ok(self.records.contains_key(key)?)
    }

    /// The engine's delete does not report whether the key existed, so this
    /// checks first. The two calls are not atomic.
    fn remove(&self, key: &[u8]) -> StoreResult<bool> {
        if !self.records.contains_key(key)? {
            return Ok(false);
        }
        self.records.remove(key)?;
        Ok(true)
    }

    fn clear(&self) -> StoreResult<()> {
        let keys = self.keys()?;
        debug!(count = keys.len(), "clearing fjall keyspace");
        for k in keys {
            self.records.remove(k)?;
        }
        Ok(())
    }

    fn len(&self) -> StoreResult<usize> {
        Ok(self.records.len()?)
    }

    fn iter(&self) -> StoreIter<'_> {
        Box::new(self.records.iter().map(|kv| {
            kv.into_inner()
                .map(|(k, v)| (k.to_vec(), v.to_vec()))
                .map_err(|e| StoreError::Fjall(e.into()))
        }))
    }

    fn flush(&self) -> StoreResult<()> {
        self.db.persist(PersistMode::SyncAll)?;
        Ok(())
    }
}
