//! Store adapters: the byte-level contract the facade is built on.
//!
//! A [`Store`] is an ordered map from byte keys to byte values. It owns
//! persistence and ordering; the facade only calls the operations below.
//! Implementations must return stored bytes unchanged and must iterate in
//! a key order that is stable while the store is not mutated.
//!
//! Two adapters ship with the crate:
//!
//! - [`MemoryStore`] - a `BTreeMap` behind a lock, always available
//! - [`FjallStore`] - a keyspace in a fjall database (requires `kv` feature)

mod error;
#[cfg(feature = "kv")]
mod fjall_store;
mod memory;

use std::sync::Arc;

pub use error::{StoreError, StoreResult};
#[cfg(feature = "kv")]
pub use fjall_store::FjallStore;
pub use memory::MemoryStore;

/// A `(key, value)` record as raw bytes.
pub type KvPair = (Vec<u8>, Vec<u8>);

/// Ordered iterator over every record of a store.
pub type StoreIter<'a> = Box<dyn Iterator<Item = StoreResult<KvPair>> + 'a>;

/// Byte-level operations of an embedded ordered key-value engine.
///
/// All operations are synchronous. Implementations are expected to be safe
/// for concurrent point operations; nothing here is transactional across
/// calls.
pub trait Store {
    /// Read the bytes stored under `key`.
    fn get(&self, key: &[u8]) -> StoreResult<Option<Vec<u8>>>;

    /// Store `value` under `key`, replacing any previous value.
    fn insert(&self, key: &[u8], value: &[u8]) -> StoreResult<()>;

    fn contains_key(&self, key: &[u8]) -> StoreResult<bool>;

    /// Delete `key`. Returns `true` if a record existed.
    fn remove(&self, key: &[u8]) -> StoreResult<bool>;

    /// Delete every record.
    fn clear(&self) -> StoreResult<()>;

    /// Number of live records.
    fn len(&self) -> StoreResult<usize>;

    fn is_empty(&self) -> StoreResult<bool> {
        Ok(self.len()? == 0)
    }

    /// Iterate over all records in key order.
    fn iter(&self) -> StoreIter<'_>;

    /// Make preceding writes durable. A no-op for volatile stores.
    fn flush(&self) -> StoreResult<()> {
        Ok(())
    }

    /// All keys in key order.
    fn keys(&self) -> StoreResult<Vec<Vec<u8>>> {
        self.iter().map(|kv| kv.map(|(k, _)| k)).collect()
    }

    /// All values in key order.
    fn values(&self) -> StoreResult<Vec<Vec<u8>>> {
        self.iter().map(|kv| kv.map(|(_, v)| v)).collect()
    }

    /// All records in key order.
    fn pairs(&self) -> StoreResult<Vec<KvPair>> {
        self.iter().collect()
    }
}

macro_rules! forward_store {
    ($($ptr:ty),*) => {
        $(
            impl<S: Store + ?Sized> Store for $ptr {
                fn get(&self, key: &[u8]) -> StoreResult<Option<Vec<u8>>> {
                    (**self).get(key)
                }

                fn insert(&self, key: &[u8], value: &[u8]) -> StoreResult<()> {
                    (**self).insert(key, value)
                }

                fn contains_key(&self, key: &[u8]) -> StoreResult<bool> {
                    (**self).contains_key(key)
                }

                fn remove(&self, key: &[u8]) -> StoreResult<bool> {
                    (**self).remove(key)
                }

                fn clear(&self) -> StoreResult<()> {
                    (**self).clear()
                }

                fn len(&self) -> StoreResult<usize> {
                    (**self).len()
                }

                fn iter(&self) -> StoreIter<'_> {
                    (**self).iter()
                }

                fn flush(&self) -> StoreResult<()> {
                    (**self).flush()
                }
            }
        )*
    };
}

forward_store!(&S, Box<S>, Arc<S>);
