//! Convenient re-exports for common usage patterns.
//!
//! ```ignore
//! use typed_kv::prelude::*;
//!
//! let kv = TypedKv::in_memory();
//! kv.set("greeting", "hello")?;
//! ```

// Unified error handling
pub use crate::error::{Error, Result};

// Values and codec
pub use crate::codec::{Decoded, Value};

// Facade
pub use crate::kv::{Entry, TypedKv};

// Store adapters
pub use crate::store::{MemoryStore, Store, StoreError};

#[cfg(feature = "kv")]
pub use crate::store::FjallStore;

pub use crate::config::{Config, StoreConfig};
