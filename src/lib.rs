//! Typed access to an embedded, ordered key-value store.
//!
//! The store only understands bytes. This library stores text, numbers,
//! JSON objects and raw byte sequences in it, reads them back as typed
//! values, and offers bulk accessors (`array`, `all`, `filter`, `map`,
//! `reduce`, `sort`, ...) over the full contents.
//!
//! # Quick Start
//!
//! ```ignore
//! use typed_kv::prelude::*;
//! use serde_json::json;
//!
//! let kv = TypedKv::open(&Config::default())?;
//!
//! kv.set("amo", "gus")?;
//! kv.set("int", 1)?;
//! kv.set("obj", json!({"o": "bj"}))?;
//!
//! let numbers = kv.filter(Decoded::is_number)?;
//! let keys = kv.key_array()?; // ["amo", "int", "obj"]
//! ```
//!
//! No type tag is stored with a value, so a value's type is inferred from
//! its bytes when read: text that looks like a number or a JSON document is
//! returned as one. See [`codec`] for the exact rules.
//!
//! # Modules
//!
//! - [`codec`] - Value encoding and content-based decoding
//! - [`store`] - The byte-level store contract and its adapters
//! - [`kv`] - The typed facade and its bulk accessors
//! - [`config`] - TOML configuration
//!
//! # Feature Flags
//!
//! - `kv` - Enable the fjall-backed store adapter (enabled by default)
//! - `logging` - Enable library-level tracing (consumers provide their own subscriber)
//! - `cli` - Enable the command-line interface binary
//! - `full` - Enable all features

pub mod codec;
pub mod config;
pub mod kv;
mod logging;
pub mod prelude;
pub mod store;

mod error;

// Re-export the unified error type
pub use error::{Error, Result};

pub use codec::{Decoded, Value, decode, encode};
pub use config::{Config, ConfigError, StoreConfig};
pub use kv::{Entries, Entry, TypedKv};
pub use store::{MemoryStore, Store, StoreError};

#[cfg(feature = "kv")]
pub use store::FjallStore;
