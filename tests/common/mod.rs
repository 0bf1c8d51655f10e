//! Common test utilities and fixtures.
//!
//! Shared seed data and helpers so every scenario can run against both the
//! in-memory and the fjall-backed store.

#![cfg(feature = "kv")]
#![allow(dead_code)]

use serde_json::{Value as JsonValue, json};
use tempfile::TempDir;
use typed_kv::{FjallStore, MemoryStore, Store, TypedKv};

// =============================================================================
// Seed data
// =============================================================================

/// Records used by the `all()` scenario, inserted out of key order.
pub fn mixed_records() -> Vec<(&'static str, typed_kv::Value)> {
    vec![
        ("obj", json!({"o": "bj"}).into()),
        ("amo", "gus".into()),
        ("int", 1.into()),
    ]
}

/// Expected `all()` output for [`mixed_records`].
pub fn mixed_records_all() -> JsonValue {
    json!([{"amo": "gus"}, {"int": 1}, {"obj": {"o": "bj"}}])
}

// =============================================================================
// Store fixtures
// =============================================================================

pub fn memory_kv() -> TypedKv<MemoryStore> {
    TypedKv::in_memory()
}

/// A fjall-backed facade in a temporary directory. Keep the [`TempDir`]
/// alive for as long as the store is used.
pub fn fjall_kv() -> anyhow::Result<(TempDir, TypedKv<FjallStore>)> {
    let dir = TempDir::new()?;
    let kv = TypedKv::open_path(dir.path())?;
    Ok((dir, kv))
}

/// Insert every record of `records` through the facade.
pub fn seed<S: Store>(
    kv: &TypedKv<S>,
    records: Vec<(&str, typed_kv::Value)>,
) -> anyhow::Result<()> {
    for (key, value) in records {
        kv.set(key, value)?;
    }
    Ok(())
}
