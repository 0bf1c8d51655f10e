//! Error types for the store adapters.

use thiserror::Error;

/// Failures surfaced by a [`Store`](super::Store) implementation.
///
/// The facade treats every variant as fatal to the current operation and
/// passes it through unchanged.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[cfg(feature = "kv")]
    #[error("Fjall error: {0}")]
    Fjall(#[from] fjall::Error),

    #[error("Store lock poisoned: {0}")]
    Poisoned(String),
}

/// A [`Result`] type alias for store adapter operations.
pub type StoreResult<T> = std::result::Result<T, StoreError>;
