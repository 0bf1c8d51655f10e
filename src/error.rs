//! Unified error type for the typed-kv library.
//!
//! Store adapter failures keep their own [`StoreError`] type and are wrapped
//! unmodified; everything the facade rejects locally is an
//! [`Error::InvalidArgument`]. A missing key is never an error: lookups
//! return `Ok(None)`.

use thiserror::Error;

use crate::config::ConfigError;
use crate::store::StoreError;

/// Unified error type for all typed-kv operations.
///
/// # Example
///
/// ```ignore
/// use typed_kv::{Result, TypedKv};
///
/// fn bump(kv: &TypedKv) -> Result<()> {
///     kv.set("visits", 1)?;
///     Ok(())
/// }
/// ```
#[derive(Error, Debug)]
pub enum Error {
    /// The store adapter failed. Propagated as-is, never retried.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// A caller passed a key or value the operation does not accept.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// A structured value could not be serialized.
    #[error("JSON encoding error: {0}")]
    Json(#[from] serde_json::Error),

    /// The configuration file could not be loaded.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

/// A [`Result`] type alias using the unified [`Error`] type.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create an invalid-argument error from a message.
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }

    /// Returns `true` if the store adapter failed.
    pub fn is_store(&self) -> bool {
        matches!(self, Self::Store(_))
    }

    /// Returns `true` if the caller passed an unacceptable key or value.
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, Self::InvalidArgument(_))
    }
}
