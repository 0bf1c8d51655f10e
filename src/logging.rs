//! Conditional logging macros for library-level tracing.
//!
//! With the `logging` feature the macros forward to `tracing`; without it
//! they expand to nothing, so call sites cost nothing in builds that do not
//! install a subscriber.
//!
//! ```rust,ignore
//! use crate::logging::{debug, warn};
//!
//! debug!(key, len = bytes.len(), "stored value");
//! warn!(key, "rejected byte value passed to set");
//! ```

/// Very detailed internal operations (per-record work during materialization).
#[cfg(feature = "logging")]
macro_rules! log_trace {
    ($($arg:tt)*) => { tracing::trace!($($arg)*) }
}

#[cfg(not(feature = "logging"))]
macro_rules! log_trace {
    ($($arg:tt)*) => {};
}

/// Point operations against the store.
#[cfg(feature = "logging")]
macro_rules! log_debug {
    ($($arg:tt)*) => { tracing::debug!($($arg)*) }
}

#[cfg(not(feature = "logging"))]
macro_rules! log_debug {
    ($($arg:tt)*) => {};
}

/// Store lifecycle (open, clear).
#[cfg(feature = "logging")]
macro_rules! log_info {
    ($($arg:tt)*) => { tracing::info!($($arg)*) }
}

#[cfg(not(feature = "logging"))]
macro_rules! log_info {
    ($($arg:tt)*) => {};
}

/// Rejected arguments and other handled surprises.
#[cfg(feature = "logging")]
macro_rules! log_warn {
    ($($arg:tt)*) => { tracing::warn!($($arg)*) }
}

#[cfg(not(feature = "logging"))]
macro_rules! log_warn {
    ($($arg:tt)*) => {};
}

pub(crate) use log_debug as debug;
pub(crate) use log_info as info;
pub(crate) use log_trace as trace;
pub(crate) use log_warn as warn;
