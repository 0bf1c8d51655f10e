//! Typed facade over a [`Store`](crate::store::Store).
//!
//! [`TypedKv`] offers point operations that run values through the
//! [codec](crate::codec), plus bulk accessors that read the whole store and
//! apply iterator-style operations to the result.

mod bulk;
mod facade;
mod types;

pub use bulk::Entries;
pub use facade::TypedKv;
pub use types::Entry;
