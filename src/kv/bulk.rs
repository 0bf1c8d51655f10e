//! Bulk accessors.
//!
//! Everything here except [`TypedKv::entries`] first materializes the whole
//! store: one full read and one decode per record, on every call, with no
//! caching. The callbacks then run over the in-memory copy, so nothing they
//! do reorders or mutates the store. Writers running concurrently with the
//! read can leave the copy reflecting neither the old nor the new state.
//!
//! The first store failure aborts the operation and is returned.

use std::cmp::Ordering;

use rand::Rng;

use crate::codec::{self, Decoded};
use crate::error::Result;
use crate::logging::{debug, trace};
use crate::store::{Store, StoreIter};

use super::facade::TypedKv;
use super::types::Entry;

/// Lazy, ordered iterator over the decoded records of a store.
///
/// Produced by [`TypedKv::entries`]. Records are read from the store's own
/// ordered iteration one at a time instead of being collected up front.
pub struct Entries<'a> {
    inner: StoreIter<'a>,
}

impl Iterator for Entries<'_> {
    type Item = Result<Entry>;

    fn next(&mut self) -> Option<Self::Item> {
        let kv = self.inner.next()?;
        Some(kv.map_err(Into::into).map(|(k, v)| decode_entry(&k, &v)))
    }
}

fn decode_entry(key: &[u8], value: &[u8]) -> Entry {
    Entry::new(String::from_utf8_lossy(key), codec::decode_bytes(value))
}

impl<S: Store> TypedKv<S> {
    /// Stream decoded records in key order without materializing the store.
    pub fn entries(&self) -> Entries<'_> {
        Entries {
            inner: self.store().iter(),
        }
    }

    /// All decoded values in key order.
    pub fn array(&self) -> Result<Vec<Decoded>> {
        let values = self.store().values()?;
        debug!(count = values.len(), "materialized values");
        Ok(values.iter().map(|v| codec::decode_bytes(v)).collect())
    }

    /// All keys in key order.
    pub fn key_array(&self) -> Result<Vec<String>> {
        let keys = self.store().keys()?;
        debug!(count = keys.len(), "materialized keys");
        Ok(keys
            .iter()
            .map(|k| String::from_utf8_lossy(k).into_owned())
            .collect())
    }

    /// All records in key order, one [`Entry`] per record.
    pub fn all(&self) -> Result<Vec<Entry>> {
        let pairs = self.store().pairs()?;
        debug!(count = pairs.len(), "materialized records");
        Ok(pairs.iter().map(|(k, v)| decode_entry(k, v)).collect())
    }

    /// The value with the smallest key, or `None` on an empty store.
    pub fn first(&self) -> Result<Option<Decoded>> {
        Ok(self.array()?.into_iter().next())
    }

    /// The value with the largest key, or `None` on an empty store.
    pub fn last(&self) -> Result<Option<Decoded>> {
        Ok(self.array()?.pop())
    }

    /// A value picked uniformly at random, or `None` on an empty store.
    pub fn random(&self) -> Result<Option<Decoded>> {
        self.random_with(&mut rand::thread_rng())
    }

    /// Like [`random`](Self::random) with a caller-supplied generator.
    pub fn random_with<R: Rng>(&self, rng: &mut R) -> Result<Option<Decoded>> {
        let values = self.array()?;
        if values.is_empty() {
            return Ok(None);
        }
        let index = rng.gen_range(0..values.len());
        trace!(index, len = values.len(), "picked random value");
        Ok(values.into_iter().nth(index))
    }

    /// Values for which `predicate` returns `true`, in key order.
    pub fn filter<F>(&self, mut predicate: F) -> Result<Vec<Decoded>>
    where
        F: FnMut(&Decoded) -> bool,
    {
        Ok(self.array()?.into_iter().filter(|v| predicate(v)).collect())
    }

    /// Apply `f` to every value, in key order.
    pub fn map<T, F>(&self, f: F) -> Result<Vec<T>>
    where
        F: FnMut(Decoded) -> T,
    {
        Ok(self.array()?.into_iter().map(f).collect())
    }

    /// Fold every value into an accumulator, left to right in key order.
    pub fn reduce<T, F>(&self, init: T, f: F) -> Result<T>
    where
        F: FnMut(T, Decoded) -> T,
    {
        Ok(self.array()?.into_iter().fold(init, f))
    }

    /// A sorted copy of the values, ordered by their text rendering.
    ///
    /// Text compares by its content, numbers by their decimal form and
    /// objects by their compact JSON, so `10` sorts before `9`.
    pub fn sort(&self) -> Result<Vec<Decoded>> {
        let mut keyed: Vec<(String, Decoded)> = self
            .array()?
            .into_iter()
            .map(|v| (v.to_string(), v))
            .collect();
        keyed.sort_by(|a, b| a.0.cmp(&b.0));
        Ok(keyed.into_iter().map(|(_, v)| v).collect())
    }

    /// A copy of the values sorted with `compare`. The sort is stable.
    pub fn sort_by<F>(&self, compare: F) -> Result<Vec<Decoded>>
    where
        F: FnMut(&Decoded, &Decoded) -> Ordering,
    {
        let mut values = self.array()?;
        values.sort_by(compare);
        Ok(values)
    }

    /// `true` if `predicate` holds for every value. `true` on an empty store.
    pub fn every<F>(&self, predicate: F) -> Result<bool>
    where
        F: FnMut(&Decoded) -> bool,
    {
        Ok(self.array()?.iter().all(predicate))
    }

    /// `true` if `predicate` holds for at least one value.
    pub fn some<F>(&self, predicate: F) -> Result<bool>
    where
        F: FnMut(&Decoded) -> bool,
    {
        Ok(self.array()?.iter().any(predicate))
    }

    /// Call `f` on every value, in key order.
    pub fn for_each<F>(&self, f: F) -> Result<()>
    where
        F: FnMut(Decoded),
    {
        self.array()?.into_iter().for_each(f);
        Ok(())
    }
}
