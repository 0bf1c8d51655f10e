//! Point operations of the typed facade.

use crate::codec::{self, Decoded, Value};
use crate::error::{Error, Result};
use crate::logging::{debug, trace, warn};
use crate::store::{MemoryStore, Store};

#[cfg(feature = "kv")]
use crate::config::Config;
#[cfg(feature = "kv")]
use crate::logging::info;
#[cfg(feature = "kv")]
use crate::store::FjallStore;

/// Typed access to a byte-level [`Store`].
///
/// The facade adds no locking of its own. Operations that make more than one
/// store call ([`remove`](Self::remove), [`has_all`](Self::has_all),
/// [`has_any`](Self::has_any) and every bulk accessor) are not atomic and
/// can observe concurrent writers part-way through.
///
/// # Example
///
/// ```ignore
/// use typed_kv::{Decoded, TypedKv};
/// use serde_json::json;
///
/// let kv = TypedKv::in_memory();
/// kv.set("amo", "gus")?;
/// kv.set("int", 1)?;
/// kv.set("obj", json!({"o": "bj"}))?;
///
/// assert_eq!(kv.get("int")?, Some(Decoded::Number(1.into())));
/// ```
pub struct TypedKv<S = Box<dyn Store>> {
    store: S,
    durable: bool,
}

impl TypedKv<MemoryStore> {
    /// A facade over a fresh [`MemoryStore`].
    pub fn in_memory() -> Self {
        Self::new(MemoryStore::new())
    }
}

#[cfg(feature = "kv")]
impl TypedKv<FjallStore> {
    /// Open the fjall store described by `config`.
    pub fn open(config: &Config) -> Result<Self> {
        let store = FjallStore::open_with(&config.store)?;
        info!(durable = config.store.durable, "typed facade ready");
        Ok(Self::new(store).with_durable(config.store.durable))
    }

    /// Open a fjall store at `path` with default settings.
    pub fn open_path(path: impl AsRef<std::path::Path>) -> Result<Self> {
        Ok(Self::new(FjallStore::open(path.as_ref())?))
    }
}

impl<S: Store> TypedKv<S> {
    /// Wrap a store. Writes are flushed by default.
    pub fn new(store: S) -> Self {
        Self {
            store,
            durable: true,
        }
    }

    /// Choose whether every write is followed by [`Store::flush`].
    pub fn with_durable(mut self, durable: bool) -> Self {
        self.durable = durable;
        self
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_inner(self) -> S {
        self.store
    }

    /// Get the decoded value stored under `key`, or `None` if there is none.
    ///
    /// Text that parses as JSON or as a number comes back as that type.
    pub fn get(&self, key: &str) -> Result<Option<Decoded>> {
        let key = check_key(key)?;
        let bytes = self.store.get(key)?;
        trace!(found = bytes.is_some(), "get");
        Ok(codec::decode(bytes.as_deref()))
    }

    /// Get the stored bytes verbatim, without decoding.
    pub fn get_bytes(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let key = check_key(key)?;
        Ok(self.store.get(key)?)
    }

    /// Store a text, number or structured value and return it unchanged.
    ///
    /// Byte values must go through [`set_bytes`](Self::set_bytes); a
    /// structured value must have an object or array at its root.
    pub fn set(&self, key: &str, value: impl Into<Value>) -> Result<Value> {
        let raw_key = check_key(key)?;
        let value = value.into();
        match &value {
            Value::Text(_) | Value::Number(_) => {}
            Value::Object(v) if v.is_object() || v.is_array() => {}
            Value::Object(_) => {
                warn!(key, "rejected structured value with a scalar root");
                return Err(Error::invalid_argument(
                    "structured value must be an object or an array",
                ));
            }
            Value::Bytes(_) => {
                warn!(key, "rejected byte value passed to set");
                return Err(Error::invalid_argument("byte values must be stored with set_bytes"));
            }
        }

        let bytes = codec::encode(&value)?;
        debug!(key, kind = value.kind(), len = bytes.len(), "set");
        self.write(raw_key, &bytes)?;
        Ok(value)
    }

    /// Store a byte sequence.
    ///
    /// The bytes are converted to UTF-8 text before storage; invalid
    /// sequences are replaced with U+FFFD, so only valid UTF-8 reads back
    /// unchanged through [`get_bytes`](Self::get_bytes).
    pub fn set_bytes(&self, key: &str, value: impl Into<Value>) -> Result<()> {
        let raw_key = check_key(key)?;
        let value = value.into();
        if !matches!(value, Value::Bytes(_)) {
            warn!(key, kind = value.kind(), "rejected non-byte value passed to set_bytes");
            return Err(Error::invalid_argument(format!(
                "expected a byte sequence, got {}",
                value.kind()
            )));
        }

        let bytes = codec::encode(&value)?;
        debug!(key, len = bytes.len(), "set_bytes");
        self.write(raw_key, &bytes)
    }

    pub fn has(&self, key: &str) -> Result<bool> {
        let key = check_key(key)?;
        Ok(self.store.contains_key(key)?)
    }

    /// `true` if every key exists. Keys are checked one by one, stopping at
    /// the first missing key; the result is not a snapshot.
    pub fn has_all<I, K>(&self, keys: I) -> Result<bool>
    where
        I: IntoIterator<Item = K>,
        K: AsRef<str>,
    {
        for key in keys {
            if !self.has(key.as_ref())? {
                return Ok(false);
            }
        }
        Ok(true)
    }

    /// `true` if at least one key exists. Same caveats as [`has_all`](Self::has_all).
    pub fn has_any<I, K>(&self, keys: I) -> Result<bool>
    where
        I: IntoIterator<Item = K>,
        K: AsRef<str>,
    {
        for key in keys {
            if self.has(key.as_ref())? {
                return Ok(true);
            }
        }
        Ok(false)
    }

    /// Delete `key`, returning whether it existed.
    ///
    /// Checks for the key and then deletes it. A concurrent writer can act
    /// between the two steps.
    pub fn remove(&self, key: &str) -> Result<bool> {
        if !self.has(key)? {
            return Ok(false);
        }
        let raw_key = check_key(key)?;
        self.store.remove(raw_key)?;
        debug!(key, "removed");
        self.flush_if_durable()?;
        Ok(true)
    }

    /// Delete every record.
    pub fn clear(&self) -> Result<()> {
        self.store.clear()?;
        debug!("cleared store");
        self.flush_if_durable()
    }

    /// Number of records in the store.
    pub fn size(&self) -> Result<usize> {
        Ok(self.store.len()?)
    }

    fn write(&self, key: &[u8], bytes: &[u8]) -> Result<()> {
        self.store.insert(key, bytes)?;
        self.flush_if_durable()
    }

    fn flush_if_durable(&self) -> Result<()> {
        if self.durable {
            self.store.flush()?;
        }
        Ok(())
    }
}

fn check_key(key: &str) -> Result<&[u8]> {
    if key.is_empty() {
        return Err(Error::invalid_argument("key must not be empty"));
    }
    Ok(key.as_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_set_returns_original_value() {
        let kv = TypedKv::in_memory();
        assert_eq!(kv.set("n", 7).unwrap(), Value::from(7));
        assert_eq!(kv.set("t", "hi").unwrap(), Value::Text("hi".into()));
    }

    #[test]
    fn test_get_typed_values() {
        let kv = TypedKv::in_memory();
        kv.set("hello", "there").unwrap();
        kv.set("im a number", 1).unwrap();
        kv.set("hello, object", json!({"hello": "world"})).unwrap();

        assert_eq!(kv.get("hello").unwrap(), Some(Decoded::Text("there".into())));
        assert_eq!(kv.get("im a number").unwrap(), Some(Decoded::Number(1.into())));
        assert_eq!(
            kv.get("hello, object").unwrap(),
            Some(Decoded::Object(json!({"hello": "world"})))
        );
        assert_eq!(kv.get("i dont exist").unwrap(), None);
    }

    #[test]
    fn test_numeric_text_reads_back_as_number() {
        let kv = TypedKv::in_memory();
        kv.set("answer", "42").unwrap();
        assert_eq!(kv.get("answer").unwrap(), Some(Decoded::Number(42.into())));
    }

    #[test]
    fn test_set_rejects_bytes() {
        let kv = TypedKv::in_memory();
        let err = kv.set("b", b"raw".to_vec()).unwrap_err();
        assert!(err.is_invalid_argument());
        assert!(!kv.has("b").unwrap());
    }

    #[test]
    fn test_set_rejects_scalar_json() {
        let kv = TypedKv::in_memory();
        assert!(kv.set("s", json!(true)).unwrap_err().is_invalid_argument());
        assert!(kv.set("s", json!(null)).unwrap_err().is_invalid_argument());
    }

    #[test]
    fn test_set_bytes_rejects_other_kinds() {
        let kv = TypedKv::in_memory();
        assert!(kv.set_bytes("k", "text").unwrap_err().is_invalid_argument());
        assert!(kv.set_bytes("k", 5).unwrap_err().is_invalid_argument());
        assert!(kv.set_bytes("k", json!({})).unwrap_err().is_invalid_argument());
        assert_eq!(kv.size().unwrap(), 0);
    }

    #[test]
    fn test_bytes_roundtrip() {
        let kv = TypedKv::in_memory();
        kv.set_bytes("im a buffer", b"hello there!".as_slice()).unwrap();
        assert_eq!(
            kv.get_bytes("im a buffer").unwrap(),
            Some(b"hello there!".to_vec())
        );
    }

    #[test]
    fn test_invalid_utf8_bytes_are_lossy() {
        let kv = TypedKv::in_memory();
        kv.set_bytes("bin", vec![0xff, 0xfe, b'!']).unwrap();
        assert_eq!(
            kv.get_bytes("bin").unwrap(),
            Some("\u{fffd}\u{fffd}!".as_bytes().to_vec())
        );
    }

    #[test]
    fn test_empty_key_is_rejected() {
        let kv = TypedKv::in_memory();
        assert!(kv.set("", "v").unwrap_err().is_invalid_argument());
        assert!(kv.get("").unwrap_err().is_invalid_argument());
    }

    #[test]
    fn test_remove_true_once() {
        let kv = TypedKv::in_memory();
        assert!(!kv.remove("i dont exist").unwrap());
        kv.set("k", "v").unwrap();
        assert!(kv.remove("k").unwrap());
        assert!(!kv.has("k").unwrap());
        assert!(!kv.remove("k").unwrap());
    }

    #[test]
    fn test_has_all_and_has_any() {
        let kv = TypedKv::in_memory();
        kv.set("hi", "hello").unwrap();
        kv.set("hello", "hi").unwrap();

        assert!(kv.has_all(["hi", "hello"]).unwrap());
        assert!(!kv.has_all(["hi", "hello", "no"]).unwrap());
        assert!(kv.has_all(Vec::<String>::new()).unwrap());

        assert!(kv.has_any(["no", "hi"]).unwrap());
        assert!(!kv.has_any(["no", "nope"]).unwrap());
        assert!(!kv.has_any(Vec::<&str>::new()).unwrap());
    }

    #[test]
    fn test_clear() {
        let kv = TypedKv::in_memory();
        kv.set("a", "bn").unwrap();
        kv.clear().unwrap();
        assert_eq!(kv.get("a").unwrap(), None);
        assert_eq!(kv.size().unwrap(), 0);
    }

    #[test]
    fn test_overwrite_keeps_one_record() {
        let kv = TypedKv::in_memory();
        kv.set("k", "first").unwrap();
        kv.set("k", 2).unwrap();
        assert_eq!(kv.size().unwrap(), 1);
        assert_eq!(kv.get("k").unwrap(), Some(Decoded::Number(2.into())));
    }
}
