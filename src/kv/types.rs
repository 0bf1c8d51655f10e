//! Data types for the facade.

use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::codec::Decoded;

/// One record of the store with its decoded value.
///
/// Serializes as a single-entry map, `{"<key>": <value>}`.
#[derive(Debug, Clone, PartialEq)]
pub struct Entry {
    pub key: String,
    pub value: Decoded,
}

impl Entry {
    pub fn new(key: impl Into<String>, value: Decoded) -> Self {
        Self {
            key: key.into(),
            value,
        }
    }

    pub fn into_pair(self) -> (String, Decoded) {
        (self.key, self.value)
    }
}

impl Serialize for Entry {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(&self.key, &self.value)?;
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_entry_serializes_as_single_entry_map() {
        let entry = Entry::new("obj", Decoded::Object(json!({"o": "bj"})));
        assert_eq!(serde_json::to_value(&entry).unwrap(), json!({"obj": {"o": "bj"}}));

        let entry = Entry::new("int", Decoded::Number(1.into()));
        assert_eq!(serde_json::to_string(&entry).unwrap(), r#"{"int":1}"#);
    }
}
