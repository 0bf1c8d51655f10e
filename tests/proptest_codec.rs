//! Property-based tests for the value codec.
//!
//! These check which values survive `decode(encode(x))` unchanged and which
//! are reinterpreted because no type tag is stored.

use proptest::prelude::*;
use serde_json::{Map, Number, Value as JsonValue};
use typed_kv::codec::{decode_bytes, encode};
use typed_kv::{Decoded, TypedKv, Value};

fn roundtrip(value: &Value) -> Decoded {
    let bytes = encode(value).unwrap();
    decode_bytes(&bytes)
}

fn leaf() -> impl Strategy<Value = JsonValue> {
    prop_oneof![
        any::<i64>().prop_map(JsonValue::from),
        "[a-z ]{0,12}".prop_map(JsonValue::from),
        any::<bool>().prop_map(JsonValue::from),
        Just(JsonValue::Null),
    ]
}

fn json_tree() -> impl Strategy<Value = JsonValue> {
    leaf().prop_recursive(3, 32, 6, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..6).prop_map(JsonValue::Array),
            prop::collection::btree_map("[a-z]{1,8}", inner, 0..6)
                .prop_map(|m| JsonValue::Object(m.into_iter().collect::<Map<_, _>>())),
        ]
    })
}

fn object_root() -> impl Strategy<Value = JsonValue> {
    prop::collection::btree_map("[a-z]{1,8}", json_tree(), 0..6)
        .prop_map(|m| JsonValue::Object(m.into_iter().collect()))
}

proptest! {
    #[test]
    fn integers_roundtrip(n in any::<i64>()) {
        prop_assert_eq!(roundtrip(&Value::from(n)), Decoded::Number(n.into()));
    }

    #[test]
    fn unsigned_integers_roundtrip(n in any::<u64>()) {
        prop_assert_eq!(roundtrip(&Value::from(n)), Decoded::Number(n.into()));
    }

    #[test]
    fn finite_floats_roundtrip(f in any::<f64>().prop_filter("finite", |f| f.is_finite())) {
        let n = Number::from_f64(f).unwrap();
        prop_assert_eq!(roundtrip(&Value::Number(n)).as_f64(), Some(f));
    }

    #[test]
    fn objects_roundtrip(obj in object_root()) {
        prop_assert_eq!(roundtrip(&Value::Object(obj.clone())), Decoded::Object(obj));
    }

    #[test]
    fn arrays_roundtrip(items in prop::collection::vec(json_tree(), 0..8)) {
        let arr = JsonValue::Array(items);
        prop_assert_eq!(roundtrip(&Value::Object(arr.clone())), Decoded::Object(arr));
    }

    #[test]
    fn plain_text_roundtrips(t in "[a-zA-Z][a-zA-Z0-9 ,.!?-]{0,40}") {
        prop_assert_eq!(roundtrip(&Value::Text(t.clone())), Decoded::Text(t));
    }

    #[test]
    fn numeric_text_reads_as_number(n in any::<i64>()) {
        let decoded = roundtrip(&Value::Text(n.to_string()));
        prop_assert_eq!(decoded, Decoded::Number(n.into()));
    }

    #[test]
    fn any_text_decodes_to_something_equivalent(t in any::<String>()) {
        match roundtrip(&Value::Text(t.clone())) {
            Decoded::Text(s) => prop_assert_eq!(s, t),
            Decoded::Number(n) => {
                let literal = t.trim_matches(|c: char| c.is_ascii_whitespace());
                prop_assert_eq!(n.to_string().parse::<f64>().ok(), literal.parse::<f64>().ok());
            }
            Decoded::Object(v) => prop_assert_eq!(Some(v), serde_json::from_str::<JsonValue>(&t).ok()),
        }
    }

    #[test]
    fn padded_integer_text_reads_as_number(
        n in any::<i64>(),
        pad in "[ \t\r\n]{0,3}",
        zeros in "0{0,3}",
    ) {
        let digits = format!("{zeros}{}", n.unsigned_abs());
        let text = if n < 0 { format!("{pad}-{digits}{pad}") } else { format!("{pad}+{digits}{pad}") };
        prop_assert_eq!(roundtrip(&Value::Text(text)), Decoded::Number(n.into()));
    }

    #[test]
    fn valid_utf8_bytes_roundtrip(t in any::<String>()) {
        let kv = TypedKv::in_memory();
        kv.set_bytes("raw", t.as_bytes()).unwrap();
        prop_assert_eq!(kv.get_bytes("raw").unwrap(), Some(t.into_bytes()));
    }

    #[test]
    fn arbitrary_bytes_store_lossy_text(raw in prop::collection::vec(any::<u8>(), 0..64)) {
        let kv = TypedKv::in_memory();
        kv.set_bytes("raw", raw.clone()).unwrap();
        let stored = kv.get_bytes("raw").unwrap().unwrap();
        prop_assert_eq!(stored, String::from_utf8_lossy(&raw).into_owned().into_bytes());
    }

    #[test]
    fn has_all_any_match_individual_checks(
        present in prop::collection::btree_set("[a-d]", 0..4),
        queried in prop::collection::vec("[a-d]", 0..5),
    ) {
        let kv = TypedKv::in_memory();
        for key in &present {
            kv.set(key, "x").unwrap();
        }
        let each: Vec<bool> = queried.iter().map(|k| kv.has(k).unwrap()).collect();
        prop_assert_eq!(kv.has_all(&queried).unwrap(), each.iter().all(|b| *b));
        prop_assert_eq!(kv.has_any(&queried).unwrap(), each.iter().any(|b| *b));
    }
}
