//! Value codec: logical values to stored bytes and back.
//!
//! The store keeps no type tag next to a record, so [`decode`] picks a type
//! from the content alone: a JSON object or array first, then a complete
//! numeric literal (surrounding ASCII whitespace ignored), then text. Text
//! that happens to look like a number or a JSON document therefore reads back
//! as that richer type, e.g. the text `"42"` or `" 007"` is decoded as a
//! number.
//!
//! Raw byte values are stored after a lossy UTF-8 conversion: sequences that
//! are not valid UTF-8 are replaced with U+FFFD and cannot be recovered.

use std::fmt;

use serde::Serialize;
use serde_json::{Number, Value as JsonValue};

/// A logical value as supplied by a caller.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// UTF-8 text, stored verbatim.
    Text(String),
    /// A finite number, stored as its decimal text.
    Number(Number),
    /// A JSON object or array, stored as compact JSON.
    Object(JsonValue),
    /// An arbitrary byte sequence, stored through a lossy UTF-8 conversion.
    Bytes(Vec<u8>),
}

impl Value {
    /// Build a number value from a float. Returns `None` for NaN and infinities.
    pub fn number(n: f64) -> Option<Self> {
        Number::from_f64(n).map(Self::Number)
    }

    /// Short name of the variant, used in error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Text(_) => "text",
            Self::Number(_) => "number",
            Self::Object(_) => "object",
            Self::Bytes(_) => "bytes",
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

macro_rules! impl_from_integer {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Value {
                fn from(n: $t) -> Self {
                    Self::Number(Number::from(n))
                }
            }
        )*
    };
}

impl_from_integer!(i8, i16, i32, i64, u8, u16, u32, u64);

impl From<Number> for Value {
    fn from(n: Number) -> Self {
        Self::Number(n)
    }
}

impl From<JsonValue> for Value {
    fn from(v: JsonValue) -> Self {
        Self::Object(v)
    }
}

impl From<Vec<u8>> for Value {
    fn from(b: Vec<u8>) -> Self {
        Self::Bytes(b)
    }
}

impl From<&[u8]> for Value {
    fn from(b: &[u8]) -> Self {
        Self::Bytes(b.to_vec())
    }
}

/// The typed result of decoding stored bytes. Never a byte sequence.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Decoded {
    /// Content parsed as a JSON object or array.
    Object(JsonValue),
    /// Content was a complete numeric literal.
    Number(Number),
    /// Anything else.
    Text(String),
}

impl Decoded {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<&Number> {
        match self {
            Self::Number(n) => Some(n),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        self.as_number().and_then(Number::as_f64)
    }

    pub fn as_i64(&self) -> Option<i64> {
        self.as_number().and_then(Number::as_i64)
    }

    pub fn as_object(&self) -> Option<&JsonValue> {
        match self {
            Self::Object(v) => Some(v),
            _ => None,
        }
    }

    pub fn is_text(&self) -> bool {
        matches!(self, Self::Text(_))
    }

    pub fn is_number(&self) -> bool {
        matches!(self, Self::Number(_))
    }

    pub fn is_object(&self) -> bool {
        matches!(self, Self::Object(_))
    }
}

/// Text is rendered raw, numbers in decimal and objects as compact JSON.
impl fmt::Display for Decoded {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(s) => f.write_str(s),
            Self::Number(n) => write!(f, "{}", n),
            Self::Object(v) => write!(f, "{}", v),
        }
    }
}

impl From<Decoded> for JsonValue {
    fn from(d: Decoded) -> Self {
        match d {
            Decoded::Object(v) => v,
            Decoded::Number(n) => JsonValue::Number(n),
            Decoded::Text(s) => JsonValue::String(s),
        }
    }
}

impl From<Decoded> for Value {
    fn from(d: Decoded) -> Self {
        match d {
            Decoded::Object(v) => Value::Object(v),
            Decoded::Number(n) => Value::Number(n),
            Decoded::Text(s) => Value::Text(s),
        }
    }
}

/// Encode a logical value into the bytes handed to the store.
///
/// Only fails if a structured value cannot be serialized.
pub fn encode(value: &Value) -> Result<Vec<u8>, serde_json::Error> {
    match value {
        Value::Text(s) => Ok(s.as_bytes().to_vec()),
        Value::Number(n) => Ok(n.to_string().into_bytes()),
        Value::Object(v) => serde_json::to_vec(v),
        Value::Bytes(b) => Ok(String::from_utf8_lossy(b).into_owned().into_bytes()),
    }
}

/// Decode stored bytes. Absent bytes decode to `None`.
pub fn decode(bytes: Option<&[u8]>) -> Option<Decoded> {
    bytes.map(decode_bytes)
}

/// Decode bytes that are known to be present.
pub fn decode_bytes(bytes: &[u8]) -> Decoded {
    if let Some(structured) = parse_structured(bytes) {
        return Decoded::Object(structured);
    }
    if let Some(n) = parse_number(bytes) {
        return Decoded::Number(n);
    }
    Decoded::Text(match String::from_utf8(bytes.to_vec()) {
        Ok(s) => s,
        Err(e) => String::from_utf8_lossy(e.as_bytes()).into_owned(),
    })
}

/// JSON scalars at the root do not count as structured.
fn parse_structured(bytes: &[u8]) -> Option<JsonValue> {
    let first = bytes.iter().find(|b| !b.is_ascii_whitespace())?;
    if *first != b'{' && *first != b'[' {
        return None;
    }
    match serde_json::from_slice(bytes) {
        Ok(v @ (JsonValue::Object(_) | JsonValue::Array(_))) => Some(v),
        _ => None,
    }
}

fn parse_number(bytes: &[u8]) -> Option<Number> {
    let text = std::str::from_utf8(bytes).ok()?;
    let literal = text.trim_matches(|c: char| c.is_ascii_whitespace());
    if !is_numeric_literal(literal.as_bytes()) {
        return None;
    }
    if let Ok(n) = literal.parse::<i64>() {
        return Some(n.into());
    }
    if let Ok(n) = literal.parse::<u64>() {
        return Some(n.into());
    }
    // Literals outside the f64 range parse to infinity and fall through to text.
    literal.parse::<f64>().ok().and_then(Number::from_f64)
}

/// `[+-]?([0-9]+(\.[0-9]*)?|\.[0-9]+)([eE][+-]?[0-9]+)?` over the whole input.
///
/// Leading zeros and a bare leading or trailing `.` are accepted; `inf`,
/// `NaN`, hex and digit separators are not.
fn is_numeric_literal(bytes: &[u8]) -> bool {
    let mut rest = skip_sign(bytes);

    let int_tail = skip_digits(rest);
    let int_digits = rest.len() - int_tail.len();
    rest = int_tail;

    let mut frac_digits = 0;
    if let Some(tail) = rest.strip_prefix(b".") {
        let after = skip_digits(tail);
        frac_digits = tail.len() - after.len();
        rest = after;
    }
    if int_digits == 0 && frac_digits == 0 {
        return false;
    }

    if let Some((b'e' | b'E', tail)) = rest.split_first() {
        let tail = skip_sign(tail);
        let after = skip_digits(tail);
        if after.len() == tail.len() {
            return false;
        }
        rest = after;
    }

    rest.is_empty()
}

fn skip_sign(bytes: &[u8]) -> &[u8] {
    match bytes.split_first() {
        Some((b'+' | b'-', tail)) => tail,
        _ => bytes,
    }
}

fn skip_digits(bytes: &[u8]) -> &[u8] {
    let n = bytes.iter().take_while(|b| b.is_ascii_digit()).count();
    bytes.get(n..).unwrap_or_default()
}
