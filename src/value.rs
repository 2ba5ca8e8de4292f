//! Attribute value representation

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// A single attribute value: an opaque byte sequence.
///
/// Values carry no identity of their own. Whether two values are "the same"
/// is always decided by the matching rule of the attribute type they are
/// stored under, never by this type's byte-literal `PartialEq`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AttributeValue(Vec<u8>);

impl AttributeValue {
    /// Create a value from raw bytes
    pub fn from_bytes(bytes: impl Into<Vec<u8>>) -> Self {
        Self(bytes.into())
    }

    /// Create a value from UTF-8 text
    pub fn from_text(text: impl Into<String>) -> Self {
        Self(text.into().into_bytes())
    }

    /// Get the raw bytes
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Get the value as a string, if it is valid UTF-8
    pub fn as_str(&self) -> Option<&str> {
        std::str::from_utf8(&self.0).ok()
    }

    /// Byte length of the value
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the value is the empty byte sequence
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for AttributeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.as_str() {
            Some(s) => f.write_str(s),
            None => write!(f, "{}", String::from_utf8_lossy(&self.0)),
        }
    }
}

impl From<&str> for AttributeValue {
    fn from(s: &str) -> Self {
        Self::from_text(s)
    }
}

impl From<String> for AttributeValue {
    fn from(s: String) -> Self {
        Self::from_text(s)
    }
}

impl From<&[u8]> for AttributeValue {
    fn from(b: &[u8]) -> Self {
        Self::from_bytes(b)
    }
}

impl From<Vec<u8>> for AttributeValue {
    fn from(b: Vec<u8>) -> Self {
        Self(b)
    }
}

// Values are text in the overwhelmingly common case, so serialize as a JSON
// string whenever the bytes are valid UTF-8 and fall back to a byte sequence
// otherwise. Deserialization accepts either form.
impl Serialize for AttributeValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.as_str() {
            Some(s) => serializer.serialize_str(s),
            None => serializer.serialize_bytes(&self.0),
        }
    }
}

struct ValueVisitor;

impl<'de> Visitor<'de> for ValueVisitor {
    type Value = AttributeValue;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a string or a byte sequence")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<AttributeValue, E> {
        Ok(AttributeValue::from_text(v))
    }

    fn visit_string<E: de::Error>(self, v: String) -> Result<AttributeValue, E> {
        Ok(AttributeValue::from_text(v))
    }

    fn visit_bytes<E: de::Error>(self, v: &[u8]) -> Result<AttributeValue, E> {
        Ok(AttributeValue::from_bytes(v))
    }

    fn visit_byte_buf<E: de::Error>(self, v: Vec<u8>) -> Result<AttributeValue, E> {
        Ok(AttributeValue(v))
    }

    fn visit_seq<A>(self, mut seq: A) -> Result<AttributeValue, A::Error>
    where
        A: de::SeqAccess<'de>,
    {
        let mut bytes = Vec::with_capacity(seq.size_hint().unwrap_or(0));
        while let Some(b) = seq.next_element::<u8>()? {
            bytes.push(b);
        }
        Ok(AttributeValue(bytes))
    }
}

impl<'de> Deserialize<'de> for AttributeValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(ValueVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_value_accessors() {
        let v = AttributeValue::from("Bob");
        assert_eq!(v.as_str(), Some("Bob"));
        assert_eq!(v.as_bytes(), b"Bob");
        assert_eq!(v.to_string(), "Bob");
        assert_eq!(v.len(), 3);
        assert!(!v.is_empty());
    }

    #[test]
    fn test_binary_value_has_no_str_form() {
        let v = AttributeValue::from_bytes(vec![0xff, 0xfe, 0x00]);
        assert_eq!(v.as_str(), None);
        assert_eq!(v.len(), 3);
    }

    #[test]
    fn test_serde_text_round_trip() {
        let v = AttributeValue::from("hello");
        let json = serde_json::to_string(&v).unwrap();
        assert_eq!(json, r#""hello""#);
        let back: AttributeValue = serde_json::from_str(&json).unwrap();
        assert_eq!(back, v);
    }

    #[test]
    fn test_serde_binary_round_trip() {
        let v = AttributeValue::from_bytes(vec![0xc0, 0xff]);
        let json = serde_json::to_string(&v).unwrap();
        let back: AttributeValue = serde_json::from_str(&json).unwrap();
        assert_eq!(back, v);
    }

    #[test]
    fn test_byte_equality_is_literal() {
        // "BOB" and "Bob" are different values; only a matching rule may
        // treat them as equal.
        assert_ne!(AttributeValue::from("BOB"), AttributeValue::from("Bob"));
    }
}
