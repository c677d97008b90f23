//! Array keys.
//!
//! A key is either an integer or a string. Strings holding the canonical
//! decimal form of an `i64` are normalized to integers on construction, so
//! `Key::from("7")` and `Key::from(7)` address the same entry.

use std::fmt;

use crate::error::{ArrayError, Result};
use crate::value::Value;

/// A key of an [`OrderedArray`](crate::OrderedArray).
///
/// # Examples
///
/// ```rust
/// use fluent_array::Key;
///
/// assert_eq!(Key::from("42"), Key::Int(42));
/// assert_eq!(Key::from("042"), Key::Str("042".to_string()));
/// assert_eq!(Key::from("-0"), Key::Str("-0".to_string()));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Key {
    /// An integer key.
    Int(i64),
    /// A string key that is not a canonical integer.
    Str(String),
}

impl Key {
    /// Builds a key from a string, normalizing canonical integers.
    pub fn normalize(text: &str) -> Self {
        parse_canonical_integer(text).map_or_else(|| Self::Str(text.to_string()), Self::Int)
    }

    /// Returns the integer value if this is an integer key.
    pub const fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(value) => Some(*value),
            Self::Str(_) => None,
        }
    }

    /// Returns the string value if this is a string key.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Int(_) => None,
            Self::Str(value) => Some(value),
        }
    }

    /// Returns `true` for integer keys.
    pub const fn is_int(&self) -> bool {
        matches!(self, Self::Int(_))
    }

    /// Converts an integer or string value into a key.
    ///
    /// Any other value yields `None`. This is the rule used by operations
    /// that only accept "key-like" values, such as `flip` and `count_values`.
    pub fn from_scalar(value: &Value) -> Option<Self> {
        match value {
            Value::Int(integer) => Some(Self::Int(*integer)),
            Value::Str(text) => Some(Self::normalize(text)),
            _ => None,
        }
    }

    /// Converts any scalar value into a key using offset coercion rules.
    ///
    /// `null` becomes `""`, booleans become `0`/`1`, floats are truncated.
    ///
    /// # Errors
    ///
    /// Returns [`ArrayError::IllegalKey`] for nested arrays.
    #[allow(clippy::cast_possible_truncation)]
    pub fn from_value(value: &Value, operation: &'static str) -> Result<Self> {
        match value {
            Value::Null => Ok(Self::Str(String::new())),
            Value::Bool(flag) => Ok(Self::Int(i64::from(*flag))),
            Value::Int(integer) => Ok(Self::Int(*integer)),
            Value::Float(float) => Ok(Self::Int(*float as i64)),
            Value::Str(text) => Ok(Self::normalize(text)),
            Value::Array(_) => Err(ArrayError::IllegalKey {
                operation,
                found: value.type_name(),
            }),
        }
    }
}

fn parse_canonical_integer(text: &str) -> Option<i64> {
    let digits = text.strip_prefix('-').unwrap_or(text);
    let mut bytes = digits.bytes();
    let first = bytes.next()?;
    let canonical = match first {
        b'0' => digits.len() == 1 && digits.len() == text.len(),
        b'1'..=b'9' => bytes.all(|byte| byte.is_ascii_digit()),
        _ => false,
    };
    if canonical { text.parse().ok() } else { None }
}

impl fmt::Display for Key {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(value) => write!(formatter, "{value}"),
            Self::Str(value) => formatter.write_str(value),
        }
    }
}

impl From<i64> for Key {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<i32> for Key {
    fn from(value: i32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<u32> for Key {
    fn from(value: u32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<usize> for Key {
    fn from(value: usize) -> Self {
        Self::Int(i64::try_from(value).unwrap_or(i64::MAX))
    }
}

impl From<bool> for Key {
    fn from(value: bool) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<&str> for Key {
    fn from(value: &str) -> Self {
        Self::normalize(value)
    }
}

impl From<String> for Key {
    fn from(value: String) -> Self {
        match parse_canonical_integer(&value) {
            Some(integer) => Self::Int(integer),
            None => Self::Str(value),
        }
    }
}

impl From<&Key> for Key {
    fn from(value: &Key) -> Self {
        value.clone()
    }
}

// =============================================================================
// Serde Support
// =============================================================================

#[cfg(feature = "serde")]
impl serde::Serialize for Key {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        match self {
            Self::Int(value) => serializer.serialize_i64(*value),
            Self::Str(value) => serializer.serialize_str(value),
        }
    }
}

#[cfg(feature = "serde")]
struct KeyVisitor;

#[cfg(feature = "serde")]
impl serde::de::Visitor<'_> for KeyVisitor {
    type Value = Key;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("an integer or a string key")
    }

    fn visit_i64<E: serde::de::Error>(self, value: i64) -> std::result::Result<Key, E> {
        Ok(Key::Int(value))
    }

    fn visit_u64<E: serde::de::Error>(self, value: u64) -> std::result::Result<Key, E> {
        i64::try_from(value)
            .map(Key::Int)
            .or_else(|_| Ok(Key::Str(value.to_string())))
    }

    fn visit_str<E: serde::de::Error>(self, value: &str) -> std::result::Result<Key, E> {
        Ok(Key::normalize(value))
    }

    fn visit_string<E: serde::de::Error>(self, value: String) -> std::result::Result<Key, E> {
        Ok(Key::from(value))
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Key {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        deserializer.deserialize_any(KeyVisitor)
    }
}
