//! Insertion-ordered, unique-keyed map.
//!
//! [`OrderedArray`] is the plain data structure held by a
//! [`Container`](crate::Container). It keeps entries in a `Vec` for
//! positional access and iteration, and a `FxHashMap` from key to position
//! for constant-time lookup.
//!
//! # Next Free Index
//!
//! Appending with [`OrderedArray::push`] uses the next free integer index:
//! one more than the largest integer key ever inserted, or `0` for an array
//! without integer keys.
//!
//! # Examples
//!
//! ```rust
//! use fluent_array::{array, Key, OrderedArray, Value};
//!
//! let mut fruits = array!["d" => "lemon", "a" => "orange"];
//! fruits.push("banana");
//! assert_eq!(fruits.get(&Key::Int(0)), Some(&Value::from("banana")));
//!
//! let keys: Vec<String> = fruits.keys().map(ToString::to_string).collect();
//! assert_eq!(keys, vec!["d", "a", "0"]);
//! ```

use std::fmt;

use rustc_hash::FxHashMap;

use crate::key::Key;
use crate::value::Value;

/// An ordered mapping from [`Key`] to [`Value`].
#[derive(Clone, Default)]
pub struct OrderedArray {
    entries: Vec<(Key, Value)>,
    index: FxHashMap<Key, usize>,
    next_index: Option<i64>,
}

impl OrderedArray {
    /// The largest number of entries that a constructor or commit operation
    /// sized by its arguments (`range`, `fill`, `pad`) will produce.
    pub const MAX_LEN: usize = 1 << 30;

    /// Creates a new empty array.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty array with room for `capacity` entries.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
            index: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
            next_index: None,
        }
    }

    /// Builds a list (keys `0..n`) from values.
    pub fn from_values<I, V>(values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        let mut array = Self::new();
        for value in values {
            array.push(value);
        }
        array
    }

    /// Builds an array from entries, renumbering integer keys from zero.
    ///
    /// String keys are kept; a repeated string key overwrites the earlier
    /// value in place.
    pub fn renumbered<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (Key, Value)>,
    {
        let mut array = Self::new();
        for (key, value) in entries {
            match key {
                Key::Int(_) => {
                    array.push(value);
                }
                Key::Str(_) => {
                    array.insert(key, value);
                }
            }
        }
        array
    }

    /// Returns the number of entries.
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the array holds no entries.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the value stored under `key`.
    pub fn get(&self, key: &Key) -> Option<&Value> {
        self.index
            .get(key)
            .map(|&position| &self.entries[position].1)
    }

    /// Returns the value stored under `key` mutably.
    pub fn get_mut(&mut self, key: &Key) -> Option<&mut Value> {
        self.index
            .get(key)
            .map(|&position| &mut self.entries[position].1)
    }

    /// Returns `true` if `key` is present.
    pub fn contains_key(&self, key: &Key) -> bool {
        self.index.contains_key(key)
    }

    /// Returns the position of `key` in iteration order.
    pub fn position_of(&self, key: &Key) -> Option<usize> {
        self.index.get(key).copied()
    }

    /// Returns the entry at `position` in iteration order.
    pub fn entry_at(&self, position: usize) -> Option<(&Key, &Value)> {
        self.entries.get(position).map(|(key, value)| (key, value))
    }

    /// Returns the first entry.
    pub fn first(&self) -> Option<(&Key, &Value)> {
        self.entry_at(0)
    }

    /// Returns the last entry.
    pub fn last(&self) -> Option<(&Key, &Value)> {
        self.entries.last().map(|(key, value)| (key, value))
    }

    /// The key the next [`push`](Self::push) will use.
    pub fn next_index(&self) -> i64 {
        self.next_index.unwrap_or(0)
    }

    /// Inserts or overwrites the value under `key`.
    ///
    /// Overwriting keeps the entry's position. Returns the previous value.
    pub fn insert(&mut self, key: impl Into<Key>, value: impl Into<Value>) -> Option<Value> {
        let key = key.into();
        let value = value.into();
        if let Some(&position) = self.index.get(&key) {
            return Some(std::mem::replace(&mut self.entries[position].1, value));
        }
        if let Key::Int(integer) = key {
            let following = integer.saturating_add(1);
            if self.next_index.is_none_or(|next| following > next) {
                self.next_index = Some(following);
            }
        }
        self.index.insert(key.clone(), self.entries.len());
        self.entries.push((key, value));
        None
    }

    /// Appends a value under the next free integer index and returns its key.
    pub fn push(&mut self, value: impl Into<Value>) -> Key {
        let key = Key::Int(self.next_index());
        self.insert(key.clone(), value);
        key
    }

    /// Removes and returns the last entry.
    ///
    /// If the removed key was the most recently allocated integer index,
    /// that index becomes free again.
    pub fn pop(&mut self) -> Option<(Key, Value)> {
        let (key, value) = self.entries.pop()?;
        self.index.remove(&key);
        if let (Key::Int(integer), Some(next)) = (&key, self.next_index) {
            if integer.saturating_add(1) == next {
                self.next_index = if self.entries.is_empty() && *integer == 0 {
                    None
                } else {
                    Some(*integer)
                };
            }
        }
        Some((key, value))
    }

    /// Removes the entry under `key`, shifting later entries forward.
    pub fn remove(&mut self, key: &Key) -> Option<Value> {
        let position = self.index.remove(key)?;
        let (_, value) = self.entries.remove(position);
        for (shifted, (later_key, _)) in self.entries.iter().enumerate().skip(position) {
            self.index.insert(later_key.clone(), shifted);
        }
        Some(value)
    }

    /// Iterates over entries in order.
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            inner: self.entries.iter(),
        }
    }

    /// Iterates over entries in order with mutable values.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (&Key, &mut Value)> {
        self.entries.iter_mut().map(|(key, value)| (&*key, value))
    }

    /// Iterates over keys in order.
    pub fn keys(&self) -> impl Iterator<Item = &Key> {
        self.entries.iter().map(|(key, _)| key)
    }

    /// Iterates over values in order.
    pub fn values(&self) -> impl Iterator<Item = &Value> {
        self.entries.iter().map(|(_, value)| value)
    }

    /// Returns `true` if the keys are exactly `0, 1, 2, ...` in order.
    pub fn is_list(&self) -> bool {
        self.keys()
            .zip(0_i64..)
            .all(|(key, expected)| key.as_int() == Some(expected))
    }

    /// Consumes the array, returning its entries in order.
    pub fn into_entries(self) -> Vec<(Key, Value)> {
        self.entries
    }
}

/// Borrowing iterator over the entries of an [`OrderedArray`].
pub struct Iter<'a> {
    inner: std::slice::Iter<'a, (Key, Value)>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = (&'a Key, &'a Value);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(key, value)| (key, value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl DoubleEndedIterator for Iter<'_> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().map(|(key, value)| (key, value))
    }
}

impl ExactSizeIterator for Iter<'_> {}

impl<'a> IntoIterator for &'a OrderedArray {
    type Item = (&'a Key, &'a Value);
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl IntoIterator for OrderedArray {
    type Item = (Key, Value);
    type IntoIter = std::vec::IntoIter<(Key, Value)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

/// Entries compare in order; two arrays holding the same entries in a
/// different order are not equal.
impl PartialEq for OrderedArray {
    fn eq(&self, other: &Self) -> bool {
        self.entries == other.entries
    }
}

impl<K: Into<Key>, V: Into<Value>> FromIterator<(K, V)> for OrderedArray {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut array = Self::new();
        for (key, value) in iter {
            array.insert(key, value);
        }
        array
    }
}

impl FromIterator<Value> for OrderedArray {
    fn from_iter<I: IntoIterator<Item = Value>>(iter: I) -> Self {
        Self::from_values(iter)
    }
}

impl<K: Into<Key>, V: Into<Value>> Extend<(K, V)> for OrderedArray {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

impl<T: Into<Value>> From<Vec<T>> for OrderedArray {
    fn from(values: Vec<T>) -> Self {
        Self::from_values(values)
    }
}

impl<T: Into<Value>, const N: usize> From<[T; N]> for OrderedArray {
    fn from(values: [T; N]) -> Self {
        Self::from_values(values)
    }
}

impl From<&Self> for OrderedArray {
    fn from(array: &Self) -> Self {
        array.clone()
    }
}

impl fmt::Debug for OrderedArray {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_map().entries(self.iter()).finish()
    }
}

/// Renders the array as `[key => value, ...]`.
impl fmt::Display for OrderedArray {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "[")?;
        let mut first = true;
        for (key, value) in self {
            if first {
                first = false;
            } else {
                write!(formatter, ", ")?;
            }
            match value {
                Value::Array(nested) => write!(formatter, "{key} => {nested}")?,
                Value::Str(text) => write!(formatter, "{key} => {text:?}")?,
                scalar => write!(formatter, "{key} => {scalar}")?,
            }
        }
        write!(formatter, "]")
    }
}

// =============================================================================
// Serde Support
// =============================================================================

#[cfg(feature = "serde")]
impl serde::Serialize for OrderedArray {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        if self.is_list() {
            use serde::ser::SerializeSeq;
            let mut sequence = serializer.serialize_seq(Some(self.len()))?;
            for value in self.values() {
                sequence.serialize_element(value)?;
            }
            sequence.end()
        } else {
            use serde::ser::SerializeMap;
            let mut map = serializer.serialize_map(Some(self.len()))?;
            for (key, value) in self {
                map.serialize_entry(key, value)?;
            }
            map.end()
        }
    }
}

#[cfg(feature = "serde")]
pub(crate) struct OrderedArrayVisitor;

#[cfg(feature = "serde")]
impl<'de> serde::de::Visitor<'de> for OrderedArrayVisitor {
    type Value = OrderedArray;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a sequence or a map")
    }

    fn visit_seq<A>(self, mut access: A) -> Result<Self::Value, A::Error>
    where
        A: serde::de::SeqAccess<'de>,
    {
        let mut array = OrderedArray::with_capacity(access.size_hint().unwrap_or(0));
        while let Some(value) = access.next_element::<Value>()? {
            array.push(value);
        }
        Ok(array)
    }

    fn visit_map<A>(self, mut access: A) -> Result<Self::Value, A::Error>
    where
        A: serde::de::MapAccess<'de>,
    {
        let mut array = OrderedArray::with_capacity(access.size_hint().unwrap_or(0));
        while let Some((key, value)) = access.next_entry::<Key, Value>()? {
            array.insert(key, value);
        }
        Ok(array)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for OrderedArray {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        deserializer.deserialize_any(OrderedArrayVisitor)
    }
}

// =============================================================================
// Tests
// =============================================================================
