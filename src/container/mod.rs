//! The chainable array wrapper.
//!
//! [`Container`] holds one [`OrderedArray`] and offers a fluent surface over
//! it. Methods fall into disjoint categories:
//!
//! - **Commit operations** compute a new array, store it, reset the cursor
//!   and return `&mut Self` (or `Result<&mut Self>` when the arguments can be
//!   rejected) so calls can be chained.
//! - **In-place mutators** (`push`, `unshift`, `walk`, ...) edit the stored
//!   array and also return `&mut Self`; `pop` and `shift` return the removed
//!   value instead.
//! - **Queries** (`keys`, `search`, `sum`, ...) read the array and return the
//!   computed value.
//! - **Cursor operations** move or read a single position pointer.
//! - **Terminal operations** (`to_array`, `into_array`) leave the chain.
//!
//! # Examples
//!
//! ```rust
//! use fluent_array::{array, Container, SortFlag, Value};
//!
//! let mut container = Container::from(array![3, 1, 2, 3, 1]);
//! let values = container
//!     .unique(SortFlag::Regular)
//!     .sort(SortFlag::Regular)
//!     .map(|value| Value::from(value.as_int().unwrap_or(0) * 10))
//!     .values();
//!
//! assert_eq!(values, vec![Value::Int(10), Value::Int(20), Value::Int(30)]);
//! ```

mod set_operations;
mod sort;
mod transform;

use rand::Rng;
use tracing::{trace, warn};

use crate::error::{ArrayError, Result};
use crate::flags::CountMode;
use crate::key::Key;
use crate::ordered_array::{Iter, OrderedArray};
use crate::value::{Number, Value};

/// A chainable wrapper around an [`OrderedArray`] with an internal cursor.
///
/// The cursor starts on the first entry. Every commit operation resets it
/// there; moving past either end with [`next`](Self::next) or
/// [`prev`](Self::prev) leaves it invalid until [`reset`](Self::reset) or
/// [`end`](Self::end) is called.
#[derive(Debug, Clone)]
pub struct Container {
    data: OrderedArray,
    cursor: Option<usize>,
}

impl Container {
    /// Creates an empty container.
    pub fn new() -> Self {
        Self {
            data: OrderedArray::new(),
            cursor: Some(0),
        }
    }

    /// Creates a container holding the integers from `start` to `end`
    /// inclusive.
    ///
    /// Descending ranges are produced when `start > end`; the magnitude of
    /// `step` is used for them. A step larger than the span yields `[start]`.
    ///
    /// # Errors
    ///
    /// Returns [`ArrayError::InvalidArgument`] if `step` is zero, negative
    /// for an increasing range, or so small that the range would hold more
    /// than [`OrderedArray::MAX_LEN`] values.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use fluent_array::{array, Container};
    ///
    /// let container = Container::range(0, 10, 5).unwrap();
    /// assert_eq!(container.to_array(), array![0, 5, 10]);
    ///
    /// let container = Container::range(3, 1, 1).unwrap();
    /// assert_eq!(container.to_array(), array![3, 2, 1]);
    /// ```
    pub fn range(start: i64, end: i64, step: i64) -> Result<Self> {
        validate_step("range", start < end, step)?;
        let magnitude = i128::from(step.unsigned_abs());
        let span = (i128::from(end) - i128::from(start)).abs();
        usize::try_from(span / magnitude + 1)
            .ok()
            .filter(|count| *count <= OrderedArray::MAX_LEN)
            .ok_or_else(|| ArrayError::exceeds_max_len("range"))?;
        let direction: i128 = if start <= end { 1 } else { -1 };
        let values = (0..=span / magnitude)
            .map(|index| i128::from(start) + direction * index * magnitude)
            .filter_map(|value| i64::try_from(value).ok());
        Ok(Self::from(OrderedArray::from_values(values)))
    }

    /// Creates a container holding floats from `start` to `end` inclusive.
    ///
    /// # Errors
    ///
    /// Returns [`ArrayError::InvalidArgument`] if any argument is not finite,
    /// if `step` is zero, negative for an increasing range, or so small that
    /// the range would hold more than [`OrderedArray::MAX_LEN`] values.
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        clippy::cast_precision_loss
    )]
    pub fn range_float(start: f64, end: f64, step: f64) -> Result<Self> {
        if !(start.is_finite() && end.is_finite() && step.is_finite()) {
            return Err(ArrayError::invalid_argument(
                "range_float",
                "arguments must be finite",
            ));
        }
        if step == 0.0 {
            return Err(ArrayError::invalid_argument(
                "range_float",
                "step must not be zero",
            ));
        }
        if start < end && step < 0.0 {
            return Err(ArrayError::invalid_argument(
                "range_float",
                "step must be positive for an increasing range",
            ));
        }
        let magnitude = step.abs();
        let steps = ((end - start).abs() / magnitude).floor();
        if !steps.is_finite() || steps >= OrderedArray::MAX_LEN as f64 {
            return Err(ArrayError::exceeds_max_len("range_float"));
        }
        let direction = if start <= end { 1.0 } else { -1.0 };
        let values =
            (0..=steps as u64).map(|index| start + direction * index as f64 * magnitude);
        Ok(Self::from(OrderedArray::from_values(values)))
    }

    /// Creates a container holding single-character strings from `start`
    /// to `end` inclusive.
    ///
    /// # Errors
    ///
    /// Same step rules as [`range`](Self::range).
    ///
    /// # Examples
    ///
    /// ```rust
    /// use fluent_array::{array, Container};
    ///
    /// let letters = Container::range_chars('a', 'e', 2).unwrap();
    /// assert_eq!(letters.to_array(), array!["a", "c", "e"]);
    /// ```
    pub fn range_chars(start: char, end: char, step: i64) -> Result<Self> {
        let codes = Self::range(i64::from(u32::from(start)), i64::from(u32::from(end)), step)?;
        let characters = codes
            .data
            .values()
            .filter_map(Value::as_int)
            .filter_map(|code| u32::try_from(code).ok().and_then(char::from_u32));
        Ok(Self::from(OrderedArray::from_values(characters)))
    }

    /// Replaces the stored array and resets the cursor.
    fn commit(&mut self, operation: &'static str, data: OrderedArray) -> &mut Self {
        trace!(operation, before = self.data.len(), after = data.len(), "commit");
        self.data = data;
        self.cursor = Some(0);
        self
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// Returns the number of top-level entries.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns `true` if the container holds no entries.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Counts entries, optionally descending into nested arrays.
    ///
    /// ```rust
    /// use fluent_array::{array, Container, CountMode};
    ///
    /// let container = Container::from(array![1, array![2, 3], array![array![4]]]);
    /// assert_eq!(container.count(CountMode::Normal), 3);
    /// assert_eq!(container.count(CountMode::Recursive), 7);
    /// ```
    pub fn count(&self, mode: CountMode) -> usize {
        match mode {
            CountMode::Normal => self.data.len(),
            CountMode::Recursive => count_recursive(&self.data),
        }
    }

    /// Returns the value stored under `key`.
    pub fn get(&self, key: impl Into<Key>) -> Option<&Value> {
        self.data.get(&key.into())
    }

    /// Checks whether a value is present, loosely or strictly.
    pub fn in_array(&self, needle: impl Into<Value>, strict: bool) -> bool {
        self.search(needle, strict).is_some()
    }

    /// Returns `true` if `key` is present.
    pub fn key_exists(&self, key: impl Into<Key>) -> bool {
        self.data.contains_key(&key.into())
    }

    /// Returns the key of the first entry.
    pub fn key_first(&self) -> Option<&Key> {
        self.data.first().map(|(key, _)| key)
    }

    /// Returns the key of the last entry.
    pub fn key_last(&self) -> Option<&Key> {
        self.data.last().map(|(key, _)| key)
    }

    /// Returns all keys in order.
    pub fn keys(&self) -> Vec<Key> {
        self.data.keys().cloned().collect()
    }

    /// Returns the keys whose value matches `needle`.
    pub fn keys_for(&self, needle: impl Into<Value>, strict: bool) -> Vec<Key> {
        let needle = needle.into();
        self.data
            .iter()
            .filter(|(_, value)| matches_needle(value, &needle, strict))
            .map(|(key, _)| key.clone())
            .collect()
    }

    /// Returns all values in order.
    pub fn values(&self) -> Vec<Value> {
        self.data.values().cloned().collect()
    }

    /// Returns `true` if the keys are `0, 1, 2, ...` in order.
    pub fn is_list(&self) -> bool {
        self.data.is_list()
    }

    /// Returns the key of the first value matching `needle`.
    ///
    /// Loose matching uses [`Value::loose_eq`], strict matching
    /// [`Value::strict_eq`].
    pub fn search(&self, needle: impl Into<Value>, strict: bool) -> Option<&Key> {
        let needle = needle.into();
        self.data
            .iter()
            .find(|(_, value)| matches_needle(value, &needle, strict))
            .map(|(key, _)| key)
    }

    /// Picks `count` distinct keys at random, in their original order.
    ///
    /// # Errors
    ///
    /// Returns [`ArrayError::InvalidArgument`] if `count` is zero or larger
    /// than the number of entries.
    pub fn rand(&self, count: usize) -> Result<Vec<Key>> {
        self.rand_with(&mut rand::thread_rng(), count)
    }

    /// Same as [`rand`](Self::rand) with a caller supplied generator.
    ///
    /// # Errors
    ///
    /// See [`rand`](Self::rand).
    pub fn rand_with<R: Rng + ?Sized>(&self, rng: &mut R, count: usize) -> Result<Vec<Key>> {
        if count == 0 || count > self.data.len() {
            return Err(ArrayError::invalid_argument(
                "rand",
                format!(
                    "count must be between 1 and the number of elements ({})",
                    self.data.len()
                ),
            ));
        }
        let mut positions = rand::seq::index::sample(rng, self.data.len(), count).into_vec();
        positions.sort_unstable();
        Ok(positions
            .into_iter()
            .filter_map(|position| self.data.entry_at(position))
            .map(|(key, _)| key.clone())
            .collect())
    }

    /// Sums all values.
    ///
    /// Integer overflow promotes the result to a float.
    ///
    /// # Errors
    ///
    /// Returns [`ArrayError::TypeMismatch`] if a value is not numeric.
    pub fn sum(&self) -> Result<Number> {
        self.data.values().try_fold(Number::Int(0), |total, value| {
            Ok(total.add(value.to_number("sum")?))
        })
    }

    /// Multiplies all values. The product of an empty container is `1`.
    ///
    /// # Errors
    ///
    /// Returns [`ArrayError::TypeMismatch`] if a value is not numeric.
    pub fn product(&self) -> Result<Number> {
        self.data.values().try_fold(Number::Int(1), |total, value| {
            Ok(total.multiply(value.to_number("product")?))
        })
    }

    /// Returns the values of one column of a list of rows.
    ///
    /// ```rust
    /// use fluent_array::{array, Container};
    ///
    /// let rows = Container::from(array![
    ///     array!["id" => 1, "name" => "John"],
    ///     array!["id" => 2, "name" => "Sally"],
    /// ]);
    /// assert_eq!(rows.column("name"), array!["John", "Sally"]);
    /// ```
    pub fn column(&self, column_key: impl Into<Key>) -> OrderedArray {
        self.column_by(Some(column_key.into()), None)
    }

    /// Returns one column (or whole rows when `column_key` is `None`),
    /// optionally keyed by the value of another column.
    ///
    /// Rows that are not arrays, or lack the column, are skipped. Rows whose
    /// index value cannot be a key are appended instead.
    pub fn column_by(&self, column_key: Option<Key>, index_key: Option<Key>) -> OrderedArray {
        let mut projected = OrderedArray::new();
        for row in self.data.values() {
            let Some(row) = row.as_array() else {
                warn!(
                    found = row.type_name(),
                    "column can only read from array rows, entry skipped"
                );
                continue;
            };
            let cell = match &column_key {
                Some(column_key) => match row.get(column_key) {
                    Some(cell) => cell.clone(),
                    None => continue,
                },
                None => Value::Array(row.clone()),
            };
            let index = index_key
                .as_ref()
                .and_then(|index_key| row.get(index_key))
                .and_then(Key::from_scalar);
            match index {
                Some(index) => {
                    projected.insert(index, cell);
                }
                None => {
                    projected.push(cell);
                }
            }
        }
        projected
    }

    /// Projects `field` from every row, keeping keys.
    ///
    /// Rows that are not arrays or lack the field project to `Null`.
    pub fn pluck(&self, field: impl Into<Key>) -> OrderedArray {
        let field = field.into();
        self.data
            .iter()
            .map(|(key, row)| {
                let cell = row
                    .as_array()
                    .and_then(|row| row.get(&field))
                    .cloned()
                    .unwrap_or_default();
                (key.clone(), cell)
            })
            .collect()
    }

    /// Folds the values into a single result.
    pub fn reduce<T, F>(&self, function: F, initial: T) -> T
    where
        F: FnMut(T, &Value) -> T,
    {
        self.data.values().fold(initial, function)
    }

    /// Builds a name to value mapping from the entries.
    ///
    /// Without a prefix only string keys that are valid identifiers are
    /// used. With a prefix every key becomes `"{prefix}_{key}"` and is kept
    /// if that is a valid identifier.
    ///
    /// ```rust
    /// use fluent_array::{array, Container};
    ///
    /// let container = Container::from(array!["color" => "blue", "size" => "medium", 0 => "x"]);
    /// assert_eq!(container.extract(None), array!["color" => "blue", "size" => "medium"]);
    /// assert_eq!(
    ///     container.extract(Some("wddx")),
    ///     array!["wddx_color" => "blue", "wddx_size" => "medium", "wddx_0" => "x"]
    /// );
    /// ```
    pub fn extract(&self, prefix: Option<&str>) -> OrderedArray {
        self.data
            .iter()
            .filter_map(|(key, value)| {
                let name = match (prefix, key) {
                    (Some(prefix), key) => format!("{prefix}_{key}"),
                    (None, Key::Str(name)) => name.clone(),
                    (None, Key::Int(_)) => return None,
                };
                (is_identifier(&name) && name != "this").then(|| (name, value.clone()))
            })
            .collect()
    }

    // =========================================================================
    // Cursor
    // =========================================================================

    /// Returns the value under the cursor.
    pub fn current(&self) -> Option<&Value> {
        self.cursor
            .and_then(|position| self.data.entry_at(position))
            .map(|(_, value)| value)
    }

    /// Returns the key under the cursor.
    pub fn key(&self) -> Option<&Key> {
        self.cursor
            .and_then(|position| self.data.entry_at(position))
            .map(|(key, _)| key)
    }

    /// Advances the cursor by one entry.
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> &mut Self {
        self.cursor = self
            .cursor
            .map(|position| position + 1)
            .filter(|position| *position < self.data.len());
        self
    }

    /// Moves the cursor back by one entry.
    pub fn prev(&mut self) -> &mut Self {
        self.cursor = self.cursor.and_then(|position| position.checked_sub(1));
        self
    }

    /// Moves the cursor to the first entry and returns its value.
    pub fn reset(&mut self) -> Option<&Value> {
        self.cursor = Some(0);
        self.current()
    }

    /// Moves the cursor to the last entry and returns its value.
    pub fn end(&mut self) -> Option<&Value> {
        self.cursor = Some(self.data.len().saturating_sub(1));
        self.current()
    }

    /// Returns the entry under the cursor and advances it.
    ///
    /// ```rust
    /// use fluent_array::{array, Container, Key, Value};
    ///
    /// let mut container = Container::from(array!["a" => 1, "b" => 2]);
    /// assert_eq!(container.each(), Some((Key::from("a"), Value::Int(1))));
    /// assert_eq!(container.each(), Some((Key::from("b"), Value::Int(2))));
    /// assert_eq!(container.each(), None);
    /// ```
    pub fn each(&mut self) -> Option<(Key, Value)> {
        let entry = self
            .cursor
            .and_then(|position| self.data.entry_at(position))
            .map(|(key, value)| (key.clone(), value.clone()))?;
        self.next();
        Some(entry)
    }

    // =========================================================================
    // Terminal
    // =========================================================================

    /// Returns a copy of the stored array.
    pub fn to_array(&self) -> OrderedArray {
        self.data.clone()
    }

    /// Consumes the container, returning the stored array.
    pub fn into_array(self) -> OrderedArray {
        self.data
    }

    /// Borrows the stored array.
    pub const fn as_array(&self) -> &OrderedArray {
        &self.data
    }

    /// Iterates over the entries without touching the cursor.
    pub fn iter(&self) -> Iter<'_> {
        self.data.iter()
    }
}

fn validate_step(operation: &'static str, increasing: bool, step: i64) -> Result<()> {
    if step == 0 {
        return Err(ArrayError::invalid_argument(
            operation,
            "step must not be zero",
        ));
    }
    if increasing && step < 0 {
        return Err(ArrayError::invalid_argument(
            operation,
            "step must be positive for an increasing range",
        ));
    }
    Ok(())
}

fn count_recursive(array: &OrderedArray) -> usize {
    array
        .values()
        .map(|value| 1 + value.as_array().map_or(0, count_recursive))
        .sum()
}

fn matches_needle(value: &Value, needle: &Value, strict: bool) -> bool {
    if strict {
        value.strict_eq(needle)
    } else {
        value.loose_eq(needle)
    }
}

fn is_identifier(name: &str) -> bool {
    let mut characters = name.chars();
    characters
        .next()
        .is_some_and(|first| first == '_' || first.is_alphabetic())
        && characters.all(|character| character == '_' || character.is_alphanumeric())
}

impl Default for Container {
    fn default() -> Self {
        Self::new()
    }
}

/// Containers are equal when their arrays are; the cursor is ignored.
impl PartialEq for Container {
    fn eq(&self, other: &Self) -> bool {
        self.data == other.data
    }
}

impl From<OrderedArray> for Container {
    fn from(data: OrderedArray) -> Self {
        Self {
            data,
            cursor: Some(0),
        }
    }
}

impl<T: Into<Value>> From<Vec<T>> for Container {
    fn from(values: Vec<T>) -> Self {
        Self::from(OrderedArray::from(values))
    }
}

impl<T: Into<Value>, const N: usize> From<[T; N]> for Container {
    fn from(values: [T; N]) -> Self {
        Self::from(OrderedArray::from(values))
    }
}

impl<'a> IntoIterator for &'a Container {
    type Item = (&'a Key, &'a Value);
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.data.iter()
    }
}

// =============================================================================
// Serde Support
// =============================================================================

#[cfg(feature = "serde")]
impl serde::Serialize for Container {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serde::Serialize::serialize(&self.data, serializer)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Container {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        <OrderedArray as serde::Deserialize>::deserialize(deserializer).map(Self::from)
    }
}

// =============================================================================
// Tests
// =============================================================================
