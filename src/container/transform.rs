//! Commit operations that reshape the stored array, and in-place mutators.

use std::mem;

use rustc_hash::FxHashSet;
use tracing::warn;

use super::Container;
use super::sort::merge_sort_by;
use crate::error::{ArrayError, Result};
use crate::flags::{KeyCase, SortFlag};
use crate::key::Key;
use crate::ordered_array::OrderedArray;
use crate::value::Value;

impl Container {
    /// Changes the case of all string keys.
    ///
    /// When two keys collide after conversion the later value wins and
    /// keeps the position of the first.
    pub fn change_key_case(&mut self, case: KeyCase) -> &mut Self {
        let converted = self
            .data
            .iter()
            .map(|(key, value)| {
                let key = match key {
                    Key::Int(_) => key.clone(),
                    Key::Str(text) => Key::from(case.apply(text)),
                };
                (key, value.clone())
            })
            .collect();
        self.commit("change_key_case", converted)
    }

    /// Splits the array into a list of arrays of `length` entries each.
    ///
    /// The last chunk may be shorter.
    ///
    /// # Errors
    ///
    /// Returns [`ArrayError::InvalidArgument`] if `length` is zero.
    pub fn chunk(&mut self, length: usize, preserve_keys: bool) -> Result<&mut Self> {
        if length == 0 {
            return Err(ArrayError::invalid_argument(
                "chunk",
                "length must be greater than 0",
            ));
        }
        let entries: Vec<(Key, Value)> = mem::take(&mut self.data).into_entries();
        let chunks = entries
            .chunks(length)
            .map(|chunk| {
                let chunk = chunk.iter().cloned();
                if preserve_keys {
                    chunk.collect::<OrderedArray>()
                } else {
                    OrderedArray::from_values(chunk.map(|(_, value)| value))
                }
            })
            .map(Value::Array);
        let chunked = OrderedArray::from_values(chunks);
        Ok(self.commit("chunk", chunked))
    }

    /// Uses the current values as keys for `values`.
    ///
    /// # Errors
    ///
    /// Returns [`ArrayError::InvalidArgument`] if the lengths differ and
    /// [`ArrayError::IllegalKey`] if a current value cannot be a key.
    pub fn combine(&mut self, values: impl Into<OrderedArray>) -> Result<&mut Self> {
        let values = values.into();
        if values.len() != self.data.len() {
            return Err(ArrayError::invalid_argument(
                "combine",
                "both arrays must have an equal number of elements",
            ));
        }
        let mut combined = OrderedArray::with_capacity(values.len());
        for (key, value) in self.data.values().zip(values.values()) {
            combined.insert(Key::from_value(key, "combine")?, value.clone());
        }
        Ok(self.commit("combine", combined))
    }

    /// Replaces the array with a frequency table of its values.
    ///
    /// Only integer and string values are counted; other values are skipped
    /// with a warning.
    pub fn count_values(&mut self) -> &mut Self {
        let mut counts = OrderedArray::new();
        for value in self.data.values() {
            let Some(key) = Key::from_scalar(value) else {
                warn!(
                    found = value.type_name(),
                    "count_values can only count string and integer values, entry skipped"
                );
                continue;
            };
            match counts.get_mut(&key) {
                Some(Value::Int(count)) => *count += 1,
                _ => {
                    counts.insert(key, 1);
                }
            }
        }
        self.commit("count_values", counts)
    }

    /// Replaces the array with `count` copies of `value` under consecutive
    /// integer keys starting at `start_index`.
    ///
    /// # Errors
    ///
    /// Returns [`ArrayError::InvalidArgument`] if `count` exceeds
    /// [`OrderedArray::MAX_LEN`].
    pub fn fill(
        &mut self,
        start_index: i64,
        count: usize,
        value: impl Into<Value>,
    ) -> Result<&mut Self> {
        if count > OrderedArray::MAX_LEN {
            return Err(ArrayError::exceeds_max_len("fill"));
        }
        let value = value.into();
        let filled = (0..count)
            .map_while(|offset| {
                i64::try_from(offset)
                    .ok()
                    .and_then(|offset| start_index.checked_add(offset))
            })
            .map(|key| (key, value.clone()))
            .collect();
        Ok(self.commit("fill", filled))
    }

    /// Replaces the array with `value` stored under each of `keys`' values.
    ///
    /// # Errors
    ///
    /// Returns [`ArrayError::IllegalKey`] if one of the keys is an array.
    pub fn fill_keys(
        &mut self,
        keys: impl Into<OrderedArray>,
        value: impl Into<Value>,
    ) -> Result<&mut Self> {
        let value = value.into();
        let mut filled = OrderedArray::new();
        for key in keys.into().values() {
            filled.insert(Key::from_value(key, "fill_keys")?, value.clone());
        }
        Ok(self.commit("fill_keys", filled))
    }

    /// Keeps the entries whose value satisfies `predicate`. Keys are kept.
    pub fn filter<F>(&mut self, mut predicate: F) -> &mut Self
    where
        F: FnMut(&Value) -> bool,
    {
        self.filter_entry(|_, value| predicate(value))
    }

    /// Keeps the entries whose key satisfies `predicate`.
    pub fn filter_key<F>(&mut self, mut predicate: F) -> &mut Self
    where
        F: FnMut(&Key) -> bool,
    {
        self.filter_entry(|key, _| predicate(key))
    }

    /// Keeps the entries for which `predicate(key, value)` holds.
    pub fn filter_entry<F>(&mut self, mut predicate: F) -> &mut Self
    where
        F: FnMut(&Key, &Value) -> bool,
    {
        let retained = self
            .data
            .iter()
            .filter(|&(key, value)| predicate(key, value))
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect();
        self.commit("filter", retained)
    }

    /// Keeps the truthy entries.
    pub fn filter_truthy(&mut self) -> &mut Self {
        self.filter(Value::is_truthy)
    }

    /// Exchanges keys with their values.
    ///
    /// Only integer and string values can become keys; other entries are
    /// skipped with a warning. Later duplicates overwrite earlier ones.
    pub fn flip(&mut self) -> &mut Self {
        let mut flipped = OrderedArray::with_capacity(self.data.len());
        for (key, value) in &self.data {
            match Key::from_scalar(value) {
                Some(new_key) => {
                    flipped.insert(new_key, key);
                }
                None => warn!(
                    found = value.type_name(),
                    "flip can only flip string and integer values, entry skipped"
                ),
            }
        }
        self.commit("flip", flipped)
    }

    /// Applies `function` to every value. Keys are kept.
    pub fn map<F>(&mut self, mut function: F) -> &mut Self
    where
        F: FnMut(&Value) -> Value,
    {
        self.map_entry(|_, value| function(value))
    }

    /// Applies `function` to every entry, keeping keys.
    pub fn map_entry<F>(&mut self, mut function: F) -> &mut Self
    where
        F: FnMut(&Key, &Value) -> Value,
    {
        let mapped = self
            .data
            .iter()
            .map(|(key, value)| (key.clone(), function(key, value)))
            .collect();
        self.commit("map", mapped)
    }

    /// Zips the array with `others` position by position and maps each row.
    ///
    /// Shorter arrays are padded with `Null`; the result is a list. With no
    /// `others` each value is mapped alone and keys are kept.
    ///
    /// ```rust
    /// use fluent_array::{array, Container, Value};
    ///
    /// let mut numbers = Container::from(array![1, 2, 3]);
    /// numbers.map_many(&[array!["one", "two"]], |row| {
    ///     Value::from(format!("{}:{}", row[0], row[1]))
    /// });
    /// assert_eq!(numbers.to_array(), array!["1:one", "2:two", "3:"]);
    /// ```
    pub fn map_many<F>(&mut self, others: &[OrderedArray], mut function: F) -> &mut Self
    where
        F: FnMut(&[Value]) -> Value,
    {
        if others.is_empty() {
            let mapped = self
                .data
                .iter()
                .map(|(key, value)| (key.clone(), function(std::slice::from_ref(value))))
                .collect();
            return self.commit("map_many", mapped);
        }
        let width = others
            .iter()
            .map(OrderedArray::len)
            .chain([self.data.len()])
            .max()
            .unwrap_or(0);
        let mut row = Vec::with_capacity(others.len() + 1);
        let mut mapped = OrderedArray::with_capacity(width);
        for position in 0..width {
            row.clear();
            row.extend(
                std::iter::once(&self.data)
                    .chain(others)
                    .map(|array| array.entry_at(position).map(|(_, value)| value).cloned())
                    .map(Option::unwrap_or_default),
            );
            mapped.push(function(&row));
        }
        self.commit("map_many", mapped)
    }

    /// Appends `others`. Integer keys are renumbered; string keys from later
    /// arrays overwrite earlier ones.
    pub fn merge(&mut self, others: &[OrderedArray]) -> &mut Self {
        let merged = OrderedArray::renumbered(
            std::iter::once(&self.data)
                .chain(others)
                .flat_map(|array| array.iter())
                .map(|(key, value)| (key.clone(), value.clone())),
        );
        self.commit("merge", merged)
    }

    /// Like [`merge`](Self::merge), but values under a shared string key are
    /// gathered into a nested array instead of overwritten.
    ///
    /// ```rust
    /// use fluent_array::{array, Container};
    ///
    /// let mut container = Container::from(array!["color" => array!["favorite" => "red"], 0 => 5]);
    /// container.merge_recursive(&[array![0 => 10, "color" => array!["favorite" => "green", 0 => "blue"]]]);
    /// assert_eq!(
    ///     container.to_array(),
    ///     array![
    ///         "color" => array!["favorite" => array!["red", "green"], 0 => "blue"],
    ///         0 => 5,
    ///         1 => 10,
    ///     ]
    /// );
    /// ```
    pub fn merge_recursive(&mut self, others: &[OrderedArray]) -> &mut Self {
        let mut merged = OrderedArray::new();
        for array in std::iter::once(&self.data).chain(others) {
            merge_into(&mut merged, array);
        }
        self.commit("merge_recursive", merged)
    }

    /// Overwrites or appends entries from `others` by key.
    pub fn replace(&mut self, others: &[OrderedArray]) -> &mut Self {
        let mut replaced = self.data.clone();
        for (key, value) in others.iter().flat_map(OrderedArray::iter) {
            replaced.insert(key, value);
        }
        self.commit("replace", replaced)
    }

    /// Like [`replace`](Self::replace), descending into entries that are
    /// arrays on both sides.
    pub fn replace_recursive(&mut self, others: &[OrderedArray]) -> &mut Self {
        let mut replaced = self.data.clone();
        for other in others {
            replace_into(&mut replaced, other);
        }
        self.commit("replace_recursive", replaced)
    }

    /// Pads the array to `|length|` entries with `value`.
    ///
    /// A positive length pads at the end, a negative one at the front.
    /// Integer keys are renumbered.
    ///
    /// # Errors
    ///
    /// Returns [`ArrayError::InvalidArgument`] if `|length|` exceeds
    /// [`OrderedArray::MAX_LEN`].
    pub fn pad(&mut self, length: i64, value: impl Into<Value>) -> Result<&mut Self> {
        let target = usize::try_from(length.unsigned_abs())
            .ok()
            .filter(|target| *target <= OrderedArray::MAX_LEN)
            .ok_or_else(|| ArrayError::exceeds_max_len("pad"))?;
        if target <= self.data.len() {
            return Ok(self);
        }
        let value = value.into();
        let padding = (self.data.len()..target).map(|_| (Key::Int(0), value.clone()));
        let existing = mem::take(&mut self.data).into_iter();
        let padded = if length > 0 {
            OrderedArray::renumbered(existing.chain(padding))
        } else {
            OrderedArray::renumbered(padding.chain(existing))
        };
        Ok(self.commit("pad", padded))
    }

    /// Folds the values and commits the result.
    ///
    /// An array result becomes the stored array; any other result is stored
    /// as a one-element list.
    pub fn reduce_commit<F>(&mut self, function: F, initial: impl Into<Value>) -> &mut Self
    where
        F: FnMut(Value, &Value) -> Value,
    {
        let reduced = self.data.values().fold(initial.into(), function);
        let committed = match reduced {
            Value::Array(array) => array,
            scalar => OrderedArray::from_values([scalar]),
        };
        self.commit("reduce", committed)
    }

    /// Reverses the order of entries.
    ///
    /// String keys are always kept; integer keys are renumbered unless
    /// `preserve_keys` is set.
    pub fn reverse(&mut self, preserve_keys: bool) -> &mut Self {
        let reversed = mem::take(&mut self.data).into_iter().rev();
        let reversed = if preserve_keys {
            reversed.collect()
        } else {
            OrderedArray::renumbered(reversed)
        };
        self.commit("reverse", reversed)
    }

    /// Keeps a slice of the entries.
    ///
    /// A negative `offset` counts from the end. A `length` of `None` runs to
    /// the end, a negative one stops that many entries before the end.
    /// Out-of-range values are clamped.
    pub fn slice(&mut self, offset: i64, length: Option<i64>, preserve_keys: bool) -> &mut Self {
        let (start, end) = slice_bounds(self.data.len(), offset, length);
        let selected = mem::take(&mut self.data)
            .into_iter()
            .skip(start)
            .take(end - start);
        let sliced = if preserve_keys {
            selected.collect()
        } else {
            OrderedArray::renumbered(selected)
        };
        self.commit("slice", sliced)
    }

    /// Removes a portion of the array and inserts the values of
    /// `replacement` in its place. Integer keys are renumbered.
    ///
    /// `offset` and `length` follow the rules of [`slice`](Self::slice).
    pub fn splice(
        &mut self,
        offset: i64,
        length: Option<i64>,
        replacement: impl Into<OrderedArray>,
    ) -> &mut Self {
        self.splice_out(offset, length, replacement);
        self
    }

    /// Same as [`splice`](Self::splice), returning the removed entries.
    ///
    /// ```rust
    /// use fluent_array::{array, Container};
    ///
    /// let mut colors = Container::from(array!["red", "green", "blue", "yellow"]);
    /// let removed = colors.splice_out(1, Some(2), array!["orange"]);
    ///
    /// assert_eq!(removed, array!["green", "blue"]);
    /// assert_eq!(colors.to_array(), array!["red", "orange", "yellow"]);
    /// ```
    pub fn splice_out(
        &mut self,
        offset: i64,
        length: Option<i64>,
        replacement: impl Into<OrderedArray>,
    ) -> OrderedArray {
        let (start, end) = slice_bounds(self.data.len(), offset, length);
        let mut entries = mem::take(&mut self.data).into_entries();
        let tail = entries.split_off(end);
        let removed = entries.split_off(start);
        let inserted = replacement
            .into()
            .into_iter()
            .map(|(_, value)| (Key::Int(0), value));
        let spliced = OrderedArray::renumbered(entries.into_iter().chain(inserted).chain(tail));
        self.commit("splice", spliced);
        OrderedArray::renumbered(removed)
    }

    /// Removes duplicate values, keeping the first occurrence of each.
    ///
    /// Values are considered duplicates when they compare equal under
    /// `flag`. Keys of kept entries are preserved.
    pub fn unique(&mut self, flag: SortFlag) -> &mut Self {
        let values: Vec<&Value> = self.data.values().collect();
        let positions: Vec<usize> = (0..values.len()).collect();
        let order = merge_sort_by(positions, |&left, &right| {
            values[left].compare_with(values[right], flag)
        });

        let mut duplicates = FxHashSet::default();
        let mut representatives = order.iter();
        if let Some(&first) = representatives.next() {
            let mut kept = first;
            for &position in representatives {
                if values[kept].compare_with(values[position], flag).is_eq() {
                    duplicates.insert(position);
                } else {
                    kept = position;
                }
            }
        }

        let deduplicated = self
            .data
            .iter()
            .enumerate()
            .filter(|(position, _)| !duplicates.contains(position))
            .map(|(_, (key, value))| (key.clone(), value.clone()))
            .collect();
        self.commit("unique", deduplicated)
    }

    /// Calls `function` on every value in place.
    pub fn walk<F>(&mut self, mut function: F) -> &mut Self
    where
        F: FnMut(&mut Value, &Key),
    {
        for (key, value) in self.data.iter_mut() {
            function(value, key);
        }
        self
    }

    /// Calls `function` on every non-array value, descending into nested
    /// arrays.
    pub fn walk_recursive<F>(&mut self, mut function: F) -> &mut Self
    where
        F: FnMut(&mut Value, &Key),
    {
        walk_leaves(&mut self.data, &mut function);
        self
    }

    // =========================================================================
    // Insertion and removal at either end
    // =========================================================================

    /// Appends `value` under the next free integer index.
    pub fn push(&mut self, value: impl Into<Value>) -> &mut Self {
        self.data.push(value);
        self
    }

    /// Appends every value in `values`.
    pub fn push_many<I, V>(&mut self, values: I) -> &mut Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        for value in values {
            self.data.push(value);
        }
        self
    }

    /// Removes and returns the last value.
    pub fn pop(&mut self) -> Option<Value> {
        let popped = self.data.pop().map(|(_, value)| value);
        self.cursor = Some(0);
        popped
    }

    /// Removes and returns the first value. Integer keys are renumbered.
    pub fn shift(&mut self) -> Option<Value> {
        if self.data.is_empty() {
            return None;
        }
        let mut entries = mem::take(&mut self.data).into_iter();
        let shifted = entries.next().map(|(_, value)| value);
        self.commit("shift", OrderedArray::renumbered(entries));
        shifted
    }

    /// Prepends `value`. Integer keys are renumbered.
    pub fn unshift(&mut self, value: impl Into<Value>) -> &mut Self {
        self.unshift_many([value])
    }

    /// Prepends every value in `values`, keeping their order.
    pub fn unshift_many<I, V>(&mut self, values: I) -> &mut Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        let prepended = values.into_iter().map(|value| (Key::Int(0), value.into()));
        let existing = mem::take(&mut self.data).into_iter();
        self.commit(
            "unshift",
            OrderedArray::renumbered(prepended.chain(existing)),
        )
    }
}

fn merge_into(target: &mut OrderedArray, source: &OrderedArray) {
    for (key, value) in source {
        match key {
            Key::Int(_) => {
                target.push(value.clone());
            }
            Key::Str(_) => match target.get_mut(key) {
                Some(existing) => {
                    if !matches!(existing, Value::Array(_)) {
                        let scalar = mem::take(existing);
                        *existing = Value::Array(OrderedArray::from_values([scalar]));
                    }
                    if let Value::Array(gathered) = existing {
                        match value {
                            Value::Array(nested) => merge_into(gathered, nested),
                            scalar => {
                                gathered.push(scalar.clone());
                            }
                        }
                    }
                }
                None => {
                    target.insert(key.clone(), value.clone());
                }
            },
        }
    }
}

fn replace_into(target: &mut OrderedArray, source: &OrderedArray) {
    for (key, value) in source {
        if let (Some(Value::Array(existing)), Value::Array(nested)) = (target.get_mut(key), value) {
            replace_into(existing, nested);
            continue;
        }
        target.insert(key.clone(), value.clone());
    }
}

fn walk_leaves<F>(array: &mut OrderedArray, function: &mut F)
where
    F: FnMut(&mut Value, &Key),
{
    for (key, value) in array.iter_mut() {
        match value {
            Value::Array(nested) => walk_leaves(nested, function),
            leaf => function(leaf, key),
        }
    }
}

/// Resolves `offset`/`length` against `len` into a clamped `start..end`.
fn slice_bounds(len: usize, offset: i64, length: Option<i64>) -> (usize, usize) {
    let len = i64::try_from(len).unwrap_or(i64::MAX);
    let start = if offset < 0 {
        len.saturating_add(offset).max(0)
    } else {
        offset.min(len)
    };
    let end = match length {
        None => len,
        Some(length) if length < 0 => len.saturating_add(length).max(start),
        Some(length) => start.saturating_add(length).min(len),
    };
    (
        usize::try_from(start).unwrap_or(0),
        usize::try_from(end).unwrap_or(0),
    )
}
