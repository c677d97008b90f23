//! Sorting and shuffling.
//!
//! All sorts are stable: entries that compare equal keep their relative
//! order. `sort`, `rsort`, `usort` and the shuffles discard keys and
//! re-index from zero; every other sort keeps each entry's key.

use std::cmp::Ordering;
use std::mem;

use rand::Rng;
use rand::seq::SliceRandom;

use super::Container;
use crate::error::{ArrayError, Result};
use crate::flags::SortFlag;
use crate::key::Key;
use crate::ordered_array::OrderedArray;
use crate::value::Value;

type Entry = (Key, Value);

impl Container {
    /// Sorts values in ascending order and re-indexes.
    pub fn sort(&mut self, flag: SortFlag) -> &mut Self {
        self.sort_entries("sort", false, |left, right| {
            left.1.compare_with(&right.1, flag)
        })
    }

    /// Sorts values in descending order and re-indexes.
    ///
    /// ```rust
    /// use fluent_array::{array, Container, SortFlag};
    ///
    /// let mut fruits = Container::from(array!["lemon", "orange", "banana", "apple"]);
    /// fruits.rsort(SortFlag::Regular);
    /// assert_eq!(fruits.to_array(), array!["orange", "lemon", "banana", "apple"]);
    /// ```
    pub fn rsort(&mut self, flag: SortFlag) -> &mut Self {
        self.sort_entries("rsort", false, |left, right| {
            right.1.compare_with(&left.1, flag)
        })
    }

    /// Sorts values in ascending order, keeping keys.
    pub fn asort(&mut self, flag: SortFlag) -> &mut Self {
        self.sort_entries("asort", true, |left, right| {
            left.1.compare_with(&right.1, flag)
        })
    }

    /// Sorts values in descending order, keeping keys.
    pub fn arsort(&mut self, flag: SortFlag) -> &mut Self {
        self.sort_entries("arsort", true, |left, right| {
            right.1.compare_with(&left.1, flag)
        })
    }

    /// Sorts entries by key in ascending order.
    ///
    /// ```rust
    /// use fluent_array::{array, Container, SortFlag};
    ///
    /// let mut fruits = Container::from(array!["d" => "lemon", "a" => "orange"]);
    /// fruits.ksort(SortFlag::Regular);
    /// assert_eq!(fruits.to_array(), array!["a" => "orange", "d" => "lemon"]);
    /// ```
    pub fn ksort(&mut self, flag: SortFlag) -> &mut Self {
        self.sort_entries("ksort", true, |left, right| {
            compare_keys(&left.0, &right.0, flag)
        })
    }

    /// Sorts entries by key in descending order.
    pub fn krsort(&mut self, flag: SortFlag) -> &mut Self {
        self.sort_entries("krsort", true, |left, right| {
            compare_keys(&right.0, &left.0, flag)
        })
    }

    /// Sorts values with `compare` and re-indexes.
    pub fn usort<F>(&mut self, compare: F) -> &mut Self
    where
        F: Fn(&Value, &Value) -> Ordering,
    {
        self.sort_entries("usort", false, |left, right| compare(&left.1, &right.1))
    }

    /// Sorts values with `compare`, keeping keys.
    pub fn uasort<F>(&mut self, compare: F) -> &mut Self
    where
        F: Fn(&Value, &Value) -> Ordering,
    {
        self.sort_entries("uasort", true, |left, right| compare(&left.1, &right.1))
    }

    /// Sorts entries by key with `compare`.
    pub fn uksort<F>(&mut self, compare: F) -> &mut Self
    where
        F: Fn(&Key, &Key) -> Ordering,
    {
        self.sort_entries("uksort", true, |left, right| compare(&left.0, &right.0))
    }

    /// Sorts values in natural order, keeping keys.
    pub fn natsort(&mut self) -> &mut Self {
        self.sort_entries("natsort", true, |left, right| {
            left.1.compare_with(&right.1, SortFlag::Natural)
        })
    }

    /// Sorts values in case-insensitive natural order, keeping keys.
    pub fn natcasesort(&mut self) -> &mut Self {
        self.sort_entries("natcasesort", true, |left, right| {
            left.1.compare_with(&right.1, SortFlag::NaturalCaseInsensitive)
        })
    }

    /// Sorts values, breaking ties with the values of `others` at the same
    /// positions, in order.
    ///
    /// String keys are kept and integer keys re-indexed. `others` are only
    /// read.
    ///
    /// # Errors
    ///
    /// Returns [`ArrayError::InvalidArgument`] if any of `others` has a
    /// different length.
    ///
    /// ```rust
    /// use fluent_array::{array, Container};
    ///
    /// let mut scores = Container::from(array!["ann" => 90, "bob" => 90, "cyd" => 75]);
    /// scores.multisort(&[array![2, 1, 3]]).unwrap();
    /// assert_eq!(scores.to_array(), array!["cyd" => 75, "bob" => 90, "ann" => 90]);
    /// ```
    pub fn multisort(&mut self, others: &[OrderedArray]) -> Result<&mut Self> {
        if others.iter().any(|other| other.len() != self.data.len()) {
            return Err(ArrayError::invalid_argument(
                "multisort",
                "array sizes are inconsistent",
            ));
        }
        let columns: Vec<Vec<&Value>> = std::iter::once(&self.data)
            .chain(others)
            .map(|array| array.values().collect())
            .collect();
        let positions: Vec<usize> = (0..self.data.len()).collect();
        let order = merge_sort_by(positions, |&left, &right| {
            columns
                .iter()
                .map(|column| column[left].compare_with(column[right], SortFlag::Regular))
                .find(|ordering| ordering.is_ne())
                .unwrap_or(Ordering::Equal)
        });
        let sorted = OrderedArray::renumbered(
            order
                .into_iter()
                .filter_map(|position| self.data.entry_at(position))
                .map(|(key, value)| (key.clone(), value.clone())),
        );
        Ok(self.commit("multisort", sorted))
    }

    /// Randomly permutes the values and re-indexes.
    pub fn shuffle(&mut self) -> &mut Self {
        self.shuffle_with(&mut rand::thread_rng())
    }

    /// Same as [`shuffle`](Self::shuffle) with a caller supplied generator.
    pub fn shuffle_with<R: Rng + ?Sized>(&mut self, rng: &mut R) -> &mut Self {
        let mut values: Vec<Value> = mem::take(&mut self.data)
            .into_iter()
            .map(|(_, value)| value)
            .collect();
        values.shuffle(rng);
        self.commit("shuffle", OrderedArray::from_values(values))
    }

    fn sort_entries<F>(&mut self, operation: &'static str, keep_keys: bool, compare: F) -> &mut Self
    where
        F: FnMut(&Entry, &Entry) -> Ordering,
    {
        let entries = merge_sort_by(mem::take(&mut self.data).into_entries(), compare);
        let sorted = if keep_keys {
            entries.into_iter().collect()
        } else {
            OrderedArray::from_values(entries.into_iter().map(|(_, value)| value))
        };
        self.commit(operation, sorted)
    }
}

fn compare_keys(left: &Key, right: &Key, flag: SortFlag) -> Ordering {
    Value::from(left).compare_with(&Value::from(right), flag)
}

/// Stable bottom-up merge sort over positions.
///
/// `compare` need not be a total order: an inconsistent comparator only
/// affects the resulting order, and every item is still returned exactly
/// once.
pub(super) fn merge_sort_by<T, F>(items: Vec<T>, mut compare: F) -> Vec<T>
where
    F: FnMut(&T, &T) -> Ordering,
{
    let length = items.len();
    let mut order: Vec<usize> = (0..length).collect();
    let mut merged = vec![0; length];
    let mut width = 1;
    while width < length {
        for start in (0..length).step_by(width * 2) {
            let middle = (start + width).min(length);
            let end = (start + width * 2).min(length);
            merge_runs(
                &order[start..middle],
                &order[middle..end],
                &mut merged[start..end],
                |left, right| compare(&items[left], &items[right]),
            );
        }
        mem::swap(&mut order, &mut merged);
        width *= 2;
    }

    let mut slots: Vec<Option<T>> = items.into_iter().map(Some).collect();
    order
        .into_iter()
        .filter_map(|position| slots.get_mut(position).and_then(Option::take))
        .collect()
}

// Ties take from the left run.
fn merge_runs<F>(left: &[usize], right: &[usize], merged: &mut [usize], mut compare: F)
where
    F: FnMut(usize, usize) -> Ordering,
{
    let mut left_index = 0;
    let mut right_index = 0;
    for slot in merged {
        *slot = match (left.get(left_index), right.get(right_index)) {
            (Some(&from_left), Some(&from_right)) if compare(from_left, from_right).is_gt() => {
                right_index += 1;
                from_right
            }
            (Some(&from_left), _) => {
                left_index += 1;
                from_left
            }
            (None, Some(&from_right)) => {
                right_index += 1;
                from_right
            }
            (None, None) => break,
        };
    }
}
