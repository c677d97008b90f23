//! Difference and intersection against other arrays.
//!
//! Every operation keeps entries of the stored array, with their keys, and
//! drops the rest. A difference keeps entries matched by no other array; an
//! intersection keeps entries matched by every other array.
//!
//! Without a comparator, values match when their string forms are equal and
//! keys match when they are identical. The `u`-prefixed value variants and
//! the `_u`-suffixed key variants take an [`Ordering`] comparator instead,
//! and treat [`Ordering::Equal`] as a match.

use std::cmp::Ordering;

use rustc_hash::FxHashSet;

use super::Container;
use crate::key::Key;
use crate::ordered_array::OrderedArray;
use crate::value::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SetOperation {
    Difference,
    Intersection,
}

impl SetOperation {
    fn keeps(self, mut matches: impl Iterator<Item = bool>) -> bool {
        match self {
            Self::Difference => !matches.any(|matched| matched),
            Self::Intersection => matches.all(|matched| matched),
        }
    }
}

impl Container {
    /// Keeps entries whose value appears in none of `others`.
    ///
    /// ```rust
    /// use fluent_array::{array, Container};
    ///
    /// let mut colors = Container::from(array!["a" => "green", "b" => "brown", "c" => "blue", 0 => "red"]);
    /// colors.diff(&[array!["x" => "green", "y" => "red"]]);
    /// assert_eq!(colors.to_array(), array!["b" => "brown", "c" => "blue"]);
    /// ```
    pub fn diff(&mut self, others: &[OrderedArray]) -> &mut Self {
        let others = string_forms(others);
        self.retain_against(
            "diff",
            SetOperation::Difference,
            others.as_slice(),
            |other, _, value| other.contains(&value.to_string()),
        )
    }

    /// Keeps entries whose key appears in none of `others`.
    pub fn diff_key(&mut self, others: &[OrderedArray]) -> &mut Self {
        self.retain_against("diff_key", SetOperation::Difference, others, has_key)
    }

    /// Keeps entries whose key and value pair appears in none of `others`.
    pub fn diff_assoc(&mut self, others: &[OrderedArray]) -> &mut Self {
        self.retain_against("diff_assoc", SetOperation::Difference, others, has_pair)
    }

    /// Like [`diff_key`](Self::diff_key), comparing keys with `key_compare`.
    pub fn diff_ukey<G>(&mut self, others: &[OrderedArray], key_compare: G) -> &mut Self
    where
        G: Fn(&Key, &Key) -> Ordering,
    {
        self.retain_against("diff_ukey", SetOperation::Difference, others, |other, key, _| {
            other.keys().any(|candidate| key_compare(key, candidate).is_eq())
        })
    }

    /// Like [`diff_assoc`](Self::diff_assoc), comparing keys with
    /// `key_compare`.
    pub fn diff_uassoc<G>(&mut self, others: &[OrderedArray], key_compare: G) -> &mut Self
    where
        G: Fn(&Key, &Key) -> Ordering,
    {
        self.retain_against(
            "diff_uassoc",
            SetOperation::Difference,
            others,
            |other, key, value| {
                other.iter().any(|(candidate_key, candidate)| {
                    key_compare(key, candidate_key).is_eq() && same_string(value, candidate)
                })
            },
        )
    }

    /// Like [`diff`](Self::diff), comparing values with `value_compare`.
    pub fn udiff<F>(&mut self, others: &[OrderedArray], value_compare: F) -> &mut Self
    where
        F: Fn(&Value, &Value) -> Ordering,
    {
        self.retain_against("udiff", SetOperation::Difference, others, |other, _, value| {
            other
                .values()
                .any(|candidate| value_compare(value, candidate).is_eq())
        })
    }

    /// Like [`diff_assoc`](Self::diff_assoc), comparing values with
    /// `value_compare`.
    pub fn udiff_assoc<F>(&mut self, others: &[OrderedArray], value_compare: F) -> &mut Self
    where
        F: Fn(&Value, &Value) -> Ordering,
    {
        self.retain_against(
            "udiff_assoc",
            SetOperation::Difference,
            others,
            |other, key, value| {
                other
                    .get(key)
                    .is_some_and(|candidate| value_compare(value, candidate).is_eq())
            },
        )
    }

    /// Like [`diff_assoc`](Self::diff_assoc), with comparators for both
    /// values and keys.
    pub fn udiff_uassoc<F, G>(
        &mut self,
        others: &[OrderedArray],
        value_compare: F,
        key_compare: G,
    ) -> &mut Self
    where
        F: Fn(&Value, &Value) -> Ordering,
        G: Fn(&Key, &Key) -> Ordering,
    {
        self.retain_against(
            "udiff_uassoc",
            SetOperation::Difference,
            others,
            |other, key, value| {
                other.iter().any(|(candidate_key, candidate)| {
                    key_compare(key, candidate_key).is_eq()
                        && value_compare(value, candidate).is_eq()
                })
            },
        )
    }

    /// Keeps entries whose value appears in every one of `others`.
    pub fn intersect(&mut self, others: &[OrderedArray]) -> &mut Self {
        let others = string_forms(others);
        self.retain_against(
            "intersect",
            SetOperation::Intersection,
            others.as_slice(),
            |other, _, value| other.contains(&value.to_string()),
        )
    }

    /// Keeps entries whose key appears in every one of `others`.
    pub fn intersect_key(&mut self, others: &[OrderedArray]) -> &mut Self {
        self.retain_against("intersect_key", SetOperation::Intersection, others, has_key)
    }

    /// Keeps entries whose key and value pair appears in every one of
    /// `others`.
    pub fn intersect_assoc(&mut self, others: &[OrderedArray]) -> &mut Self {
        self.retain_against(
            "intersect_assoc",
            SetOperation::Intersection,
            others,
            has_pair,
        )
    }

    /// Like [`intersect_key`](Self::intersect_key), comparing keys with
    /// `key_compare`.
    pub fn intersect_ukey<G>(&mut self, others: &[OrderedArray], key_compare: G) -> &mut Self
    where
        G: Fn(&Key, &Key) -> Ordering,
    {
        self.retain_against(
            "intersect_ukey",
            SetOperation::Intersection,
            others,
            |other, key, _| other.keys().any(|candidate| key_compare(key, candidate).is_eq()),
        )
    }

    /// Like [`intersect_assoc`](Self::intersect_assoc), comparing keys with
    /// `key_compare`.
    pub fn intersect_uassoc<G>(&mut self, others: &[OrderedArray], key_compare: G) -> &mut Self
    where
        G: Fn(&Key, &Key) -> Ordering,
    {
        self.retain_against(
            "intersect_uassoc",
            SetOperation::Intersection,
            others,
            |other, key, value| {
                other.iter().any(|(candidate_key, candidate)| {
                    key_compare(key, candidate_key).is_eq() && same_string(value, candidate)
                })
            },
        )
    }

    /// Like [`intersect`](Self::intersect), comparing values with
    /// `value_compare`.
    pub fn uintersect<F>(&mut self, others: &[OrderedArray], value_compare: F) -> &mut Self
    where
        F: Fn(&Value, &Value) -> Ordering,
    {
        self.retain_against(
            "uintersect",
            SetOperation::Intersection,
            others,
            |other, _, value| {
                other
                    .values()
                    .any(|candidate| value_compare(value, candidate).is_eq())
            },
        )
    }

    /// Like [`intersect_assoc`](Self::intersect_assoc), comparing values
    /// with `value_compare`.
    pub fn uintersect_assoc<F>(&mut self, others: &[OrderedArray], value_compare: F) -> &mut Self
    where
        F: Fn(&Value, &Value) -> Ordering,
    {
        self.retain_against(
            "uintersect_assoc",
            SetOperation::Intersection,
            others,
            |other, key, value| {
                other
                    .get(key)
                    .is_some_and(|candidate| value_compare(value, candidate).is_eq())
            },
        )
    }

    /// Like [`intersect_assoc`](Self::intersect_assoc), with comparators for
    /// both values and keys.
    pub fn uintersect_uassoc<F, G>(
        &mut self,
        others: &[OrderedArray],
        value_compare: F,
        key_compare: G,
    ) -> &mut Self
    where
        F: Fn(&Value, &Value) -> Ordering,
        G: Fn(&Key, &Key) -> Ordering,
    {
        self.retain_against(
            "uintersect_uassoc",
            SetOperation::Intersection,
            others,
            |other, key, value| {
                other.iter().any(|(candidate_key, candidate)| {
                    key_compare(key, candidate_key).is_eq()
                        && value_compare(value, candidate).is_eq()
                })
            },
        )
    }

    fn retain_against<T, M>(
        &mut self,
        operation: &'static str,
        kind: SetOperation,
        others: &[T],
        matches: M,
    ) -> &mut Self
    where
        M: Fn(&T, &Key, &Value) -> bool,
    {
        let retained = self
            .data
            .iter()
            .filter(|&(key, value)| kind.keeps(others.iter().map(|other| matches(other, key, value))))
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect();
        self.commit(operation, retained)
    }
}

fn string_forms(arrays: &[OrderedArray]) -> Vec<FxHashSet<String>> {
    arrays
        .iter()
        .map(|array| array.values().map(ToString::to_string).collect())
        .collect()
}

fn same_string(left: &Value, right: &Value) -> bool {
    left.to_string() == right.to_string()
}

fn has_key(other: &OrderedArray, key: &Key, _: &Value) -> bool {
    other.contains_key(key)
}

fn has_pair(other: &OrderedArray, key: &Key, value: &Value) -> bool {
    other
        .get(key)
        .is_some_and(|candidate| same_string(value, candidate))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::array;
    use rstest::rstest;

    fn case_insensitive(left: &Value, right: &Value) -> Ordering {
        left.to_string()
            .to_lowercase()
            .cmp(&right.to_string().to_lowercase())
    }

    fn key_case_insensitive(left: &Key, right: &Key) -> Ordering {
        left.to_string()
            .to_lowercase()
            .cmp(&right.to_string().to_lowercase())
    }

    #[rstest]
    fn test_diff() {
        let mut container = Container::from(array!["a" => "green", "b" => "brown", "c" => "blue", 0 => "red"]);
        container.diff(&[array!["x" => "green", "y" => "red"]]);
        assert_eq!(container.to_array(), array!["b" => "brown", "c" => "blue"]);
    }

    #[rstest]
    fn test_diff_compares_string_forms() {
        let mut container = Container::from(array![1, "1", 1.0, 2]);
        container.diff(&[array!["1"]]);
        assert_eq!(container.to_array(), array![3 => 2]);
    }

    #[rstest]
    fn test_diff_against_several_arrays() {
        let mut container = Container::from(array![1, 2, 3, 4]);
        container.diff(&[array![1], array![3]]);
        assert_eq!(container.to_array(), array![1 => 2, 3 => 4]);
    }

    #[rstest]
    fn test_diff_key() {
        let mut container = Container::from(array!["blue" => 1, "red" => 2, "green" => 3, "purple" => 4]);
        container.diff_key(&[array!["green" => 5, "yellow" => 7, "cyan" => 8]]);
        assert_eq!(
            container.to_array(),
            array!["blue" => 1, "red" => 2, "purple" => 4]
        );
    }

    #[rstest]
    fn test_diff_assoc() {
        let mut container = Container::from(array!["a" => "green", "b" => "brown", "c" => "blue", 0 => "red"]);
        container.diff_assoc(&[array!["a" => "green", 0 => "yellow", 1 => "red"]]);
        assert_eq!(
            container.to_array(),
            array!["b" => "brown", "c" => "blue", 0 => "red"]
        );
    }

    #[rstest]
    fn test_diff_ukey() {
        let mut container = Container::from(array!["Blue" => 1, "red" => 2]);
        container.diff_ukey(&[array!["BLUE" => 9]], key_case_insensitive);
        assert_eq!(container.to_array(), array!["red" => 2]);
    }

    #[rstest]
    fn test_diff_uassoc() {
        let mut container = Container::from(array!["A" => "green", "b" => "brown"]);
        container.diff_uassoc(&[array!["a" => "green", "b" => "BROWN"]], key_case_insensitive);
        assert_eq!(container.to_array(), array!["b" => "brown"]);
    }

    #[rstest]
    fn test_udiff() {
        let mut container = Container::from(array!["Apple", "banana", "Cherry"]);
        container.udiff(&[array!["apple", "cherry"]], case_insensitive);
        assert_eq!(container.to_array(), array![1 => "banana"]);
    }

    #[rstest]
    fn test_udiff_assoc_and_uassoc() {
        let source = array!["a" => "Green", "b" => "brown"];

        let mut assoc = Container::from(source.clone());
        assoc.udiff_assoc(&[array!["a" => "GREEN", "B" => "brown"]], case_insensitive);
        assert_eq!(assoc.to_array(), array!["b" => "brown"]);

        let mut both = Container::from(source);
        both.udiff_uassoc(
            &[array!["a" => "GREEN", "B" => "brown"]],
            case_insensitive,
            key_case_insensitive,
        );
        assert!(both.is_empty());
    }

    #[rstest]
    fn test_intersect() {
        let mut container = Container::from(array!["a" => "green", 0 => "red", 1 => "blue"]);
        container.intersect(&[array!["b" => "green", 0 => "yellow", 1 => "red"]]);
        assert_eq!(container.to_array(), array!["a" => "green", 0 => "red"]);
    }

    #[rstest]
    fn test_intersect_requires_every_array() {
        let mut container = Container::from(array![1, 2, 3]);
        container.intersect(&[array![1, 2], array![2, 3]]);
        assert_eq!(container.to_array(), array![1 => 2]);
    }

    #[rstest]
    fn test_intersect_key() {
        let mut container = Container::from(array!["blue" => 1, "red" => 2, "green" => 3, "purple" => 4]);
        container.intersect_key(&[array!["green" => 5, "blue" => 6, "yellow" => 7]]);
        assert_eq!(container.to_array(), array!["blue" => 1, "green" => 3]);
    }

    #[rstest]
    fn test_intersect_assoc() {
        let mut container = Container::from(array!["a" => "green", "b" => "brown", "c" => "blue", 0 => "red"]);
        container.intersect_assoc(&[array!["a" => "green", "b" => "yellow", 0 => "blue", 1 => "red"]]);
        assert_eq!(container.to_array(), array!["a" => "green"]);
    }

    #[rstest]
    fn test_intersect_with_comparators() {
        let source = array!["a" => "Green", "B" => "brown", 0 => "blue"];
        let other = array!["A" => "GREEN", "b" => "brown", 0 => "Blue"];

        let mut ukey = Container::from(source.clone());
        ukey.intersect_ukey(&[other.clone()], key_case_insensitive);
        assert_eq!(ukey.len(), 3);

        let mut uassoc = Container::from(source.clone());
        uassoc.intersect_uassoc(&[other.clone()], key_case_insensitive);
        assert_eq!(uassoc.to_array(), array!["B" => "brown"]);

        let mut values = Container::from(source.clone());
        values.uintersect(&[other.clone()], case_insensitive);
        assert_eq!(values.len(), 3);

        let mut assoc = Container::from(source.clone());
        assoc.uintersect_assoc(&[other.clone()], case_insensitive);
        assert_eq!(assoc.to_array(), array![0 => "blue"]);

        let mut both = Container::from(source.clone());
        both.uintersect_uassoc(&[other], case_insensitive, key_case_insensitive);
        assert_eq!(both.to_array(), source);
    }

    #[rstest]
    fn test_no_other_arrays_keeps_everything() {
        let source = array!["a" => 1, 0 => 2];

        let mut difference = Container::from(source.clone());
        difference.diff(&[]);
        assert_eq!(difference.to_array(), source);

        let mut intersection = Container::from(source.clone());
        intersection.intersect(&[]);
        assert_eq!(intersection.to_array(), source);
    }
}
