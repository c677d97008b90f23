//! Property-based tests for Container.
//!
//! This module verifies that Container operations satisfy their algebraic
//! laws and ordering invariants using proptest.

use fluent_array::{Container, Key, OrderedArray, SortFlag, Value};
use proptest::prelude::*;

// =============================================================================
// Strategy for generating test data
// =============================================================================

fn arbitrary_key() -> impl Strategy<Value = Key> {
    prop_oneof![
        (-20_i64..20).prop_map(Key::Int),
        "[a-z]{1,6}".prop_map(Key::from),
    ]
}

fn arbitrary_scalar() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        (-1000_i64..1000).prop_map(Value::Int),
        "[a-z]{0,6}".prop_map(Value::from),
    ]
}

fn arbitrary_mixed_scalar() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        (-20_i64..20).prop_map(Value::Int),
        prop_oneof![Just(f64::NAN), Just(1.5), Just(-0.5), Just(1e300)].prop_map(Value::Float),
        prop_oneof![
            Just(""), Just("abc"), Just("10"), Just("9a"), Just("1e1"), Just(" 5"), Just("0")
        ]
        .prop_map(Value::from),
    ]
}

fn arbitrary_mixed_list() -> impl Strategy<Value = OrderedArray> {
    prop::collection::vec(arbitrary_mixed_scalar(), 0..60).prop_map(OrderedArray::from_values)
}

fn described(values: &[Value]) -> Vec<String> {
    let mut described: Vec<String> = values
        .iter()
        .map(|value| format!("{}:{value}", value.type_name()))
        .collect();
    described.sort();
    described
}

fn arbitrary_entries() -> impl Strategy<Value = Vec<(Key, Value)>> {
    prop::collection::vec((arbitrary_key(), arbitrary_scalar()), 0..40)
}

fn arbitrary_array() -> impl Strategy<Value = OrderedArray> {
    arbitrary_entries().prop_map(|entries| entries.into_iter().collect())
}

fn arbitrary_integer_list() -> impl Strategy<Value = OrderedArray> {
    prop::collection::vec(-1000_i64..1000, 0..40).prop_map(OrderedArray::from)
}

fn arbitrary_distinct_words() -> impl Strategy<Value = OrderedArray> {
    prop::collection::btree_set("[a-z]{1,8}", 0..30)
        .prop_map(|words| OrderedArray::from_values(words))
}

// =============================================================================
// Round-Trip Law: Container::from(a).to_array() == a
// =============================================================================

proptest! {
    #[test]
    fn prop_from_to_array_round_trip(array in arbitrary_array()) {
        prop_assert_eq!(Container::from(array.clone()).to_array(), array);
    }
}

// =============================================================================
// Key Uniqueness: every key appears once and len matches
// =============================================================================

proptest! {
    #[test]
    fn prop_keys_are_unique(array in arbitrary_array()) {
        let container = Container::from(array);
        let keys = container.keys();
        let mut deduplicated = keys.clone();
        deduplicated.sort_by_key(ToString::to_string);
        deduplicated.dedup();
        prop_assert_eq!(deduplicated.len(), keys.len());
        prop_assert_eq!(keys.len(), container.len());
    }
}

// =============================================================================
// Slice Partition Law: slice(0, k) ++ slice(k, None) == whole
// =============================================================================

proptest! {
    #[test]
    fn prop_slice_partition(array in arbitrary_integer_list(), split in 0_i64..50) {
        let mut head = Container::from(array.clone());
        head.slice(0, Some(split), false);
        let mut tail = Container::from(array.clone());
        tail.slice(split, None, false);

        let mut joined = head.values();
        joined.extend(tail.values());
        prop_assert_eq!(joined, Container::from(array).values());
    }
}

// =============================================================================
// Sort Laws: sort is ordered and idempotent; rsort is its reverse; any
// comparator yields a permutation
// =============================================================================

proptest! {
    #[test]
    fn prop_sort_is_ordered(array in arbitrary_integer_list()) {
        let mut container = Container::from(array);
        container.sort(SortFlag::Regular);
        let values = container.values();
        prop_assert!(values.windows(2).all(|pair| pair[0].compare(&pair[1]).is_le()));
        prop_assert!(container.is_list());
    }

    #[test]
    fn prop_sort_is_idempotent(array in arbitrary_integer_list()) {
        let mut once = Container::from(array);
        once.sort(SortFlag::Regular);
        let mut twice = once.clone();
        twice.sort(SortFlag::Regular);
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn prop_rsort_reverses_sort(array in arbitrary_integer_list()) {
        let mut ascending = Container::from(array.clone());
        ascending.sort(SortFlag::Regular);
        let mut descending = Container::from(array);
        descending.rsort(SortFlag::Regular);

        let mut reversed = descending.values();
        reversed.reverse();
        prop_assert_eq!(ascending.values(), reversed);
    }

    #[test]
    fn prop_sort_orders_mixed_kinds(array in arbitrary_mixed_list(), flag in prop_oneof![
        Just(SortFlag::Regular),
        Just(SortFlag::Numeric),
        Just(SortFlag::String),
    ]) {
        let original = Container::from(array.clone()).values();
        let mut container = Container::from(array);
        container.sort(flag);
        let values = container.values();
        prop_assert!(values.windows(2).all(|pair| pair[0].compare_with(&pair[1], flag).is_le()));
        prop_assert_eq!(described(&values), described(&original));
    }

    #[test]
    fn prop_unique_regular_leaves_no_equal_pair(array in arbitrary_mixed_list()) {
        let mut container = Container::from(array);
        container.unique(SortFlag::Regular);
        let values = container.values();
        for (position, value) in values.iter().enumerate() {
            prop_assert!(values[position + 1..]
                .iter()
                .all(|other| value.compare_with(other, SortFlag::Regular).is_ne()));
        }
    }

    #[test]
    fn prop_usort_with_arbitrary_comparator_is_a_permutation(
        array in arbitrary_integer_list(),
        answers in prop::collection::vec(0_u8..3, 1..64)
    ) {
        let calls = std::cell::Cell::new(0_usize);
        let mut container = Container::from(array.clone());
        container.usort(|_, _| {
            let answer = answers[calls.get() % answers.len()];
            calls.set(calls.get() + 1);
            answer.cmp(&1)
        });

        let mut sorted: Vec<i64> = container.values().iter().filter_map(Value::as_int).collect();
        let mut expected: Vec<i64> = array.values().filter_map(Value::as_int).collect();
        sorted.sort_unstable();
        expected.sort_unstable();
        prop_assert_eq!(sorted, expected);
        prop_assert!(container.is_list());
    }

    #[test]
    fn prop_asort_keeps_key_value_pairs(array in arbitrary_array()) {
        let mut sorted = Container::from(array.clone());
        sorted.asort(SortFlag::String);
        prop_assert_eq!(sorted.len(), array.len());
        for (key, value) in sorted.iter() {
            prop_assert_eq!(array.get(key), Some(value));
        }
    }
}

// =============================================================================
// Flip Involution: flip(flip(a)) == a for distinct string values
// =============================================================================

proptest! {
    #[test]
    fn prop_flip_involution(words in arbitrary_distinct_words()) {
        let mut container = Container::from(words.clone());
        container.flip().flip();
        prop_assert_eq!(container.to_array(), words);
    }
}

// =============================================================================
// Unique Laws: idempotent, no duplicates remain, first occurrences kept
// =============================================================================

proptest! {
    #[test]
    fn prop_unique_is_idempotent(array in arbitrary_array()) {
        let mut once = Container::from(array);
        once.unique(SortFlag::String);
        let mut twice = once.clone();
        twice.unique(SortFlag::String);
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn prop_unique_leaves_distinct_string_forms(array in arbitrary_array()) {
        let mut container = Container::from(array.clone());
        container.unique(SortFlag::String);
        let mut forms: Vec<String> = container.values().iter().map(ToString::to_string).collect();
        let count = forms.len();
        forms.sort();
        forms.dedup();
        prop_assert_eq!(forms.len(), count);

        let first_keys: Vec<Key> = array
            .keys()
            .filter(|key| container.key_exists(*key))
            .cloned()
            .collect();
        prop_assert_eq!(first_keys, container.keys());
    }
}

// =============================================================================
// Push/Pop Law: push(v) then pop() == Some(v) and data unchanged
// =============================================================================

proptest! {
    #[test]
    fn prop_push_pop(array in arbitrary_array(), value in arbitrary_scalar()) {
        let mut container = Container::from(array.clone());
        container.push(value.clone());
        prop_assert_eq!(container.pop(), Some(value));
        prop_assert_eq!(container.to_array(), array);
    }

    #[test]
    fn prop_unshift_shift(array in arbitrary_integer_list(), value in -1000_i64..1000) {
        let mut container = Container::from(array.clone());
        container.unshift(value);
        prop_assert_eq!(container.shift(), Some(Value::Int(value)));
        prop_assert_eq!(container.to_array(), array);
    }
}

// =============================================================================
// Set Laws: diff and intersect partition the array
// =============================================================================

proptest! {
    #[test]
    fn prop_diff_and_intersect_partition(
        array in arbitrary_array(),
        other in arbitrary_array()
    ) {
        let mut difference = Container::from(array.clone());
        difference.diff(std::slice::from_ref(&other));
        let mut intersection = Container::from(array.clone());
        intersection.intersect(std::slice::from_ref(&other));

        prop_assert_eq!(difference.len() + intersection.len(), array.len());
        prop_assert!(difference.keys().iter().all(|key| !intersection.key_exists(key)));
    }

    #[test]
    fn prop_diff_with_self_is_empty(array in arbitrary_array()) {
        let mut container = Container::from(array.clone());
        container.diff_assoc(&[array]);
        prop_assert!(container.is_empty());
    }
}

// =============================================================================
// Reverse Law: reverse(true) twice restores the array
// =============================================================================

proptest! {
    #[test]
    fn prop_reverse_preserving_keys_is_involution(array in arbitrary_array()) {
        let mut container = Container::from(array.clone());
        container.reverse(true).reverse(true);
        prop_assert_eq!(container.to_array(), array);
    }
}
