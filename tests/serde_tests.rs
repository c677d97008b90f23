#![cfg(feature = "serde")]

//! Integration tests for serde support in fluent-array.
//!
//! Lists serialize as sequences and every other array as a map; both shapes
//! deserialize back into an ordered array.

use fluent_array::{Container, Key, OrderedArray, Value, array};
use rstest::rstest;

// =============================================================================
// Serialization
// =============================================================================

#[rstest]
fn test_list_serializes_as_sequence() {
    let array = array![1, "two", 3.5, true, ()];
    assert_eq!(
        serde_json::to_string(&array).unwrap(),
        r#"[1,"two",3.5,true,null]"#
    );
}

#[rstest]
fn test_keyed_array_serializes_as_map_in_order() {
    let array = array!["b" => 1, "a" => 2, 5 => "five"];
    assert_eq!(
        serde_json::to_string(&array).unwrap(),
        r#"{"b":1,"a":2,"5":"five"}"#
    );
}

#[rstest]
fn test_container_serializes_like_its_array() {
    let container = Container::from(array!["name" => "Ada", "langs" => array!["en", "fr"]]);
    assert_eq!(
        serde_json::to_string(&container).unwrap(),
        r#"{"name":"Ada","langs":["en","fr"]}"#
    );
}

// =============================================================================
// Deserialization
// =============================================================================

#[rstest]
fn test_map_keys_are_normalized() {
    let array: OrderedArray = serde_json::from_str(r#"{"1":"a","x":"b","01":"c"}"#).unwrap();
    assert_eq!(array.keys().cloned().collect::<Vec<_>>(), vec![
        Key::Int(1),
        Key::from("x"),
        Key::Str("01".to_string()),
    ]);
}

#[rstest]
fn test_nested_json_round_trip() {
    let json = r#"{"users":[{"id":1,"tags":["a","b"]},{"id":2,"tags":[]}],"total":2}"#;
    let container: Container = serde_json::from_str(json).unwrap();

    assert_eq!(container.len(), 2);
    assert_eq!(container.get("total"), Some(&Value::Int(2)));
    assert_eq!(serde_json::to_string(&container).unwrap(), json);
}

#[rstest]
#[case("null", Value::Null)]
#[case("true", Value::Bool(true))]
#[case("-4", Value::Int(-4))]
#[case("2.5", Value::Float(2.5))]
#[case(r#""text""#, Value::from("text"))]
fn test_scalar_values(#[case] json: &str, #[case] expected: Value) {
    let value: Value = serde_json::from_str(json).unwrap();
    assert_eq!(value, expected);
}

#[rstest]
fn test_large_unsigned_becomes_float() {
    let value: Value = serde_json::from_str("18446744073709551615").unwrap();
    assert!(matches!(value, Value::Float(_)));
}

#[rstest]
fn test_container_round_trip_preserves_order() {
    let container = Container::from(array!["z" => 1, "y" => array![3 => "x"], 0 => ()]);
    let json = serde_json::to_string(&container).unwrap();
    let restored: Container = serde_json::from_str(&json).unwrap();
    assert_eq!(restored, container);
}
