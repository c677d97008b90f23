//! Dynamically typed array values.
//!
//! [`Value`] is the element type of an [`OrderedArray`]. Besides strict
//! (identity) equality, values support the loose comparison rules that the
//! set operations, searches and sorts of a [`Container`](crate::Container)
//! are defined in terms of:
//!
//! - `null` and booleans compare by truthiness
//! - numbers and numeric strings compare numerically
//! - other strings compare byte-wise
//! - arrays compare by size, then entry by entry
//!
//! # Examples
//!
//! ```rust
//! use fluent_array::Value;
//!
//! assert!(Value::from(1).loose_eq(&Value::from("1.0")));
//! assert_ne!(Value::from(1), Value::from("1"));
//! assert_eq!(Value::from(2.5).to_string(), "2.5");
//! ```

use std::cmp::Ordering;
use std::fmt;

use crate::error::{ArrayError, Result};
use crate::flags::SortFlag;
use crate::key::Key;
use crate::natural;
use crate::ordered_array::OrderedArray;

/// A dynamically typed element.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Value {
    /// The absence of a value.
    #[default]
    Null,
    /// A boolean.
    Bool(bool),
    /// A signed 64-bit integer.
    Int(i64),
    /// A double precision float.
    Float(f64),
    /// A UTF-8 string.
    Str(String),
    /// A nested array.
    Array(OrderedArray),
}

/// The result of numeric aggregation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Number {
    /// An integer result.
    Int(i64),
    /// A float result, produced by float operands or integer overflow.
    Float(f64),
}

impl Number {
    /// Returns the value as a float.
    #[allow(clippy::cast_precision_loss)]
    pub const fn as_f64(self) -> f64 {
        match self {
            Self::Int(value) => value as f64,
            Self::Float(value) => value,
        }
    }

    pub(crate) fn add(self, other: Self) -> Self {
        match (self, other) {
            (Self::Int(left), Self::Int(right)) => left
                .checked_add(right)
                .map_or_else(|| Self::Float(self.as_f64() + other.as_f64()), Self::Int),
            _ => Self::Float(self.as_f64() + other.as_f64()),
        }
    }

    pub(crate) fn multiply(self, other: Self) -> Self {
        match (self, other) {
            (Self::Int(left), Self::Int(right)) => left
                .checked_mul(right)
                .map_or_else(|| Self::Float(self.as_f64() * other.as_f64()), Self::Int),
            _ => Self::Float(self.as_f64() * other.as_f64()),
        }
    }

    // Total: integers and floats compare exactly, NaN sorts after every
    // other number and equals itself.
    fn compare(self, other: Self) -> Ordering {
        match (self, other) {
            (Self::Int(left), Self::Int(right)) => left.cmp(&right),
            (Self::Int(left), Self::Float(right)) => compare_int_float(left, right),
            (Self::Float(left), Self::Int(right)) => compare_int_float(right, left).reverse(),
            (Self::Float(left), Self::Float(right)) => compare_floats(left, right),
        }
    }
}

fn compare_floats(left: f64, right: f64) -> Ordering {
    match (left.is_nan(), right.is_nan()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) if left < right => Ordering::Less,
        (false, false) if left > right => Ordering::Greater,
        (false, false) => Ordering::Equal,
    }
}

// Exact comparison without rounding the integer through f64.
#[allow(clippy::cast_possible_truncation)]
fn compare_int_float(integer: i64, float: f64) -> Ordering {
    const TWO_POW_63: f64 = 9_223_372_036_854_775_808.0;
    if float.is_nan() || float >= TWO_POW_63 {
        return Ordering::Less;
    }
    if float < -TWO_POW_63 {
        return Ordering::Greater;
    }
    let whole = float.trunc();
    let fraction = float - whole;
    integer.cmp(&(whole as i64)).then(if fraction > 0.0 {
        Ordering::Less
    } else if fraction < 0.0 {
        Ordering::Greater
    } else {
        Ordering::Equal
    })
}

impl fmt::Display for Number {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(value) => write!(formatter, "{value}"),
            Self::Float(value) => write_float(formatter, *value),
        }
    }
}

impl From<Number> for Value {
    fn from(number: Number) -> Self {
        match number {
            Number::Int(value) => Self::Int(value),
            Number::Float(value) => Self::Float(value),
        }
    }
}

impl Value {
    /// Returns the name of the variant, as used in error messages.
    pub const fn type_name(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "bool",
            Self::Int(_) => "int",
            Self::Float(_) => "float",
            Self::Str(_) => "string",
            Self::Array(_) => "array",
        }
    }

    /// Returns `true` for `Null`.
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Returns the boolean value if this is a `Bool`.
    pub const fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(value) => Some(*value),
            _ => None,
        }
    }

    /// Returns the integer value if this is an `Int`.
    pub const fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(value) => Some(*value),
            _ => None,
        }
    }

    /// Returns the float value if this is a `Float`.
    pub const fn as_float(&self) -> Option<f64> {
        match self {
            Self::Float(value) => Some(*value),
            _ => None,
        }
    }

    /// Returns the string slice if this is a `Str`.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(value) => Some(value),
            _ => None,
        }
    }

    /// Returns the nested array if this is an `Array`.
    pub const fn as_array(&self) -> Option<&OrderedArray> {
        match self {
            Self::Array(array) => Some(array),
            _ => None,
        }
    }

    /// Returns the nested array mutably if this is an `Array`.
    pub const fn as_array_mut(&mut self) -> Option<&mut OrderedArray> {
        match self {
            Self::Array(array) => Some(array),
            _ => None,
        }
    }

    /// Boolean interpretation of the value.
    ///
    /// `null`, `false`, `0`, `0.0`, `""`, `"0"` and empty arrays are falsy.
    pub fn is_truthy(&self) -> bool {
        match self {
            Self::Null => false,
            Self::Bool(value) => *value,
            Self::Int(value) => *value != 0,
            Self::Float(value) => *value != 0.0,
            Self::Str(value) => !(value.is_empty() || value == "0"),
            Self::Array(array) => !array.is_empty(),
        }
    }

    /// Coerces the value to a number for arithmetic aggregation.
    ///
    /// # Errors
    ///
    /// Returns [`ArrayError::TypeMismatch`] for arrays and strings that are
    /// not numeric.
    pub fn to_number(&self, operation: &'static str) -> Result<Number> {
        match self {
            Self::Null => Ok(Number::Int(0)),
            Self::Bool(value) => Ok(Number::Int(i64::from(*value))),
            Self::Int(value) => Ok(Number::Int(*value)),
            Self::Float(value) => Ok(Number::Float(*value)),
            Self::Str(text) => parse_numeric(text).ok_or(ArrayError::TypeMismatch {
                operation,
                found: "string",
            }),
            Self::Array(_) => Err(ArrayError::TypeMismatch {
                operation,
                found: "array",
            }),
        }
    }

    /// Lenient numeric interpretation used by [`SortFlag::Numeric`].
    ///
    /// Strings contribute their leading numeric prefix (or zero), arrays
    /// contribute `1.0` when non-empty.
    #[allow(clippy::cast_precision_loss)]
    pub fn numeric_value(&self) -> f64 {
        match self {
            Self::Null => 0.0,
            Self::Bool(value) => f64::from(u8::from(*value)),
            Self::Int(value) => *value as f64,
            Self::Float(value) => *value,
            Self::Str(text) => leading_numeric(text).map_or(0.0, Number::as_f64),
            Self::Array(array) => {
                if array.is_empty() {
                    0.0
                } else {
                    1.0
                }
            }
        }
    }

    /// Identity comparison: same variant and same content.
    pub fn strict_eq(&self, other: &Self) -> bool {
        self == other
    }

    /// Loose equality.
    ///
    /// Arrays are loosely equal when they hold the same keys with loosely
    /// equal values, regardless of order.
    pub fn loose_eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Array(left), Self::Array(right)) => {
                left.len() == right.len()
                    && left.iter().all(|(key, value)| {
                        right
                            .get(key)
                            .is_some_and(|candidate| value.loose_eq(candidate))
                    })
            }
            _ => self.compare(other) == Ordering::Equal,
        }
    }

    /// Standard three-way comparison.
    pub fn compare(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::Null, Self::Null) => Ordering::Equal,
            (Self::Null, Self::Str(text)) => "".cmp(text.as_str()),
            (Self::Str(text), Self::Null) => text.as_str().cmp(""),
            (Self::Null | Self::Bool(_), _) | (_, Self::Null | Self::Bool(_)) => {
                self.is_truthy().cmp(&other.is_truthy())
            }
            (Self::Int(_) | Self::Float(_), Self::Int(_) | Self::Float(_)) => {
                self.as_number().compare(other.as_number())
            }
            (Self::Int(_) | Self::Float(_), Self::Str(text)) => parse_numeric(text).map_or_else(
                || self.to_string().as_str().cmp(text.as_str()),
                |number| self.as_number().compare(number),
            ),
            (Self::Str(text), Self::Int(_) | Self::Float(_)) => parse_numeric(text).map_or_else(
                || text.as_str().cmp(other.to_string().as_str()),
                |number| number.compare(other.as_number()),
            ),
            (Self::Str(left), Self::Str(right)) => {
                match (parse_numeric(left), parse_numeric(right)) {
                    (Some(left_number), Some(right_number)) => left_number.compare(right_number),
                    _ => left.cmp(right),
                }
            }
            (Self::Array(left), Self::Array(right)) => compare_arrays(left, right),
            (Self::Array(_), _) => Ordering::Greater,
            (_, Self::Array(_)) => Ordering::Less,
        }
    }

    /// Compares two values under a sort flag.
    ///
    /// Every flag yields a total order. Under [`SortFlag::Regular`] values
    /// are ranked by kind first: `null` and booleans by truthiness, then
    /// numbers and numeric strings, then other strings, then arrays. Within a
    /// kind they compare as [`compare`](Self::compare) does, except that
    /// arrays of equal size compare entry by entry in stored order. `NaN`
    /// sorts after every other number under both `Regular` and `Numeric`.
    ///
    /// ```rust
    /// use std::cmp::Ordering;
    /// use fluent_array::{SortFlag, Value};
    ///
    /// let regular = |left: Value, right: Value| left.compare_with(&right, SortFlag::Regular);
    /// assert_eq!(regular(Value::from(10), Value::from("9")), Ordering::Greater);
    /// assert_eq!(regular(Value::from(99), Value::from("1a")), Ordering::Less);
    /// assert_eq!(regular(Value::Null, Value::from(-1)), Ordering::Less);
    /// assert_eq!(regular(Value::from(f64::NAN), Value::from(1)), Ordering::Greater);
    /// ```
    pub fn compare_with(&self, other: &Self, flag: SortFlag) -> Ordering {
        match flag {
            SortFlag::Regular => SortClass::of(self).compare(&SortClass::of(other)),
            SortFlag::Numeric => compare_floats(self.numeric_value(), other.numeric_value()),
            SortFlag::String => self.to_string().cmp(&other.to_string()),
            SortFlag::StringCaseInsensitive => self
                .to_string()
                .to_lowercase()
                .cmp(&other.to_string().to_lowercase()),
            SortFlag::Natural => natural::compare(&self.to_string(), &other.to_string(), false),
            SortFlag::NaturalCaseInsensitive => {
                natural::compare(&self.to_string(), &other.to_string(), true)
            }
        }
    }

    // Only called on Int and Float.
    fn as_number(&self) -> Number {
        match self {
            Self::Int(value) => Number::Int(*value),
            Self::Float(value) => Number::Float(*value),
            _ => Number::Int(0),
        }
    }
}

/// The kind-ranked view of a value used by [`SortFlag::Regular`].
enum SortClass<'a> {
    Truth(bool),
    Number(Number),
    Text(&'a str),
    Array(&'a OrderedArray),
}

impl<'a> SortClass<'a> {
    fn of(value: &'a Value) -> Self {
        match value {
            Value::Null => Self::Truth(false),
            Value::Bool(truth) => Self::Truth(*truth),
            Value::Int(number) => Self::Number(Number::Int(*number)),
            Value::Float(number) => Self::Number(Number::Float(*number)),
            Value::Str(text) => Self::of_text(text),
            Value::Array(array) => Self::Array(array),
        }
    }

    fn of_key(key: &'a Key) -> Self {
        match key {
            Key::Int(number) => Self::Number(Number::Int(*number)),
            Key::Str(text) => Self::of_text(text),
        }
    }

    fn of_text(text: &'a str) -> Self {
        parse_numeric(text).map_or(Self::Text(text), Self::Number)
    }

    const fn rank(&self) -> u8 {
        match self {
            Self::Truth(_) => 0,
            Self::Number(_) => 1,
            Self::Text(_) => 2,
            Self::Array(_) => 3,
        }
    }

    fn compare(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::Truth(left), Self::Truth(right)) => left.cmp(right),
            (Self::Number(left), Self::Number(right)) => left.compare(*right),
            (Self::Text(left), Self::Text(right)) => left.cmp(right),
            (Self::Array(left), Self::Array(right)) => {
                left.len().cmp(&right.len()).then_with(|| {
                    left.iter()
                        .zip(right.iter())
                        .map(|((left_key, left_value), (right_key, right_value))| {
                            Self::of_key(left_key)
                                .compare(&Self::of_key(right_key))
                                .then_with(|| {
                                    Self::of(left_value).compare(&Self::of(right_value))
                                })
                        })
                        .find(|ordering| ordering.is_ne())
                        .unwrap_or(Ordering::Equal)
                })
            }
            _ => self.rank().cmp(&other.rank()),
        }
    }
}

fn compare_arrays(left: &OrderedArray, right: &OrderedArray) -> Ordering {
    match left.len().cmp(&right.len()) {
        Ordering::Equal => {}
        unequal => return unequal,
    }
    for (key, value) in left {
        let Some(candidate) = right.get(key) else {
            // Uncomparable; the left operand is reported as greater.
            return Ordering::Greater;
        };
        match value.compare(candidate) {
            Ordering::Equal => {}
            unequal => return unequal,
        }
    }
    Ordering::Equal
}

/// Parses a numeric string: optional surrounding whitespace, optional sign,
/// decimal digits with an optional fraction and exponent.
pub(crate) fn parse_numeric(text: &str) -> Option<Number> {
    let trimmed = text.trim_matches(|character: char| {
        matches!(character, ' ' | '\t' | '\n' | '\r' | '\u{0b}' | '\u{0c}')
    });
    let (is_literal, is_integral) = scan_numeric_literal(trimmed.as_bytes());
    if !is_literal {
        return None;
    }
    if is_integral {
        if let Ok(integer) = trimmed.parse::<i64>() {
            return Some(Number::Int(integer));
        }
    }
    trimmed.parse::<f64>().ok().map(Number::Float)
}

fn leading_numeric(text: &str) -> Option<Number> {
    let trimmed = text.trim_start();
    let (length, is_integral) = scan_numeric_prefix(trimmed.as_bytes());
    if length == 0 {
        return None;
    }
    let prefix = trimmed.get(..length)?;
    if is_integral {
        if let Ok(integer) = prefix.parse::<i64>() {
            return Some(Number::Int(integer));
        }
    }
    prefix.parse::<f64>().ok().map(Number::Float)
}

// Returns (is a complete numeric literal, has neither fraction nor exponent).
fn scan_numeric_literal(bytes: &[u8]) -> (bool, bool) {
    let (length, is_integral) = scan_numeric_prefix(bytes);
    (length > 0 && length == bytes.len(), is_integral)
}

// Returns the byte length of the longest numeric prefix (zero if there is
// none) and whether that prefix has neither fraction nor exponent. An
// incomplete exponent is left out of the prefix.
fn scan_numeric_prefix(bytes: &[u8]) -> (usize, bool) {
    let mut position = 0;
    let digits_from = |start: usize| {
        bytes[start..]
            .iter()
            .take_while(|byte| byte.is_ascii_digit())
            .count()
    };

    if matches!(bytes.first(), Some(b'+' | b'-')) {
        position += 1;
    }
    let integer_digits = digits_from(position);
    position += integer_digits;

    let mut integral = true;
    let mut fraction_digits = 0;
    if bytes.get(position) == Some(&b'.') {
        integral = false;
        position += 1;
        fraction_digits = digits_from(position);
        position += fraction_digits;
    }
    if integer_digits + fraction_digits == 0 {
        return (0, false);
    }

    if matches!(bytes.get(position), Some(b'e' | b'E')) {
        let mut exponent = position + 1;
        if matches!(bytes.get(exponent), Some(b'+' | b'-')) {
            exponent += 1;
        }
        let exponent_digits = digits_from(exponent);
        if exponent_digits > 0 {
            integral = false;
            position = exponent + exponent_digits;
        }
    }

    (position, integral)
}

#[allow(clippy::cast_possible_truncation)]
fn write_float(formatter: &mut fmt::Formatter<'_>, value: f64) -> fmt::Result {
    if value.is_nan() {
        formatter.write_str("NAN")
    } else if value.is_infinite() {
        formatter.write_str(if value > 0.0 { "INF" } else { "-INF" })
    } else if value.fract() == 0.0 && value.abs() < 1e15 {
        if value == 0.0 && value.is_sign_negative() {
            formatter.write_str("-0")
        } else {
            write!(formatter, "{}", value as i64)
        }
    } else {
        write!(formatter, "{value}")
    }
}

/// String conversion of a value.
impl fmt::Display for Value {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null | Self::Bool(false) => Ok(()),
            Self::Bool(true) => formatter.write_str("1"),
            Self::Int(value) => write!(formatter, "{value}"),
            Self::Float(value) => write_float(formatter, *value),
            Self::Str(value) => formatter.write_str(value),
            Self::Array(_) => formatter.write_str("Array"),
        }
    }
}

// =============================================================================
// Conversions
// =============================================================================

impl From<()> for Value {
    fn from((): ()) -> Self {
        Self::Null
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<u32> for Value {
    fn from(value: u32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<usize> for Value {
    #[allow(clippy::cast_precision_loss)]
    fn from(value: usize) -> Self {
        i64::try_from(value).map_or(Self::Float(value as f64), Self::Int)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<f32> for Value {
    fn from(value: f32) -> Self {
        Self::Float(f64::from(value))
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::Str(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

impl From<char> for Value {
    fn from(value: char) -> Self {
        Self::Str(value.to_string())
    }
}

impl From<OrderedArray> for Value {
    fn from(value: OrderedArray) -> Self {
        Self::Array(value)
    }
}

impl From<Key> for Value {
    fn from(key: Key) -> Self {
        match key {
            Key::Int(value) => Self::Int(value),
            Key::Str(value) => Self::Str(value),
        }
    }
}

impl From<&Key> for Value {
    fn from(key: &Key) -> Self {
        Self::from(key.clone())
    }
}

impl From<&Value> for Value {
    fn from(value: &Value) -> Self {
        value.clone()
    }
}

impl<T: Into<Self>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

impl<T: Into<Self>> From<Vec<T>> for Value {
    fn from(values: Vec<T>) -> Self {
        Self::Array(OrderedArray::from(values))
    }
}

impl PartialEq<i64> for Value {
    fn eq(&self, other: &i64) -> bool {
        self.as_int() == Some(*other)
    }
}

impl PartialEq<&str> for Value {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == Some(*other)
    }
}

// =============================================================================
// Serde Support
// =============================================================================

#[cfg(feature = "serde")]
impl serde::Serialize for Value {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        match self {
            Self::Null => serializer.serialize_unit(),
            Self::Bool(value) => serializer.serialize_bool(*value),
            Self::Int(value) => serializer.serialize_i64(*value),
            Self::Float(value) => serializer.serialize_f64(*value),
            Self::Str(value) => serializer.serialize_str(value),
            Self::Array(array) => serde::Serialize::serialize(array, serializer),
        }
    }
}

#[cfg(feature = "serde")]
struct ValueVisitor;

#[cfg(feature = "serde")]
impl<'de> serde::de::Visitor<'de> for ValueVisitor {
    type Value = Value;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a scalar, a sequence or a map")
    }

    fn visit_unit<E: serde::de::Error>(self) -> std::result::Result<Value, E> {
        Ok(Value::Null)
    }

    fn visit_none<E: serde::de::Error>(self) -> std::result::Result<Value, E> {
        Ok(Value::Null)
    }

    fn visit_some<D>(self, deserializer: D) -> std::result::Result<Value, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        serde::Deserialize::deserialize(deserializer)
    }

    fn visit_bool<E: serde::de::Error>(self, value: bool) -> std::result::Result<Value, E> {
        Ok(Value::Bool(value))
    }

    fn visit_i64<E: serde::de::Error>(self, value: i64) -> std::result::Result<Value, E> {
        Ok(Value::Int(value))
    }

    #[allow(clippy::cast_precision_loss)]
    fn visit_u64<E: serde::de::Error>(self, value: u64) -> std::result::Result<Value, E> {
        Ok(i64::try_from(value).map_or(Value::Float(value as f64), Value::Int))
    }

    fn visit_f64<E: serde::de::Error>(self, value: f64) -> std::result::Result<Value, E> {
        Ok(Value::Float(value))
    }

    fn visit_str<E: serde::de::Error>(self, value: &str) -> std::result::Result<Value, E> {
        Ok(Value::from(value))
    }

    fn visit_string<E: serde::de::Error>(self, value: String) -> std::result::Result<Value, E> {
        Ok(Value::Str(value))
    }

    fn visit_seq<A>(self, access: A) -> std::result::Result<Value, A::Error>
    where
        A: serde::de::SeqAccess<'de>,
    {
        serde::de::Visitor::visit_seq(crate::ordered_array::OrderedArrayVisitor, access)
            .map(Value::Array)
    }

    fn visit_map<A>(self, access: A) -> std::result::Result<Value, A::Error>
    where
        A: serde::de::MapAccess<'de>,
    {
        serde::de::Visitor::visit_map(crate::ordered_array::OrderedArrayVisitor, access)
            .map(Value::Array)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Value {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        deserializer.deserialize_any(ValueVisitor)
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::array;
    use rstest::rstest;

    #[rstest]
    #[case(Value::Null, "")]
    #[case(Value::Bool(true), "1")]
    #[case(Value::Bool(false), "")]
    #[case(Value::Int(-42), "-42")]
    #[case(Value::Float(1.0), "1")]
    #[case(Value::Float(0.5), "0.5")]
    #[case(Value::Float(f64::INFINITY), "INF")]
    #[case(Value::from("text"), "text")]
    #[case(Value::Array(OrderedArray::new()), "Array")]
    fn test_display(#[case] value: Value, #[case] expected: &str) {
        assert_eq!(value.to_string(), expected);
    }

    #[rstest]
    #[case("12", Some(Number::Int(12)))]
    #[case(" -7 ", Some(Number::Int(-7)))]
    #[case("1.5", Some(Number::Float(1.5)))]
    #[case(".5", Some(Number::Float(0.5)))]
    #[case("1e3", Some(Number::Float(1000.0)))]
    #[case("abc", None)]
    #[case("12abc", None)]
    #[case("", None)]
    #[case(".", None)]
    #[case("1e", None)]
    #[case("inf", None)]
    fn test_parse_numeric(#[case] input: &str, #[case] expected: Option<Number>) {
        assert_eq!(parse_numeric(input), expected);
    }

    #[rstest]
    #[case(Value::from(1), Value::from("1"), true)]
    #[case(Value::from(1), Value::from(1.0), true)]
    #[case(Value::from("1e1"), Value::from("10"), true)]
    #[case(Value::from("abc"), Value::from(0), false)]
    #[case(Value::Null, Value::Bool(false), true)]
    #[case(Value::Null, Value::from(""), true)]
    #[case(Value::Null, Value::from("0"), false)]
    #[case(Value::Bool(false), Value::from("0"), true)]
    #[case(Value::Bool(true), Value::from("apple"), true)]
    #[case(Value::from("apple"), Value::from("Apple"), false)]
    fn test_loose_eq(#[case] left: Value, #[case] right: Value, #[case] expected: bool) {
        assert_eq!(left.loose_eq(&right), expected);
        assert_eq!(right.loose_eq(&left), expected);
    }

    #[rstest]
    fn test_loose_eq_arrays_ignores_order() {
        let left = Value::Array(array!["a" => 1, "b" => 2]);
        let right = Value::Array(array!["b" => "2", "a" => 1]);
        assert!(left.loose_eq(&right));
        assert_ne!(left, right);
    }

    #[rstest]
    fn test_strict_eq_distinguishes_types() {
        assert!(!Value::from(1).strict_eq(&Value::from(1.0)));
        assert!(Value::from("a").strict_eq(&Value::from("a")));
    }

    #[rstest]
    #[case(Value::from(2), Value::from(10), Ordering::Less)]
    #[case(Value::from("2"), Value::from("10"), Ordering::Less)]
    #[case(Value::from("b"), Value::from("a10"), Ordering::Greater)]
    #[case(Value::from(5), Value::from("abc"), Ordering::Less)]
    #[case(Value::Array(array![1]), Value::from(100), Ordering::Greater)]
    #[case(Value::Array(array![1, 2]), Value::Array(array![5]), Ordering::Greater)]
    #[case(Value::Array(array![1, 2]), Value::Array(array![1, 3]), Ordering::Less)]
    fn test_compare(#[case] left: Value, #[case] right: Value, #[case] expected: Ordering) {
        assert_eq!(left.compare(&right), expected);
    }

    #[rstest]
    fn test_compare_with_flags() {
        let ten = Value::from("10");
        let nine = Value::from("9");
        assert_eq!(ten.compare_with(&nine, SortFlag::Regular), Ordering::Greater);
        assert_eq!(ten.compare_with(&nine, SortFlag::String), Ordering::Less);
        assert_eq!(
            Value::from("img12").compare_with(&Value::from("img10"), SortFlag::Natural),
            Ordering::Greater
        );
        assert_eq!(
            Value::from("B").compare_with(&Value::from("a"), SortFlag::StringCaseInsensitive),
            Ordering::Greater
        );
        assert_eq!(
            Value::from("3 apples").compare_with(&Value::from(4), SortFlag::Numeric),
            Ordering::Less
        );
    }

    #[rstest]
    #[case(Number::Int(9_007_199_254_740_993), Number::Float(9_007_199_254_740_992.0), Ordering::Greater)]
    #[case(Number::Int(-3), Number::Float(-2.5), Ordering::Less)]
    #[case(Number::Float(2.5), Number::Int(2), Ordering::Greater)]
    #[case(Number::Int(i64::MAX), Number::Float(9_223_372_036_854_775_808.0), Ordering::Less)]
    #[case(Number::Float(f64::NAN), Number::Float(f64::INFINITY), Ordering::Greater)]
    #[case(Number::Int(i64::MIN), Number::Float(f64::NAN), Ordering::Less)]
    #[case(Number::Float(f64::NAN), Number::Float(f64::NAN), Ordering::Equal)]
    fn test_number_compare_is_exact_and_total(
        #[case] left: Number,
        #[case] right: Number,
        #[case] expected: Ordering,
    ) {
        assert_eq!(left.compare(right), expected);
        assert_eq!(right.compare(left), expected.reverse());
    }

    #[rstest]
    #[case(Value::Null, Value::from(-1), Ordering::Less)]
    #[case(Value::Bool(true), Value::from(-1), Ordering::Less)]
    #[case(Value::Null, Value::Bool(false), Ordering::Equal)]
    #[case(Value::from(99), Value::from("1a"), Ordering::Less)]
    #[case(Value::from("9"), Value::from("10"), Ordering::Less)]
    #[case(Value::from(f64::NAN), Value::from("abc"), Ordering::Less)]
    #[case(Value::from("zzz"), Value::Array(OrderedArray::new()), Ordering::Less)]
    #[case(Value::Array(array!["a" => 1]), Value::Array(array!["b" => 1]), Ordering::Less)]
    fn test_compare_with_regular_ranks_kinds(
        #[case] left: Value,
        #[case] right: Value,
        #[case] expected: Ordering,
    ) {
        assert_eq!(left.compare_with(&right, SortFlag::Regular), expected);
        assert_eq!(right.compare_with(&left, SortFlag::Regular), expected.reverse());
    }

    #[rstest]
    fn test_compare_with_regular_is_transitive_where_loose_compare_cycles() {
        let (null, minus_one, zero) = (Value::Null, Value::from(-1), Value::from(0));
        assert!(zero.loose_eq(&null));
        assert!(null.compare(&minus_one).is_lt());
        assert!(minus_one.compare(&zero).is_lt());

        assert!(null.compare_with(&minus_one, SortFlag::Regular).is_lt());
        assert!(minus_one.compare_with(&zero, SortFlag::Regular).is_lt());
        assert!(null.compare_with(&zero, SortFlag::Regular).is_lt());
    }

    #[rstest]
    #[case("3 apples", Some(Number::Int(3)))]
    #[case("  -1.5e2x", Some(Number::Float(-150.0)))]
    #[case("7e", Some(Number::Int(7)))]
    #[case("12.", Some(Number::Float(12.0)))]
    #[case("abc", None)]
    #[case("-", None)]
    fn test_leading_numeric(#[case] input: &str, #[case] expected: Option<Number>) {
        assert_eq!(leading_numeric(input), expected);
    }

    #[rstest]
    fn test_leading_numeric_of_long_string() {
        let long = format!("{}{}", "4".repeat(18), "x".repeat(20_000));
        assert_eq!(leading_numeric(&long), Some(Number::Int(444_444_444_444_444_444)));
        assert_eq!(leading_numeric(&"x".repeat(20_000)), None);
    }

    #[rstest]
    fn test_to_number() {
        assert_eq!(Value::Null.to_number("sum"), Ok(Number::Int(0)));
        assert_eq!(Value::Bool(true).to_number("sum"), Ok(Number::Int(1)));
        assert_eq!(Value::from("2.5").to_number("sum"), Ok(Number::Float(2.5)));
        assert_eq!(
            Value::from("pear").to_number("sum"),
            Err(ArrayError::TypeMismatch {
                operation: "sum",
                found: "string"
            })
        );
    }

    #[rstest]
    fn test_number_overflow_promotes_to_float() {
        let sum = Number::Int(i64::MAX).add(Number::Int(1));
        assert!(matches!(sum, Number::Float(_)));
        assert_eq!(Number::Int(6).multiply(Number::Int(7)), Number::Int(42));
    }

    #[rstest]
    fn test_truthiness() {
        assert!(!Value::from("0").is_truthy());
        assert!(Value::from("0.0").is_truthy());
        assert!(!Value::Array(OrderedArray::new()).is_truthy());
        assert!(Value::Float(0.1).is_truthy());
    }
}
