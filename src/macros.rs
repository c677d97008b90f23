//! Literal syntax for [`OrderedArray`](crate::OrderedArray).

/// Builds an [`OrderedArray`](crate::OrderedArray).
///
/// Two forms are accepted:
///
/// - `array![v1, v2, ...]` builds a list with keys `0..n`
/// - `array![k1 => v1, k2 => v2, ...]` builds a keyed array
///
/// Keys go through [`Key`](crate::Key) normalization, so `"3"` and `3` are
/// the same key. Values may be anything convertible into a
/// [`Value`](crate::Value), including nested arrays.
///
/// # Examples
///
/// ```rust
/// use fluent_array::{array, Key, Value};
///
/// let list = array![1, 2, 3];
/// assert!(list.is_list());
///
/// let person = array!["name" => "Ada", "langs" => array!["en", "fr"]];
/// assert_eq!(person.get(&Key::from("name")), Some(&Value::from("Ada")));
///
/// let empty = array![];
/// assert!(empty.is_empty());
/// ```
#[macro_export]
macro_rules! array {
    () => {
        $crate::OrderedArray::new()
    };

    ($($key:expr => $value:expr),+ $(,)?) => {{
        let mut array = $crate::OrderedArray::new();
        $(
            array.insert($key, $value);
        )+
        array
    }};

    ($($value:expr),+ $(,)?) => {{
        let mut array = $crate::OrderedArray::new();
        $(
            array.push($value);
        )+
        array
    }};
}

#[cfg(test)]
mod tests {
    use crate::{Key, OrderedArray, Value};
    use rstest::rstest;

    #[rstest]
    fn test_empty() {
        let array: OrderedArray = array![];
        assert!(array.is_empty());
    }

    #[rstest]
    fn test_list_form() {
        let array = array!["a", "b",];
        assert_eq!(array.get(&Key::Int(1)), Some(&Value::from("b")));
        assert!(array.is_list());
    }

    #[rstest]
    fn test_keyed_form_overwrites_duplicates() {
        let array = array!["a" => 1, "a" => 2];
        assert_eq!(array.len(), 1);
        assert_eq!(array.get(&Key::from("a")), Some(&Value::Int(2)));
    }

    #[rstest]
    fn test_nested() {
        let array = array![array![1, 2], array![3]];
        assert_eq!(
            array.get(&Key::Int(0)).and_then(Value::as_array),
            Some(&array![1, 2])
        );
    }
}
