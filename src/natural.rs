//! Natural order string comparison.
//!
//! Runs of digits are compared by numeric value, so `"img12"` sorts after
//! `"img10"` and `"img2"`. Whitespace is ignored. A digit run starting with
//! `0` is treated as a fraction and compared left-aligned, so `"x01"` sorts
//! before `"x1"`.
//!
//! # Examples
//!
//! ```rust
//! use fluent_array::natural;
//! use std::cmp::Ordering;
//!
//! assert_eq!(natural::compare("img12.png", "img10.png", false), Ordering::Greater);
//! assert_eq!(natural::compare("img2.png", "img10.png", false), Ordering::Less);
//! assert_eq!(natural::compare("IMG1", "img1", true), Ordering::Equal);
//! ```

use std::cmp::Ordering;

/// Compares two strings in natural order.
pub fn compare(left: &str, right: &str, case_insensitive: bool) -> Ordering {
    let left = left.as_bytes();
    let right = right.as_bytes();
    let mut left_position = 0;
    let mut right_position = 0;

    loop {
        left_position += count_whitespace(&left[left_position..]);
        right_position += count_whitespace(&right[right_position..]);

        let (Some(&left_byte), Some(&right_byte)) =
            (left.get(left_position), right.get(right_position))
        else {
            return (left.len() - left_position).cmp(&(right.len() - right_position));
        };

        if left_byte.is_ascii_digit() && right_byte.is_ascii_digit() {
            let left_run = digit_run(&left[left_position..]);
            let right_run = digit_run(&right[right_position..]);
            let ordering = if left_byte == b'0' || right_byte == b'0' {
                compare_left_aligned(left_run, right_run)
            } else {
                compare_right_aligned(left_run, right_run)
            };
            if ordering != Ordering::Equal {
                return ordering;
            }
            left_position += left_run.len();
            right_position += right_run.len();
            continue;
        }

        let (left_byte, right_byte) = if case_insensitive {
            (
                left_byte.to_ascii_lowercase(),
                right_byte.to_ascii_lowercase(),
            )
        } else {
            (left_byte, right_byte)
        };
        match left_byte.cmp(&right_byte) {
            Ordering::Equal => {
                left_position += 1;
                right_position += 1;
            }
            unequal => return unequal,
        }
    }
}

fn count_whitespace(bytes: &[u8]) -> usize {
    bytes
        .iter()
        .take_while(|byte| byte.is_ascii_whitespace())
        .count()
}

fn digit_run(bytes: &[u8]) -> &[u8] {
    let length = bytes.iter().take_while(|byte| byte.is_ascii_digit()).count();
    &bytes[..length]
}

// Integer runs: the longer run is larger; equal lengths compare digit-wise.
fn compare_right_aligned(left: &[u8], right: &[u8]) -> Ordering {
    left.len().cmp(&right.len()).then_with(|| left.cmp(right))
}

// Fractional runs: plain lexicographic comparison of the digits.
fn compare_left_aligned(left: &[u8], right: &[u8]) -> Ordering {
    left.cmp(right)
}
