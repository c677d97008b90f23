//! Error types for container operations.
//!
//! Most operations never fail: positional reads, searches and removals on an
//! empty collection report `None` instead. The variants below cover the few
//! cases where an argument or an element cannot be processed at all.

use thiserror::Error;

/// Represents errors that can occur while building or transforming a
/// [`Container`](crate::Container).
///
/// # Examples
///
/// ```rust
/// use fluent_array::{ArrayError, Container};
///
/// let error = Container::range(1, 10, 0).unwrap_err();
/// assert!(matches!(error, ArrayError::InvalidArgument { .. }));
/// assert_eq!(error.to_string(), "range: step must not be zero");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ArrayError {
    /// An argument is outside the domain accepted by the operation.
    #[error("{operation}: {message}")]
    InvalidArgument {
        /// The name of the operation that rejected the argument.
        operation: &'static str,
        /// Human readable description of the problem.
        message: String,
    },

    /// An element could not be coerced to a number.
    #[error("{operation}: unsupported operand type {found}")]
    TypeMismatch {
        /// The name of the aggregating operation.
        operation: &'static str,
        /// The type name of the offending element.
        found: &'static str,
    },

    /// A value cannot be used as an array key.
    #[error("{operation}: illegal key type {found}")]
    IllegalKey {
        /// The name of the operation that tried to build a key.
        operation: &'static str,
        /// The type name of the offending value.
        found: &'static str,
    },
}

impl ArrayError {
    pub(crate) fn invalid_argument(operation: &'static str, message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            operation,
            message: message.into(),
        }
    }

    pub(crate) fn exceeds_max_len(operation: &'static str) -> Self {
        Self::invalid_argument(
            operation,
            format!(
                "the result would exceed the maximum array size of {} entries",
                crate::ordered_array::OrderedArray::MAX_LEN
            ),
        )
    }
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, ArrayError>;
