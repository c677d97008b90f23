//! # fluent-array
//!
//! An ordered, keyed collection of dynamically typed values with a fluent,
//! chainable API.
//!
//! ## Overview
//!
//! The crate models the classic "ordered hash map" array found in dynamic
//! languages: entries keep insertion order, keys are either integers or
//! strings, and values may be scalars or nested arrays. It includes:
//!
//! - **Keys and Values**: [`Key`] with canonical integer normalization and
//!   [`Value`] with loose and strict comparison rules
//! - **Ordered Arrays**: [`OrderedArray`], the storage type, plus the
//!   [`array!`] literal macro
//! - **Containers**: [`Container`], the chainable wrapper offering
//!   transformation, set algebra, sorting and a cursor
//! - **Natural Ordering**: the [`natural`] comparison used by natural sorts
//!
//! ## Feature Flags
//!
//! - `serde`: `Serialize`/`Deserialize` for keys, values, arrays and
//!   containers
//! - `full`: Enable all features
//!
//! ## Example
//!
//! ```rust
//! use fluent_array::prelude::*;
//!
//! let mut colors = Container::from(array!["a" => "green", "b" => "brown", "c" => "blue", 0 => "red"]);
//! colors
//!     .diff(&[array!["x" => "green", "y" => "red"]])
//!     .ksort(SortFlag::Regular);
//!
//! assert_eq!(colors.to_array(), array!["b" => "brown", "c" => "blue"]);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::redundant_closure_for_method_calls)]

/// Prelude module for convenient imports.
///
/// Re-exports commonly used types and the [`array!`] macro.
///
/// # Usage
///
/// ```rust
/// use fluent_array::prelude::*;
/// ```
pub mod prelude {
    pub use crate::array;
    pub use crate::container::Container;
    pub use crate::error::{ArrayError, Result};
    pub use crate::flags::{CountMode, KeyCase, SortFlag};
    pub use crate::key::Key;
    pub use crate::ordered_array::OrderedArray;
    pub use crate::value::{Number, Value};
}

#[macro_use]
mod macros;

mod container;
mod error;
mod flags;
mod key;
pub mod natural;
mod ordered_array;
mod value;

pub use container::Container;
pub use error::{ArrayError, Result};
pub use flags::{CountMode, KeyCase, SortFlag};
pub use key::Key;
pub use ordered_array::{Iter, OrderedArray};
pub use value::{Number, Value};

static_assertions::assert_impl_all!(Key: Send, Sync, Clone, std::hash::Hash, Eq);
static_assertions::assert_impl_all!(Value: Send, Sync, Clone, Default);
static_assertions::assert_impl_all!(OrderedArray: Send, Sync, Clone, Default);
static_assertions::assert_impl_all!(Container: Send, Sync, Clone, Default);
