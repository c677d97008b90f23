//! Option enums shared by container operations.

/// How values (or keys) are compared by sorts and `unique`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SortFlag {
    /// Standard comparison: numeric where both sides are numeric, byte-wise
    /// otherwise.
    #[default]
    Regular,
    /// Compare the numeric interpretation of both sides.
    Numeric,
    /// Compare string forms byte-wise.
    String,
    /// Compare lower-cased string forms.
    StringCaseInsensitive,
    /// Compare string forms in natural order.
    Natural,
    /// Compare lower-cased string forms in natural order.
    NaturalCaseInsensitive,
}

/// How `count` treats nested arrays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CountMode {
    /// Count top-level entries only.
    #[default]
    Normal,
    /// Also count the entries of nested arrays, at every depth.
    Recursive,
}

/// Target case for `change_key_case`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum KeyCase {
    /// Lower-case string keys.
    #[default]
    Lower,
    /// Upper-case string keys.
    Upper,
}

impl KeyCase {
    pub(crate) fn apply(self, text: &str) -> String {
        match self {
            Self::Lower => text.to_lowercase(),
            Self::Upper => text.to_uppercase(),
        }
    }
}
