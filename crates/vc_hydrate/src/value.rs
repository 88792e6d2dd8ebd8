//! The untyped source tree consumed by the hydrator.
//!
//! Decoding bytes into this tree happens upstream (usually `serde_json::from_str`).
//! The engine only inspects the shape of each node.

use alloc::string::String;
use core::fmt;

/// An untyped value from the decoded source tree.
///
/// Mappings keep insertion order (`serde_json` is built with `preserve_order`).
pub type RawValue = serde_json::Value;

/// An ordered mapping of string keys to [`RawValue`]s.
pub type RawMap = serde_json::Map<String, RawValue>;

// -----------------------------------------------------------------------------
// RawKind

/// The three shapes a [`RawValue`] can take.
///
/// # Examples
///
/// ```
/// use vc_hydrate::RawKind;
/// use serde_json::json;
///
/// assert_eq!(RawKind::of(&json!({ "a": 1 })), RawKind::Mapping);
/// assert_eq!(RawKind::of(&json!([1, 2])), RawKind::Sequence);
/// assert_eq!(RawKind::of(&json!(null)), RawKind::Scalar);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RawKind {
    /// String, number, boolean or null.
    Scalar,
    /// An ordered mapping of string to value.
    Mapping,
    /// An ordered sequence of values.
    Sequence,
}

impl RawKind {
    /// Returns the shape of `value`.
    #[inline]
    pub const fn of(value: &RawValue) -> Self {
        match value {
            RawValue::Object(_) => Self::Mapping,
            RawValue::Array(_) => Self::Sequence,
            RawValue::Null | RawValue::Bool(_) | RawValue::Number(_) | RawValue::String(_) => {
                Self::Scalar
            }
        }
    }

    /// A lowercase name, used in error messages.
    #[inline]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Scalar => "scalar",
            Self::Mapping => "mapping",
            Self::Sequence => "sequence",
        }
    }
}

impl fmt::Display for RawKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}
