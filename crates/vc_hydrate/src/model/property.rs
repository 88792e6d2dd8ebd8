use alloc::boxed::Box;
use alloc::collections::BTreeMap;
use alloc::string::String;
use alloc::vec::Vec;
use core::any::type_name;
use core::hash::BuildHasher;
use std::collections::HashMap;

use crate::model::AssignError;
use crate::{Hydrated, RawKind, RawValue};

// -----------------------------------------------------------------------------
// PropertyValue

/// A value offered to [`Model::set_property`](crate::Model::set_property).
#[derive(Debug)]
pub enum PropertyValue {
    /// The source value, assigned verbatim.
    Raw(RawValue),
    /// The result of converting the source value into another model type.
    Hydrated(Hydrated),
}

impl PropertyValue {
    /// The shape of the value. A single hydrated model counts as a mapping.
    pub fn kind(&self) -> RawKind {
        match self {
            Self::Raw(raw) => RawKind::of(raw),
            Self::Hydrated(Hydrated::One(_)) => RawKind::Mapping,
            Self::Hydrated(Hydrated::Many(_)) => RawKind::Sequence,
        }
    }
}

// -----------------------------------------------------------------------------
// FromPropertyValue

/// Conversion of a [`PropertyValue`] into the native type of a property.
///
/// Every field type of a [`#[derive(Model)]`](crate::derive::Model) struct must implement it.
///
/// - Raw values are deserialized with `serde`, so there is **no** coercion
///   between scalar kinds: `"5"` is not a valid `i32`.
/// - Hydrated values are accepted by model types and by `Vec`, `Option` and `Box` of them.
///   A `Vec` of models flattens nested sequences into one list, in input order.
///
/// Implement it for your own `serde` types with [`impl_raw_property!`](crate::impl_raw_property).
///
/// # Examples
///
/// ```
/// use vc_hydrate::{FromPropertyValue, PropertyValue};
/// use serde_json::json;
///
/// let v = Vec::<u8>::from_property_value(PropertyValue::Raw(json!([1, 2]))).unwrap();
/// assert_eq!(v, [1, 2]);
///
/// assert!(i32::from_property_value(PropertyValue::Raw(json!("5"))).is_err());
/// assert_eq!(Option::<i32>::from_raw(json!(null)).unwrap(), None);
/// ```
pub trait FromPropertyValue: Sized {
    /// Converts a source value, without any nested conversion.
    fn from_raw(raw: RawValue) -> Result<Self, AssignError>;

    /// Converts the result of a nested conversion.
    fn from_hydrated(_hydrated: Hydrated) -> Result<Self, AssignError> {
        Err(AssignError::NotNested {
            target: type_name::<Self>(),
        })
    }

    /// Returns `true` if a [`Hydrated::Many`] converts into one value of this type.
    ///
    /// A `Vec<Self>` flattens nested sequences when this is `false`.
    #[inline]
    fn holds_sequence() -> bool {
        false
    }

    /// Dispatches to [`from_raw`](Self::from_raw) or [`from_hydrated`](Self::from_hydrated).
    #[inline]
    fn from_property_value(value: PropertyValue) -> Result<Self, AssignError> {
        match value {
            PropertyValue::Raw(raw) => Self::from_raw(raw),
            PropertyValue::Hydrated(hydrated) => Self::from_hydrated(hydrated),
        }
    }
}

/// Implements [`FromPropertyValue`] for types that implement `serde::de::DeserializeOwned`.
///
/// The implementation only accepts raw values.
///
/// # Examples
///
/// ```
/// use vc_hydrate::{impl_raw_property, FromPropertyValue};
/// use serde::Deserialize;
/// use serde_json::json;
///
/// #[derive(Deserialize, Debug, PartialEq)]
/// #[serde(rename_all = "lowercase")]
/// enum Role { Admin, Guest }
///
/// impl_raw_property!(Role);
///
/// assert_eq!(Role::from_raw(json!("admin")).unwrap(), Role::Admin);
/// ```
#[macro_export]
macro_rules! impl_raw_property {
    ($($ty:ty),* $(,)?) => {
        $(
            impl $crate::FromPropertyValue for $ty {
                #[inline]
                fn from_raw(
                    raw: $crate::RawValue,
                ) -> ::core::result::Result<Self, $crate::AssignError> {
                    $crate::__macro_exports::from_raw_value(raw)
                }
            }
        )*
    };
}

impl_raw_property!(bool, char, String);
impl_raw_property!(i8, i16, i32, i64, i128, isize);
impl_raw_property!(u8, u16, u32, u64, u128, usize);
impl_raw_property!(f32, f64);
impl_raw_property!(serde_json::Number);

impl FromPropertyValue for RawValue {
    #[inline]
    fn from_raw(raw: RawValue) -> Result<Self, AssignError> {
        Ok(raw)
    }
}

impl FromPropertyValue for crate::RawMap {
    fn from_raw(raw: RawValue) -> Result<Self, AssignError> {
        match raw {
            RawValue::Object(map) => Ok(map),
            other => Err(AssignError::Shape {
                target: type_name::<Self>(),
                expected: RawKind::Mapping,
                found: RawKind::of(&other),
            }),
        }
    }
}

// -----------------------------------------------------------------------------
// Containers

impl<T: FromPropertyValue> FromPropertyValue for Option<T> {
    fn from_raw(raw: RawValue) -> Result<Self, AssignError> {
        match raw {
            RawValue::Null => Ok(None),
            raw => T::from_raw(raw).map(Some),
        }
    }

    fn from_hydrated(hydrated: Hydrated) -> Result<Self, AssignError> {
        T::from_hydrated(hydrated).map(Some)
    }

    #[inline]
    fn holds_sequence() -> bool {
        T::holds_sequence()
    }
}

impl<T: FromPropertyValue> FromPropertyValue for Box<T> {
    #[inline]
    fn from_raw(raw: RawValue) -> Result<Self, AssignError> {
        T::from_raw(raw).map(Box::new)
    }

    #[inline]
    fn from_hydrated(hydrated: Hydrated) -> Result<Self, AssignError> {
        T::from_hydrated(hydrated).map(Box::new)
    }

    #[inline]
    fn holds_sequence() -> bool {
        T::holds_sequence()
    }
}

impl<T: FromPropertyValue> FromPropertyValue for Vec<T> {
    fn from_raw(raw: RawValue) -> Result<Self, AssignError> {
        match raw {
            RawValue::Array(items) => items.into_iter().map(T::from_raw).collect(),
            other => Err(AssignError::Shape {
                target: type_name::<Self>(),
                expected: RawKind::Sequence,
                found: RawKind::of(&other),
            }),
        }
    }

    fn from_hydrated(hydrated: Hydrated) -> Result<Self, AssignError> {
        match hydrated {
            Hydrated::Many(items) => {
                let mut output = Vec::with_capacity(items.len());
                for item in items {
                    extend_from_hydrated(item, &mut output)?;
                }
                Ok(output)
            }
            Hydrated::One(_) => Err(AssignError::Shape {
                target: type_name::<Self>(),
                expected: RawKind::Sequence,
                found: RawKind::Mapping,
            }),
        }
    }

    #[inline]
    fn holds_sequence() -> bool {
        true
    }
}

fn extend_from_hydrated<T: FromPropertyValue>(
    hydrated: Hydrated,
    output: &mut Vec<T>,
) -> Result<(), AssignError> {
    match hydrated {
        Hydrated::Many(items) if !T::holds_sequence() => {
            for item in items {
                extend_from_hydrated(item, output)?;
            }
        }
        hydrated => output.push(T::from_hydrated(hydrated)?),
    }
    Ok(())
}

impl<T: FromPropertyValue> FromPropertyValue for BTreeMap<String, T> {
    fn from_raw(raw: RawValue) -> Result<Self, AssignError> {
        match raw {
            RawValue::Object(map) => map
                .into_iter()
                .map(|(key, value)| Ok((key, T::from_raw(value)?)))
                .collect(),
            other => Err(AssignError::Shape {
                target: type_name::<Self>(),
                expected: RawKind::Mapping,
                found: RawKind::of(&other),
            }),
        }
    }
}

impl<T, S> FromPropertyValue for HashMap<String, T, S>
where
    T: FromPropertyValue,
    S: BuildHasher + Default,
{
    fn from_raw(raw: RawValue) -> Result<Self, AssignError> {
        match raw {
            RawValue::Object(map) => map
                .into_iter()
                .map(|(key, value)| Ok((key, T::from_raw(value)?)))
                .collect(),
            other => Err(AssignError::Shape {
                target: type_name::<Self>(),
                expected: RawKind::Mapping,
                found: RawKind::of(&other),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use alloc::boxed::Box;
    use alloc::collections::BTreeMap;
    use alloc::string::String;
    use alloc::vec;
    use alloc::vec::Vec;

    use serde_json::json;

    use super::{FromPropertyValue, PropertyValue};
    use crate::{AssignError, Hydrated, RawKind};

    #[test]
    fn scalars_are_not_coerced() {
        assert_eq!(i64::from_raw(json!(5)).unwrap(), 5);
        assert!(matches!(
            i64::from_raw(json!("5")),
            Err(AssignError::Mismatch { .. })
        ));
        assert!(String::from_raw(json!(5)).is_err());
        assert!(bool::from_raw(json!(1)).is_err());
        assert_eq!(f64::from_raw(json!(2)).unwrap(), 2.0);
    }

    #[test]
    fn raw_value_is_verbatim() {
        let raw = json!({ "a": [1, { "b": null }] });
        assert_eq!(serde_json::Value::from_raw(raw.clone()).unwrap(), raw);
    }

    #[test]
    fn option_accepts_null() {
        assert_eq!(Option::<String>::from_raw(json!(null)).unwrap(), None);
        assert_eq!(
            Option::<String>::from_raw(json!("x")).unwrap(),
            Some(String::from("x"))
        );
    }

    #[test]
    fn containers_from_raw() {
        let v = Vec::<Vec<u8>>::from_raw(json!([[1], [2, 3]])).unwrap();
        assert_eq!(v, vec![vec![1], vec![2, 3]]);

        let m = BTreeMap::<String, bool>::from_raw(json!({ "x": true })).unwrap();
        assert_eq!(m.get("x"), Some(&true));

        let err = Vec::<u8>::from_raw(json!({ "x": 1 })).unwrap_err();
        assert!(matches!(
            err,
            AssignError::Shape {
                expected: RawKind::Sequence,
                found: RawKind::Mapping,
                ..
            }
        ));
    }

    #[test]
    fn sequence_holders() {
        assert!(!i32::holds_sequence());
        assert!(Vec::<i32>::holds_sequence());
        assert!(Option::<Box<Vec<i32>>>::holds_sequence());
    }

    #[test]
    fn raw_types_reject_hydrated() {
        let value = PropertyValue::Hydrated(Hydrated::Many(Vec::new()));
        assert_eq!(value.kind(), RawKind::Sequence);
        assert!(matches!(
            String::from_property_value(value),
            Err(AssignError::NotNested { .. })
        ));
    }
}
