use alloc::boxed::Box;
use alloc::vec::Vec;
use core::any::Any;

use crate::info::Typed;
use crate::{AssignError, Model, RawKind};

/// The result of converting a raw value into a model type.
///
/// A mapping becomes [`One`](Self::One) model. A sequence becomes
/// [`Many`](Self::Many) results, where a nested sequence is kept as a
/// nested `Many`, so arrays of arrays keep their shape.
///
/// # Examples
///
/// ```
/// use vc_hydrate::{derive::Model, Hydrated, Hydrator};
/// use serde_json::json;
///
/// #[derive(Model, Default, Debug, PartialEq)]
/// struct Cell { v: i32 }
///
/// let hydrator = Hydrator::new();
/// hydrator.register::<Cell>();
///
/// let raw = json!([[{ "v": 1 }, { "v": 2 }], { "v": 3 }]);
/// let grid = hydrator.hydrate_value(&raw, core::any::TypeId::of::<Cell>()).unwrap();
///
/// assert_eq!(grid.len(), 2);
/// assert_eq!(grid.flatten::<Cell>(), [Cell { v: 1 }, Cell { v: 2 }, Cell { v: 3 }]);
/// ```
#[derive(Debug)]
pub enum Hydrated {
    /// A model hydrated from a mapping.
    One(Box<dyn Model>),
    /// The results hydrated from the elements of a sequence, in input order.
    Many(Vec<Hydrated>),
}

impl Hydrated {
    /// The shape of the source value.
    #[inline]
    pub fn kind(&self) -> RawKind {
        match self {
            Self::One(_) => RawKind::Mapping,
            Self::Many(_) => RawKind::Sequence,
        }
    }

    /// The number of direct elements, `1` for a single model.
    #[inline]
    pub fn len(&self) -> usize {
        match self {
            Self::One(_) => 1,
            Self::Many(items) => items.len(),
        }
    }

    /// Returns `true` for an empty sequence.
    ///
    /// The hydrator never produces one, but it can be built by hand.
    #[inline]
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Many(items) if items.is_empty())
    }

    /// Returns the model, if this is a single model.
    #[inline]
    pub fn as_model(&self) -> Option<&dyn Model> {
        match self {
            Self::One(model) => Some(&**model),
            Self::Many(_) => None,
        }
    }

    /// Returns the elements, if this is a sequence.
    #[inline]
    pub fn as_many(&self) -> Option<&[Hydrated]> {
        match self {
            Self::One(_) => None,
            Self::Many(items) => Some(items),
        }
    }

    /// Unboxes a single model of type `T`.
    pub fn into_model<T: Typed>(self) -> Result<T, AssignError> {
        match self {
            Self::One(model) => {
                let found = model.reflect_model_info().type_path();
                model.take::<T>().map_err(|_| AssignError::ModelMismatch {
                    expected: T::type_path(),
                    found,
                })
            }
            Self::Many(_) => Err(AssignError::Shape {
                target: T::type_path(),
                expected: RawKind::Mapping,
                found: RawKind::Sequence,
            }),
        }
    }

    /// Collects every model of type `T` depth-first, in input order.
    ///
    /// Models of other types are dropped.
    pub fn flatten<T: Any>(self) -> Vec<T> {
        let mut output = Vec::new();
        self.flatten_into(&mut output);
        output
    }

    pub(crate) fn flatten_into<T: Any>(self, output: &mut Vec<T>) {
        match self {
            Self::One(model) => {
                if let Ok(value) = model.take::<T>() {
                    output.push(value);
                }
            }
            Self::Many(items) => {
                for item in items {
                    item.flatten_into(output);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use alloc::boxed::Box;
    use alloc::vec;

    use super::Hydrated;
    use crate::derive::Model;
    use crate::{AssignError, RawKind};

    #[derive(Model, Default, Debug, PartialEq)]
    struct A {
        x: i32,
    }

    #[derive(Model, Default, Debug, PartialEq)]
    struct B {
        y: i32,
    }

    #[test]
    fn into_model() {
        let one = Hydrated::One(Box::new(A { x: 3 }));
        assert_eq!(one.kind(), RawKind::Mapping);
        assert_eq!(one.into_model::<A>().unwrap(), A { x: 3 });

        let other = Hydrated::One(Box::new(B { y: 1 }));
        assert!(matches!(
            other.into_model::<A>(),
            Err(AssignError::ModelMismatch { .. })
        ));

        let many = Hydrated::Many(vec![]);
        assert!(many.is_empty());
        assert!(matches!(
            many.into_model::<A>(),
            Err(AssignError::Shape {
                found: RawKind::Sequence,
                ..
            })
        ));
    }

    #[test]
    fn flatten_keeps_order() {
        let tree = Hydrated::Many(vec![
            Hydrated::Many(vec![
                Hydrated::One(Box::new(A { x: 1 })),
                Hydrated::One(Box::new(B { y: 0 })),
            ]),
            Hydrated::One(Box::new(A { x: 2 })),
        ]);
        assert_eq!(tree.len(), 2);
        assert!(tree.as_many().unwrap()[1].as_model().is_some());
        assert_eq!(tree.flatten::<A>(), [A { x: 1 }, A { x: 2 }]);
    }
}
