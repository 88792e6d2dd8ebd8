use alloc::boxed::Box;
use core::any::TypeId;

use crate::info::{PropertyInfo, Type, TypePath, Typed};

/// The property descriptor table of a model type.
///
/// Only the type's **own** properties are listed, in declaration order.
/// Properties of an embedded base model (`#[model(base)]`) are reached through
/// [`ModelInfo::base`], which plays the role of a superclass link.
///
/// # Examples
///
/// ```rust
/// use vc_hydrate::{derive::Model, info::Typed};
///
/// #[derive(Model, Default, Debug)]
/// struct Animal {
///     name: String,
/// }
///
/// #[derive(Model, Default, Debug)]
/// struct Dog {
///     #[model(base)]
///     animal: Animal,
///     breed: String,
/// }
///
/// let info = Dog::model_info();
///
/// assert_eq!(info.property_len(), 1);
/// assert_eq!(info.property_names().collect::<Vec<_>>(), ["breed"]);
/// assert_eq!(info.base().unwrap().ty().name(), "Animal");
/// ```
#[derive(Clone, Debug)]
pub struct ModelInfo {
    ty: Type,
    properties: Box<[PropertyInfo]>,
    // `ModelInfo` of the base is created on first access; using a function pointer delays it.
    base: Option<fn() -> &'static ModelInfo>,
}

impl ModelInfo {
    /// Create a new [`ModelInfo`].
    ///
    /// The order of properties is fixed, depends on the input order.
    pub fn new<T: TypePath>(properties: &[PropertyInfo]) -> Self {
        #[cfg(all(debug_assertions, feature = "debug"))]
        for (index, property) in properties.iter().enumerate() {
            assert!(
                !properties[..index]
                    .iter()
                    .any(|p| p.name() == property.name()),
                "duplicate property `{}` on model `{}`",
                property.name(),
                T::type_path(),
            );
        }

        Self {
            ty: Type::of::<T>(),
            properties: properties.into(),
            base: None,
        }
    }

    /// Link the immediate base model.
    #[inline]
    pub fn with_base<B: Typed>(self) -> Self {
        Self {
            base: Some(B::model_info),
            ..self
        }
    }

    /// Returns the [`Type`] of the model.
    #[inline]
    pub const fn ty(&self) -> &Type {
        &self.ty
    }

    /// Returns the `TypeId` of the model.
    #[inline]
    pub const fn type_id(&self) -> TypeId {
        self.ty.id()
    }

    /// Returns the fully qualified path of the model.
    #[inline]
    pub const fn type_path(&self) -> &'static str {
        self.ty.path()
    }

    /// Returns the descriptor of the immediate base model, if any.
    #[inline]
    pub fn base(&self) -> Option<&'static ModelInfo> {
        self.base.map(|base| base())
    }

    /// Returns the own properties in **declaration order**.
    #[inline]
    pub fn properties(&self) -> &[PropertyInfo] {
        &self.properties
    }

    /// Returns the own property names in declaration order.
    pub fn property_names(&self) -> impl ExactSizeIterator<Item = &'static str> + '_ {
        self.properties.iter().map(PropertyInfo::name)
    }

    /// Returns the own [`PropertyInfo`] for the given `name`, if present.
    ///
    /// This is O(N) complexity and does not look into the base.
    pub fn property(&self, name: &str) -> Option<&PropertyInfo> {
        self.properties.iter().find(|p| p.name() == name)
    }

    /// Returns the number of own properties.
    #[inline]
    pub fn property_len(&self) -> usize {
        self.properties.len()
    }

    /// An iterator over this model and its ancestors, most-derived first.
    pub fn lineage(&'static self) -> impl Iterator<Item = &'static ModelInfo> {
        core::iter::successors(Some(self), |info| info.base())
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec::Vec;
    use core::any::TypeId;

    use crate::derive::Model;
    use crate::info::{TypePath, Typed};

    #[derive(Model, Default, Debug)]
    struct Shape {
        sides: u8,
    }

    #[derive(Model, Default, Debug)]
    struct Square {
        #[model(base)]
        shape: Shape,
        side: f32,
        #[model(rename = "colour")]
        color: String,
    }

    #[test]
    fn descriptor_table() {
        let info = Square::model_info();
        assert_eq!(info.type_path(), <Square as TypePath>::type_path());
        assert_eq!(info.property_names().collect::<Vec<_>>(), ["side", "colour"]);
        assert!(info.property("colour").unwrap().type_is::<String>());
        assert!(info.property("sides").is_none());
        assert_eq!(info.base().unwrap().type_id(), TypeId::of::<Shape>());
    }

    #[test]
    fn lineage_is_most_derived_first() {
        let names: Vec<_> = Square::model_info()
            .lineage()
            .map(|info| info.ty().name())
            .collect();
        assert_eq!(names, ["Square", "Shape"]);
    }

    #[cfg(all(debug_assertions, feature = "debug"))]
    #[test]
    #[should_panic(expected = "duplicate property `x`")]
    fn duplicate_names_are_rejected() {
        use crate::info::{ModelInfo, PropertyInfo};

        let _ = ModelInfo::new::<Shape>(&[
            PropertyInfo::new::<i32>("x"),
            PropertyInfo::new::<u8>("x"),
        ]);
    }
}
