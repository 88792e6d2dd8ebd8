use core::any::{Any, TypeId};

// -----------------------------------------------------------------------------
// PropertyInfo

/// Information for a named model property.
///
/// The property name is the key looked up in the source mapping. It defaults to
/// the field ident and can be changed with `#[model(rename = "...")]`.
///
/// # Examples
///
/// ```
/// use vc_hydrate::{derive::Model, info::Typed};
///
/// #[derive(Model, Default, Debug)]
/// struct Foo {
///     #[model(rename = "id")]
///     foo_id: u64,
/// }
///
/// let property = Foo::model_info().property("id").unwrap();
///
/// assert!(property.type_is::<u64>());
/// assert_eq!(property.name(), "id");
/// ```
#[derive(Clone, Copy, Debug)]
pub struct PropertyInfo {
    ty_id: TypeId,
    name: &'static str,
    type_name: &'static str,
}

impl PropertyInfo {
    /// Creates a new [`PropertyInfo`] for the given property `name` and value type `T`.
    #[inline]
    pub fn new<T: Any>(name: &'static str) -> Self {
        Self {
            ty_id: TypeId::of::<T>(),
            name,
            type_name: core::any::type_name::<T>(),
        }
    }

    /// Returns the `TypeId` of the property value.
    #[inline]
    pub const fn ty_id(&self) -> TypeId {
        self.ty_id
    }

    /// Check if the given type matches the property value type.
    #[inline]
    pub fn type_is<T: Any>(&self) -> bool {
        self.ty_id == TypeId::of::<T>()
    }

    /// Returns the property name.
    #[inline]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Returns the compiler's name of the value type, for diagnostics only.
    #[inline]
    pub const fn type_name(&self) -> &'static str {
        self.type_name
    }
}
