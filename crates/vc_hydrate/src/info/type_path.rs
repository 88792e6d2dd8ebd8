use core::any::TypeId;
use core::fmt;
use core::hash::{Hash, Hasher};

// -----------------------------------------------------------------------------
// TypePath

/// A static accessor to type paths and names.
///
/// - [`type_path`]: The unique identifier of the type, cannot be duplicated.
/// - [`type_name`]: Type name without module path, may be duplicated.
/// - [`module_path`]: Optional module path.
///
/// We guarantee that these names do not have the prefix `::`.
/// Users should also ensure this when manually implementing it.
///
/// # Implementation
///
/// [`#[derive(Model)]`](crate::derive::Model) implements it from
/// `module_path!()` and the type ident, or from `#[model(type_path = "...")]`.
///
/// ```
/// use vc_hydrate::info::TypePath;
///
/// struct Foo;
///
/// impl TypePath for Foo {
///     fn type_path() -> &'static str { "my_crate::foo::Foo" }
///     fn type_name() -> &'static str { "Foo" }
///     fn module_path() -> Option<&'static str> { Some("my_crate::foo") }
/// }
/// ```
///
/// [`type_path`]: TypePath::type_path
/// [`type_name`]: TypePath::type_name
/// [`module_path`]: TypePath::module_path
pub trait TypePath: 'static {
    /// Returns the fully qualified path of the target type.
    ///
    /// This is the complete unique identifier of a type,
    /// and should **not** duplicated in different types.
    fn type_path() -> &'static str;

    /// Returns the short name of the type.
    ///
    /// This name allows for duplication.
    fn type_name() -> &'static str;

    /// Optional module path where the type is defined.
    fn module_path() -> Option<&'static str> {
        None
    }
}

// -----------------------------------------------------------------------------
// Type

/// The identity of a model type: its [`TypeId`] and its paths.
///
/// Equality and hashing only consider the [`TypeId`].
///
/// # Example
///
/// ```
/// # use core::any::TypeId;
/// use vc_hydrate::{derive::Model, info::Type};
///
/// #[derive(Model, Default, Debug)]
/// struct Point { x: i32 }
///
/// let ty = Type::of::<Point>();
/// assert_eq!(ty.id(), TypeId::of::<Point>());
/// assert_eq!(ty.name(), "Point");
/// assert!(ty.path().ends_with("::Point"));
/// ```
#[derive(Clone, Copy)]
pub struct Type {
    id: TypeId,
    path: &'static str,
    name: &'static str,
    module_path: Option<&'static str>,
}

impl Type {
    /// Creates a new [`Type`] from a type that implements [`TypePath`].
    #[inline]
    pub fn of<T: TypePath>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            path: T::type_path(),
            name: T::type_name(),
            module_path: T::module_path(),
        }
    }

    /// Returns the [`TypeId`] of the type.
    #[inline]
    pub const fn id(&self) -> TypeId {
        self.id
    }

    /// See [`TypePath::type_path`].
    #[inline]
    pub const fn path(&self) -> &'static str {
        self.path
    }

    /// See [`TypePath::type_name`].
    #[inline]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// See [`TypePath::module_path`].
    #[inline]
    pub const fn module_path(&self) -> Option<&'static str> {
        self.module_path
    }

    /// Check if the given type matches this one.
    #[inline]
    pub fn is<T: 'static>(&self) -> bool {
        self.id == TypeId::of::<T>()
    }
}

impl PartialEq for Type {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Type {}

impl Hash for Type {
    #[inline]
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Debug for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path)
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.path)
    }
}

#[cfg(test)]
mod tests {
    use super::{Type, TypePath};

    struct Foo;

    impl TypePath for Foo {
        fn type_path() -> &'static str {
            "app::models::Foo"
        }
        fn type_name() -> &'static str {
            "Foo"
        }
        fn module_path() -> Option<&'static str> {
            Some("app::models")
        }
    }

    struct Bar;

    impl TypePath for Bar {
        fn type_path() -> &'static str {
            "app::models::Foo"
        }
        fn type_name() -> &'static str {
            "Foo"
        }
    }

    #[test]
    fn type_of() {
        let ty = Type::of::<Foo>();
        assert!(ty.is::<Foo>());
        assert_eq!(ty.path(), "app::models::Foo");
        assert_eq!(ty.name(), "Foo");
        assert_eq!(ty.module_path(), Some("app::models"));
        assert_eq!(alloc::format!("{ty}"), "app::models::Foo");
    }

    #[test]
    fn identity_is_type_id() {
        // Same paths, different types.
        assert_ne!(Type::of::<Foo>(), Type::of::<Bar>());
        assert_eq!(Type::of::<Foo>(), Type::of::<Foo>());
        assert_eq!(Bar::module_path(), None);
    }
}
