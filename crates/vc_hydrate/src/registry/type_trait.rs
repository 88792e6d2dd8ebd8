use alloc::boxed::Box;
use core::any::Any;
use core::fmt;

/// A capability attached to a registered model type.
///
/// Type traits are stored in the [`ModelMeta`](crate::registry::ModelMeta) of a type,
/// keyed by their own `TypeId`. Whether a model "implements" an optional capability
/// is answered by the presence of the corresponding type trait.
///
/// Implemented for every `Clone + Send + Sync + 'static` type.
pub trait TypeTrait: Any + Send + Sync {
    /// Clones the type trait into a new box.
    fn clone_type_trait(&self) -> Box<dyn TypeTrait>;
}

impl<T: Clone + Any + Send + Sync> TypeTrait for T {
    #[inline]
    fn clone_type_trait(&self) -> Box<dyn TypeTrait> {
        Box::new(self.clone())
    }
}

impl dyn TypeTrait {
    /// Returns `true` if the underlying value is of type `T`.
    #[inline]
    pub fn is<T: Any>(&self) -> bool {
        (self as &dyn Any).is::<T>()
    }

    /// Downcasts the value to type `T` by reference.
    #[inline]
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        <dyn Any>::downcast_ref(self)
    }

    /// Downcasts the value to type `T` by mutable reference.
    #[inline]
    pub fn downcast_mut<T: Any>(&mut self) -> Option<&mut T> {
        <dyn Any>::downcast_mut(self)
    }
}

impl fmt::Debug for dyn TypeTrait {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("TypeTrait")
    }
}
