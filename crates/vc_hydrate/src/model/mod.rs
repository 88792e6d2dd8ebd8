use alloc::boxed::Box;
use core::any::Any;
use core::fmt::Debug;

use crate::info::ModelInfo;

// -----------------------------------------------------------------------------
// Modules

mod error;
mod property;

// -----------------------------------------------------------------------------
// Exports

pub use error::AssignError;
pub use property::{FromPropertyValue, PropertyValue};

// -----------------------------------------------------------------------------
// Model

/// A type whose instances are hydration targets.
///
/// This trait is object safe: the hydrator only ever holds `Box<dyn Model>`
/// and addresses properties by name, the way key-value coding would.
///
/// Do not implement it by hand, use [`#[derive(Model)]`](crate::derive::Model).
/// The derive generates a `match` over the property names, so every access is
/// checked against the field types at compile time.
///
/// # Examples
///
/// ```
/// use vc_hydrate::{derive::Model, Model, PropertyValue};
/// use serde_json::json;
///
/// #[derive(Model, Default, Debug)]
/// struct User {
///     name: String,
///     age: u32,
/// }
///
/// let mut user: Box<dyn Model> = Box::new(User::default());
///
/// user.set_property("name", PropertyValue::Raw(json!("Ann"))).unwrap();
/// assert!(user.set_property("age", PropertyValue::Raw(json!("ten"))).is_err());
///
/// assert_eq!(user.get::<String>("name").unwrap(), "Ann");
/// assert_eq!(user.get::<u32>("age"), Some(&0));
/// ```
pub trait Model: Any + Send + Sync + Debug {
    /// Returns the descriptor table of the underlying type.
    fn reflect_model_info(&self) -> &'static ModelInfo;

    /// Returns the property `name`, searching the base when it is not an own property.
    fn property(&self, name: &str) -> Option<&dyn Any>;

    /// Returns the property `name` mutably, searching the base when it is not an own property.
    fn property_mut(&mut self, name: &str) -> Option<&mut dyn Any>;

    /// Assigns `value` to the property `name`.
    ///
    /// On error the property keeps its previous value.
    fn set_property(&mut self, name: &str, value: PropertyValue) -> Result<(), AssignError>;
}

impl dyn Model {
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

    /// Downcasts the value to type `T`, consuming the trait object.
    ///
    /// If the underlying value is not of type `T`, returns `Err(self)`.
    pub fn downcast<T: Any>(self: Box<dyn Model>) -> Result<Box<T>, Box<dyn Model>> {
        if !self.is::<T>() {
            return Err(self);
        }
        match <Box<dyn Any>>::downcast::<T>(self) {
            Ok(value) => Ok(value),
            Err(_) => unreachable!("type is already checked"),
        }
    }

    /// Downcasts the value to type `T`, unboxing and consuming the trait object.
    #[inline]
    pub fn take<T: Any>(self: Box<dyn Model>) -> Result<T, Box<dyn Model>> {
        self.downcast::<T>().map(|value| *value)
    }

    /// Returns the property `name` as a `T`.
    ///
    /// Returns `None` if the property does not exist or has another type.
    #[inline]
    pub fn get<T: Any>(&self, name: &str) -> Option<&T> {
        self.property(name)?.downcast_ref::<T>()
    }

    /// Returns the property `name` as a mutable `T`.
    #[inline]
    pub fn get_mut<T: Any>(&mut self, name: &str) -> Option<&mut T> {
        self.property_mut(name)?.downcast_mut::<T>()
    }
}
