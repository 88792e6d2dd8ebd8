use alloc::boxed::Box;

use crate::Model;
use crate::info::Typed;
use crate::registry::FromType;

/// A type trait that allocates a default instance of a model.
///
/// Every derived model carries it, it is how the hydrator creates the instance
/// to be filled.
///
/// # Examples
///
/// ```
/// use vc_hydrate::{derive::Model, registry::{FromType, TypeTraitDefault}};
///
/// #[derive(Model, Default, Debug)]
/// struct Config { retries: u8 }
///
/// let ctor = <TypeTraitDefault as FromType<Config>>::from_type();
/// let model = ctor.default();
/// assert!(model.is::<Config>());
/// ```
#[derive(Clone, Copy)]
pub struct TypeTraitDefault {
    func: fn() -> Box<dyn Model>,
}

impl TypeTraitDefault {
    /// Allocates a default instance.
    #[inline(always)]
    pub fn default(&self) -> Box<dyn Model> {
        (self.func)()
    }
}

impl<T: Typed + Default> FromType<T> for TypeTraitDefault {
    fn from_type() -> Self {
        Self {
            func: || -> Box<dyn Model> { Box::new(T::default()) },
        }
    }
}
