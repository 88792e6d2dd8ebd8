//! Items used by the code generated from `#[derive(Model)]` and `impl_raw_property!`.

use core::any::type_name;

use serde::de::DeserializeOwned;

use crate::{AssignError, RawValue};

pub use std::sync::OnceLock;

/// Deserializes a raw value into `T`, with no coercion between scalar kinds.
#[inline]
pub fn from_raw_value<T: DeserializeOwned>(raw: RawValue) -> Result<T, AssignError> {
    serde_json::from_value(raw).map_err(|source| AssignError::Mismatch {
        expected: type_name::<T>(),
        source,
    })
}

#[cfg(feature = "auto_register")]
pub mod auto_register {
    use crate::registry::{GetModelMeta, ModelRegistry};

    pub use inventory;

    /// A registration function submitted by `#[model(auto_register)]`.
    pub struct AutoRegisterFunc(pub fn(&mut ModelRegistry));

    inventory::collect!(AutoRegisterFunc);

    pub trait RegisterType {
        fn register(registry: &mut ModelRegistry);
    }

    impl<T: GetModelMeta> RegisterType for T {
        #[inline]
        fn register(registry: &mut ModelRegistry) {
            registry.register::<T>();
        }
    }

    pub(crate) fn register_types(registry: &mut ModelRegistry) {
        for func in inventory::iter::<AutoRegisterFunc> {
            (func.0)(registry);
        }
    }
}
