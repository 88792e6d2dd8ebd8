use crate::attributes::{CustomAttributeMap, HasCustomAttributes};
use crate::info::Typed;
use crate::registry::FromType;

/// The optional "declares custom attributes" capability of a model.
///
/// Present in a [`ModelMeta`](crate::registry::ModelMeta) only for models that
/// implement [`HasCustomAttributes`]. Models without it have no custom attributes.
#[derive(Clone, Copy)]
pub struct TypeTraitCustomAttributes {
    func: fn() -> Option<CustomAttributeMap>,
}

impl TypeTraitCustomAttributes {
    /// Invokes the capability.
    #[inline]
    pub fn custom_attributes(&self) -> Option<CustomAttributeMap> {
        (self.func)()
    }
}

impl<T: Typed + HasCustomAttributes> FromType<T> for TypeTraitCustomAttributes {
    fn from_type() -> Self {
        Self {
            func: <T as HasCustomAttributes>::custom_attributes,
        }
    }
}
