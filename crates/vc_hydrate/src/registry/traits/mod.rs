mod custom_attributes;
mod default;

pub use custom_attributes::TypeTraitCustomAttributes;
pub use default::TypeTraitDefault;
