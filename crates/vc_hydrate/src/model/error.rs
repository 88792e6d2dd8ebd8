use alloc::string::String;

use thiserror::Error;

use crate::RawKind;

/// An error returned when a value cannot be assigned to a model property.
///
/// The hydrator treats these as "leave the property unset": they are logged
/// and never abort the hydration of the enclosing model.
#[derive(Debug, Error)]
pub enum AssignError {
    /// Neither the model nor any of its bases declares the property.
    #[error("model `{model}` has no property `{name}`")]
    UnknownProperty { model: &'static str, name: String },
    /// The raw value does not deserialize into the property type.
    #[error("raw value cannot be assigned to `{expected}`: {source}")]
    Mismatch {
        expected: &'static str,
        #[source]
        source: serde_json::Error,
    },
    /// The value has the wrong shape for the property type.
    #[error("expected a {expected} for `{target}`, found a {found}")]
    Shape {
        target: &'static str,
        expected: RawKind,
        found: RawKind,
    },
    /// A hydrated model of another type was offered to the property.
    #[error("hydrated model `{found}` cannot be assigned to `{expected}`")]
    ModelMismatch {
        expected: &'static str,
        found: &'static str,
    },
    /// A hydrated model was offered to a property that only holds raw values.
    #[error("`{target}` cannot hold hydrated models")]
    NotNested { target: &'static str },
    /// A raw value was offered to a model-typed property that has no custom mapping.
    #[error("raw {found} cannot be assigned to model `{model}` without a custom attribute")]
    RawIntoModel { model: &'static str, found: RawKind },
}
