use alloc::string::String;

use thiserror::Error;

/// The reason a hydration call produced no result.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HydrateError {
    /// The model and all of its bases declare no property.
    /// No instance was allocated.
    #[error("model `{0}` has no properties")]
    NoAttributes(&'static str),
    /// Not a single element of the sequence could be hydrated.
    /// Also returned for an empty sequence.
    #[error("no element of the sequence could be hydrated into `{0}`")]
    NoConvertibleElements(&'static str),
    /// A scalar was offered where a mapping or a sequence was expected.
    #[error("a scalar cannot be hydrated into model `{0}`")]
    UnconvertibleScalar(&'static str),
    /// The registered model has no default constructor.
    #[error("model `{0}` cannot be constructed")]
    NotConstructible(&'static str),
    /// The target is not a registered model, or its short name is ambiguous.
    #[error("unknown model `{0}`")]
    UnknownType(String),
}
