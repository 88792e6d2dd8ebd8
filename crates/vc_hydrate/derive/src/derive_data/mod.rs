//! Provide some tools for parsing token stream.

// -----------------------------------------------------------------------------
// Modules

mod field_attributes;
mod model_derive;
mod type_attributes;

// -----------------------------------------------------------------------------
// Internal API

pub(crate) use field_attributes::FieldAttributes;
pub(crate) use model_derive::{ModelDerive, ModelField};
pub(crate) use type_attributes::TypeAttributes;
