//! Attribute discovery for model types.
//!
//! - [`ModelCache::own_attributes`]: properties declared directly on a model.
//! - [`ModelCache::all_attributes`]: the model's own properties followed by those
//!   of every base, most-derived first.
//! - [`ModelCache::custom_attributes`]: the optional map from property name to the
//!   model type its values are converted into, inherited along the base chain.
//!
//! All three are cached per model type for the lifetime of the [`ModelCache`].
//!
//! [`ModelCache`]: crate::ModelCache
//! [`ModelCache::own_attributes`]: crate::ModelCache::own_attributes
//! [`ModelCache::all_attributes`]: crate::ModelCache::all_attributes
//! [`ModelCache::custom_attributes`]: crate::ModelCache::custom_attributes

// -----------------------------------------------------------------------------
// Modules

mod aggregate;
mod custom;
mod introspect;

// -----------------------------------------------------------------------------
// Exports

pub use custom::{CustomAttributeMap, HasCustomAttributes, ModelTarget};

pub(crate) use custom::lineage_capabilities;
