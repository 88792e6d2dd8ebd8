//! Provide a model registry for looking up model types by identity or by name.
//!
//! ## Menu
//!
//! - [`TypeTrait`]: A trait representing a capability supported by a model type.
//! - [`FromType`]: A trait provide a function to create a `TypeTrait` from a type.
//! - [`ModelMeta`]: A container including a [`ModelInfo`] and a [`TypeTrait`] table.
//! - [`GetModelMeta`]: A trait provide a function to create a `ModelMeta` from a type.
//! - [`ModelRegistry`]: A container for storing and querying `ModelMeta`s.
//! - TypeTraits:
//!     - [`TypeTraitDefault`]: Allocates a default instance of a model.
//!     - [`TypeTraitCustomAttributes`]: The optional "declares custom attributes" capability.
//!
//! ## auto_register
//!
//! See [`ModelRegistry::auto_register`] .
//!
//! We use [`inventory`] crate to implement static registration,
//! not all platforms support it (although major platforms do).
//!
//! [`ModelInfo`]: crate::info::ModelInfo
//! [`inventory`]: https://docs.rs/inventory

// -----------------------------------------------------------------------------
// Modules

mod from_type;
mod model_meta;
mod model_registry;
mod traits;
mod type_trait;

// -----------------------------------------------------------------------------
// Exports

pub use from_type::FromType;
pub use model_meta::{GetModelMeta, ModelMeta};
pub use model_registry::{ModelRegistry, ModelRegistryArc};
pub use traits::{TypeTraitCustomAttributes, TypeTraitDefault};
pub use type_trait::TypeTrait;
