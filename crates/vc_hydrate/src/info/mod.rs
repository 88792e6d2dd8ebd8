//! Compile-time descriptors of model types.
//!
//! ## Menu
//!
//! - [`TypePath`]: A static accessor to the fully qualified path and short name of a type.
//! - [`Type`]: A `TypeId` bundled with its paths, the identity of a model type.
//! - [`PropertyInfo`]: One entry of a property descriptor table.
//! - [`ModelInfo`]: The descriptor table of a model type, with a link to its base.
//! - [`Typed`]: A static accessor to a type's [`ModelInfo`].
//!
//! These are generated by [`#[derive(Model)]`](crate::derive::Model) and
//! are not expected to be written by hand.

// -----------------------------------------------------------------------------
// Modules

mod model_info;
mod property_info;
mod type_path;
mod typed;

// -----------------------------------------------------------------------------
// Exports

pub use model_info::ModelInfo;
pub use property_info::PropertyInfo;
pub use type_path::{Type, TypePath};
pub use typed::Typed;
