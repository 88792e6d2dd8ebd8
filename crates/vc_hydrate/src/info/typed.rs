use crate::Model;
use crate::info::{ModelInfo, TypePath};

// -----------------------------------------------------------------------------
// Typed

/// A static accessor to the property descriptor table of a model type.
///
/// Automatically implemented by [`#[derive(Model)]`](crate::derive::Model),
/// allowing access to the table without an instance of the type.
///
/// # Examples
///
/// ```
/// use vc_hydrate::{derive::Model, info::{Typed, ModelInfo}};
///
/// #[derive(Model, Default, Debug)]
/// struct A { value: f64 }
///
/// let info: &'static ModelInfo = <A as Typed>::model_info();
/// assert_eq!(info.property_len(), 1);
/// ```
///
/// Use [`Model::reflect_model_info`] for dynamic dispatch.
pub trait Typed: Model + TypePath {
    /// A static accessor to the property descriptor table.
    fn model_info() -> &'static ModelInfo;
}
