use crate::info::Typed;

/// Trait used to generate a [`TypeTrait`] for a concrete model type.
///
/// This is used by the `#[derive(Model)]` macro to fill the type trait table of
/// a [`ModelMeta`] through [`ModelMeta::insert_trait`].
///
/// # Example
///
/// ```
/// # use vc_hydrate::registry::{ModelMeta, TypeTraitDefault, FromType};
/// # use vc_hydrate::derive::Model;
/// #[derive(Model, Default, Debug)]
/// struct Foo { x: u8 }
///
/// let mut meta = ModelMeta::of::<Foo>();
/// meta.insert_trait::<TypeTraitDefault>(FromType::<Foo>::from_type());
/// ```
///
/// [`TypeTrait`]: crate::registry::TypeTrait
/// [`ModelMeta`]: crate::registry::ModelMeta
/// [`ModelMeta::insert_trait`]: crate::registry::ModelMeta::insert_trait
pub trait FromType<T: Typed> {
    fn from_type() -> Self;
}
