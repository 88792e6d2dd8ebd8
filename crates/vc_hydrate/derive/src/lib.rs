//! See the [`Model`] derive macro.
#![cfg_attr(docsrs, feature(doc_cfg))]
#![allow(clippy::std_instead_of_core, reason = "proc-macro lib")]
#![allow(clippy::std_instead_of_alloc, reason = "proc-macro lib")]

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

static MODEL_ATTRIBUTE_NAME: &str = "model";

// -----------------------------------------------------------------------------
// Modules

mod derive_data;
mod impls;
mod path;

// -----------------------------------------------------------------------------
// Macros

/// # Model Derivation
///
/// `#[derive(Model)]` turns a struct with named fields into a hydration target.
/// It implements the following traits:
///
/// - `TypePath`
/// - `Typed`
/// - `Model`
/// - `FromPropertyValue`
/// - `GetModelMeta`
/// - `HasCustomAttributes` (only with `#[model(nested = ...)]` fields)
///
/// The type must also implement `Default` and `Debug`, and every property type
/// must implement `FromPropertyValue`.
///
/// Generic types, tuple structs, enums and unions are rejected.
/// Unit structs are accepted and have no property.
///
/// ## Properties
///
/// Every named field is a property, in declaration order, named after the field.
///
/// ```rust, ignore
/// #[derive(Model, Default, Debug)]
/// struct User {
///     name: String,
///     #[model(rename = "e-mail")]
///     email: String,
///     #[model(skip)]
///     session: Option<Session>,
/// }
/// ```
///
/// - `rename = "..."`: the property name used in the source map.
/// - `skip`: the field is not a property and keeps its default value.
///
/// ## Base Model
///
/// A field marked `base` embeds the parent model. Its properties are inherited:
/// they are listed after the own properties and reached through the base field.
/// At most one field can be the base.
///
/// ```rust, ignore
/// #[derive(Model, Default, Debug)]
/// struct Admin {
///     #[model(base)]
///     user: User,
///     level: u8,
/// }
/// ```
///
/// ## Nested Models
///
/// A field marked `nested = Type` is a custom attribute: its source value is
/// hydrated into `Type` (one model for a mapping, many for a sequence) instead
/// of being assigned as is.
///
/// ```rust, ignore
/// #[derive(Model, Default, Debug)]
/// struct Order {
///     #[model(nested = Line)]
///     lines: Vec<Line>,
///     #[model(nested = Address)]
///     shipping: Option<Address>,
/// }
/// ```
///
/// The base and nested types are registered together with the model.
///
/// ## Custom Attributes
///
/// To provide the custom attribute map by hand, for example with targets
/// looked up by name, mark the type `custom_attributes` and implement
/// `HasCustomAttributes`. It cannot be combined with `nested` fields.
///
/// ```rust, ignore
/// #[derive(Model, Default, Debug)]
/// #[model(custom_attributes)]
/// struct Team { members: Vec<Member> }
///
/// impl HasCustomAttributes for Team {
///     fn custom_attributes() -> Option<CustomAttributeMap> {
///         Some(CustomAttributeMap::new().with_name("members", "Member"))
///     }
/// }
/// ```
///
/// ## Custom Type Path
///
/// The default type path is `module_path!()` followed by the type ident.
///
/// ```rust, ignore
/// #[derive(Model, Default, Debug)]
/// #[model(type_path = "app::model::User")]
/// struct User { /* ... */ }
/// ```
///
/// ## Auto Registration
///
/// `#[model(auto_register)]` submits the type to the static registration list,
/// see `ModelRegistry::auto_register`. This attribute is a no-op when the
/// `auto_register` feature is disabled.
#[proc_macro_derive(Model, attributes(model))]
pub fn derive_model(input: TokenStream) -> TokenStream {
    let ast = parse_macro_input!(input as DeriveInput);

    match derive_data::ModelDerive::parse(&ast) {
        Ok(derive) => impls::impl_model(&derive).into(),
        Err(err) => err.into_compile_error().into(),
    }
}
