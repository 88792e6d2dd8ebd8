//! Code generators, one per implemented trait.

// -----------------------------------------------------------------------------
// Modules

mod auto_register;
mod trait_from_property_value;
mod trait_get_model_meta;
mod trait_has_custom_attributes;
mod trait_model;
mod trait_type_path;
mod trait_typed;

// -----------------------------------------------------------------------------
// Internal API

use proc_macro2::TokenStream;
use quote::quote;

use auto_register::get_auto_register_impl;
use trait_from_property_value::impl_trait_from_property_value;
use trait_get_model_meta::impl_trait_get_model_meta;
use trait_has_custom_attributes::impl_trait_has_custom_attributes;
use trait_model::impl_trait_model;
use trait_type_path::impl_trait_type_path;
use trait_typed::impl_trait_typed;

use crate::derive_data::ModelDerive;

/// Generate all implementations of `#[derive(Model)]`.
pub(crate) fn impl_model(derive: &ModelDerive) -> TokenStream {
    let type_path_tokens = impl_trait_type_path(derive);
    let typed_tokens = impl_trait_typed(derive);
    let model_tokens = impl_trait_model(derive);
    let from_property_value_tokens = impl_trait_from_property_value(derive);
    let get_model_meta_tokens = impl_trait_get_model_meta(derive);
    let has_custom_attributes_tokens = impl_trait_has_custom_attributes(derive);
    let auto_register_tokens = get_auto_register_impl(derive);

    quote! {
        #type_path_tokens

        #typed_tokens

        #model_tokens

        #from_property_value_tokens

        #get_model_meta_tokens

        #has_custom_attributes_tokens

        #auto_register_tokens
    }
}
