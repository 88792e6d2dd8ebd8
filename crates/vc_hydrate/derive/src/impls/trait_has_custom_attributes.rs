use proc_macro2::TokenStream;
use quote::quote;

use crate::derive_data::ModelDerive;

/// Generate implementation code for `HasCustomAttributes` from `nested` fields.
///
/// Nothing is generated without `nested` fields, a `#[model(custom_attributes)]`
/// type provides its own implementation.
pub(crate) fn impl_trait_has_custom_attributes(derive: &ModelDerive) -> TokenStream {
    let nested: Vec<_> = derive.nested().collect();
    if nested.is_empty() {
        return TokenStream::new();
    }

    let vc_hydrate_path = derive.vc_hydrate_path();
    let has_custom_attributes_ = crate::path::has_custom_attributes_(vc_hydrate_path);
    let custom_attribute_map_ = crate::path::custom_attribute_map_(vc_hydrate_path);
    let ident = derive.ident();

    let entries = nested.iter().map(|(field, ty)| {
        let name = &field.name;
        quote! {
            .with::<#ty>(#name)
        }
    });

    quote! {
        #[automatically_derived]
        impl #has_custom_attributes_ for #ident {
            fn custom_attributes() -> ::core::option::Option<#custom_attribute_map_> {
                ::core::option::Option::Some(#custom_attribute_map_::new() #(#entries)*)
            }
        }
    }
}
