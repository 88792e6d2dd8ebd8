use proc_macro2::TokenStream;
use quote::quote;

use crate::derive_data::ModelDerive;

/// Generate implementation code for `TypePath`.
pub(crate) fn impl_trait_type_path(derive: &ModelDerive) -> TokenStream {
    let type_path_ = crate::path::type_path_(derive.vc_hydrate_path());
    let ident = derive.ident();
    let (type_path, type_name, module_path) = derive.type_path_tokens();

    quote! {
        #[automatically_derived]
        impl #type_path_ for #ident {
            #[inline]
            fn type_path() -> &'static str {
                #type_path
            }

            #[inline]
            fn type_name() -> &'static str {
                #type_name
            }

            #[inline]
            fn module_path() -> ::core::option::Option<&'static str> {
                #module_path
            }
        }
    }
}
