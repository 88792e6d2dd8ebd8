use proc_macro2::TokenStream;
use quote::quote;

use crate::derive_data::ModelDerive;

/// Generate implementation code for `Typed`.
///
/// The descriptor table is built on first access and stored in a static `OnceLock`.
pub(crate) fn impl_trait_typed(derive: &ModelDerive) -> TokenStream {
    let vc_hydrate_path = derive.vc_hydrate_path();
    let typed_ = crate::path::typed_(vc_hydrate_path);
    let model_info_ = crate::path::model_info_(vc_hydrate_path);
    let property_info_ = crate::path::property_info_(vc_hydrate_path);
    let once_lock_ = crate::path::once_lock_(vc_hydrate_path);
    let ident = derive.ident();

    let properties = derive.properties().iter().map(|field| {
        let ty = field.ty;
        let name = &field.name;
        quote! {
            #property_info_::new::<#ty>(#name)
        }
    });

    let with_base = derive.base().map(|base| {
        let ty = base.ty;
        quote! {
            .with_base::<#ty>()
        }
    });

    quote! {
        #[automatically_derived]
        impl #typed_ for #ident {
            fn model_info() -> &'static #model_info_ {
                static CELL: #once_lock_<#model_info_> = #once_lock_::new();
                CELL.get_or_init(|| {
                    #model_info_::new::<Self>(&[ #(#properties),* ]) #with_base
                })
            }
        }
    }
}
