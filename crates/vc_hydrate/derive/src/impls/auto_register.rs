use proc_macro2::TokenStream;

use crate::derive_data::ModelDerive;

/// Generate `auto_register` implementation.
#[cfg(feature = "auto_register")]
pub(crate) fn get_auto_register_impl(derive: &ModelDerive) -> TokenStream {
    use quote::quote_spanned;

    let Some(span) = derive.attrs().auto_register else {
        return TokenStream::new();
    };

    let auto_register_ = crate::path::auto_register_(derive.vc_hydrate_path());
    let ident = derive.ident();

    quote_spanned! { span =>
        #auto_register_::inventory::submit! {
            #auto_register_::AutoRegisterFunc(
                <#ident as #auto_register_::RegisterType>::register
            )
        }
    }
}

/// Generate `auto_register` implementation.
#[cfg(not(feature = "auto_register"))]
pub(crate) fn get_auto_register_impl(_: &ModelDerive) -> TokenStream {
    TokenStream::new()
}
