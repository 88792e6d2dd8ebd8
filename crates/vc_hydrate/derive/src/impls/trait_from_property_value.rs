use proc_macro2::TokenStream;
use quote::quote;

use crate::derive_data::ModelDerive;

/// Generate implementation code for `FromPropertyValue`.
///
/// A model property only accepts hydrated models, a raw value is rejected.
pub(crate) fn impl_trait_from_property_value(derive: &ModelDerive) -> TokenStream {
    let vc_hydrate_path = derive.vc_hydrate_path();
    let from_property_value_ = crate::path::from_property_value_(vc_hydrate_path);
    let type_path_ = crate::path::type_path_(vc_hydrate_path);
    let assign_error_ = crate::path::assign_error_(vc_hydrate_path);
    let raw_value_ = crate::path::raw_value_(vc_hydrate_path);
    let raw_kind_ = crate::path::raw_kind_(vc_hydrate_path);
    let hydrated_ = crate::path::hydrated_(vc_hydrate_path);
    let ident = derive.ident();

    quote! {
        #[automatically_derived]
        impl #from_property_value_ for #ident {
            fn from_raw(raw: #raw_value_) -> ::core::result::Result<Self, #assign_error_> {
                ::core::result::Result::Err(#assign_error_::RawIntoModel {
                    model: <Self as #type_path_>::type_path(),
                    found: #raw_kind_::of(&raw),
                })
            }

            #[inline]
            fn from_hydrated(hydrated: #hydrated_) -> ::core::result::Result<Self, #assign_error_> {
                hydrated.into_model::<Self>()
            }
        }
    }
}
