use proc_macro2::TokenStream;
use quote::quote;

use crate::derive_data::ModelDerive;

/// Generate implementation code for `Model`.
///
/// Each accessor is a `match` over the own property names. Other names are
/// forwarded to the base field, or rejected when there is none.
pub(crate) fn impl_trait_model(derive: &ModelDerive) -> TokenStream {
    let vc_hydrate_path = derive.vc_hydrate_path();
    let model_ = crate::path::model_(vc_hydrate_path);
    let typed_ = crate::path::typed_(vc_hydrate_path);
    let type_path_ = crate::path::type_path_(vc_hydrate_path);
    let model_info_ = crate::path::model_info_(vc_hydrate_path);
    let property_value_ = crate::path::property_value_(vc_hydrate_path);
    let from_property_value_ = crate::path::from_property_value_(vc_hydrate_path);
    let assign_error_ = crate::path::assign_error_(vc_hydrate_path);
    let ident = derive.ident();

    let names: Vec<&String> = derive.properties().iter().map(|f| &f.name).collect();
    let members: Vec<_> = derive.properties().iter().map(|f| f.ident).collect();
    let types: Vec<_> = derive.properties().iter().map(|f| f.ty).collect();

    let (get_fallback, get_mut_fallback, set_fallback) = match derive.base() {
        Some(base) => {
            let member = base.ident;
            let ty = base.ty;
            (
                quote!(<#ty as #model_>::property(&self.#member, __name)),
                quote!(<#ty as #model_>::property_mut(&mut self.#member, __name)),
                quote!(<#ty as #model_>::set_property(&mut self.#member, __name, __value)),
            )
        }
        None => (
            quote!(::core::option::Option::None),
            quote!(::core::option::Option::None),
            quote! {
                ::core::result::Result::Err(#assign_error_::UnknownProperty {
                    model: <Self as #type_path_>::type_path(),
                    name: ::core::convert::Into::into(__name),
                })
            },
        ),
    };

    quote! {
        #[automatically_derived]
        impl #model_ for #ident {
            #[inline]
            fn reflect_model_info(&self) -> &'static #model_info_ {
                <Self as #typed_>::model_info()
            }

            fn property(&self, __name: &str) -> ::core::option::Option<&dyn ::core::any::Any> {
                match __name {
                    #(
                        #names => ::core::option::Option::Some(&self.#members as &dyn ::core::any::Any),
                    )*
                    _ => #get_fallback,
                }
            }

            fn property_mut(
                &mut self,
                __name: &str,
            ) -> ::core::option::Option<&mut dyn ::core::any::Any> {
                match __name {
                    #(
                        #names => ::core::option::Option::Some(&mut self.#members as &mut dyn ::core::any::Any),
                    )*
                    _ => #get_mut_fallback,
                }
            }

            fn set_property(
                &mut self,
                __name: &str,
                __value: #property_value_,
            ) -> ::core::result::Result<(), #assign_error_> {
                match __name {
                    #(
                        #names => {
                            self.#members = <#types as #from_property_value_>::from_property_value(__value)?;
                            ::core::result::Result::Ok(())
                        }
                    )*
                    _ => #set_fallback,
                }
            }
        }
    }
}
