use proc_macro2::TokenStream;
use quote::quote;

use crate::derive_data::ModelDerive;

/// Generate implementation code for `GetModelMeta`.
///
/// The meta always carries `TypeTraitDefault`, and `TypeTraitCustomAttributes`
/// when the model declares custom attributes.
pub(crate) fn impl_trait_get_model_meta(derive: &ModelDerive) -> TokenStream {
    let vc_hydrate_path = derive.vc_hydrate_path();
    let get_model_meta_ = crate::path::get_model_meta_(vc_hydrate_path);
    let model_meta_ = crate::path::model_meta_(vc_hydrate_path);
    let model_registry_ = crate::path::model_registry_(vc_hydrate_path);
    let from_type_ = crate::path::from_type_(vc_hydrate_path);
    let type_trait_default_ = crate::path::type_trait_default_(vc_hydrate_path);
    let ident = derive.ident();

    let insert_custom_attributes = derive.has_custom_attributes().then(|| {
        let type_trait_custom_attributes_ =
            crate::path::type_trait_custom_attributes_(vc_hydrate_path);
        quote! {
            meta.insert_trait::<#type_trait_custom_attributes_>(
                <#type_trait_custom_attributes_ as #from_type_<Self>>::from_type()
            );
        }
    });

    let dependencies = derive.dependencies();
    let register_dependencies = (!dependencies.is_empty()).then(|| {
        quote! {
            fn register_dependencies(registry: &mut #model_registry_) {
                #( registry.register::<#dependencies>(); )*
            }
        }
    });

    quote! {
        #[automatically_derived]
        impl #get_model_meta_ for #ident {
            fn get_model_meta() -> #model_meta_ {
                let mut meta = #model_meta_::of::<Self>();
                meta.insert_trait::<#type_trait_default_>(
                    <#type_trait_default_ as #from_type_<Self>>::from_type()
                );
                #insert_custom_attributes
                meta
            }

            #register_dependencies
        }
    }
}
