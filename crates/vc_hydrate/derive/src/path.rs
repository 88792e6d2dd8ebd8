//! This independent module is used to provide the required paths.
//! So as to minimize changes when the `vc_hydrate` structure is modified.

use proc_macro2::TokenStream;
use quote::quote;

// -----------------------------------------------------------------------------
// Crate Path

/// Get the correct access path to the `vc_hydrate` crate.
///
/// 1. For crates that depend on `vc_hydrate`, `::vc_hydrate` is returned here.
/// 2. For crates that depend on `vc_model`, `::vc_model::hydrate` is returned here.
/// 3. For other situations, `::vc_hydrate` is returned here, but this may be incorrect.
///
/// The cost of this function is relatively high (accessing files, obtaining locks),
/// so the path is obtained once per derive and passed around.
pub(crate) fn vc_hydrate() -> syn::Path {
    vc_macro_utils::Manifest::shared(|manifest| manifest.get_crate_path("vc_hydrate"))
}

// -----------------------------------------------------------------------------
// info

#[inline(always)]
pub(crate) fn type_path_(vc_hydrate_path: &syn::Path) -> TokenStream {
    quote! {
        #vc_hydrate_path::info::TypePath
    }
}

#[inline(always)]
pub(crate) fn typed_(vc_hydrate_path: &syn::Path) -> TokenStream {
    quote! {
        #vc_hydrate_path::info::Typed
    }
}

#[inline(always)]
pub(crate) fn model_info_(vc_hydrate_path: &syn::Path) -> TokenStream {
    quote! {
        #vc_hydrate_path::info::ModelInfo
    }
}

#[inline(always)]
pub(crate) fn property_info_(vc_hydrate_path: &syn::Path) -> TokenStream {
    quote! {
        #vc_hydrate_path::info::PropertyInfo
    }
}

// -----------------------------------------------------------------------------
// model

#[inline(always)]
pub(crate) fn model_(vc_hydrate_path: &syn::Path) -> TokenStream {
    quote! {
        #vc_hydrate_path::Model
    }
}

#[inline(always)]
pub(crate) fn property_value_(vc_hydrate_path: &syn::Path) -> TokenStream {
    quote! {
        #vc_hydrate_path::PropertyValue
    }
}

#[inline(always)]
pub(crate) fn from_property_value_(vc_hydrate_path: &syn::Path) -> TokenStream {
    quote! {
        #vc_hydrate_path::FromPropertyValue
    }
}

#[inline(always)]
pub(crate) fn assign_error_(vc_hydrate_path: &syn::Path) -> TokenStream {
    quote! {
        #vc_hydrate_path::AssignError
    }
}

#[inline(always)]
pub(crate) fn hydrated_(vc_hydrate_path: &syn::Path) -> TokenStream {
    quote! {
        #vc_hydrate_path::Hydrated
    }
}

#[inline(always)]
pub(crate) fn raw_value_(vc_hydrate_path: &syn::Path) -> TokenStream {
    quote! {
        #vc_hydrate_path::RawValue
    }
}

#[inline(always)]
pub(crate) fn raw_kind_(vc_hydrate_path: &syn::Path) -> TokenStream {
    quote! {
        #vc_hydrate_path::RawKind
    }
}

// -----------------------------------------------------------------------------
// registry

#[inline(always)]
pub(crate) fn get_model_meta_(vc_hydrate_path: &syn::Path) -> TokenStream {
    quote! {
        #vc_hydrate_path::registry::GetModelMeta
    }
}

#[inline(always)]
pub(crate) fn model_meta_(vc_hydrate_path: &syn::Path) -> TokenStream {
    quote! {
        #vc_hydrate_path::registry::ModelMeta
    }
}

#[inline(always)]
pub(crate) fn model_registry_(vc_hydrate_path: &syn::Path) -> TokenStream {
    quote! {
        #vc_hydrate_path::registry::ModelRegistry
    }
}

#[inline(always)]
pub(crate) fn from_type_(vc_hydrate_path: &syn::Path) -> TokenStream {
    quote! {
        #vc_hydrate_path::registry::FromType
    }
}

#[inline(always)]
pub(crate) fn type_trait_default_(vc_hydrate_path: &syn::Path) -> TokenStream {
    quote! {
        #vc_hydrate_path::registry::TypeTraitDefault
    }
}

#[inline(always)]
pub(crate) fn type_trait_custom_attributes_(vc_hydrate_path: &syn::Path) -> TokenStream {
    quote! {
        #vc_hydrate_path::registry::TypeTraitCustomAttributes
    }
}

// -----------------------------------------------------------------------------
// attributes

#[inline(always)]
pub(crate) fn has_custom_attributes_(vc_hydrate_path: &syn::Path) -> TokenStream {
    quote! {
        #vc_hydrate_path::attributes::HasCustomAttributes
    }
}

#[inline(always)]
pub(crate) fn custom_attribute_map_(vc_hydrate_path: &syn::Path) -> TokenStream {
    quote! {
        #vc_hydrate_path::attributes::CustomAttributeMap
    }
}

// -----------------------------------------------------------------------------
// __macro_exports

#[inline(always)]
pub(crate) fn once_lock_(vc_hydrate_path: &syn::Path) -> TokenStream {
    quote! {
        #vc_hydrate_path::__macro_exports::OnceLock
    }
}

#[cfg(feature = "auto_register")]
#[inline(always)]
pub(crate) fn auto_register_(vc_hydrate_path: &syn::Path) -> TokenStream {
    quote! {
        #vc_hydrate_path::__macro_exports::auto_register
    }
}
