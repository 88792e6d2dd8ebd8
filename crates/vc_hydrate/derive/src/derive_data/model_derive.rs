use std::collections::BTreeSet;

use proc_macro2::TokenStream;
use quote::{ToTokens, quote};
use syn::ext::IdentExt;
use syn::spanned::Spanned;
use syn::{Data, DeriveInput, Fields, Ident, Path, Type};

use super::{FieldAttributes, TypeAttributes};

// -----------------------------------------------------------------------------
// ModelField

/// A named field of the derived struct.
#[derive(Debug)]
pub(crate) struct ModelField<'a> {
    pub ident: &'a Ident,
    pub ty: &'a Type,
    /// The property name, `rename` or the unraw field ident.
    pub name: String,
    pub attrs: FieldAttributes,
}

// -----------------------------------------------------------------------------
// ModelDerive

/// Everything the code generators need to know about the derived struct.
pub(crate) struct ModelDerive<'a> {
    vc_hydrate_path: Path,
    ident: &'a Ident,
    attrs: TypeAttributes,
    /// Property fields in declaration order, `base` and `skip` fields excluded.
    properties: Vec<ModelField<'a>>,
    base: Option<ModelField<'a>>,
}

impl<'a> ModelDerive<'a> {
    pub(crate) fn parse(ast: &'a DeriveInput) -> syn::Result<Self> {
        if !ast.generics.params.is_empty() {
            return Err(syn::Error::new(
                ast.generics.span(),
                "`#[derive(Model)]` does not support generic types",
            ));
        }

        let attrs = TypeAttributes::parse_attrs(&ast.attrs)?;

        let named = match &ast.data {
            Data::Struct(data) => match &data.fields {
                Fields::Named(fields) => Some(&fields.named),
                Fields::Unit => None,
                Fields::Unnamed(fields) => {
                    return Err(syn::Error::new(
                        fields.span(),
                        "`#[derive(Model)]` needs named fields, properties are addressed by name",
                    ));
                }
            },
            Data::Enum(data) => {
                return Err(syn::Error::new(
                    data.enum_token.span(),
                    "`#[derive(Model)]` does not support enums",
                ));
            }
            Data::Union(data) => {
                return Err(syn::Error::new(
                    data.union_token.span(),
                    "`#[derive(Model)]` does not support unions",
                ));
            }
        };

        let mut properties = Vec::new();
        let mut base: Option<ModelField<'a>> = None;
        let mut names = BTreeSet::new();

        for field in named.into_iter().flatten() {
            let attrs = FieldAttributes::parse_attrs(&field.attrs)?;
            if attrs.skip.is_some() {
                continue;
            }

            let Some(ident) = field.ident.as_ref() else {
                continue;
            };
            let name = match &attrs.rename {
                Some(lit) => lit.value(),
                None => ident.unraw().to_string(),
            };
            let model_field = ModelField {
                ident,
                ty: &field.ty,
                name,
                attrs,
            };

            if let Some(span) = model_field.attrs.base {
                if base.is_some() {
                    return Err(syn::Error::new(span, "a model can only have one `base`"));
                }
                base = Some(model_field);
                continue;
            }

            if !names.insert(model_field.name.clone()) {
                return Err(syn::Error::new(
                    field.span(),
                    format!("duplicate property `{}`", model_field.name),
                ));
            }
            properties.push(model_field);
        }

        if let Some(span) = attrs.custom_attributes
            && properties.iter().any(|f| f.attrs.nested.is_some())
        {
            return Err(syn::Error::new(
                span,
                "`custom_attributes` cannot be combined with `nested` fields, \
                 declare the nested targets in the `HasCustomAttributes` impl",
            ));
        }

        Ok(Self {
            vc_hydrate_path: crate::path::vc_hydrate(),
            ident: &ast.ident,
            attrs,
            properties,
            base,
        })
    }

    #[inline]
    pub(crate) fn vc_hydrate_path(&self) -> &Path {
        &self.vc_hydrate_path
    }

    #[inline]
    pub(crate) fn ident(&self) -> &Ident {
        self.ident
    }

    #[inline]
    pub(crate) fn attrs(&self) -> &TypeAttributes {
        &self.attrs
    }

    #[inline]
    pub(crate) fn properties(&self) -> &[ModelField<'a>] {
        &self.properties
    }

    #[inline]
    pub(crate) fn base(&self) -> Option<&ModelField<'a>> {
        self.base.as_ref()
    }

    /// Properties hydrated into another model.
    pub(crate) fn nested(&self) -> impl Iterator<Item = (&ModelField<'a>, &Type)> {
        self.properties
            .iter()
            .filter_map(|f| f.attrs.nested.as_ref().map(|ty| (f, ty)))
    }

    /// Whether the type carries the "declares custom attributes" capability.
    pub(crate) fn has_custom_attributes(&self) -> bool {
        self.attrs.custom_attributes.is_some() || self.nested().next().is_some()
    }

    /// Models registered together with this one: the base, then the nested targets.
    pub(crate) fn dependencies(&self) -> Vec<&Type> {
        let mut seen = Vec::<String>::new();
        let mut output = Vec::new();
        let candidates = self
            .base
            .iter()
            .map(|f| f.ty)
            .chain(self.nested().map(|(_, ty)| ty));
        for ty in candidates {
            let key = ty.to_token_stream().to_string();
            if !seen.contains(&key) {
                seen.push(key);
                output.push(ty);
            }
        }
        output
    }

    /// Tokens of `type_path`, `type_name` and `module_path`.
    pub(crate) fn type_path_tokens(&self) -> (TokenStream, TokenStream, TokenStream) {
        match &self.attrs.type_path {
            Some(lit) => {
                let value = lit.value();
                match value.rsplit_once("::") {
                    Some((module, name)) => (
                        quote!(#lit),
                        quote!(#name),
                        quote!(::core::option::Option::Some(#module)),
                    ),
                    None => (
                        quote!(#lit),
                        quote!(#lit),
                        quote!(::core::option::Option::None),
                    ),
                }
            }
            None => {
                let name = self.ident.unraw().to_string();
                (
                    quote!(::core::concat!(::core::module_path!(), "::", #name)),
                    quote!(#name),
                    quote!(::core::option::Option::Some(::core::module_path!())),
                )
            }
        }
    }
}
