use proc_macro2::Span;
use syn::spanned::Spanned;
use syn::{Attribute, LitStr};

use crate::MODEL_ATTRIBUTE_NAME;

/// Attributes applied at the type level: `#[model(...)]` on the struct.
#[derive(Default, Debug)]
pub(crate) struct TypeAttributes {
    /// `type_path = "..."`
    pub type_path: Option<LitStr>,
    /// `custom_attributes`, the user implements `HasCustomAttributes`.
    pub custom_attributes: Option<Span>,
    /// `auto_register`
    pub auto_register: Option<Span>,
}

impl TypeAttributes {
    pub(crate) fn parse_attrs(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut this = Self::default();

        for attr in attrs {
            if !attr.path().is_ident(MODEL_ATTRIBUTE_NAME) {
                continue;
            }
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("type_path") {
                    if this.type_path.is_some() {
                        return Err(meta.error("duplicate `type_path`"));
                    }
                    let lit: LitStr = meta.value()?.parse()?;
                    let value = lit.value();
                    if value.is_empty() || value.starts_with("::") || value.ends_with("::") {
                        return Err(syn::Error::new(
                            lit.span(),
                            "`type_path` must be a non-empty path without leading or trailing `::`",
                        ));
                    }
                    this.type_path = Some(lit);
                } else if meta.path.is_ident("custom_attributes") {
                    this.custom_attributes = Some(meta.path.span());
                } else if meta.path.is_ident("auto_register") {
                    this.auto_register = Some(meta.path.span());
                } else {
                    return Err(meta.error(
                        "unsupported type attribute, expected `type_path`, `custom_attributes` or `auto_register`",
                    ));
                }
                Ok(())
            })?;
        }

        Ok(this)
    }
}
