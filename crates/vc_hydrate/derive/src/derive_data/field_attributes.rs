use proc_macro2::Span;
use syn::spanned::Spanned;
use syn::{Attribute, LitStr, Type};

use crate::MODEL_ATTRIBUTE_NAME;

/// Attributes applied at the field level: `#[model(...)]` on a field.
#[derive(Default, Debug)]
pub(crate) struct FieldAttributes {
    /// `base`, the field embeds the parent model.
    pub base: Option<Span>,
    /// `nested = Type`, values are hydrated into `Type`.
    pub nested: Option<Type>,
    /// `rename = "..."`
    pub rename: Option<LitStr>,
    /// `skip`, the field is not a property.
    pub skip: Option<Span>,
}

impl FieldAttributes {
    pub(crate) fn parse_attrs(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut this = Self::default();

        for attr in attrs {
            if !attr.path().is_ident(MODEL_ATTRIBUTE_NAME) {
                continue;
            }
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("base") {
                    this.base = Some(meta.path.span());
                } else if meta.path.is_ident("skip") {
                    this.skip = Some(meta.path.span());
                } else if meta.path.is_ident("nested") {
                    if this.nested.is_some() {
                        return Err(meta.error("duplicate `nested`"));
                    }
                    this.nested = Some(meta.value()?.parse()?);
                } else if meta.path.is_ident("rename") {
                    if this.rename.is_some() {
                        return Err(meta.error("duplicate `rename`"));
                    }
                    let lit: LitStr = meta.value()?.parse()?;
                    if lit.value().is_empty() {
                        return Err(syn::Error::new(lit.span(), "property name cannot be empty"));
                    }
                    this.rename = Some(lit);
                } else {
                    return Err(meta.error(
                        "unsupported field attribute, expected `base`, `nested`, `rename` or `skip`",
                    ));
                }
                Ok(())
            })?;
        }

        this.validate()?;
        Ok(this)
    }

    fn validate(&self) -> syn::Result<()> {
        let conflict = |span: Span, what: &str| {
            Err(syn::Error::new(span, format!("`{what}` cannot be combined with other field attributes")))
        };

        if let Some(span) = self.base
            && (self.skip.is_some() || self.nested.is_some() || self.rename.is_some())
        {
            return conflict(span, "base");
        }
        if let Some(span) = self.skip
            && (self.nested.is_some() || self.rename.is_some())
        {
            return conflict(span, "skip");
        }
        Ok(())
    }
}
