//! Attribute parsing for the Bindable derive macro.
//!
//! This module provides parsers for the `#[bind(...)]` field attributes
//! used by the `Bindable` derive macro.

use proc_macro2::Span;
use syn::{
    parse::{Parse, ParseStream},
    punctuated::Punctuated,
    spanned::Spanned,
    Attribute, Error, Lit, LitStr, Meta, Result, Token,
};

/// Tag value that excludes a field from binding.
pub const IGNORE_TAG: &str = "-";

/// Field-level attributes from `#[bind(...)]`.
#[derive(Debug, Clone)]
pub struct BindAttr {
    /// External field name (default: the Rust field name).
    pub tag: Option<String>,
    /// Skip this field from binding.
    pub skip: bool,
    /// The span for error reporting.
    pub span: Span,
}

impl Default for BindAttr {
    fn default() -> Self {
        BindAttr {
            tag: None,
            skip: false,
            span: Span::call_site(),
        }
    }
}

impl BindAttr {
    fn set_tag(&mut self, lit: &LitStr) -> Result<()> {
        let value = lit.value();
        if value.is_empty() {
            return Err(Error::new(lit.span(), "bind tag must not be empty"));
        }
        if value == IGNORE_TAG {
            self.skip = true;
        } else {
            self.tag = Some(value);
        }
        self.span = lit.span();
        Ok(())
    }
}

impl Parse for BindAttr {
    fn parse(input: ParseStream) -> Result<Self> {
        let mut attr = BindAttr::default();

        // Leading tag literal: bind("name") or bind("name", ...)
        if input.peek(LitStr) {
            let lit: LitStr = input.parse()?;
            attr.set_tag(&lit)?;
            if input.is_empty() {
                return Ok(attr);
            }
            input.parse::<Token![,]>()?;
        }

        let content: Punctuated<Meta, Token![,]> = Punctuated::parse_terminated(input)?;

        for meta in content {
            match &meta {
                Meta::Path(p) if p.is_ident("skip") => {
                    attr.skip = true;
                }

                // tag = "custom_name"
                Meta::NameValue(nv) if nv.path.is_ident("tag") => {
                    if let syn::Expr::Lit(syn::ExprLit {
                        lit: Lit::Str(s), ..
                    }) = &nv.value
                    {
                        attr.set_tag(s)?;
                    } else {
                        return Err(Error::new(nv.value.span(), "tag must be a string literal"));
                    }
                }

                _ => {
                    return Err(Error::new(
                        meta.span(),
                        "unknown bind attribute. Expected: \"tag\", tag = \"...\", or skip",
                    ));
                }
            }
        }

        Ok(attr)
    }
}

/// Extract the `#[bind(...)]` attribute from a field's attributes.
///
/// Returns `None` for fields without one; those are not bound.
pub fn parse_bind_attrs(attrs: &[Attribute]) -> Result<Option<BindAttr>> {
    for attr in attrs {
        if !attr.path().is_ident("bind") {
            continue;
        }
        return match &attr.meta {
            // Bare #[bind]: tag defaults to the field name
            Meta::Path(p) => Ok(Some(BindAttr {
                span: p.span(),
                ..BindAttr::default()
            })),
            Meta::List(_) => attr.parse_args::<BindAttr>().map(Some),
            Meta::NameValue(nv) => Err(Error::new(
                nv.span(),
                "expected #[bind], #[bind(\"tag\")], #[bind(tag = \"...\")] or #[bind(skip)]",
            )),
        };
    }
    Ok(None)
}
