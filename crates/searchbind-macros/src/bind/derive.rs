//! Implementation of the `#[derive(Bindable)]` macro.
//!
//! This macro generates the `Bindable` and `BindField` implementations (a
//! cached field descriptor plus a record slot) and tag name constants.

use std::collections::HashSet;

use proc_macro2::TokenStream;
use quote::{format_ident, quote};
use syn::{spanned::Spanned, Data, DeriveInput, Error, Fields, Result};

use super::attrs::parse_bind_attrs;

/// Main implementation of the Bindable derive macro.
pub fn bindable_derive_impl(input: DeriveInput) -> Result<TokenStream> {
    let struct_name = &input.ident;
    let struct_name_str = struct_name.to_string();

    if !input.generics.params.is_empty() {
        return Err(Error::new(
            input.generics.span(),
            "Bindable cannot be derived for generic structs",
        ));
    }

    // Ensure we have a struct with named fields
    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(named) => &named.named,
            _ => {
                return Err(Error::new(
                    input.span(),
                    "Bindable can only be derived for structs with named fields",
                ))
            }
        },
        _ => {
            return Err(Error::new(
                input.span(),
                "Bindable can only be derived for structs",
            ))
        }
    };

    let mut locate_fns: Vec<TokenStream> = Vec::new();
    let mut locators: Vec<TokenStream> = Vec::new();
    let mut tag_constants: Vec<TokenStream> = Vec::new();
    let mut seen_tags: HashSet<String> = HashSet::new();
    let mut seen_constants: HashSet<String> = HashSet::new();

    for (index, field) in fields.iter().enumerate() {
        let field_name = field
            .ident
            .as_ref()
            .ok_or_else(|| Error::new(field.span(), "expected named field"))?;

        // Fields without #[bind] are not bound
        let bind_attr = match parse_bind_attrs(&field.attrs)? {
            Some(attr) if !attr.skip => attr,
            _ => continue,
        };

        let tag = bind_attr
            .tag
            .unwrap_or_else(|| field_name.to_string().trim_start_matches("r#").to_string());

        if !seen_tags.insert(tag.clone()) {
            return Err(Error::new(
                bind_attr.span,
                format!("duplicate bind tag '{}' in {}", tag, struct_name_str),
            ));
        }

        let field_ty = &field.ty;
        let locate_fn = format_ident!("__locate_{}", index);

        locate_fns.push(quote! {
            fn #locate_fn(target: &mut #struct_name) -> ::searchbind_binder::Slot<'_> {
                ::searchbind_binder::BindField::slot(&mut target.#field_name)
            }
        });

        locators.push(quote! {
            ::searchbind_binder::FieldLocator::new(
                #tag,
                <#field_ty as ::searchbind_binder::BindField>::field_kind(),
                #locate_fn,
            )
        });

        let const_name = to_screaming_snake_case(&tag);
        if seen_constants.insert(const_name.clone()) {
            let const_ident = format_ident!("{}", const_name);
            tag_constants.push(quote! {
                /// Field tag constant.
                pub const #const_ident: &'static str = #tag;
            });
        }
    }

    // Generate the impl blocks
    let expanded = quote! {
        impl #struct_name {
            #(#tag_constants)*
        }

        impl ::searchbind_binder::Bindable for #struct_name {
            fn type_name() -> &'static str {
                #struct_name_str
            }

            fn descriptor() -> &'static ::searchbind_binder::Descriptor<Self> {
                #(#locate_fns)*

                static DESCRIPTOR: ::searchbind_binder::__private::OnceCell<
                    ::searchbind_binder::Descriptor<#struct_name>,
                > = ::searchbind_binder::__private::OnceCell::new();

                DESCRIPTOR.get_or_init(|| {
                    ::searchbind_binder::Descriptor::new(
                        #struct_name_str,
                        ::std::vec![#(#locators),*],
                    )
                })
            }
        }

        impl ::searchbind_binder::BindField for #struct_name {
            fn field_kind() -> ::searchbind_binder::FieldKind {
                ::searchbind_binder::FieldKind::Record(#struct_name_str)
            }

            fn slot(&mut self) -> ::searchbind_binder::Slot<'_> {
                ::searchbind_binder::Slot::Record(self)
            }
        }
    };

    Ok(expanded)
}

/// Convert a tag to a SCREAMING_SNAKE_CASE identifier.
///
/// Characters that cannot appear in an identifier become `_`, and a leading
/// digit gets a `_` prefix.
fn to_screaming_snake_case(s: &str) -> String {
    let mut result = String::with_capacity(s.len() + 4);
    let mut prev_was_lower = false;

    for c in s.chars() {
        if c.is_ascii_uppercase() {
            if prev_was_lower {
                result.push('_');
            }
            result.push(c);
            prev_was_lower = false;
        } else if c.is_ascii_alphanumeric() {
            result.push(c.to_ascii_uppercase());
            prev_was_lower = c.is_ascii_lowercase();
        } else {
            result.push('_');
            prev_was_lower = false;
        }
    }

    if result.is_empty() || result.starts_with(|c: char| c.is_ascii_digit()) {
        result.insert(0, '_');
    }
    if result == "_" {
        result.push_str("TAG");
    }

    result
}
