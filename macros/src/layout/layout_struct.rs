use super::layout_attr::{get_field_layout, TypeLayout};
use super::layout_util::{display_name, CRATE};
use super::LayoutDeriveError;
use proc_macro2::TokenStream;
use quote::quote;
use syn::spanned::Spanned;
use syn::{DataStruct, DeriveInput, Fields};

// A field that takes part in the checks.
struct CheckedField<'a> {
    ident: &'a syn::Ident,
    offset: u64,
}

fn checked_fields(e: &DataStruct) -> syn::Result<Vec<CheckedField<'_>>> {
    let named = match &e.fields {
        Fields::Named(n) => &n.named,
        Fields::Unit => return Ok(Vec::new()),
        Fields::Unnamed(u) => {
            return Err(syn::Error::new(
                u.span(),
                LayoutDeriveError::NamedFieldsRequired,
            ))
        }
    };

    let mut out = Vec::new();
    for field in named {
        let layout = get_field_layout(&field.attrs)?;
        // Named fields always carry an ident.
        let ident = match &field.ident {
            Some(i) => i,
            None => continue,
        };
        match (layout.skip, layout.offset) {
            (true, None) => continue,
            (true, Some(_)) => {
                return Err(syn::Error::new(
                    field.span(),
                    LayoutDeriveError::OffsetWithSkip,
                ))
            }
            (false, Some(offset)) => out.push(CheckedField { ident, offset }),
            (false, None) => {
                return Err(syn::Error::new(
                    field.span(),
                    LayoutDeriveError::MissingOffset,
                ))
            }
        }
    }
    Ok(out)
}

pub fn layout_impl_for_struct(
    def: &DeriveInput,
    e: &DataStruct,
    layout: &TypeLayout,
) -> syn::Result<TokenStream> {
    let size = layout
        .size
        .ok_or_else(|| syn::Error::new(def.ident.span(), LayoutDeriveError::MissingSize))?;
    let name = match &layout.name {
        Some(n) => n.value(),
        None => display_name(&def.ident),
    };
    let fields = checked_fields(e)?;

    let ident = &def.ident;
    let field_idents = fields.iter().map(|f| f.ident);
    let field_names = fields.iter().map(|f| display_name(f.ident));
    let offsets = fields.iter().map(|f| f.offset);

    // `quote!` binds every interpolation inside a repetition, which a const cannot be.
    let krate = &CRATE;
    let out = quote! {
        impl #krate::LayoutExpectations for #ident {
            const LAYOUT_NAME: &'static str = #name;

            fn layout_expectations() -> ::std::vec::Vec<#krate::Expectation> {
                ::std::vec![
                    #(
                        #krate::Expectation::field_offset(
                            #name,
                            #field_names,
                            #offsets,
                            || #krate::__private::offset_of!(#ident, #field_idents),
                        ),
                    )*
                    #krate::Expectation::type_size(
                        #name,
                        #size,
                        #krate::__private::size_of::<#ident>,
                    ),
                ]
            }
        }
    };
    Ok(out)
}
