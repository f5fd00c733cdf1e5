//! Parsing of `#[layout(...)]` attributes.

use super::LayoutDeriveError;
use syn::spanned::Spanned;
use syn::{Attribute, Lit, LitStr, Meta, MetaNameValue, NestedMeta};

/// Struct-level settings: `#[layout(size = N, name = "...")]`.
pub struct TypeLayout {
    pub size: Option<u64>,
    pub name: Option<LitStr>,
}

/// Field-level settings: `#[layout(offset = N)]` or `#[layout(skip)]`.
pub struct FieldLayout {
    pub offset: Option<u64>,
    pub skip: bool,
}

// Collect the items of every `#[layout(...)]` attribute, in order.
fn layout_items(attrs: &[Attribute]) -> syn::Result<Vec<NestedMeta>> {
    let mut items = Vec::new();
    for a in attrs.iter().filter(|a| a.path.is_ident("layout")) {
        match a.parse_meta()? {
            Meta::List(l) => items.extend(l.nested),
            m => {
                return Err(syn::Error::new(
                    m.span(),
                    LayoutDeriveError::InvalidLayoutAttr,
                ))
            }
        }
    }
    Ok(items)
}

fn int_value(nv: &MetaNameValue) -> syn::Result<u64> {
    match &nv.lit {
        Lit::Int(i) => i.base10_parse(),
        l => Err(syn::Error::new(
            l.span(),
            LayoutDeriveError::InvalidLayoutValue,
        )),
    }
}

fn set_once<T>(slot: &mut Option<T>, value: T, span: proc_macro2::Span) -> syn::Result<()> {
    if slot.is_some() {
        return Err(syn::Error::new(span, LayoutDeriveError::DuplicateLayoutKey));
    }
    *slot = Some(value);
    Ok(())
}

pub fn get_type_layout(attrs: &[Attribute]) -> syn::Result<TypeLayout> {
    let mut layout = TypeLayout {
        size: None,
        name: None,
    };
    for item in layout_items(attrs)? {
        match &item {
            NestedMeta::Meta(Meta::NameValue(nv)) if nv.path.is_ident("size") => {
                set_once(&mut layout.size, int_value(nv)?, item.span())?;
            }
            NestedMeta::Meta(Meta::NameValue(nv)) if nv.path.is_ident("name") => {
                let name = match &nv.lit {
                    Lit::Str(s) => s.clone(),
                    l => {
                        return Err(syn::Error::new(
                            l.span(),
                            LayoutDeriveError::InvalidLayoutValue,
                        ))
                    }
                };
                set_once(&mut layout.name, name, item.span())?;
            }
            _ => {
                return Err(syn::Error::new(
                    item.span(),
                    LayoutDeriveError::UnknownLayoutKey,
                ))
            }
        }
    }
    Ok(layout)
}

pub fn get_field_layout(attrs: &[Attribute]) -> syn::Result<FieldLayout> {
    let mut offset = None;
    let mut skip = None;
    for item in layout_items(attrs)? {
        match &item {
            NestedMeta::Meta(Meta::NameValue(nv)) if nv.path.is_ident("offset") => {
                set_once(&mut offset, int_value(nv)?, item.span())?;
            }
            NestedMeta::Meta(Meta::Path(p)) if p.is_ident("skip") => {
                set_once(&mut skip, (), item.span())?;
            }
            _ => {
                return Err(syn::Error::new(
                    item.span(),
                    LayoutDeriveError::UnknownLayoutKey,
                ))
            }
        }
    }
    Ok(FieldLayout {
        offset,
        skip: skip.is_some(),
    })
}

#[cfg(test)]
mod test {
    use super::*;
    use quote::quote;
    use syn::DeriveInput;

    fn attrs(ts: proc_macro2::TokenStream) -> Vec<Attribute> {
        let di: DeriveInput = syn::parse2(ts).unwrap();
        di.attrs
    }

    #[test]
    fn test_type_layout_hex_and_decimal() {
        let a = attrs(quote! {
            #[layout(size = 0x10)]
            struct Foo;
        });
        assert_eq!(get_type_layout(&a).unwrap().size, Some(16));

        let a = attrs(quote! {
            #[layout(size = 24)]
            struct Foo;
        });
        assert_eq!(get_type_layout(&a).unwrap().size, Some(24));
    }

    #[test]
    fn test_type_layout_split_attributes() {
        let a = attrs(quote! {
            #[layout(name = "SDK::Foo")]
            #[repr(C)]
            #[layout(size = 8)]
            struct Foo;
        });
        let l = get_type_layout(&a).unwrap();
        assert_eq!(l.size, Some(8));
        assert_eq!(l.name.unwrap().value(), "SDK::Foo");
    }

    #[test]
    fn test_field_layout() {
        let a = attrs(quote! {
            #[layout(offset = 0x0008)]
            struct Foo;
        });
        let l = get_field_layout(&a).unwrap();
        assert_eq!(l.offset, Some(8));
        assert!(!l.skip);

        let a = attrs(quote! {
            #[layout(skip)]
            struct Foo;
        });
        let l = get_field_layout(&a).unwrap();
        assert_eq!(l.offset, None);
        assert!(l.skip);
    }

    #[test]
    fn test_no_layout_attributes() {
        let a = attrs(quote! {
            #[derive(Clone)]
            struct Foo;
        });
        let l = get_type_layout(&a).unwrap();
        assert!(l.size.is_none() && l.name.is_none());
    }
}
