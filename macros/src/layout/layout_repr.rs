//! Tools for extracting repr info from struct declarations.

use super::LayoutDeriveError;
use syn::spanned::Spanned;
use syn::{Attribute, DeriveInput, Lit, LitInt, Meta, MetaList, NestedMeta};

pub struct ReprInfo {
    pub is_c: bool,           // True if there's "C" in repr.
    pub is_transparent: bool, // True if there's "transparent" in repr.
    pub align: Option<LitInt>,
    pub packed: Option<LitInt>,
}

impl ReprInfo {
    pub fn new() -> Self {
        Self {
            is_c: false,
            is_transparent: false,
            align: None,
            packed: None,
        }
    }

    pub fn set_align(&mut self, a: &LitInt) -> syn::Result<()> {
        if self.align.is_some() {
            return Err(syn::Error::new(a.span(), LayoutDeriveError::MultipleAlign));
        }
        self.align = Some(a.clone());
        Ok(())
    }

    pub fn set_packed(&mut self, a: &LitInt) -> syn::Result<()> {
        if self.packed.is_some() {
            return Err(syn::Error::new(a.span(), LayoutDeriveError::MultiplePacked));
        }
        self.packed = Some(a.clone());
        Ok(())
    }

    // Only these reprs give field offsets that another language can rely on.
    pub fn is_stable(&self) -> bool {
        self.is_c || self.is_transparent
    }
}

fn get_repr_attribute(a: &Attribute) -> Option<MetaList> {
    let a = match a.parse_meta() {
        Ok(a) => a,
        _ => return None,
    };
    let a = match a {
        Meta::List(l) => l,
        _ => return None,
    };
    if !a.path.is_ident("repr") {
        return None;
    }
    Some(a)
}

fn extract_repr_info(l: &MetaList, info: &mut ReprInfo) -> syn::Result<()> {
    for item in &l.nested {
        match item {
            NestedMeta::Meta(Meta::Path(p)) => {
                if p.is_ident("C") {
                    info.is_c = true;
                } else if p.is_ident("transparent") {
                    info.is_transparent = true;
                } else if p.is_ident("packed") {
                    info.set_packed(&LitInt::new("1", item.span()))?;
                } else {
                    return Err(syn::Error::new(
                        item.span(),
                        LayoutDeriveError::UnexpectedRepr,
                    ));
                }
            }
            NestedMeta::Meta(Meta::List(l)) => {
                if !l.path.is_ident("packed") && !l.path.is_ident("align") {
                    return Err(syn::Error::new(
                        item.span(),
                        LayoutDeriveError::UnexpectedRepr,
                    ));
                }
                match l.nested.first() {
                    Some(NestedMeta::Lit(Lit::Int(i))) => {
                        if l.path.is_ident("packed") {
                            info.set_packed(i)?;
                        } else {
                            info.set_align(i)?;
                        }
                    }
                    _ => {
                        return Err(syn::Error::new(
                            item.span(),
                            LayoutDeriveError::InvalidPackedAlign,
                        ))
                    }
                }
            }
            _ => {
                return Err(syn::Error::new(
                    item.span(),
                    LayoutDeriveError::UnexpectedRepr,
                ))
            }
        }
    }
    Ok(())
}

pub fn get_repr_info(d: &DeriveInput) -> syn::Result<ReprInfo> {
    let mut info = ReprInfo::new();
    for attr in d.attrs.iter().filter_map(get_repr_attribute) {
        extract_repr_info(&attr, &mut info)?;
    }
    Ok(info)
}

#[cfg(test)]
mod test {
    use super::*;
    use quote::quote;

    #[test]
    fn test_repr_info_align() {
        let formats = vec![
            quote! {
                #[repr(C, align(8))]
                struct Foobar;
            },
            quote! {
                #[repr(C)]
                #[repr(align(8))]
                struct Foobar;
            },
        ];

        for f in formats {
            let di: DeriveInput = syn::parse2(f).unwrap();
            let ri = get_repr_info(&di).unwrap();
            assert!(ri.is_c);
            assert!(ri.align.unwrap().to_string() == "8")
        }
    }

    #[test]
    fn test_repr_info_bare_packed() {
        let di: DeriveInput = syn::parse2(quote! {
            #[repr(C, packed)]
            struct Foobar;
        })
        .unwrap();
        let ri = get_repr_info(&di).unwrap();
        assert!(ri.packed.unwrap().to_string() == "1");
    }

    #[test]
    fn test_repr_info_none() {
        let di: DeriveInput = syn::parse2(quote! {
            #[derive(Clone)]
            struct Foobar;
        })
        .unwrap();
        assert!(!get_repr_info(&di).unwrap().is_stable());
    }
}
