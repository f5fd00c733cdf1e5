use std::fmt::Display;
use self::layout_attr::get_type_layout;
use self::layout_repr::get_repr_info;
use self::layout_struct::layout_impl_for_struct;
use self::layout_util::def_has_generics;
use proc_macro2::TokenStream;
use syn::spanned::Spanned;

pub(crate) mod layout_attr;
pub(crate) mod layout_repr;
pub(crate) mod layout_struct;
pub(crate) mod layout_util;

#[derive(PartialEq, Eq)]
enum LayoutDeriveError {
    MultipleAlign,
    MultiplePacked,
    InvalidPackedAlign,
    UnexpectedRepr,
    TransparentWithPackedAlign,
    StructNeedsStableRepr,
    GenericsNotSupported,
    OnlyStructsSupported,
    NamedFieldsRequired,
    InvalidLayoutAttr,
    InvalidLayoutValue,
    UnknownLayoutKey,
    DuplicateLayoutKey,
    MissingSize,
    MissingOffset,
    OffsetWithSkip,
}

impl Display for LayoutDeriveError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let msg = match self {
            Self::MultipleAlign => "Multiple align() in repr",
            Self::MultiplePacked => "Multiple packed() in repr",
            Self::InvalidPackedAlign => "Unexpected packed/align contents",
            Self::UnexpectedRepr => "Unexpected repr item",
            Self::TransparentWithPackedAlign => "repr(transparent) cannot be packed or aligned",
            Self::StructNeedsStableRepr => "Layout checks need repr(C) or repr(transparent)",
            Self::GenericsNotSupported => "Generic types are not supported",
            Self::OnlyStructsSupported => "Layout checks can only be derived for structs",
            Self::NamedFieldsRequired => "Layout checks need a struct with named fields",
            Self::InvalidLayoutAttr => "Expected #[layout(...)]",
            Self::InvalidLayoutValue => "Unexpected layout value, expected an integer or a string",
            Self::UnknownLayoutKey => "Unknown layout item",
            Self::DuplicateLayoutKey => "Layout item given more than once",
            Self::MissingSize => "Missing #[layout(size = ...)] on struct",
            Self::MissingOffset => "Missing #[layout(offset = ...)] or #[layout(skip)] on field",
            Self::OffsetWithSkip => "Skipped field cannot specify an offset",
        };
        write!(f, "{}", msg)
    }
}

pub fn do_derive(input: TokenStream) -> syn::Result<TokenStream> {
    let d: syn::DeriveInput = syn::parse2(input)?;
    if def_has_generics(&d) {
        return Err(syn::Error::new(
            d.generics.span(),
            LayoutDeriveError::GenericsNotSupported,
        ));
    }

    let s = match &d.data {
        syn::Data::Struct(s) => s,
        _ => {
            return Err(syn::Error::new(
                d.span(),
                LayoutDeriveError::OnlyStructsSupported,
            ))
        }
    };

    let info = get_repr_info(&d)?;
    if !info.is_stable() {
        return Err(syn::Error::new(
            d.ident.span(),
            LayoutDeriveError::StructNeedsStableRepr,
        ));
    }
    if info.is_transparent && (info.packed.is_some() || info.align.is_some()) {
        return Err(syn::Error::new(
            d.ident.span(),
            LayoutDeriveError::TransparentWithPackedAlign,
        ));
    }

    let layout = get_type_layout(&d.attrs)?;
    layout_impl_for_struct(&d, s, &layout)
}
