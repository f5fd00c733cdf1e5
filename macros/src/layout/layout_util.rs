//! Various macro utilities.

use proc_macro2::TokenStream;
use quote::ToTokens;
use syn::ext::IdentExt;
use syn::DeriveInput;

pub struct Quote<'a>(&'a str);
impl<'a> ToTokens for Quote<'a> {
    fn to_tokens(&self, tokens: &mut TokenStream) {
        let ts: TokenStream = syn::parse_str(self.0).unwrap();
        ts.to_tokens(tokens);
    }
}
// Crate name constant for less repetition.
pub const CRATE: Quote = Quote("::layoutcheck");

pub fn def_has_generics(def: &DeriveInput) -> bool {
    !def.generics.params.is_empty()
}

// Name as written in failure labels, without any `r#` prefix.
pub fn display_name(ident: &syn::Ident) -> String {
    ident.unraw().to_string()
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_display_name_strips_raw() {
        let id: syn::Ident = syn::parse_str("r#type").unwrap();
        assert_eq!(display_name(&id), "type");
        let id: syn::Ident = syn::parse_str("health").unwrap();
        assert_eq!(display_name(&id), "health");
    }
}
