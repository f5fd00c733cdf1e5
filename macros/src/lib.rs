use proc_macro::TokenStream;

pub(crate) mod layout;

#[proc_macro_derive(LayoutExpectations, attributes(layout))]
pub fn derive(input: TokenStream) -> TokenStream {
    match layout::do_derive(input.into()) {
        Err(e) => e.to_compile_error().into(),
        Ok(o) => o.into(),
    }
}
