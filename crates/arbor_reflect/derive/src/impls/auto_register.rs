use proc_macro2::TokenStream;
use syn::Ident;

/// Generate `auto_register` implementation
#[cfg(feature = "auto_register")]
pub(crate) fn get_auto_register_impl(ident: &Ident) -> TokenStream {
    quote::quote! {
        __m::auto_register::inventory::submit!{
            __m::auto_register::AutoRegistration(
                <#ident as __m::Typed>::register_type
            )
        }
    }
}

/// Generate `auto_register` implementation
#[cfg(not(feature = "auto_register"))]
pub(crate) fn get_auto_register_impl(_: &Ident) -> TokenStream {
    TokenStream::new()
}
