use proc_macro2::TokenStream;
use quote::quote;
use syn::DeriveInput;

use crate::derive_data::ReflectDerive;

// -----------------------------------------------------------------------------
// Modules

mod auto_register;
mod enum_kind;
mod struct_kind;

use auto_register::get_auto_register_impl;
use enum_kind::impl_enum;
use struct_kind::impl_struct;

// -----------------------------------------------------------------------------
// Internal API

/// Every impl generated for `input`, wrapped in an anonymous const so the
/// `__m` import stays private.
pub(crate) fn reflect_impls(input: &DeriveInput) -> syn::Result<TokenStream> {
    let (meta, impls) = match ReflectDerive::from_input(input)? {
        ReflectDerive::Struct(info) => {
            let impls = impl_struct(&info);
            (info.meta, impls)
        }
        ReflectDerive::Enum(info) => {
            let impls = impl_enum(&info);
            (info.meta, impls)
        }
    };

    let macro_exports = meta.macro_exports();
    let auto_register_tokens = get_auto_register_impl(meta.ident());

    Ok(quote! {
        const _: () = {
            use #macro_exports as __m;

            #impls

            #auto_register_tokens
        };
    })
}
