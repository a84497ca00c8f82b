//! Paths of the items generated code refers to.

use proc_macro2::TokenStream;
use quote::quote;

/// Get the correct access path to the `arbor_reflect` crate.
///
/// 1. For crates that depend on `arbor_reflect`, `::arbor_reflect` is returned.
/// 2. For crates that depend on `arbor`, `::arbor::reflect` is returned.
/// 3. Otherwise `::arbor_reflect` is returned, which may be incorrect.
///
/// Reading the manifest is not free, so the path is computed once per
/// derive and passed along.
pub(crate) fn arbor_reflect() -> syn::Path {
    arbor_macro_utils::Manifest::shared(|manifest| manifest.get_crate_path("arbor_reflect"))
}

#[inline(always)]
pub(crate) fn macro_exports_(arbor_reflect_path: &syn::Path) -> TokenStream {
    quote! {
        #arbor_reflect_path::__macro_exports
    }
}
