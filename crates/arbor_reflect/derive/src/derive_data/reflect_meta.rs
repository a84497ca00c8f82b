use proc_macro2::TokenStream;
use quote::quote;
use syn::{Ident, LitStr};

use super::TypeAttributes;

/// Information shared by every generated impl of one type.
pub(crate) struct ReflectMeta<'a> {
    ident: &'a Ident,
    attrs: TypeAttributes,
    arbor_reflect_path: syn::Path,
}

impl core::fmt::Debug for ReflectMeta<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ReflectMeta")
            .field("ident", &self.ident)
            .field("attrs", &self.attrs)
            .finish()
    }
}

impl<'a> ReflectMeta<'a> {
    #[inline]
    pub fn new(ident: &'a Ident, attrs: TypeAttributes) -> Self {
        Self {
            ident,
            attrs,
            arbor_reflect_path: crate::path::arbor_reflect(),
        }
    }

    #[inline]
    pub fn ident(&self) -> &Ident {
        self.ident
    }

    /// `path::__macro_exports`
    #[inline]
    pub fn macro_exports(&self) -> TokenStream {
        crate::path::macro_exports_(&self.arbor_reflect_path)
    }

    /// The `Cow<'static, str>` expression of the type path, with the
    /// exports in scope as `__m`.
    ///
    /// Without a `type_path` attribute the path is
    /// `concat!(module_path!(), "::", "Ident")`.
    pub fn type_path_expr(&self) -> TokenStream {
        match &self.attrs.type_path {
            Some(lit) => quote!(__m::Cow::Borrowed(#lit)),
            None => {
                let name = LitStr::new(&self.ident.to_string(), self.ident.span());
                quote!(__m::Cow::Borrowed(::core::concat!(::core::module_path!(), "::", #name)))
            }
        }
    }

    /// `&["alias", ...]`
    #[inline]
    pub fn aliases_expr(&self) -> TokenStream {
        let aliases = &self.attrs.aliases;
        quote!(&[#(#aliases),*])
    }
}
