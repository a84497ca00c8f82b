use proc_macro2::TokenStream;
use quote::quote;
use syn::{Field, Ident, LitStr, Type};

use super::{FieldAttributes, ReflectMeta};

pub(crate) struct ReflectStruct<'a> {
    pub meta: ReflectMeta<'a>,
    pub fields: Vec<StructField<'a>>,
}

/// Represents a field on a struct.
pub(crate) struct StructField<'a> {
    /// The raw field.
    pub data: &'a Field,
    pub ident: &'a Ident,
    /// The reflection-based attributes on the field.
    pub attrs: FieldAttributes,
}

impl<'a> ReflectStruct<'a> {
    #[inline]
    pub fn meta(&self) -> &ReflectMeta<'a> {
        &self.meta
    }

    /// Fields taking part in the schema, flattened ones included.
    pub fn active_fields(&self) -> impl Iterator<Item = &StructField<'a>> {
        self.fields.iter().filter(|field| field.attrs.skip.is_none())
    }
}

impl StructField<'_> {
    #[inline]
    pub fn ty(&self) -> &Type {
        &self.data.ty
    }

    /// The archived name, `rename` or the ident.
    pub fn name(&self) -> LitStr {
        match &self.attrs.rename {
            Some(lit) => lit.clone(),
            None => LitStr::new(&self.ident.to_string(), self.ident.span()),
        }
    }

    /// The builder calls following `schema.field(..)`, such as
    /// `.with_aliases(&["old"])`.
    pub fn builder_calls(&self) -> TokenStream {
        let mut calls = TokenStream::new();
        if !self.attrs.aliases.is_empty() {
            let aliases = &self.attrs.aliases;
            calls.extend(quote!(.with_aliases(&[#(#aliases),*])));
        }
        if self.attrs.immutable.is_some() {
            calls.extend(quote!(.with_tags(__m::FieldTags::IMMUTABLE)));
        }
        if let Some(lit) = &self.attrs.archiver {
            let archiver = Ident::new(&lit.value(), lit.span());
            calls.extend(quote!(.with_archiver(__m::Archiver::#archiver)));
        }
        calls
    }
}
