use syn::{Ident, LitStr, Variant};

use super::{FieldAttributes, ReflectMeta};

pub(crate) struct ReflectEnum<'a> {
    pub meta: ReflectMeta<'a>,
    pub variants: Vec<EnumVariant<'a>>,
}

/// Represents a unit variant on an enum.
pub(crate) struct EnumVariant<'a> {
    /// The raw variant.
    pub data: &'a Variant,
    /// Only `rename` is accepted.
    pub attrs: FieldAttributes,
}

impl<'a> ReflectEnum<'a> {
    #[inline]
    pub fn meta(&self) -> &ReflectMeta<'a> {
        &self.meta
    }
}

impl EnumVariant<'_> {
    #[inline]
    pub fn ident(&self) -> &Ident {
        &self.data.ident
    }

    /// The archived constant name.
    pub fn name(&self) -> LitStr {
        match &self.attrs.rename {
            Some(lit) => lit.clone(),
            None => LitStr::new(&self.data.ident.to_string(), self.data.ident.span()),
        }
    }
}
