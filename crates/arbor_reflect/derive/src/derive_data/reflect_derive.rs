use syn::spanned::Spanned;
use syn::{Data, DeriveInput, Fields};

use super::{EnumVariant, FieldAttributes, ReflectEnum, ReflectMeta};
use super::{ReflectStruct, StructField, TypeAttributes};

/// The shape of a type deriving `Reflect`.
pub(crate) enum ReflectDerive<'a> {
    Struct(ReflectStruct<'a>),
    Enum(ReflectEnum<'a>),
}

impl<'a> ReflectDerive<'a> {
    pub fn from_input(input: &'a DeriveInput) -> syn::Result<Self> {
        if !input.generics.params.is_empty() {
            return Err(syn::Error::new(
                input.generics.span(),
                "`Reflect` cannot be derived for generic types",
            ));
        }

        let attrs = TypeAttributes::parse_attrs(&input.attrs)?;
        let meta = ReflectMeta::new(&input.ident, attrs);

        match &input.data {
            Data::Struct(data) => {
                let Fields::Named(named) = &data.fields else {
                    return Err(syn::Error::new(
                        data.fields.span(),
                        "`Reflect` requires named fields, such as `struct Foo { a: i32 }`",
                    ));
                };
                let fields = named
                    .named
                    .iter()
                    .map(|data| {
                        let Some(ident) = &data.ident else {
                            return Err(syn::Error::new(data.span(), "expected a named field"));
                        };
                        Ok(StructField {
                            attrs: FieldAttributes::parse_attrs(&data.attrs)?,
                            data,
                            ident,
                        })
                    })
                    .collect::<syn::Result<Vec<_>>>()?;
                Ok(Self::Struct(ReflectStruct { meta, fields }))
            }
            Data::Enum(data) => {
                if data.variants.is_empty() {
                    return Err(syn::Error::new(
                        input.ident.span(),
                        "`Reflect` requires at least one enum variant",
                    ));
                }
                let variants = data
                    .variants
                    .iter()
                    .map(|data| {
                        if !matches!(data.fields, Fields::Unit) {
                            return Err(syn::Error::new(
                                data.fields.span(),
                                "`Reflect` only supports unit enum variants",
                            ));
                        }
                        let attrs = FieldAttributes::parse_attrs(&data.attrs)?;
                        attrs.check_variant(data.ident.span())?;
                        Ok(EnumVariant { data, attrs })
                    })
                    .collect::<syn::Result<Vec<_>>>()?;
                Ok(Self::Enum(ReflectEnum { meta, variants }))
            }
            Data::Union(data) => Err(syn::Error::new(
                data.union_token.span(),
                "`Reflect` cannot be derived for unions",
            )),
        }
    }
}
