use proc_macro2::TokenStream;
use quote::quote;

use crate::derive_data::ReflectEnum;

/// Implement `Value`, `Typed` and `Enum` for a unit-only enum.
pub(crate) fn impl_enum(info: &ReflectEnum) -> TokenStream {
    let meta = info.meta();
    let ident = meta.ident();
    let type_path = meta.type_path_expr();
    let aliases = meta.aliases_expr();

    let variants: Vec<_> = info.variants.iter().map(|variant| variant.ident()).collect();
    let names = info.variants.iter().map(|variant| variant.name());
    let indices: Vec<_> = (0..variants.len()).collect();
    let first = &variants[0];

    quote! {
        impl __m::Value for #ident {
            #[inline]
            fn value_type_path(&self) -> __m::Cow<'static, str> {
                <Self as __m::Typed>::type_path()
            }

            #[inline]
            fn category(&self) -> __m::Category {
                __m::Category::Enum
            }

            #[inline]
            fn value_ref(&self) -> __m::ValueRef<'_> {
                __m::ValueRef::Enum(self)
            }

            #[inline]
            fn value_mut(&mut self) -> __m::ValueMut<'_> {
                __m::ValueMut::Enum(self)
            }
        }

        impl __m::Enum for #ident {
            #[inline]
            fn variant_names(&self) -> &'static [&'static str] {
                &[#(#names),*]
            }

            fn variant_index(&self) -> usize {
                match self {
                    #( Self::#variants => #indices, )*
                }
            }

            fn set_variant_index(&mut self, index: usize) -> bool {
                *self = match index {
                    #( #indices => Self::#variants, )*
                    _ => return false,
                };
                true
            }
        }

        impl __m::Typed for #ident {
            const CATEGORY: __m::Category = __m::Category::Enum;

            #[inline]
            fn type_path() -> __m::Cow<'static, str> {
                #type_path
            }

            #[inline]
            fn construct(_header: &str, _cx: &__m::Archivist) -> ::core::result::Result<Self, __m::SchemaError> {
                ::core::result::Result::Ok(Self::#first)
            }

            fn copy(&self, _mode: __m::CopyMode, _cx: &__m::Archivist) -> ::core::result::Result<Self, __m::SchemaError> {
                ::core::result::Result::Ok(match self {
                    #( Self::#variants => Self::#variants, )*
                })
            }

            fn register_type(types: &mut __m::TypeRegistry) -> ::core::result::Result<(), __m::SchemaError> {
                let meta = __m::TypeMeta::of::<Self>().with_aliases(#aliases);
                if types.insert_meta(meta)? {
                    types.register_arrays::<Self>()?;
                }
                ::core::result::Result::Ok(())
            }
        }
    }
}
