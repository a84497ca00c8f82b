use proc_macro2::TokenStream;
use quote::quote;

use crate::derive_data::ReflectStruct;

/// Implement `Value`, `Typed`, `Reflect` and `Describe` for a struct.
pub(crate) fn impl_struct(info: &ReflectStruct) -> TokenStream {
    let value_trait_tokens = impl_trait_value(info);
    let typed_trait_tokens = impl_trait_typed(info);
    let reflect_trait_tokens = impl_trait_reflect(info);
    let describe_trait_tokens = impl_trait_describe(info);

    quote! {
        #value_trait_tokens

        #typed_trait_tokens

        #reflect_trait_tokens

        #describe_trait_tokens
    }
}

fn impl_trait_value(info: &ReflectStruct) -> TokenStream {
    let ident = info.meta().ident();
    let members: Vec<_> = info.active_fields().map(|field| field.ident).collect();

    quote! {
        impl __m::Value for #ident {
            #[inline]
            fn value_type_path(&self) -> __m::Cow<'static, str> {
                <Self as __m::Typed>::type_path()
            }

            #[inline]
            fn category(&self) -> __m::Category {
                __m::Category::Object
            }

            #[inline]
            fn value_ref(&self) -> __m::ValueRef<'_> {
                __m::ValueRef::Object(self)
            }

            #[inline]
            fn value_mut(&mut self) -> __m::ValueMut<'_> {
                __m::ValueMut::Object(self)
            }

            fn is_dirty(&self) -> bool {
                false #( || __m::Value::is_dirty(&self.#members) )*
            }

            fn mark_clean(&mut self) {
                #( __m::Value::mark_clean(&mut self.#members); )*
            }
        }
    }
}

fn impl_trait_typed(info: &ReflectStruct) -> TokenStream {
    let meta = info.meta();
    let ident = meta.ident();
    let type_path = meta.type_path_expr();
    let aliases = meta.aliases_expr();
    let field_types = info.active_fields().map(|field| field.ty());

    quote! {
        impl __m::Typed for #ident {
            const CATEGORY: __m::Category = __m::Category::Object;

            #[inline]
            fn type_path() -> __m::Cow<'static, str> {
                #type_path
            }

            #[inline]
            fn construct(_header: &str, _cx: &__m::Archivist) -> ::core::result::Result<Self, __m::SchemaError> {
                ::core::result::Result::Ok(<Self as ::core::default::Default>::default())
            }

            #[inline]
            fn copy(&self, mode: __m::CopyMode, cx: &__m::Archivist) -> ::core::result::Result<Self, __m::SchemaError> {
                __m::copy_object(self, mode, cx)
            }

            fn register_type(types: &mut __m::TypeRegistry) -> ::core::result::Result<(), __m::SchemaError> {
                let meta = __m::TypeMeta::of::<Self>()
                    .with_constructor(|| -> __m::Box<dyn __m::Reflect> {
                        __m::Box::new(<Self as ::core::default::Default>::default())
                    })
                    .with_aliases(#aliases);
                if types.insert_meta(meta)? {
                    types.register_arrays::<Self>()?;
                    #( <#field_types as __m::Typed>::register_type(types)?; )*
                }
                ::core::result::Result::Ok(())
            }
        }
    }
}

fn impl_trait_reflect(info: &ReflectStruct) -> TokenStream {
    let ident = info.meta().ident();

    quote! {
        impl __m::Reflect for #ident {
            #[inline]
            fn as_reflect(&self) -> &dyn __m::Reflect {
                self
            }

            #[inline]
            fn as_reflect_mut(&mut self) -> &mut dyn __m::Reflect {
                self
            }

            #[inline]
            fn schema(&self, cx: &__m::Archivist) -> ::core::result::Result<__m::Arc<__m::Schema>, __m::SchemaError> {
                cx.schemas().get_or_build::<Self>()
            }

            #[inline]
            fn reflect_reset(&mut self) {
                *self = <Self as ::core::default::Default>::default();
            }

            fn reflect_copy(
                &self,
                mode: __m::CopyMode,
                cx: &__m::Archivist,
            ) -> ::core::result::Result<__m::Box<dyn __m::Reflect>, __m::SchemaError> {
                ::core::result::Result::Ok(__m::Box::new(<Self as __m::Typed>::copy(self, mode, cx)?))
            }
        }
    }
}

fn impl_trait_describe(info: &ReflectStruct) -> TokenStream {
    let ident = info.meta().ident();

    let declarations = info.active_fields().map(|field| {
        let member = field.ident;
        let ty = field.ty();
        if field.attrs.flatten.is_some() {
            quote! {
                schema.extends::<#ty>(|s| &s.#member, |s| &mut s.#member);
            }
        } else {
            let name = field.name();
            let calls = field.builder_calls();
            quote! {
                schema.field::<#ty>(#name, |s| &s.#member, |s| &mut s.#member) #calls;
            }
        }
    });

    quote! {
        impl __m::Describe for #ident {
            fn describe(schema: &mut __m::SchemaBuilder<Self>) {
                #( #declarations )*
            }
        }
    }
}
