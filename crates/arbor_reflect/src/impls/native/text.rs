use std::borrow::Cow;

use crate::Archivist;
use crate::error::SchemaError;
use crate::registry::{TypeMeta, TypeRegistry};
use crate::value::{Category, CopyMode, Text, Typed, Value, ValueMut, ValueRef};

macro_rules! impl_text_value {
    ($ty:ident: $name:literal) => {
        impl Value for $ty {
            #[inline]
            fn value_type_path(&self) -> Cow<'static, str> {
                Cow::Borrowed($name)
            }

            #[inline]
            fn category(&self) -> Category {
                Category::Text
            }

            #[inline]
            fn value_ref(&self) -> ValueRef<'_> {
                ValueRef::Text(self)
            }

            #[inline]
            fn value_mut(&mut self) -> ValueMut<'_> {
                ValueMut::Text(self)
            }
        }

        impl Typed for $ty {
            const CATEGORY: Category = Category::Text;

            #[inline]
            fn type_path() -> Cow<'static, str> {
                Cow::Borrowed($name)
            }

            #[inline]
            fn construct(_header: &str, _cx: &Archivist) -> Result<Self, SchemaError> {
                Ok(<$ty>::default())
            }

            #[inline]
            fn copy(&self, _mode: CopyMode, _cx: &Archivist) -> Result<Self, SchemaError> {
                Ok(self.clone())
            }

            fn register_type(types: &mut TypeRegistry) -> Result<(), SchemaError> {
                if types.insert_meta(TypeMeta::of::<Self>())? {
                    types.register_arrays::<Self>()?;
                }
                Ok(())
            }
        }
    };
}

impl_text_value!(String: "string");
impl_text_value!(char: "char");

impl Text for String {
    #[inline]
    fn text(&self) -> Cow<'_, str> {
        Cow::Borrowed(self)
    }

    #[inline]
    fn set_text(&mut self, text: String) -> bool {
        *self = text;
        true
    }
}

impl Text for char {
    fn text(&self) -> Cow<'_, str> {
        Cow::Owned(self.to_string())
    }

    fn set_text(&mut self, text: String) -> bool {
        let mut chars = text.chars();
        match (chars.next(), chars.next()) {
            (Some(ch), None) => {
                *self = ch;
                true
            }
            _ => false,
        }
    }
}
