use std::any::Any;
use std::borrow::Cow;
use std::fmt::Write;

use crate::Archivist;
use crate::error::SchemaError;
use crate::registry::{TypeMeta, TypeRegistry};
use crate::value::{Category, CopyMode, Scalar, Typed, Value, ValueMut, ValueRef};

macro_rules! impl_primitive {
    ($eq:expr => $($ty:ident: $name:literal),* $(,)?) => {$(
        impl Value for $ty {
            #[inline]
            fn value_type_path(&self) -> Cow<'static, str> {
                Cow::Borrowed($name)
            }

            #[inline]
            fn category(&self) -> Category {
                Category::Primitive
            }

            #[inline]
            fn value_ref(&self) -> ValueRef<'_> {
                ValueRef::Scalar(self)
            }

            #[inline]
            fn value_mut(&mut self) -> ValueMut<'_> {
                ValueMut::Scalar(self)
            }
        }

        impl Scalar for $ty {
            fn write_token(&self, out: &mut String) {
                // Writing into a `String` cannot fail.
                let _ = write!(out, "{self}");
            }

            fn read_token(&mut self, token: &str) -> bool {
                match token.parse::<$ty>() {
                    Ok(value) => {
                        *self = value;
                        true
                    }
                    Err(_) => false,
                }
            }

            fn scalar_eq(&self, other: &dyn Value) -> bool {
                let other: &dyn Any = other;
                let eq: fn(&$ty, &$ty) -> bool = $eq;
                other.downcast_ref::<$ty>().is_some_and(|other| eq(self, other))
            }
        }

        impl Typed for $ty {
            const CATEGORY: Category = Category::Primitive;

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
                Ok(*self)
            }

            fn register_type(types: &mut TypeRegistry) -> Result<(), SchemaError> {
                if types.insert_meta(TypeMeta::of::<Self>())? {
                    types.register_arrays::<Self>()?;
                }
                Ok(())
            }
        }
    )*};
}

// The short-form names are written; the Rust names are read as aliases.
impl_primitive!(|a, b| a == b =>
    bool: "boolean",
    i8: "byte",
    i16: "short",
    i32: "int",
    i64: "long",
    isize: "isize",
    u8: "u8",
    u16: "u16",
    u32: "u32",
    u64: "u64",
    usize: "usize",
);
// Bitwise, so that `NaN` equals itself and `-0.0` differs from `0.0`, like
// their tokens.
impl_primitive!(|a, b| a.to_bits() == b.to_bits() => f32: "float", f64: "double");

#[cfg(test)]
mod tests {
    use crate::value::Scalar;

    fn token(value: &dyn Scalar) -> String {
        let mut out = String::new();
        value.write_token(&mut out);
        out
    }

    #[test]
    fn tokens() {
        assert_eq!(token(&-3_i8), "-3");
        assert_eq!(token(&true), "true");
        assert_eq!(token(&1.5_f32), "1.5");
        assert_eq!(token(&2.0_f64), "2");

        let mut value = 0.0_f64;
        assert!(value.read_token("2"));
        assert_eq!(value, 2.0);
        assert!(!value.read_token("two"));

        let mut small = 0_u8;
        assert!(!small.read_token("300"));
        assert_eq!(small, 0);
    }

    #[test]
    fn equality() {
        assert!(3_i32.scalar_eq(&3_i32));
        assert!(!3_i32.scalar_eq(&3_i64));
        assert!(f64::NAN.scalar_eq(&f64::NAN));
        assert!(!0.0_f64.scalar_eq(&-0.0_f64));
    }

    #[test]
    fn short_form_names() {
        use crate::value::Typed;

        assert_eq!(i32::type_path(), "int");
        assert_eq!(i64::type_path(), "long");
        assert_eq!(f32::type_path(), "float");
        assert_eq!(bool::type_path(), "boolean");
        assert_eq!(u16::type_path(), "u16");
    }
}
