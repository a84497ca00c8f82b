use std::borrow::Cow;
use std::collections::VecDeque;

use crate::Archivist;
use crate::archiver::read_growable;
use crate::error::{ArchiveError, SchemaError};
use crate::registry::TypeRegistry;
use crate::text::TextReader;
use crate::value::{Array, Category, CopyMode, List, Typed, Value, ValueMut, ValueRef};

macro_rules! impl_list {
    ($ty:ident, $name:literal, $get:expr, $get_mut:expr) => {
        impl<T: Typed> Value for $ty<T> {
            #[inline]
            fn value_type_path(&self) -> Cow<'static, str> {
                Cow::Borrowed($name)
            }

            #[inline]
            fn category(&self) -> Category {
                Category::List
            }

            #[inline]
            fn value_ref(&self) -> ValueRef<'_> {
                ValueRef::List(self)
            }

            #[inline]
            fn value_mut(&mut self) -> ValueMut<'_> {
                ValueMut::List(self)
            }
        }

        impl<T: Typed> Array for $ty<T> {
            fn element_type_path(&self) -> Cow<'static, str> {
                T::type_path()
            }

            #[inline]
            fn element_category(&self) -> Category {
                T::CATEGORY
            }

            #[inline]
            fn len(&self) -> usize {
                <$ty<T>>::len(self)
            }

            fn get(&self, index: usize) -> Option<&dyn Value> {
                $get(self, index).map(|v| v as &dyn Value)
            }

            fn get_mut(&mut self, index: usize) -> Option<&mut dyn Value> {
                $get_mut(self, index).map(|v| v as &mut dyn Value)
            }

            #[inline]
            fn is_resizable(&self) -> bool {
                true
            }

            fn read_elements(
                &mut self,
                len: usize,
                input: &mut TextReader<'_>,
                cx: &Archivist,
                keep: bool,
            ) -> Result<(), ArchiveError> {
                read_growable(self, len, input, cx, keep)
            }
        }

        impl<T: Typed> List for $ty<T> {
            #[inline]
            fn container_name(&self) -> &'static str {
                $name
            }
        }

        impl<T: Typed> Typed for $ty<T> {
            const CATEGORY: Category = Category::List;

            #[inline]
            fn type_path() -> Cow<'static, str> {
                Cow::Borrowed($name)
            }

            #[inline]
            fn construct(_header: &str, _cx: &Archivist) -> Result<Self, SchemaError> {
                Ok(<$ty<T>>::new())
            }

            fn copy(&self, mode: CopyMode, cx: &Archivist) -> Result<Self, SchemaError> {
                self.iter().map(|item| item.copy(mode, cx)).collect()
            }

            #[inline]
            fn register_type(types: &mut TypeRegistry) -> Result<(), SchemaError> {
                T::register_type(types)
            }
        }
    };
}

impl_list!(Vec, "Vec", <[T]>::get, <[T]>::get_mut);
impl_list!(VecDeque, "VecDeque", VecDeque::get, VecDeque::get_mut);
