use std::borrow::Cow;

use crate::Archivist;
use crate::archiver::read_fixed;
use crate::error::{ArchiveError, SchemaError};
use crate::registry::TypeRegistry;
use crate::text::{NULL, TextReader};
use crate::value::{Array, Category, CopyMode, Typed, Value, ValueMut, ValueRef};

/// Fixed length, the element count of the input must be `N`.
impl<T: Typed, const N: usize> Value for [T; N] {
    fn value_type_path(&self) -> Cow<'static, str> {
        <Self as Typed>::type_path()
    }

    #[inline]
    fn category(&self) -> Category {
        Category::Array
    }

    #[inline]
    fn value_ref(&self) -> ValueRef<'_> {
        ValueRef::Array(self)
    }

    #[inline]
    fn value_mut(&mut self) -> ValueMut<'_> {
        ValueMut::Array(self)
    }
}

impl<T: Typed, const N: usize> Array for [T; N] {
    fn element_type_path(&self) -> Cow<'static, str> {
        T::type_path()
    }

    #[inline]
    fn element_category(&self) -> Category {
        T::CATEGORY
    }

    #[inline]
    fn len(&self) -> usize {
        N
    }

    fn get(&self, index: usize) -> Option<&dyn Value> {
        self.as_slice().get(index).map(|v| v as &dyn Value)
    }

    fn get_mut(&mut self, index: usize) -> Option<&mut dyn Value> {
        self.as_mut_slice().get_mut(index).map(|v| v as &mut dyn Value)
    }

    #[inline]
    fn is_resizable(&self) -> bool {
        false
    }

    fn read_elements(
        &mut self,
        len: usize,
        input: &mut TextReader<'_>,
        cx: &Archivist,
        keep: bool,
    ) -> Result<(), ArchiveError> {
        read_fixed(self.as_mut_slice(), len, input, cx, keep)
    }
}

impl<T: Typed, const N: usize> Typed for [T; N] {
    const CATEGORY: Category = Category::Array;

    fn type_path() -> Cow<'static, str> {
        Cow::Owned(format!("{}[]", T::type_path()))
    }

    /// Elements are built as for a `null` entry, which gives `None` for
    /// optional elements and the default value otherwise.
    fn construct(_header: &str, cx: &Archivist) -> Result<Self, SchemaError> {
        let items = (0..N)
            .map(|_| T::construct(NULL, cx))
            .collect::<Result<Vec<T>, _>>()?;
        into_array(items)
    }

    fn copy(&self, mode: CopyMode, cx: &Archivist) -> Result<Self, SchemaError> {
        let items = self
            .iter()
            .map(|item| item.copy(mode, cx))
            .collect::<Result<Vec<T>, _>>()?;
        into_array(items)
    }

    fn register_type(types: &mut TypeRegistry) -> Result<(), SchemaError> {
        T::register_type(types)
    }
}

fn into_array<T: Typed, const N: usize>(items: Vec<T>) -> Result<[T; N], SchemaError> {
    <[T; N]>::try_from(items).map_err(|_| SchemaError::NotConstructible(<[T; N]>::type_path()))
}
