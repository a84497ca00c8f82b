use std::borrow::Cow;

use crate::archiver::read_growable;
use crate::error::{ArchiveError, SchemaError};
use crate::registry::TypeRegistry;
use crate::text::TextReader;
use crate::value::{Array, Category, CopyMode, Slot, Typed, Value, ValueMut, ValueRef};
use crate::{Archivist, Reflect};

// -----------------------------------------------------------------------------
// Box<[T]>

/// Archived as `T[]`; the slice is reallocated when the input length differs.
impl<T: Typed> Value for Box<[T]> {
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

impl<T: Typed> Array for Box<[T]> {
    fn element_type_path(&self) -> Cow<'static, str> {
        T::type_path()
    }

    #[inline]
    fn element_category(&self) -> Category {
        T::CATEGORY
    }

    #[inline]
    fn len(&self) -> usize {
        <[T]>::len(self)
    }

    fn get(&self, index: usize) -> Option<&dyn Value> {
        <[T]>::get(self, index).map(|v| v as &dyn Value)
    }

    fn get_mut(&mut self, index: usize) -> Option<&mut dyn Value> {
        <[T]>::get_mut(self, index).map(|v| v as &mut dyn Value)
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
        let mut items = core::mem::take(self).into_vec();
        let result = read_growable(&mut items, len, input, cx, keep);
        *self = items.into_boxed_slice();
        result
    }
}

impl<T: Typed> Typed for Box<[T]> {
    const CATEGORY: Category = Category::Array;

    fn type_path() -> Cow<'static, str> {
        Cow::Owned(format!("{}[]", T::type_path()))
    }

    #[inline]
    fn construct(_header: &str, _cx: &Archivist) -> Result<Self, SchemaError> {
        Ok(Box::default())
    }

    fn copy(&self, mode: CopyMode, cx: &Archivist) -> Result<Self, SchemaError> {
        self.iter().map(|item| item.copy(mode, cx)).collect()
    }

    #[inline]
    fn register_type(types: &mut TypeRegistry) -> Result<(), SchemaError> {
        T::register_type(types)
    }
}

// -----------------------------------------------------------------------------
// Box<dyn Reflect>

/// Holds any registered object. The header of each entry names the concrete
/// type to construct; `null` is rejected.
impl Value for Box<dyn Reflect> {
    fn value_type_path(&self) -> Cow<'static, str> {
        (**self).value_type_path()
    }

    #[inline]
    fn category(&self) -> Category {
        Category::Object
    }

    fn value_ref(&self) -> ValueRef<'_> {
        (**self).value_ref()
    }

    #[inline]
    fn value_mut(&mut self) -> ValueMut<'_> {
        ValueMut::Slot(self)
    }

    fn is_dirty(&self) -> bool {
        (**self).is_dirty()
    }

    fn is_locally_dirty(&self) -> bool {
        (**self).is_locally_dirty()
    }

    fn mark_clean(&mut self) {
        (**self).mark_clean();
    }
}

impl Slot for Box<dyn Reflect> {
    fn content(&self) -> Option<&dyn Value> {
        Some(&**self)
    }

    fn content_mut(&mut self) -> Option<&mut dyn Value> {
        Some(&mut **self)
    }

    #[inline]
    fn clear(&mut self) -> bool {
        false
    }

    fn replace_with(
        &mut self,
        header: &str,
        cx: &Archivist,
        read: &mut dyn FnMut(&mut dyn Value) -> Result<(), ArchiveError>,
    ) -> Result<(), ArchiveError> {
        let mut fresh = cx.construct_reflect(header)?;
        read(&mut *fresh)?;
        *self = fresh;
        Ok(())
    }
}

impl Typed for Box<dyn Reflect> {
    const CATEGORY: Category = Category::Object;

    #[inline]
    fn type_path() -> Cow<'static, str> {
        Cow::Borrowed("Reflect")
    }

    #[inline]
    fn construct(header: &str, cx: &Archivist) -> Result<Self, SchemaError> {
        cx.construct_reflect(header)
    }

    #[inline]
    fn copy(&self, mode: CopyMode, cx: &Archivist) -> Result<Self, SchemaError> {
        (**self).reflect_copy(mode, cx)
    }
}
