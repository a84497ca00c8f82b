use std::borrow::Cow;
use std::sync::Arc;

use crate::Archivist;
use crate::error::{ArchiveError, SchemaError};
use crate::registry::TypeRegistry;
use crate::value::{Category, CopyMode, Slot, Typed, Value, ValueMut, ValueRef};

/// Shared content is archived like `T`.
///
/// Reading writes in place only while the `Arc` is unique, otherwise a fresh
/// `Arc` replaces it. A shallow copy shares the content.
impl<T: Typed> Value for Arc<T> {
    #[inline]
    fn value_type_path(&self) -> Cow<'static, str> {
        T::type_path()
    }

    #[inline]
    fn category(&self) -> Category {
        T::CATEGORY
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
        if let Some(value) = Arc::get_mut(self) {
            value.mark_clean();
        }
    }
}

impl<T: Typed> Slot for Arc<T> {
    fn content(&self) -> Option<&dyn Value> {
        Some(&**self)
    }

    fn content_mut(&mut self) -> Option<&mut dyn Value> {
        Arc::get_mut(self).map(|value| value as &mut dyn Value)
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
        let mut fresh = T::construct(header, cx)?;
        read(&mut fresh)?;
        *self = Arc::new(fresh);
        Ok(())
    }
}

impl<T: Typed> Typed for Arc<T> {
    const CATEGORY: Category = T::CATEGORY;

    #[inline]
    fn type_path() -> Cow<'static, str> {
        T::type_path()
    }

    fn construct(header: &str, cx: &Archivist) -> Result<Self, SchemaError> {
        T::construct(header, cx).map(Arc::new)
    }

    fn copy(&self, mode: CopyMode, cx: &Archivist) -> Result<Self, SchemaError> {
        match mode {
            CopyMode::Shallow => Ok(Arc::clone(self)),
            CopyMode::Deep => (**self).copy(mode, cx).map(Arc::new),
        }
    }

    #[inline]
    fn register_type(types: &mut TypeRegistry) -> Result<(), SchemaError> {
        T::register_type(types)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use crate::Archivist;
    use crate::value::{CopyMode, Slot, Typed};

    #[test]
    fn shared_content_is_read_only() {
        let mut unique = Arc::new(5_i32);
        assert!(unique.content_mut().is_some());

        let other = Arc::clone(&unique);
        assert!(unique.content_mut().is_none());
        drop(other);
        assert!(unique.content_mut().is_some());
    }

    #[test]
    fn copy_modes() {
        let cx = Archivist::new();
        let shared = Arc::new(String::from("x"));
        let shallow = shared.copy(CopyMode::Shallow, &cx).unwrap();
        assert!(Arc::ptr_eq(&shared, &shallow));
        let deep = shared.copy(CopyMode::Deep, &cx).unwrap();
        assert!(!Arc::ptr_eq(&shared, &deep));
        assert_eq!(deep, shared);
    }
}
