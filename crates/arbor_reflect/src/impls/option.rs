use std::borrow::Cow;

use crate::Archivist;
use crate::error::{ArchiveError, SchemaError};
use crate::registry::TypeRegistry;
use crate::text::NULL;
use crate::value::{Category, CopyMode, Slot, Typed, Value, ValueMut, ValueRef};

/// `None` is archived as `null`; `Some(v)` exactly as `v`.
impl<T: Typed> Value for Option<T> {
    #[inline]
    fn value_type_path(&self) -> Cow<'static, str> {
        T::type_path()
    }

    #[inline]
    fn category(&self) -> Category {
        T::CATEGORY
    }

    fn value_ref(&self) -> ValueRef<'_> {
        match self {
            Some(value) => value.value_ref(),
            None => ValueRef::Null,
        }
    }

    #[inline]
    fn value_mut(&mut self) -> ValueMut<'_> {
        ValueMut::Slot(self)
    }

    fn is_dirty(&self) -> bool {
        self.as_ref().is_some_and(|value| value.is_dirty())
    }

    fn is_locally_dirty(&self) -> bool {
        self.as_ref().is_some_and(|value| value.is_locally_dirty())
    }

    fn mark_clean(&mut self) {
        if let Some(value) = self {
            value.mark_clean();
        }
    }
}

impl<T: Typed> Slot for Option<T> {
    fn content(&self) -> Option<&dyn Value> {
        self.as_ref().map(|value| value as &dyn Value)
    }

    fn content_mut(&mut self) -> Option<&mut dyn Value> {
        self.as_mut().map(|value| value as &mut dyn Value)
    }

    #[inline]
    fn clear(&mut self) -> bool {
        *self = None;
        true
    }

    fn replace_with(
        &mut self,
        header: &str,
        cx: &Archivist,
        read: &mut dyn FnMut(&mut dyn Value) -> Result<(), ArchiveError>,
    ) -> Result<(), ArchiveError> {
        let mut fresh = T::construct(header, cx)?;
        read(&mut fresh)?;
        *self = Some(fresh);
        Ok(())
    }
}

impl<T: Typed> Typed for Option<T> {
    const CATEGORY: Category = T::CATEGORY;

    #[inline]
    fn type_path() -> Cow<'static, str> {
        T::type_path()
    }

    fn construct(header: &str, cx: &Archivist) -> Result<Self, SchemaError> {
        if header == NULL {
            Ok(None)
        } else {
            T::construct(header, cx).map(Some)
        }
    }

    fn copy(&self, mode: CopyMode, cx: &Archivist) -> Result<Self, SchemaError> {
        self.as_ref().map(|value| value.copy(mode, cx)).transpose()
    }

    #[inline]
    fn register_type(types: &mut TypeRegistry) -> Result<(), SchemaError> {
        T::register_type(types)
    }
}

#[cfg(test)]
mod tests {
    use crate::Archivist;
    use crate::value::{Slot, Typed, Value};

    #[test]
    fn null_header() {
        let cx = Archivist::new();
        assert_eq!(Option::<i32>::construct("null", &cx).unwrap(), None);
        assert_eq!(Option::<i32>::construct("7", &cx).unwrap(), Some(0));
    }

    #[test]
    fn replace_content() {
        let cx = Archivist::new();
        let mut slot = Some(String::from("old"));
        assert!(slot.content_mut().is_some());
        slot.replace_with("\"new\"", &cx, &mut |_| Ok(())).unwrap();
        assert_eq!(slot.as_deref(), Some(""));
        assert!(slot.clear());
        assert!(slot.value_ref().is_null());
    }
}
