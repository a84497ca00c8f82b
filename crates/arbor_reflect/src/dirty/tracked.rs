use std::borrow::Cow;
use std::fmt;
use std::ops::{Deref, DerefMut};
use std::sync::Arc;

use crate::error::{ArchiveError, SchemaError};
use crate::registry::TypeRegistry;
use crate::schema::Schema;
use crate::text::{TextReader, TextWriter};
use crate::value::{Category, CopyMode, Typed, Value, ValueMut, ValueRef};
use crate::{Archivist, Reflect};

/// A value with a dirty flag.
///
/// Archived exactly like `T`. The flag is set by [`DerefMut`], by
/// [`set`](Self::set) and by any read into the value. Shared access through
/// [`Deref`] leaves it alone.
#[derive(Default, Clone, PartialEq)]
pub struct Tracked<T> {
    value: T,
    dirty: bool,
}

impl<T> Tracked<T> {
    /// Wraps a clean value.
    #[inline]
    pub const fn new(value: T) -> Self {
        Self {
            value,
            dirty: false,
        }
    }

    /// Wraps a value already marked dirty.
    #[inline]
    pub const fn new_dirty(value: T) -> Self {
        Self { value, dirty: true }
    }

    #[inline]
    pub fn set(&mut self, value: T) {
        self.value = value;
        self.dirty = true;
    }

    #[inline]
    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    #[inline]
    pub fn into_inner(self) -> T {
        self.value
    }
}

impl<T> Deref for Tracked<T> {
    type Target = T;

    #[inline]
    fn deref(&self) -> &T {
        &self.value
    }
}

impl<T> DerefMut for Tracked<T> {
    #[inline]
    fn deref_mut(&mut self) -> &mut T {
        self.dirty = true;
        &mut self.value
    }
}

impl<T: fmt::Debug> fmt::Debug for Tracked<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tracked")
            .field("value", &self.value)
            .field("dirty", &self.dirty)
            .finish()
    }
}

// -----------------------------------------------------------------------------
// Value

impl<T: Typed> Value for Tracked<T> {
    #[inline]
    fn value_type_path(&self) -> Cow<'static, str> {
        self.value.value_type_path()
    }

    #[inline]
    fn category(&self) -> Category {
        T::CATEGORY
    }

    #[inline]
    fn value_ref(&self) -> ValueRef<'_> {
        self.value.value_ref()
    }

    #[inline]
    fn value_mut(&mut self) -> ValueMut<'_> {
        self.dirty = true;
        self.value.value_mut()
    }

    #[inline]
    fn is_dirty(&self) -> bool {
        self.dirty || self.value.is_dirty()
    }

    #[inline]
    fn is_locally_dirty(&self) -> bool {
        self.dirty
    }

    fn mark_clean(&mut self) {
        self.dirty = false;
        self.value.mark_clean();
    }
}

impl<T: Typed> Typed for Tracked<T> {
    const CATEGORY: Category = T::CATEGORY;

    #[inline]
    fn type_path() -> Cow<'static, str> {
        T::type_path()
    }

    fn construct(header: &str, cx: &Archivist) -> Result<Self, SchemaError> {
        T::construct(header, cx).map(Self::new)
    }

    /// The copy keeps the dirty flag of the source.
    fn copy(&self, mode: CopyMode, cx: &Archivist) -> Result<Self, SchemaError> {
        Ok(Self {
            value: self.value.copy(mode, cx)?,
            dirty: self.dirty,
        })
    }

    #[inline]
    fn register_type(types: &mut TypeRegistry) -> Result<(), SchemaError> {
        T::register_type(types)
    }
}

// -----------------------------------------------------------------------------
// Reflect

impl<T: Reflect + Typed> Reflect for Tracked<T> {
    #[inline]
    fn as_reflect(&self) -> &dyn Reflect {
        self
    }

    #[inline]
    fn as_reflect_mut(&mut self) -> &mut dyn Reflect {
        self
    }

    fn schema(&self, cx: &Archivist) -> Result<Arc<Schema>, SchemaError> {
        self.value.schema(cx)
    }

    fn reflect_reset(&mut self) {
        self.dirty = true;
        self.value.reflect_reset();
    }

    fn reflect_copy(&self, mode: CopyMode, cx: &Archivist) -> Result<Box<dyn Reflect>, SchemaError> {
        Ok(Box::new(self.copy(mode, cx)?))
    }

    fn write_fields(&self, out: &mut TextWriter<'_>, cx: &Archivist) -> Result<(), ArchiveError> {
        self.value.write_fields(out, cx)
    }

    fn read_fields(
        &mut self,
        input: &mut TextReader<'_>,
        cx: &Archivist,
        keep: bool,
    ) -> Result<(), ArchiveError> {
        self.dirty = true;
        self.value.read_fields(input, cx, keep)
    }
}

#[cfg(test)]
mod tests {
    use super::Tracked;
    use crate::value::Value;

    #[test]
    fn shared_access_stays_clean() {
        let mut name = Tracked::new(String::from("rook"));
        assert_eq!(name.len(), 4);
        assert!(!name.is_dirty());

        name.push('s');
        assert!(name.is_locally_dirty());
        name.mark_clean();

        let _ = name.value_mut();
        assert!(name.is_dirty());
    }

    #[test]
    fn nested_flag() {
        let mut outer = Tracked::new(Some(Tracked::new(1_i32)));
        if let Some(inner) = outer.value.as_mut() {
            inner.set(2);
        }
        assert!(outer.is_dirty());
        assert!(!outer.is_locally_dirty());

        outer.mark_clean();
        assert!(!outer.is_dirty());
    }
}
