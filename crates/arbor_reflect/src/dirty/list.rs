use std::borrow::Cow;
use std::ops::Deref;

use crate::Archivist;
use crate::archiver::read_growable;
use crate::error::{ArchiveError, SchemaError};
use crate::registry::TypeRegistry;
use crate::text::TextReader;
use crate::value::{Array, Category, CopyMode, List, Typed, Value, ValueMut, ValueRef};

/// A `Vec` that records structural changes.
///
/// Every mutating method marks the list dirty. Reads go through [`Deref`] to
/// a slice and never touch the flag.
///
/// ```
/// use arbor_reflect::dirty::DirtyList;
/// use arbor_reflect::value::Value;
///
/// let mut moves = DirtyList::from(vec![1, 2]);
/// assert!(!moves.is_dirty());
/// assert_eq!(moves.iter().sum::<i32>(), 3);
///
/// moves.push(3);
/// assert!(moves.is_dirty());
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct DirtyList<T> {
    items: Vec<T>,
    dirty: bool,
}

impl<T> DirtyList<T> {
    #[inline]
    pub const fn new() -> Self {
        Self {
            items: Vec::new(),
            dirty: false,
        }
    }

    pub fn push(&mut self, value: T) {
        self.dirty = true;
        self.items.push(value);
    }

    pub fn pop(&mut self) -> Option<T> {
        self.dirty = true;
        self.items.pop()
    }

    /// # Panics
    ///
    /// Panics if `index > len`.
    pub fn insert(&mut self, index: usize, value: T) {
        self.dirty = true;
        self.items.insert(index, value);
    }

    /// # Panics
    ///
    /// Panics if `index` is out of bounds.
    pub fn remove(&mut self, index: usize) -> T {
        self.dirty = true;
        self.items.remove(index)
    }

    /// Replaces the element at `index`, returning the previous one.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of bounds.
    pub fn set(&mut self, index: usize, value: T) -> T {
        self.dirty = true;
        core::mem::replace(&mut self.items[index], value)
    }

    /// Mutable access to one element, which marks the list dirty.
    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        self.dirty = true;
        self.items.get_mut(index)
    }

    pub fn iter_mut(&mut self) -> core::slice::IterMut<'_, T> {
        self.dirty = true;
        self.items.iter_mut()
    }

    pub fn clear(&mut self) {
        self.dirty = true;
        self.items.clear();
    }

    pub fn truncate(&mut self, len: usize) {
        self.dirty = true;
        self.items.truncate(len);
    }

    pub fn retain(&mut self, f: impl FnMut(&T) -> bool) {
        self.dirty = true;
        self.items.retain(f);
    }

    #[inline]
    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    #[inline]
    pub fn into_inner(self) -> Vec<T> {
        self.items
    }
}

impl<T> Default for DirtyList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Deref for DirtyList<T> {
    type Target = [T];

    #[inline]
    fn deref(&self) -> &[T] {
        &self.items
    }
}

/// The list starts clean.
impl<T> From<Vec<T>> for DirtyList<T> {
    fn from(items: Vec<T>) -> Self {
        Self {
            items,
            dirty: false,
        }
    }
}

impl<T> Extend<T> for DirtyList<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        self.dirty = true;
        self.items.extend(iter);
    }
}

impl<T> FromIterator<T> for DirtyList<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::from(Vec::from_iter(iter))
    }
}

impl<'a, T> IntoIterator for &'a DirtyList<T> {
    type Item = &'a T;
    type IntoIter = core::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl<T: core::fmt::Debug> core::fmt::Debug for DirtyList<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("DirtyList")
            .field("items", &self.items)
            .field("dirty", &self.dirty)
            .finish()
    }
}

// -----------------------------------------------------------------------------
// Value

impl<T: Typed> Value for DirtyList<T> {
    #[inline]
    fn value_type_path(&self) -> Cow<'static, str> {
        Cow::Borrowed("DirtyList")
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

    fn is_dirty(&self) -> bool {
        self.dirty || self.items.iter().any(|item| item.is_dirty())
    }

    #[inline]
    fn is_locally_dirty(&self) -> bool {
        self.dirty
    }

    fn mark_clean(&mut self) {
        self.dirty = false;
        self.items.iter_mut().for_each(|item| item.mark_clean());
    }
}

impl<T: Typed> Array for DirtyList<T> {
    fn element_type_path(&self) -> Cow<'static, str> {
        T::type_path()
    }

    #[inline]
    fn element_category(&self) -> Category {
        T::CATEGORY
    }

    #[inline]
    fn len(&self) -> usize {
        self.items.len()
    }

    fn get(&self, index: usize) -> Option<&dyn Value> {
        self.items.get(index).map(|item| item as &dyn Value)
    }

    fn get_mut(&mut self, index: usize) -> Option<&mut dyn Value> {
        self.dirty = true;
        self.items.get_mut(index).map(|item| item as &mut dyn Value)
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
        self.dirty = true;
        read_growable(&mut self.items, len, input, cx, keep)
    }
}

impl<T: Typed> List for DirtyList<T> {
    #[inline]
    fn container_name(&self) -> &'static str {
        "DirtyList"
    }
}

impl<T: Typed> Typed for DirtyList<T> {
    const CATEGORY: Category = Category::List;

    #[inline]
    fn type_path() -> Cow<'static, str> {
        Cow::Borrowed("DirtyList")
    }

    #[inline]
    fn construct(_header: &str, _cx: &Archivist) -> Result<Self, SchemaError> {
        Ok(Self::new())
    }

    fn copy(&self, mode: CopyMode, cx: &Archivist) -> Result<Self, SchemaError> {
        Ok(Self {
            items: self
                .items
                .iter()
                .map(|item| item.copy(mode, cx))
                .collect::<Result<_, _>>()?,
            dirty: self.dirty,
        })
    }

    #[inline]
    fn register_type(types: &mut TypeRegistry) -> Result<(), SchemaError> {
        T::register_type(types)
    }
}

#[cfg(test)]
mod tests {
    use super::DirtyList;
    use crate::dirty::Tracked;
    use crate::value::Value;

    #[test]
    fn mutations_mark_dirty() {
        let mut list: DirtyList<i32> = (1..=3).collect();
        assert!(!list.is_dirty());
        assert_eq!(list.len(), 3);
        assert_eq!(list.first(), Some(&1));
        assert!(!list.is_dirty());

        assert_eq!(list.set(0, 9), 1);
        assert!(list.is_locally_dirty());
        list.mark_clean();

        list.retain(|v| *v > 2);
        assert!(list.is_dirty());
        assert_eq!(&*list, &[9, 3]);
    }

    #[test]
    fn element_changes_propagate() {
        let mut list = DirtyList::from(vec![Tracked::new(1_u8), Tracked::new(2_u8)]);
        if let Some(item) = list.items.last_mut() {
            item.set(5);
        }
        assert!(list.is_dirty());
        assert!(!list.is_locally_dirty());
        list.mark_clean();
        assert!(!list.is_dirty());
    }
}
