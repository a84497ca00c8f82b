use std::any::Any;
use std::borrow::Cow;
use std::hash::Hash;

use arbor_utils::hash::HashMap;

use crate::Archivist;
use crate::archiver::read_map;
use crate::error::{ArchiveError, SchemaError};
use crate::registry::TypeRegistry;
use crate::text::TextReader;
use crate::value::{Category, CopyMode, Map, Typed, Value, ValueMut, ValueRef};

/// A hash map that records changes.
///
/// Inserts, removals and mutable lookups mark the map dirty.
#[derive(Clone)]
pub struct DirtyMap<K, V> {
    map: HashMap<K, V>,
    dirty: bool,
}

impl<K, V> DirtyMap<K, V> {
    pub fn new() -> Self {
        Self {
            map: HashMap::default(),
            dirty: false,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.map.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    pub fn iter(&self) -> impl ExactSizeIterator<Item = (&K, &V)> {
        self.map.iter()
    }

    pub fn keys(&self) -> impl ExactSizeIterator<Item = &K> {
        self.map.keys()
    }

    pub fn values(&self) -> impl ExactSizeIterator<Item = &V> {
        self.map.values()
    }

    /// Mutable access to every value, which marks the map dirty.
    pub fn values_mut(&mut self) -> impl ExactSizeIterator<Item = &mut V> {
        self.dirty = true;
        self.map.values_mut()
    }

    pub fn clear(&mut self) {
        self.dirty = true;
        self.map.clear();
    }

    pub fn retain(&mut self, f: impl FnMut(&K, &mut V) -> bool) {
        self.dirty = true;
        self.map.retain(f);
    }

    #[inline]
    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    #[inline]
    pub fn into_inner(self) -> HashMap<K, V> {
        self.map
    }
}

impl<K: Eq + Hash, V> DirtyMap<K, V> {
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        self.dirty = true;
        self.map.insert(key, value)
    }

    pub fn remove(&mut self, key: &K) -> Option<V> {
        self.dirty = true;
        self.map.remove(key)
    }

    #[inline]
    pub fn get(&self, key: &K) -> Option<&V> {
        self.map.get(key)
    }

    /// Mutable access to one value, which marks the map dirty.
    pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        self.dirty = true;
        self.map.get_mut(key)
    }

    #[inline]
    pub fn contains_key(&self, key: &K) -> bool {
        self.map.contains_key(key)
    }
}

impl<K, V> Default for DirtyMap<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Eq + Hash, V: PartialEq> PartialEq for DirtyMap<K, V> {
    fn eq(&self, other: &Self) -> bool {
        self.map == other.map
    }
}

/// The map starts clean.
impl<K: Eq + Hash, V> FromIterator<(K, V)> for DirtyMap<K, V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            map: HashMap::from_iter(iter),
            dirty: false,
        }
    }
}

impl<K: core::fmt::Debug, V: core::fmt::Debug> core::fmt::Debug for DirtyMap<K, V> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("DirtyMap")
            .field("map", &self.map)
            .field("dirty", &self.dirty)
            .finish()
    }
}

// -----------------------------------------------------------------------------
// Value

impl<K: Typed + Eq + Hash, V: Typed> Value for DirtyMap<K, V> {
    #[inline]
    fn value_type_path(&self) -> Cow<'static, str> {
        Cow::Borrowed("DirtyMap")
    }

    #[inline]
    fn category(&self) -> Category {
        Category::Map
    }

    #[inline]
    fn value_ref(&self) -> ValueRef<'_> {
        ValueRef::Map(self)
    }

    #[inline]
    fn value_mut(&mut self) -> ValueMut<'_> {
        ValueMut::Map(self)
    }

    fn is_dirty(&self) -> bool {
        self.dirty || self.map.values().any(|value| value.is_dirty())
    }

    #[inline]
    fn is_locally_dirty(&self) -> bool {
        self.dirty
    }

    fn mark_clean(&mut self) {
        self.dirty = false;
        self.map.values_mut().for_each(|value| value.mark_clean());
    }
}

impl<K: Typed + Eq + Hash, V: Typed> Map for DirtyMap<K, V> {
    #[inline]
    fn container_name(&self) -> &'static str {
        "DirtyMap"
    }

    #[inline]
    fn key_category(&self) -> Category {
        K::CATEGORY
    }

    #[inline]
    fn value_category(&self) -> Category {
        V::CATEGORY
    }

    #[inline]
    fn len(&self) -> usize {
        self.map.len()
    }

    #[inline]
    fn is_ordered(&self) -> bool {
        false
    }

    fn entries(&self) -> Vec<(&dyn Value, &dyn Value)> {
        self.map
            .iter()
            .map(|(key, value)| (key as &dyn Value, value as &dyn Value))
            .collect()
    }

    fn get(&self, key: &dyn Value) -> Option<&dyn Value> {
        let key: &dyn Any = key;
        let key = key.downcast_ref::<K>()?;
        self.map.get(key).map(|value| value as &dyn Value)
    }

    fn read_entries(
        &mut self,
        input: &mut TextReader<'_>,
        cx: &Archivist,
        keep: bool,
    ) -> Result<(), ArchiveError> {
        self.dirty = true;
        let mut previous = core::mem::take(&mut self.map);
        if !keep {
            previous.clear();
        }
        let map = &mut self.map;
        let result = read_map(
            input,
            cx,
            keep,
            &mut |key| previous.remove(key),
            &mut |key, value| {
                map.insert(key, value);
            },
        );
        if result.is_err() {
            for (key, value) in previous {
                self.map.entry(key).or_insert(value);
            }
        }
        result
    }
}

impl<K: Typed + Eq + Hash, V: Typed> Typed for DirtyMap<K, V> {
    const CATEGORY: Category = Category::Map;

    #[inline]
    fn type_path() -> Cow<'static, str> {
        Cow::Borrowed("DirtyMap")
    }

    #[inline]
    fn construct(_header: &str, _cx: &Archivist) -> Result<Self, SchemaError> {
        Ok(Self::new())
    }

    fn copy(&self, mode: CopyMode, cx: &Archivist) -> Result<Self, SchemaError> {
        let map = self
            .map
            .iter()
            .map(|(key, value)| {
                Ok::<_, SchemaError>((key.copy(mode, cx)?, value.copy(mode, cx)?))
            })
            .collect::<Result<_, _>>()?;
        Ok(Self {
            map,
            dirty: self.dirty,
        })
    }

    fn register_type(types: &mut TypeRegistry) -> Result<(), SchemaError> {
        K::register_type(types)?;
        V::register_type(types)
    }
}

#[cfg(test)]
mod tests {
    use super::DirtyMap;
    use crate::value::Value;

    #[test]
    fn mutations_mark_dirty() {
        let mut scores: DirtyMap<String, u32> = [("a".to_owned(), 1)].into_iter().collect();
        assert!(!scores.is_dirty());
        assert_eq!(scores.get(&"a".to_owned()), Some(&1));
        assert!(!scores.is_dirty());

        if let Some(score) = scores.get_mut(&"a".to_owned()) {
            *score += 1;
        }
        assert!(scores.is_locally_dirty());
        scores.mark_clean();

        scores.remove(&"b".to_owned());
        assert!(scores.is_dirty());
    }
}
