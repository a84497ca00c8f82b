use std::any::Any;
use std::borrow::Cow;
use std::collections::BTreeMap;

use crate::Archivist;
use crate::archiver::read_map;
use crate::error::{ArchiveError, SchemaError};
use crate::registry::TypeRegistry;
use crate::text::TextReader;
use crate::value::{Category, CopyMode, Map, Typed, Value, ValueMut, ValueRef};

impl<K: Typed + Ord, V: Typed> Value for BTreeMap<K, V> {
    #[inline]
    fn value_type_path(&self) -> Cow<'static, str> {
        Cow::Borrowed("BTreeMap")
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
}

impl<K: Typed + Ord, V: Typed> Map for BTreeMap<K, V> {
    #[inline]
    fn container_name(&self) -> &'static str {
        "BTreeMap"
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
        BTreeMap::len(self)
    }

    #[inline]
    fn is_ordered(&self) -> bool {
        true
    }

    fn entries(&self) -> Vec<(&dyn Value, &dyn Value)> {
        self.iter()
            .map(|(key, value)| (key as &dyn Value, value as &dyn Value))
            .collect()
    }

    fn get(&self, key: &dyn Value) -> Option<&dyn Value> {
        let key: &dyn Any = key;
        let key = key.downcast_ref::<K>()?;
        BTreeMap::get(self, key).map(|value| value as &dyn Value)
    }

    fn read_entries(
        &mut self,
        input: &mut TextReader<'_>,
        cx: &Archivist,
        keep: bool,
    ) -> Result<(), ArchiveError> {
        let mut previous = core::mem::take(self);
        if !keep {
            previous.clear();
        }
        let result = read_map(
            input,
            cx,
            keep,
            &mut |key| previous.remove(key),
            &mut |key, value| {
                self.insert(key, value);
            },
        );
        if result.is_err() {
            for (key, value) in previous {
                self.entry(key).or_insert(value);
            }
        }
        result
    }
}

impl<K: Typed + Ord, V: Typed> Typed for BTreeMap<K, V> {
    const CATEGORY: Category = Category::Map;

    #[inline]
    fn type_path() -> Cow<'static, str> {
        Cow::Borrowed("BTreeMap")
    }

    #[inline]
    fn construct(_header: &str, _cx: &Archivist) -> Result<Self, SchemaError> {
        Ok(BTreeMap::new())
    }

    fn copy(&self, mode: CopyMode, cx: &Archivist) -> Result<Self, SchemaError> {
        self.iter()
            .map(|(key, value)| {
                Ok::<_, SchemaError>((key.copy(mode, cx)?, value.copy(mode, cx)?))
            })
            .collect()
    }

    fn register_type(types: &mut TypeRegistry) -> Result<(), SchemaError> {
        K::register_type(types)?;
        V::register_type(types)
    }
}
