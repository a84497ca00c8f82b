use std::any::Any;
use std::borrow::Cow;
use std::hash::{BuildHasher, Hash};

use arbor_utils::hash::hashbrown;

use crate::Archivist;
use crate::archiver::read_map;
use crate::error::{ArchiveError, SchemaError};
use crate::registry::TypeRegistry;
use crate::text::TextReader;
use crate::value::{Category, CopyMode, Map, Typed, Value, ValueMut, ValueRef};

/// Hash maps are unordered, the map archiver sorts leaf keys when writing.
macro_rules! impl_hash_map {
    ($($map:ident)::+) => {
        impl<K, V, S> Value for $($map)::+<K, V, S>
        where
            K: Typed + Eq + Hash,
            V: Typed,
            S: BuildHasher + Default + Send + Sync + 'static,
        {
            #[inline]
            fn value_type_path(&self) -> Cow<'static, str> {
                Cow::Borrowed("HashMap")
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

        impl<K, V, S> Map for $($map)::+<K, V, S>
        where
            K: Typed + Eq + Hash,
            V: Typed,
            S: BuildHasher + Default + Send + Sync + 'static,
        {
            #[inline]
            fn container_name(&self) -> &'static str {
                "HashMap"
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
                $($map)::+::len(self)
            }

            #[inline]
            fn is_ordered(&self) -> bool {
                false
            }

            fn entries(&self) -> Vec<(&dyn Value, &dyn Value)> {
                self.iter()
                    .map(|(key, value)| (key as &dyn Value, value as &dyn Value))
                    .collect()
            }

            fn get(&self, key: &dyn Value) -> Option<&dyn Value> {
                let key: &dyn Any = key;
                let key = key.downcast_ref::<K>()?;
                $($map)::+::get(self, key).map(|value| value as &dyn Value)
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

        impl<K, V, S> Typed for $($map)::+<K, V, S>
        where
            K: Typed + Eq + Hash,
            V: Typed,
            S: BuildHasher + Default + Send + Sync + 'static,
        {
            const CATEGORY: Category = Category::Map;

            #[inline]
            fn type_path() -> Cow<'static, str> {
                Cow::Borrowed("HashMap")
            }

            #[inline]
            fn construct(_header: &str, _cx: &Archivist) -> Result<Self, SchemaError> {
                Ok(Self::default())
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
    };
}

impl_hash_map!(std::collections::HashMap);
impl_hash_map!(hashbrown::HashMap);

#[cfg(test)]
mod tests {
    use arbor_utils::hash::HashMap;

    use crate::value::{Map, Value};

    #[test]
    fn lookup_by_value() {
        let mut map: HashMap<String, i32> = HashMap::default();
        map.insert("a".into(), 1);

        let key: &dyn Value = &String::from("a");
        let found = Map::get(&map, key).unwrap();
        assert!(matches!(found.value_ref(), crate::value::ValueRef::Scalar(_)));
        assert!(Map::get(&map, &1_i32).is_none());
        assert_eq!(Map::len(&map), 1);
    }
}
