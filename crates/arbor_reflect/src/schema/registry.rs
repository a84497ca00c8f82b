use std::any::TypeId;
use std::sync::{Arc, PoisonError, RwLock};

use arbor_utils::TypeIdMap;

use super::{Schema, SchemaBuilder};
use crate::Describe;
use crate::error::SchemaError;

/// Lazily built, cached schemas keyed by type.
///
/// A schema is built the first time its type is archived and shared from then
/// on. Concurrent first uses may both build it, the first insert wins.
#[derive(Default)]
pub struct SchemaRegistry {
    schemas: RwLock<TypeIdMap<Arc<Schema>>>,
}

impl SchemaRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cached schema of a type, without building it.
    pub fn get(&self, type_id: TypeId) -> Option<Arc<Schema>> {
        let schemas = self.schemas.read().unwrap_or_else(PoisonError::into_inner);
        schemas.get(&type_id).cloned()
    }

    /// Returns the schema of `T`, building it on first use.
    pub fn get_or_build<T: Describe>(&self) -> Result<Arc<Schema>, SchemaError> {
        if let Some(schema) = self.get(TypeId::of::<T>()) {
            return Ok(schema);
        }

        let mut builder = SchemaBuilder::<T>::new();
        T::describe(&mut builder);
        let schema = Arc::new(builder.build()?);
        log::debug!(
            "built schema of `{}` with {} fields",
            schema.type_path(),
            schema.len()
        );

        let mut schemas = self.schemas.write().unwrap_or_else(PoisonError::into_inner);
        Ok(Arc::clone(
            schemas.get_or_insert(TypeId::of::<T>(), || schema),
        ))
    }

    /// Number of cached schemas.
    pub fn len(&self) -> usize {
        self.schemas
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}
