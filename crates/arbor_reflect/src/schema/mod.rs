//! Field schemas of reflected objects.
//!
//! A [`Schema`] lists the persistent fields of one object type, sorted by
//! name. Schemas are declared through [`Describe`](crate::Describe), usually
//! generated by `#[derive(Reflect)]`, validated once by [`SchemaBuilder`] and
//! cached in the [`SchemaRegistry`].

// -----------------------------------------------------------------------------
// Modules

mod access;
mod builder;
mod field;
mod registry;

// -----------------------------------------------------------------------------
// Exports

pub use access::FieldAccess;
pub use builder::SchemaBuilder;
pub use field::{FieldDescriptor, FieldTags};
pub use registry::SchemaRegistry;

use std::borrow::Cow;

use arbor_utils::hash::HashMap;

// -----------------------------------------------------------------------------
// Schema

/// The persistent fields of an object type.
pub struct Schema {
    type_path: Cow<'static, str>,
    fields: Box<[FieldDescriptor]>,
    // name and alias -> index
    index: HashMap<&'static str, usize>,
}

impl Schema {
    pub(crate) fn new(type_path: Cow<'static, str>, fields: Vec<FieldDescriptor>) -> Self {
        let mut index = HashMap::default();
        for (i, field) in fields.iter().enumerate() {
            index.insert(field.name(), i);
            for alias in field.aliases() {
                index.insert(*alias, i);
            }
        }
        Self {
            type_path,
            fields: fields.into_boxed_slice(),
            index,
        }
    }

    #[inline]
    pub fn type_path(&self) -> &Cow<'static, str> {
        &self.type_path
    }

    /// Fields in name order.
    #[inline]
    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    /// Looks up a field by name or alias.
    pub fn field(&self, name: &str) -> Option<&FieldDescriptor> {
        self.index.get(name).map(|&i| &self.fields[i])
    }

    pub fn field_names(&self) -> impl ExactSizeIterator<Item = &'static str> + '_ {
        self.fields.iter().map(FieldDescriptor::name)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl core::fmt::Debug for Schema {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Schema")
            .field("type_path", &self.type_path)
            .field("fields", &self.fields)
            .finish()
    }
}
