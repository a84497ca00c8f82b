use core::marker::PhantomData;

use arbor_utils::hash::HashSet;

use super::{FieldDescriptor, Schema};
use crate::Describe;
use crate::archiver::Archiver;
use crate::error::SchemaError;
use crate::value::Typed;

/// Collects the field declarations of `T`, see [`Describe`].
///
/// # Examples
///
/// ```ignore
/// impl Describe for Piece {
///     fn describe(schema: &mut SchemaBuilder<Self>) {
///         schema.field("rank", |p| &p.rank, |p| &mut p.rank);
///         schema
///             .field("label", |p| &p.label, |p| &mut p.label)
///             .with_aliases(&["name"]);
///     }
/// }
/// ```
pub struct SchemaBuilder<T> {
    fields: Vec<FieldDescriptor>,
    _marker: PhantomData<fn(&T)>,
}

impl<T: Describe> SchemaBuilder<T> {
    pub fn new() -> Self {
        Self {
            fields: Vec::new(),
            _marker: PhantomData,
        }
    }

    /// Declares a field archived by the default archiver of its category.
    pub fn field<F: Typed>(
        &mut self,
        name: &'static str,
        get: fn(&T) -> &F,
        get_mut: fn(&mut T) -> &mut F,
    ) -> &mut FieldDescriptor {
        let index = self.fields.len();
        self.fields.push(FieldDescriptor::new(name, get, get_mut));
        &mut self.fields[index]
    }

    /// Declares a field archived by `archiver`.
    ///
    /// The pairing is validated by [`build`](Self::build).
    pub fn field_with<F: Typed>(
        &mut self,
        archiver: Archiver,
        name: &'static str,
        get: fn(&T) -> &F,
        get_mut: fn(&mut T) -> &mut F,
    ) -> &mut FieldDescriptor {
        self.field(name, get, get_mut).with_archiver(archiver)
    }

    /// Inlines every field of the embedded object `B`.
    pub fn extends<B: Describe>(&mut self, get: fn(&T) -> &B, get_mut: fn(&mut T) -> &mut B) {
        let mut base = SchemaBuilder::<B>::new();
        B::describe(&mut base);
        self.fields.extend(
            base.fields
                .into_iter()
                .map(|field| field.inherit(get, get_mut)),
        );
    }

    /// Validates the declarations and sorts them by name.
    pub fn build(mut self) -> Result<Schema, SchemaError> {
        let owner = T::type_path();
        let mut names: HashSet<&'static str> = HashSet::default();
        for field in &self.fields {
            field.validate(&owner)?;
            let aliases = field.aliases().iter().copied();
            for name in core::iter::once(field.name()).chain(aliases) {
                if !names.insert(name) {
                    return Err(SchemaError::DuplicateField { owner, field: name });
                }
            }
        }
        self.fields.sort_by_key(FieldDescriptor::name);
        Ok(Schema::new(owner, self.fields))
    }
}

impl<T: Describe> Default for SchemaBuilder<T> {
    fn default() -> Self {
        Self::new()
    }
}
