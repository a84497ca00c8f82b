use std::sync::Arc;

use crate::Archivist;
use crate::archiver::object;
use crate::error::{ArchiveError, SchemaError};
use crate::schema::{Schema, SchemaBuilder};
use crate::text::{TextReader, TextWriter};
use crate::value::{CopyMode, Typed, Value};

/// An object archived field by field.
///
/// Usually implemented through `#[derive(Reflect)]`. The default
/// [`write_fields`](Reflect::write_fields) and
/// [`read_fields`](Reflect::read_fields) walk the [`Schema`]; types with a
/// hand-written text layout override both.
///
/// The trait is object safe, `Box<dyn Reflect>` holds any registered object
/// and is resolved by its header name when read.
pub trait Reflect: Value {
    fn as_reflect(&self) -> &dyn Reflect;

    fn as_reflect_mut(&mut self) -> &mut dyn Reflect;

    /// The field schema of the concrete type.
    fn schema(&self, cx: &Archivist) -> Result<Arc<Schema>, SchemaError>;

    /// Restores the freshly constructed state.
    fn reflect_reset(&mut self);

    /// Copies the object behind a new box.
    fn reflect_copy(&self, mode: CopyMode, cx: &Archivist) -> Result<Box<dyn Reflect>, SchemaError>;

    /// Writes the body of the object, between its header and closing brace.
    fn write_fields(&self, out: &mut TextWriter<'_>, cx: &Archivist) -> Result<(), ArchiveError> {
        object::write_fields(self.as_reflect(), out, cx)
    }

    /// Reads the body of the object up to its closing brace.
    ///
    /// With `keep`, fields missing from the input keep their current value
    /// and nested values are updated in place.
    fn read_fields(
        &mut self,
        input: &mut TextReader<'_>,
        cx: &Archivist,
        keep: bool,
    ) -> Result<(), ArchiveError> {
        object::read_fields(self.as_reflect_mut(), input, cx, keep)
    }
}

/// Prints the type path, e.g. `Reflect(game::Piece)`.
impl core::fmt::Debug for dyn Reflect {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_tuple("Reflect").field(&self.value_type_path()).finish()
    }
}

/// Declares the persistent fields of a [`Reflect`] type.
pub trait Describe: Reflect + Typed {
    fn describe(schema: &mut SchemaBuilder<Self>);
}
