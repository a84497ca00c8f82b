use crate::archiver::Archiver;
use crate::error::ArchiveError;
use crate::text::TextWriter;
use crate::value::{Value, ValueRef};
use crate::{Archivist, Reflect};

/// Writes the fields of `object` that changed since the last clean.
///
/// A locally dirty object is written whole. Otherwise only dirty fields are
/// written; objects among them that are not locally dirty are descended into
/// the same way, so the output can be merged onto an older copy.
pub(crate) fn write_dirty_fields(
    object: &dyn Reflect,
    out: &mut TextWriter<'_>,
    cx: &Archivist,
) -> Result<(), ArchiveError> {
    if object.is_locally_dirty() {
        return object.write_fields(out, cx);
    }

    // Wrappers expose the object the schema belongs to.
    let target = match object.value_ref() {
        ValueRef::Object(inner) => inner,
        _ => object,
    };

    let line = out.line();
    let schema = target
        .schema(cx)
        .map_err(|e| ArchiveError::from(e).at_line(line))?;
    for field in schema.fields() {
        let value = field
            .get(target)
            .map_err(|e| ArchiveError::from(e).at_line(out.line()))?;
        if !value.is_dirty() {
            continue;
        }
        out.print(field.name())?;
        out.print("=")?;
        write_dirty_value(field.archiver(), value, out, cx)?;
    }
    Ok(())
}

fn write_dirty_value(
    archiver: Archiver,
    value: &dyn Value,
    out: &mut TextWriter<'_>,
    cx: &Archivist,
) -> Result<(), ArchiveError> {
    if !value.is_locally_dirty()
        && let ValueRef::Object(object) = value.value_ref()
    {
        out.print(cx.header_name(&object.value_type_path()))?;
        out.push()?;
        write_dirty_fields(object, out, cx)?;
        return out.pop();
    }
    archiver.write(value, out, cx)
}
