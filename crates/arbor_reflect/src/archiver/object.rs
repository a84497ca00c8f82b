use super::{Entry, expect_block};
use crate::error::{ArchiveError, FormatError};
use crate::text::{TextReader, TextWriter};
use crate::{Archivist, Reflect};

pub(super) fn write(
    object: &dyn Reflect,
    out: &mut TextWriter<'_>,
    cx: &Archivist,
) -> Result<(), ArchiveError> {
    let type_path = object.value_type_path();
    out.print(cx.header_name(&type_path))?;
    out.push()?;
    object.write_fields(out, cx)?;
    out.pop()
}

pub(super) fn read(
    object: &mut dyn Reflect,
    entry: Entry<'_>,
    input: &mut TextReader<'_>,
    cx: &Archivist,
    keep: bool,
) -> Result<(), ArchiveError> {
    let type_path = object.value_type_path();
    if !cx.matches_type(entry.header, &type_path) {
        return Err(input.error(FormatError::TypeMismatch {
            expected: type_path,
            found: entry.header.to_owned(),
        }));
    }
    expect_block(entry, input)?;
    if !keep {
        object.reflect_reset();
    }
    object.read_fields(input, cx, keep)
}

/// Writes every schema field as `name=value`.
pub(crate) fn write_fields(
    object: &dyn Reflect,
    out: &mut TextWriter<'_>,
    cx: &Archivist,
) -> Result<(), ArchiveError> {
    let line = out.line();
    let schema = object.schema(cx).map_err(|e| ArchiveError::from(e).at_line(line))?;
    for field in schema.fields() {
        let value = field
            .get(object)
            .map_err(|e| ArchiveError::from(e).at_line(line))?;
        out.print(field.name())?;
        out.print("=")?;
        field.archiver().write(value, out, cx)?;
    }
    Ok(())
}

/// Reads `name=value` lines until the enclosing block closes.
///
/// Unknown fields fail in strict mode and are skipped with a warning
/// otherwise, including any block they open.
pub(crate) fn read_fields(
    object: &mut dyn Reflect,
    input: &mut TextReader<'_>,
    cx: &Archivist,
    keep: bool,
) -> Result<(), ArchiveError> {
    let schema = object.schema(cx).map_err(|e| input.locate(e))?;
    let depth = input.depth();

    while let Some(line) = input.read_line()? {
        let Some((name, token)) = line.text.split_once('=') else {
            return Err(input.error(FormatError::MalformedField(line.text.clone())));
        };
        let name = name.trim_end();
        let entry = Entry {
            header: token.trim_start(),
            opens: line.opens,
        };

        match schema.field(name) {
            Some(field) => {
                let value = field.get_mut(object).map_err(|e| input.locate(e))?;
                let keep = keep && !field.is_immutable();
                field.archiver().read(value, entry, input, cx, keep)?;
            }
            None if cx.config().strict_unknown_fields => {
                return Err(input.error(FormatError::UnknownField {
                    field: name.to_owned(),
                    owner: schema.type_path().clone(),
                    known: schema.field_names().collect::<Vec<_>>().join(", "),
                }));
            }
            None => {
                log::warn!(
                    "line {}: skipping unknown field `{name}` of `{}`",
                    input.line(),
                    schema.type_path(),
                );
                if line.opens {
                    input.skip_to_depth(depth)?;
                }
            }
        }
    }
    Ok(())
}
