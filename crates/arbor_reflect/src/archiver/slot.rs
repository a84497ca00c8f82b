use super::{Archiver, Entry, parse_array_header};
use crate::Archivist;
use crate::error::{ArchiveError, FormatError};
use crate::text::TextReader;
use crate::value::{Slot, Value, ValueRef};

/// Reads an entry into a holder that may be empty.
///
/// `null` empties the holder. With `keep`, current content whose runtime type
/// still matches the header is updated in place; anything else is replaced by
/// a fresh instance built from the header.
pub(super) fn read(
    archiver: Archiver,
    holder: &mut dyn Slot,
    entry: Entry<'_>,
    input: &mut TextReader<'_>,
    cx: &Archivist,
    keep: bool,
) -> Result<(), ArchiveError> {
    if entry.is_null() {
        if entry.opens {
            return Err(input.error(FormatError::UnexpectedBlock(entry.header.to_owned())));
        }
        if holder.clear() {
            return Ok(());
        }
        return Err(input.error(FormatError::NullNotAllowed(holder.value_type_path())));
    }

    if keep
        && holder.content().is_some_and(|current| accepts(current, entry, cx))
        && let Some(current) = holder.content_mut()
    {
        return archiver.read(current, entry, input, cx, true);
    }

    // Fresh instances hold defaults only, merging equals rebuilding.
    let line = input.line();
    let mut read = |fresh: &mut dyn Value| archiver.read(fresh, entry, input, cx, true);
    holder
        .replace_with(entry.header, cx, &mut read)
        .map_err(|e| e.at_line(line))
}

/// Whether `current` has the runtime shape announced by `entry`.
fn accepts(current: &dyn Value, entry: Entry<'_>, cx: &Archivist) -> bool {
    match current.value_ref() {
        ValueRef::Object(object) => cx.matches_type(entry.header, &object.value_type_path()),
        ValueRef::Array(array) => match parse_array_header(entry.header) {
            Some((element, len)) => {
                cx.matches_type(element, &array.element_type_path())
                    && (len == array.len() || array.is_resizable())
            }
            None => false,
        },
        ValueRef::List(list) => entry.header == list.container_name(),
        ValueRef::Map(map) => entry.header == map.container_name(),
        ValueRef::Null => false,
        ValueRef::Scalar(_) | ValueRef::Text(_) | ValueRef::Enum(_) => true,
    }
}
