use super::{Archiver, Entry, expect_block};
use crate::Archivist;
use crate::error::{ArchiveError, SchemaError};
use crate::text::{TextReader, TextWriter};
use crate::value::{Map, Typed, Value};

/// Writes a map body as alternating key and value entries.
///
/// Unordered maps are sorted by key text, the token of a leaf key or the
/// whole block of an object key, so equal maps give equal text.
pub(super) fn write(
    map: &dyn Map,
    out: &mut TextWriter<'_>,
    cx: &Archivist,
) -> Result<(), ArchiveError> {
    let keys = Archiver::for_category(map.key_category());
    let values = Archiver::for_category(map.value_category());

    out.print(map.container_name())?;
    out.push()?;

    if keys.is_leaf() {
        let mut entries = map
            .entries()
            .into_iter()
            .map(|(key, value)| Ok((keys.render(key)?, value)))
            .collect::<Result<Vec<(String, &dyn Value)>, SchemaError>>()
            .map_err(|e| ArchiveError::from(e).at_line(out.line()))?;
        if !map.is_ordered() {
            entries.sort_by(|a, b| a.0.cmp(&b.0));
        }
        for (key, value) in entries {
            out.write_line(&key)?;
            values.write(value, out, cx)?;
        }
    } else {
        let mut entries = map.entries();
        if !map.is_ordered() {
            let mut sorted = entries
                .into_iter()
                .map(|(key, value)| {
                    let mut text = Vec::new();
                    keys.write(key, &mut TextWriter::new(&mut text), cx)?;
                    Ok((text, key, value))
                })
                .collect::<Result<Vec<_>, ArchiveError>>()?;
            sorted.sort_by(|a, b| a.0.cmp(&b.0));
            entries = sorted.into_iter().map(|(_, key, value)| (key, value)).collect();
        }
        for (key, value) in entries {
            keys.write(key, out, cx)?;
            values.write(value, out, cx)?;
        }
    }

    out.pop()
}

pub(super) fn read(
    map: &mut dyn Map,
    entry: Entry<'_>,
    input: &mut TextReader<'_>,
    cx: &Archivist,
    keep: bool,
) -> Result<(), ArchiveError> {
    expect_block(entry, input)?;
    if entry.header != map.container_name() {
        log::debug!(
            "line {}: reading `{}` into `{}`",
            input.line(),
            entry.header,
            map.container_name(),
        );
    }
    map.read_entries(input, cx, keep)
}

/// Reads key and value entries until the block closes.
///
/// `previous` removes and returns the current value of a key, which is then
/// merged with the input when `keep` is set. Keys it never sees stay with the
/// caller, which drops them on success and puts them back on error. A value
/// whose read fails is handed to `insert` before the error returns.
pub(crate) fn read_map<K: Typed, V: Typed>(
    input: &mut TextReader<'_>,
    cx: &Archivist,
    keep: bool,
    previous: &mut dyn FnMut(&K) -> Option<V>,
    insert: &mut dyn FnMut(K, V),
) -> Result<(), ArchiveError> {
    let keys = Archiver::for_category(K::CATEGORY);
    let values = Archiver::for_category(V::CATEGORY);

    while let Some(line) = input.read_line()? {
        let entry = Entry {
            header: &line.text,
            opens: line.opens,
        };
        let mut key = K::construct(entry.header, cx).map_err(|e| input.locate(e))?;
        keys.read(&mut key, entry, input, cx, false)?;

        let line = input.expect_line()?;
        let entry = Entry {
            header: &line.text,
            opens: line.opens,
        };
        let value = match previous(&key) {
            Some(mut value) if keep => {
                if let Err(e) = values.read(&mut value, entry, input, cx, true) {
                    insert(key, value);
                    return Err(e);
                }
                value
            }
            _ => {
                let mut value = V::construct(entry.header, cx).map_err(|e| input.locate(e))?;
                values.read(&mut value, entry, input, cx, true)?;
                value
            }
        };
        insert(key, value);
    }
    Ok(())
}
