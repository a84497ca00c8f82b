use super::{Entry, expect_block, parse_array_header, write_elements};
use crate::Archivist;
use crate::error::{ArchiveError, FormatError};
use crate::text::{TextReader, TextWriter};
use crate::value::List;

pub(super) fn write(
    list: &dyn List,
    out: &mut TextWriter<'_>,
    cx: &Archivist,
) -> Result<(), ArchiveError> {
    out.print(list.container_name())?;
    out.push()?;
    let element = list.element_type_path();
    out.write_line(&format!("{} {}", cx.header_name(&element), list.len()))?;
    write_elements(list, out, cx)?;
    out.pop()
}

/// Reads a list body into `list`.
///
/// The container header is informational: any list layout is read into the
/// declared container, so a field may switch between list types.
pub(super) fn read(
    list: &mut dyn List,
    entry: Entry<'_>,
    input: &mut TextReader<'_>,
    cx: &Archivist,
    keep: bool,
) -> Result<(), ArchiveError> {
    expect_block(entry, input)?;
    if entry.header != list.container_name() {
        log::debug!(
            "line {}: reading `{}` into `{}`",
            input.line(),
            entry.header,
            list.container_name(),
        );
    }

    let line = input.expect_line()?;
    if line.opens {
        return Err(input.error(FormatError::UnexpectedBlock(line.text)));
    }
    let Some((element, len)) = parse_array_header(&line.text) else {
        return Err(input.error(FormatError::InvalidHeader(line.text)));
    };
    let expected = list.element_type_path();
    if !cx.matches_type(element, &expected) {
        return Err(input.error(FormatError::TypeMismatch {
            expected,
            found: element.to_owned(),
        }));
    }
    list.read_elements(len, input, cx, keep)?;
    input.expect_close()
}
