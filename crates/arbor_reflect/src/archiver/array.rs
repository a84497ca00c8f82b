use std::collections::VecDeque;

use super::{Archiver, Entry, expect_block, parse_array_header};
use crate::Archivist;
use crate::error::{ArchiveError, FormatError};
use crate::text::{TextReader, TextWriter};
use crate::value::{Array, Typed};

// -----------------------------------------------------------------------------
// Writing

pub(super) fn write(
    array: &dyn Array,
    out: &mut TextWriter<'_>,
    cx: &Archivist,
) -> Result<(), ArchiveError> {
    let element = array.element_type_path();
    out.print(&format!("{} {}", cx.header_name(&element), array.len()))?;
    out.push()?;
    write_elements(array, out, cx)?;
    out.pop()
}

/// Writes the element lines of an array or list body.
///
/// Primitives and enum constants share one space-separated line, every
/// other element gets its own entry.
pub(crate) fn write_elements(
    array: &dyn Array,
    out: &mut TextWriter<'_>,
    cx: &Archivist,
) -> Result<(), ArchiveError> {
    let archiver = Archiver::for_category(array.element_category());
    let elements = (0..array.len()).filter_map(|index| array.get(index));

    if matches!(archiver, Archiver::Primitive | Archiver::Enum) {
        if array.len() == 0 {
            return Ok(());
        }
        let mut line = String::new();
        for (index, element) in elements.enumerate() {
            if index > 0 {
                line.push(' ');
            }
            let token = archiver
                .render(element)
                .map_err(|e| ArchiveError::from(e).at_line(out.line()))?;
            line.push_str(&token);
        }
        return out.write_line(&line);
    }

    for element in elements {
        archiver.write(element, out, cx)?;
    }
    Ok(())
}

// -----------------------------------------------------------------------------
// Reading

pub(super) fn read(
    array: &mut dyn Array,
    entry: Entry<'_>,
    input: &mut TextReader<'_>,
    cx: &Archivist,
    keep: bool,
) -> Result<(), ArchiveError> {
    let Some((element, len)) = parse_array_header(entry.header) else {
        return Err(input.error(FormatError::InvalidHeader(entry.header.to_owned())));
    };
    let expected = array.element_type_path();
    if !cx.matches_type(element, &expected) {
        return Err(input.error(FormatError::TypeMismatch {
            expected,
            found: element.to_owned(),
        }));
    }
    expect_block(entry, input)?;
    array.read_elements(len, input, cx, keep)?;
    input.expect_close()
}

/// Feeds the entries of `len` elements to `visit`.
fn for_each_entry(
    archiver: Archiver,
    len: usize,
    input: &mut TextReader<'_>,
    visit: &mut dyn FnMut(Entry<'_>, &mut TextReader<'_>) -> Result<(), ArchiveError>,
) -> Result<(), ArchiveError> {
    if matches!(archiver, Archiver::Primitive | Archiver::Enum) {
        if len == 0 {
            return Ok(());
        }
        let line = input.expect_line()?;
        if line.opens {
            return Err(input.error(FormatError::UnexpectedBlock(line.text)));
        }
        let tokens: Vec<&str> = line.text.split_whitespace().collect();
        if tokens.len() != len {
            return Err(input.error(FormatError::LengthMismatch {
                expected: len,
                actual: tokens.len(),
            }));
        }
        for token in tokens {
            visit(Entry::leaf(token), input)?;
        }
        return Ok(());
    }

    for _ in 0..len {
        let line = input.expect_line()?;
        let entry = Entry {
            header: &line.text,
            opens: line.opens,
        };
        visit(entry, input)?;
    }
    Ok(())
}

/// Storage whose length follows the input.
pub(crate) trait Elements<T> {
    fn get_mut(&mut self, index: usize) -> Option<&mut T>;
    fn push(&mut self, value: T);
    fn truncate(&mut self, len: usize);
    fn clear(&mut self);
}

impl<T> Elements<T> for Vec<T> {
    fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        self.as_mut_slice().get_mut(index)
    }

    fn push(&mut self, value: T) {
        self.push(value);
    }

    fn truncate(&mut self, len: usize) {
        self.truncate(len);
    }

    fn clear(&mut self) {
        self.clear();
    }
}

impl<T> Elements<T> for VecDeque<T> {
    fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        VecDeque::get_mut(self, index)
    }

    fn push(&mut self, value: T) {
        self.push_back(value);
    }

    fn truncate(&mut self, len: usize) {
        self.truncate(len);
    }

    fn clear(&mut self) {
        self.clear();
    }
}

/// Reads `len` elements into growable storage.
///
/// With `keep`, element `i` of the input is merged into the existing element
/// `i`; elements past the current length are constructed from their header.
pub(crate) fn read_growable<T: Typed>(
    items: &mut impl Elements<T>,
    len: usize,
    input: &mut TextReader<'_>,
    cx: &Archivist,
    keep: bool,
) -> Result<(), ArchiveError> {
    if !keep {
        items.clear();
    }
    let archiver = Archiver::for_category(T::CATEGORY);
    let mut index = 0;
    let mut visit = |entry: Entry<'_>, input: &mut TextReader<'_>| -> Result<(), ArchiveError> {
        if let Some(item) = items.get_mut(index) {
            archiver.read(item, entry, input, cx, keep)?;
        } else {
            let mut item = T::construct(entry.header, cx).map_err(|e| input.locate(e))?;
            archiver.read(&mut item, entry, input, cx, true)?;
            items.push(item);
        }
        index += 1;
        Ok(())
    };
    for_each_entry(archiver, len, input, &mut visit)?;
    items.truncate(len);
    Ok(())
}

/// Reads exactly `items.len()` elements in place.
pub(crate) fn read_fixed<T: Typed>(
    items: &mut [T],
    len: usize,
    input: &mut TextReader<'_>,
    cx: &Archivist,
    keep: bool,
) -> Result<(), ArchiveError> {
    if len != items.len() {
        return Err(input.error(FormatError::LengthMismatch {
            expected: items.len(),
            actual: len,
        }));
    }
    let archiver = Archiver::for_category(T::CATEGORY);
    let mut slots = items.iter_mut();
    let mut visit = |entry: Entry<'_>, input: &mut TextReader<'_>| -> Result<(), ArchiveError> {
        match slots.next() {
            Some(item) => archiver.read(item, entry, input, cx, keep),
            None => Err(input.error(FormatError::LengthMismatch {
                expected: len,
                actual: len + 1,
            })),
        }
    };
    for_each_entry(archiver, len, input, &mut visit)
}
