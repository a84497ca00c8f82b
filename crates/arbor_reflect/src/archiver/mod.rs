//! Archivers, one per value category.
//!
//! An [`Archiver`] turns a [`Value`] into lines of text and back. Leaf
//! archivers render a single token, compound archivers write a header that
//! opens a block and recurse into their children.
//!
//! ```text
//! count=3
//! label="hi"
//! tags=Vec {
//!   int 3
//!   1 2 3
//! }
//! ```

// -----------------------------------------------------------------------------
// Modules

mod array;
mod leaf;
mod list;
mod map;
pub(crate) mod object;
mod slot;

// -----------------------------------------------------------------------------
// Exports

pub(crate) use array::{read_fixed, read_growable, write_elements};
pub(crate) use map::read_map;

use crate::Archivist;
use crate::error::{ArchiveError, FormatError, SchemaError};
use crate::text::{NULL, TextReader, TextWriter};
use crate::value::{Category, Value, ValueMut, ValueRef};

// -----------------------------------------------------------------------------
// Entry

/// The head of one value in the text: a leaf token, or a header followed by a
/// block when `opens` is set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Entry<'a> {
    pub header: &'a str,
    pub opens: bool,
}

impl<'a> Entry<'a> {
    #[inline]
    pub const fn leaf(token: &'a str) -> Self {
        Self {
            header: token,
            opens: false,
        }
    }

    #[inline]
    pub fn is_null(&self) -> bool {
        self.header == NULL
    }
}

// -----------------------------------------------------------------------------
// Archiver

/// Reads and writes the values of one [`Category`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Archiver {
    Primitive,
    Text,
    Enum,
    Object,
    Array,
    List,
    Map,
}

impl Archiver {
    /// The default archiver of a category.
    pub const fn for_category(category: Category) -> Self {
        match category {
            Category::Primitive => Self::Primitive,
            Category::Text => Self::Text,
            Category::Enum => Self::Enum,
            Category::Object => Self::Object,
            Category::Array => Self::Array,
            Category::List => Self::List,
            Category::Map => Self::Map,
        }
    }

    /// The category this archiver is the default for.
    pub const fn category(self) -> Category {
        match self {
            Self::Primitive => Category::Primitive,
            Self::Text => Category::Text,
            Self::Enum => Category::Enum,
            Self::Object => Category::Object,
            Self::Array => Category::Array,
            Self::List => Category::List,
            Self::Map => Category::Map,
        }
    }

    /// Whether values of `category` can be archived by this archiver.
    ///
    /// The text archiver also accepts primitives, which it writes quoted.
    pub const fn supports(self, category: Category) -> bool {
        match self {
            Self::Text => matches!(category, Category::Text | Category::Primitive),
            _ => self.category() as u8 == category as u8,
        }
    }

    /// Whether values are written as a single token.
    #[inline]
    pub const fn is_leaf(self) -> bool {
        matches!(self, Self::Primitive | Self::Text | Self::Enum)
    }

    fn mismatch(self, found: &ValueRef<'_>) -> SchemaError {
        SchemaError::CategoryMismatch {
            expected: self.category(),
            found: found.category().unwrap_or(self.category()),
        }
    }

    /// Renders a leaf value as its token, `null` for an empty slot.
    pub fn render(self, value: &dyn Value) -> Result<String, SchemaError> {
        let view = value.value_ref();
        match (self, &view) {
            (_, ValueRef::Null) => Ok(NULL.to_owned()),
            (Self::Primitive, ValueRef::Scalar(scalar)) => Ok(leaf::render_scalar(*scalar)),
            (Self::Text, ValueRef::Text(text)) => Ok(leaf::render_text(*text)),
            (Self::Text, ValueRef::Scalar(scalar)) => {
                Ok(crate::text::quote(&leaf::render_scalar(*scalar)))
            }
            (Self::Enum, ValueRef::Enum(value)) => Ok(value.variant_name().to_owned()),
            _ => Err(self.mismatch(&view)),
        }
    }

    /// Writes `value` at the end of the current line.
    ///
    /// Leaf values end the line, compound values open a block.
    pub fn write(
        self,
        value: &dyn Value,
        out: &mut TextWriter<'_>,
        cx: &Archivist,
    ) -> Result<(), ArchiveError> {
        let view = value.value_ref();
        match (self, view) {
            (_, ValueRef::Null) => out.write_line(NULL),
            (Self::Primitive | Self::Text | Self::Enum, _) => {
                let token = self.render(value).map_err(|e| locate(e, out))?;
                out.write_line(&token)
            }
            (Self::Object, ValueRef::Object(object)) => object::write(object, out, cx),
            (Self::Array, ValueRef::Array(array)) => array::write(array, out, cx),
            (Self::List, ValueRef::List(list)) => list::write(list, out, cx),
            (Self::Map, ValueRef::Map(map)) => map::write(map, out, cx),
            (_, view) => Err(locate(self.mismatch(&view), out)),
        }
    }

    /// Reads the value introduced by `entry` into `value`.
    ///
    /// Without `keep` the value is rebuilt from the input alone; with `keep`
    /// parts missing from the input keep their current content.
    pub fn read(
        self,
        value: &mut dyn Value,
        entry: Entry<'_>,
        input: &mut TextReader<'_>,
        cx: &Archivist,
        keep: bool,
    ) -> Result<(), ArchiveError> {
        if entry.is_null() && !matches!(value.value_mut(), ValueMut::Slot(_)) {
            return Err(input.error(FormatError::NullNotAllowed(value.value_type_path())));
        }
        if self.is_leaf() && entry.opens {
            return Err(input.error(FormatError::UnexpectedBlock(entry.header.to_owned())));
        }

        let category = value.category();
        match (self, value.value_mut()) {
            (_, ValueMut::Slot(holder)) => slot::read(self, holder, entry, input, cx, keep),
            (Self::Primitive, ValueMut::Scalar(scalar)) => {
                leaf::parse_scalar(scalar, entry.header).map_err(|e| input.error(e))
            }
            (Self::Text, ValueMut::Text(text)) => {
                leaf::parse_text(text, entry.header).map_err(|e| input.error(e))
            }
            (Self::Text, ValueMut::Scalar(scalar)) => {
                leaf::parse_quoted_scalar(scalar, entry.header).map_err(|e| input.error(e))
            }
            (Self::Enum, ValueMut::Enum(value)) => {
                leaf::parse_enum(value, entry.header).map_err(|e| input.error(e))
            }
            (Self::Object, ValueMut::Object(object)) => object::read(object, entry, input, cx, keep),
            (Self::Array, ValueMut::Array(array)) => array::read(array, entry, input, cx, keep),
            (Self::List, ValueMut::List(list)) => list::read(list, entry, input, cx, keep),
            (Self::Map, ValueMut::Map(map)) => map::read(map, entry, input, cx, keep),
            (_, _) => Err(input.locate(SchemaError::CategoryMismatch {
                expected: self.category(),
                found: category,
            })),
        }
    }
}

#[inline]
fn locate(err: SchemaError, out: &TextWriter<'_>) -> ArchiveError {
    ArchiveError::from(err).at_line(out.line())
}

/// Splits an array header `<element> <length>`.
pub(crate) fn parse_array_header(header: &str) -> Option<(&str, usize)> {
    let (element, len) = header.rsplit_once(' ')?;
    let element = element.trim_end();
    if element.is_empty() {
        return None;
    }
    Some((element, len.parse().ok()?))
}

/// Fails unless the entry opens a block.
pub(crate) fn expect_block(entry: Entry<'_>, input: &TextReader<'_>) -> Result<(), ArchiveError> {
    if entry.opens {
        Ok(())
    } else {
        Err(input.error(FormatError::ExpectedBlock(entry.header.to_owned())))
    }
}

#[cfg(test)]
mod tests {
    use super::{Archiver, parse_array_header};
    use crate::value::Category;

    #[test]
    fn text_accepts_primitives() {
        assert!(Archiver::Text.supports(Category::Primitive));
        assert!(Archiver::Text.supports(Category::Text));
        assert!(!Archiver::Primitive.supports(Category::Text));
        assert!(!Archiver::List.supports(Category::Array));
        assert!(Archiver::Map.supports(Category::Map));
    }

    #[test]
    fn render_leaves() {
        assert_eq!(Archiver::Primitive.render(&42_i32).unwrap(), "42");
        assert_eq!(Archiver::Text.render(&7_u8).unwrap(), "\"7\"");
        assert_eq!(Archiver::Text.render(&String::from("a b")).unwrap(), "\"a b\"");
        assert_eq!(Archiver::Primitive.render(&None::<i32>).unwrap(), "null");
        assert!(Archiver::Primitive.render(&String::new()).is_err());
    }

    #[test]
    fn array_headers() {
        assert_eq!(parse_array_header("i32 3"), Some(("i32", 3)));
        assert_eq!(parse_array_header("game::Piece[] 0"), Some(("game::Piece[]", 0)));
        assert_eq!(parse_array_header("i32"), None);
        assert_eq!(parse_array_header(" 3"), None);
        assert_eq!(parse_array_header("i32 x"), None);
    }
}
