use std::borrow::Cow;

use super::{Category, Value};
use crate::Archivist;
use crate::error::ArchiveError;
use crate::text::TextReader;

// -----------------------------------------------------------------------------
// Leaf categories

/// A number or boolean, archived as a literal token.
pub trait Scalar: Value {
    /// Appends the literal token of the value.
    fn write_token(&self, out: &mut String);

    /// Parses `token` into the value, returning `false` if it is not valid.
    fn read_token(&mut self, token: &str) -> bool;

    /// Compares with another value of the same concrete type.
    fn scalar_eq(&self, other: &dyn Value) -> bool;
}

/// A textual value, archived quoted and percent-encoded.
pub trait Text: Value {
    fn text(&self) -> Cow<'_, str>;

    /// Replaces the content, returning `false` if `text` does not fit the type.
    fn set_text(&mut self, text: String) -> bool;
}

/// A unit-only enum, archived as its constant name.
pub trait Enum: Value {
    /// Constant names in declaration order.
    fn variant_names(&self) -> &'static [&'static str];

    fn variant_index(&self) -> usize;

    /// Switches to the constant at `index`, returning `false` if out of range.
    fn set_variant_index(&mut self, index: usize) -> bool;

    #[inline]
    fn variant_name(&self) -> &'static str {
        self.variant_names()
            .get(self.variant_index())
            .copied()
            .unwrap_or_default()
    }
}

// -----------------------------------------------------------------------------
// Sequences

/// A homogeneous sequence with a length header.
///
/// `[T; N]` has a fixed length, `Box<[T]>` is reallocated when the length
/// changes, and [`List`] types resize in place.
pub trait Array: Value {
    /// Type path of the declared element type.
    fn element_type_path(&self) -> Cow<'static, str>;

    fn element_category(&self) -> Category;

    fn len(&self) -> usize;

    fn get(&self, index: usize) -> Option<&dyn Value>;

    fn get_mut(&mut self, index: usize) -> Option<&mut dyn Value>;

    /// Whether the length may change when reading.
    fn is_resizable(&self) -> bool;

    /// Reads `len` elements following an element header.
    ///
    /// With `keep`, existing elements are reused by position and surplus
    /// elements are dropped.
    fn read_elements(
        &mut self,
        len: usize,
        input: &mut TextReader<'_>,
        cx: &Archivist,
        keep: bool,
    ) -> Result<(), ArchiveError>;
}

/// A growable ordered collection, archived under its container name.
pub trait List: Array {
    /// Canonical container name written as the header (`Vec`, `VecDeque`).
    fn container_name(&self) -> &'static str;
}

// -----------------------------------------------------------------------------
// Map

/// A key/value map, archived as alternating key and value entries.
pub trait Map: Value {
    /// Canonical container name written as the header (`HashMap`, `BTreeMap`).
    fn container_name(&self) -> &'static str;

    fn key_category(&self) -> Category;

    fn value_category(&self) -> Category;

    fn len(&self) -> usize;

    /// Whether iteration order only depends on the keys.
    fn is_ordered(&self) -> bool;

    fn entries(&self) -> Vec<(&dyn Value, &dyn Value)>;

    /// Looks up a key of the same concrete type.
    fn get(&self, key: &dyn Value) -> Option<&dyn Value>;

    /// Reads entries until the current block closes.
    ///
    /// With `keep`, values under existing keys are merged in place and keys
    /// missing from the input are removed.
    fn read_entries(
        &mut self,
        input: &mut TextReader<'_>,
        cx: &Archivist,
        keep: bool,
    ) -> Result<(), ArchiveError>;
}

// -----------------------------------------------------------------------------
// Slot

/// A holder whose content can be empty or replaced by a fresh instance.
pub trait Slot: Value {
    fn content(&self) -> Option<&dyn Value>;

    /// The content if it may be written in place.
    ///
    /// `None` for an empty slot and for shared content, which is immutable.
    fn content_mut(&mut self) -> Option<&mut dyn Value>;

    /// Empties the slot, returning `false` if it cannot hold `null`.
    fn clear(&mut self) -> bool;

    /// Constructs a fresh instance for `header`, lets `read` fill it, then
    /// stores it in place of the previous content.
    fn replace_with(
        &mut self,
        header: &str,
        cx: &Archivist,
        read: &mut dyn FnMut(&mut dyn Value) -> Result<(), ArchiveError>,
    ) -> Result<(), ArchiveError>;
}
