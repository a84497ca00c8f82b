use serde::{Deserialize, Serialize};

/// The value categories, each with its own archiver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    /// Numbers and booleans, written as literal tokens.
    Primitive,
    /// Strings and chars, quoted and percent-encoded.
    Text,
    /// Unit enums, written as the constant name.
    Enum,
    /// Nested [`Reflect`](crate::Reflect) objects.
    Object,
    /// Fixed or reallocated arrays.
    Array,
    /// Ordered growable collections.
    List,
    /// Key/value maps.
    Map,
}

impl Category {
    /// Whether values of this category are written as a single token
    /// without a nested block.
    #[inline]
    pub const fn is_leaf(self) -> bool {
        matches!(self, Self::Primitive | Self::Text | Self::Enum)
    }
}

/// Depth of [`deep_copy`](crate::Archivist::deep_copy) versus
/// [`shallow_copy`](crate::Archivist::shallow_copy).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CopyMode {
    /// Shared children (`Arc`) are shared by the copy.
    Shallow,
    /// Every child is reallocated.
    Deep,
}
