use std::borrow::Cow;

use super::{Category, CopyMode, Value};
use crate::Archivist;
use crate::error::SchemaError;
use crate::registry::TypeRegistry;

/// Static information of a [`Value`] type.
pub trait Typed: Value + Sized {
    /// Category every value of this type is archived as.
    const CATEGORY: Category;

    /// Canonical type path, generics erased.
    fn type_path() -> Cow<'static, str>;

    /// Builds an empty instance for an entry whose header is `header`.
    ///
    /// Concrete types ignore the header and use their zero-argument
    /// constructor; polymorphic holders resolve it through the type registry.
    fn construct(header: &str, cx: &Archivist) -> Result<Self, SchemaError>;

    /// Copies the value, sharing `Arc` children in [`CopyMode::Shallow`].
    fn copy(&self, mode: CopyMode, cx: &Archivist) -> Result<Self, SchemaError>;

    /// Registers the type and the types it holds.
    #[inline]
    fn register_type(_types: &mut TypeRegistry) -> Result<(), SchemaError> {
        Ok(())
    }
}

/// The last segment of a type path.
///
/// ```
/// assert_eq!(arbor_reflect::value::short_name("game::board::Piece[]"), "Piece[]");
/// assert_eq!(arbor_reflect::value::short_name("int"), "int");
/// ```
#[inline]
pub fn short_name(path: &str) -> &str {
    path.rsplit("::").next().unwrap_or(path)
}
