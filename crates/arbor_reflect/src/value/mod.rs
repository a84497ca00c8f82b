//! The value model walked by every archive operation.
//!
//! Each serializable type implements [`Value`] and exposes itself through one
//! of the category views of [`ValueRef`] / [`ValueMut`]. Statically known
//! information lives in the sized companion trait [`Typed`].

// -----------------------------------------------------------------------------
// Modules

mod category;
mod kinds;
mod typed;

// -----------------------------------------------------------------------------
// Exports

pub use category::{Category, CopyMode};
pub use kinds::{Array, Enum, List, Map, Scalar, Slot, Text};
pub use typed::{Typed, short_name};

use std::any::Any;
use std::borrow::Cow;

use crate::Reflect;

// -----------------------------------------------------------------------------
// Value

/// A value the archivers can read, write, copy and compare.
///
/// Implemented for primitives, strings, unit enums, containers and every
/// [`Reflect`] object. Implementations are usually generated by
/// `#[derive(Reflect)]`.
pub trait Value: Any + Send + Sync {
    /// Canonical type path, generics erased (`Vec`, `int[]`, `game::Piece`).
    fn value_type_path(&self) -> Cow<'static, str>;

    /// The category this value is archived as.
    fn category(&self) -> Category;

    /// Borrowed view of the value, `Null` for an empty slot.
    fn value_ref(&self) -> ValueRef<'_>;

    /// Mutable view of the value.
    fn value_mut(&mut self) -> ValueMut<'_>;

    /// Whether this value or anything it holds changed since the last
    /// [`mark_clean`](Value::mark_clean).
    #[inline]
    fn is_dirty(&self) -> bool {
        false
    }

    /// Whether this value carries its own dirty flag and that flag is set.
    #[inline]
    fn is_locally_dirty(&self) -> bool {
        false
    }

    /// Resets dirty flags, recursively.
    #[inline]
    fn mark_clean(&mut self) {}
}

// -----------------------------------------------------------------------------
// Views

/// Immutable view of a [`Value`] by category.
pub enum ValueRef<'a> {
    Scalar(&'a dyn Scalar),
    Text(&'a dyn Text),
    Enum(&'a dyn Enum),
    Object(&'a dyn Reflect),
    Array(&'a dyn Array),
    List(&'a dyn List),
    Map(&'a dyn Map),
    Null,
}

/// Mutable view of a [`Value`] by category.
///
/// Holders that can be emptied or replaced (`Option<T>`, `Arc<T>`,
/// `Box<dyn Reflect>`) appear as [`ValueMut::Slot`].
pub enum ValueMut<'a> {
    Scalar(&'a mut dyn Scalar),
    Text(&'a mut dyn Text),
    Enum(&'a mut dyn Enum),
    Object(&'a mut dyn Reflect),
    Array(&'a mut dyn Array),
    List(&'a mut dyn List),
    Map(&'a mut dyn Map),
    Slot(&'a mut dyn Slot),
}

impl ValueRef<'_> {
    /// The category of the view, `None` for `Null`.
    pub fn category(&self) -> Option<Category> {
        match self {
            Self::Scalar(_) => Some(Category::Primitive),
            Self::Text(_) => Some(Category::Text),
            Self::Enum(_) => Some(Category::Enum),
            Self::Object(_) => Some(Category::Object),
            Self::Array(_) => Some(Category::Array),
            Self::List(_) => Some(Category::List),
            Self::Map(_) => Some(Category::Map),
            Self::Null => None,
        }
    }

    #[inline]
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }
}

/// Returns the concrete [`TypeId`](std::any::TypeId) behind a value.
#[inline]
pub fn value_type_id(value: &dyn Value) -> std::any::TypeId {
    let any: &dyn Any = value;
    any.type_id()
}
