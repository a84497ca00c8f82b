//! Dirty tracking.
//!
//! [`Tracked`], [`DirtyList`] and [`DirtyMap`] set a flag on every mutable
//! access. [`Value::is_dirty`](crate::value::Value::is_dirty) reports whether
//! anything inside a value changed, which lets
//! [`Archivist::serialize_dirty`](crate::Archivist::serialize_dirty) write
//! only the changed parts of an object graph.
//!
//! ```
//! use arbor_reflect::dirty::Tracked;
//! use arbor_reflect::value::Value;
//!
//! let mut score = Tracked::new(10_u32);
//! assert!(!score.is_dirty());
//!
//! *score += 5;
//! assert!(score.is_dirty());
//!
//! score.mark_clean();
//! assert_eq!(*score, 15);
//! assert!(!score.is_dirty());
//! ```

// -----------------------------------------------------------------------------
// Modules

mod delta;
mod list;
mod map;
mod tracked;

// -----------------------------------------------------------------------------
// Exports

pub use list::DirtyList;
pub use map::DirtyMap;
pub use tracked::Tracked;

pub(crate) use delta::write_dirty_fields;
