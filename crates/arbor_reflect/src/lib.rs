//! Reflection-driven archiving of object graphs.
//!
//! Objects deriving [`Reflect`] are written as an indented, line-oriented
//! text format and read back, either rebuilding the object or merging the
//! text onto an existing one. The same field schemas drive deep and shallow
//! copies, structural comparison, checksums and dirty-only output.
//!
//! ```
//! use arbor_reflect::{Archivist, Reflect};
//!
//! #[derive(Reflect, Default, Debug, PartialEq)]
//! struct Inventory {
//!     count: i32,
//!     label: String,
//!     tags: Vec<i32>,
//! }
//!
//! let cx = Archivist::new();
//! let text = "count=3\nlabel=\"hi\"\ntags=Vec {\n  int 3\n  1 2 3\n}\n";
//!
//! let inventory: Inventory = cx.deserialize(text).unwrap();
//! assert_eq!(inventory.tags, [1, 2, 3]);
//!
//! let written = cx.serialize(&inventory).unwrap();
//! assert_eq!(written, text);
//! ```
//!
//! - [`text`]: the line reader and writer.
//! - [`archiver`]: one archiver per value category.
//! - [`registry`]: type names and constructors.
//! - [`schema`]: field declarations of objects.
//! - [`dirty`]: change-tracking wrappers.
//! - [`Archivist`]: the entry point of every operation.
#![cfg_attr(docsrs, feature(doc_cfg))]

// -----------------------------------------------------------------------------
// Extern Self

// Generated code refers to `arbor_reflect`, which must also resolve inside
// this crate and its doc tests.
extern crate self as arbor_reflect;

// -----------------------------------------------------------------------------
// Modules

mod archivist;
mod config;
mod impls;
mod reflect;

pub mod archiver;
pub mod dirty;
pub mod error;
pub mod ops;
pub mod registry;
pub mod schema;
pub mod text;
pub mod value;

// -----------------------------------------------------------------------------
// Top-Level exports

#[doc(hidden)]
pub mod __macro_exports;

pub use archivist::Archivist;
pub use config::{Config, MAX_ARRAY_DIMENSIONS};
pub use reflect::{Describe, Reflect};

pub use arbor_reflect_derive as derive;
pub use arbor_reflect_derive::Reflect;
