//! The line-oriented, brace-delimited text format.
//!
//! ```text
//! # comment
//! count=3
//! label="hi%0Athere"
//! tags=Vec {
//!   int 3
//!   1 2 3
//! }
//! ```
//!
//! [`TextReader`] yields significant lines and tracks nesting depth,
//! [`TextWriter`] mirrors it with indentation.

// -----------------------------------------------------------------------------
// Modules

mod escape;
mod reader;
mod writer;

// -----------------------------------------------------------------------------
// Exports

pub use escape::{decode, encode, quote, unquote};
pub use reader::{Line, TextReader};
pub use writer::TextWriter;

/// The universal empty-value sentinel.
pub const NULL: &str = "null";
