//! Reflection-driven text archiving.
//!
//! - [`reflect`]: the archiver, type and schema registries, `#[derive(Reflect)]`.
//! - [`utils`]: hashing containers shared by the crates.
#![cfg_attr(docsrs, feature(doc_cfg))]

pub use arbor_reflect as reflect;
pub use arbor_utils as utils;
