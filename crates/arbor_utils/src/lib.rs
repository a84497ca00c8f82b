//! Shared containers for the `arbor` crates.
//!
//! - [`hash`]: `hashbrown` containers with a fixed `foldhash` seed, so that
//!   iteration order only depends on the inserted data.
//! - [`TypeIdMap`]: the [`TypeId`](core::any::TypeId) keyed map behind the registries.
#![cfg_attr(docsrs, feature(doc_cfg))]

// -----------------------------------------------------------------------------
// Modules

mod typeid_map;

pub mod hash;

// -----------------------------------------------------------------------------
// Top-level exports

pub use typeid_map::TypeIdMap;
