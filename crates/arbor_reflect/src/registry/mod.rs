//! Canonical type names and constructors.
//!
//! The [`TypeRegistry`] maps type paths, short names and legacy aliases to a
//! [`TypeMeta`]. Polymorphic holders (`Box<dyn Reflect>`) resolve the header
//! of an entry through it to build the right concrete type.
//!
//! ## auto_register
//!
//! With the `auto_register` feature, every non-generic type deriving
//! `Reflect` submits its registration function through `inventory`. A name
//! lookup that misses runs them once, see [`TypeRegistry::auto_register`].

// -----------------------------------------------------------------------------
// Modules

mod type_meta;
mod type_registry;

// -----------------------------------------------------------------------------
// Exports

pub use type_meta::TypeMeta;
pub use type_registry::{TypeRegistry, TypeRegistryArc};
