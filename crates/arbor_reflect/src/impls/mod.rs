//! [`Value`](crate::value::Value) implementations for foreign types.
//!
//! ## Implemented Menu
//!
//! - native:
//!     - `i8`-`i64`, `u8`-`u64`, `isize`, `usize`, `f32`, `f64`, `bool`
//!     - `char`, `String`
//!     - `[T; N]`
//! - core:
//!     - `Option<T>`
//! - alloc:
//!     - `Vec<T>`, `VecDeque<T>`, `Box<[T]>`
//!     - `BTreeMap<K, V>`
//!     - `Arc<T>`, `Box<dyn Reflect>`
//! - hash maps:
//!     - `std::collections::HashMap`, `hashbrown::HashMap`
//!
//! Objects get theirs from `#[derive(Reflect)]`.

// -----------------------------------------------------------------------------
// Modules

mod alloc;
mod hash_map;
mod native;
mod option;
