//! Items referenced by the code `#[derive(Reflect)]` generates.
//!
//! Not public API, paths may change at any time.

pub use std::borrow::Cow;
pub use std::boxed::Box;
pub use std::sync::Arc;

pub use crate::archiver::Archiver;
pub use crate::error::{ArchiveError, SchemaError};
pub use crate::ops::copy_object;
pub use crate::registry::{TypeMeta, TypeRegistry};
pub use crate::schema::{FieldTags, Schema, SchemaBuilder};
pub use crate::value::{Category, CopyMode, Enum, Typed, Value, ValueMut, ValueRef};
pub use crate::{Archivist, Describe, Reflect};

#[cfg(feature = "auto_register")]
pub mod auto_register {
    pub use inventory;

    use crate::error::SchemaError;
    use crate::registry::TypeRegistry;

    /// A registration function submitted by a derived type.
    pub struct AutoRegistration(pub fn(&mut TypeRegistry) -> Result<(), SchemaError>);

    inventory::collect!(AutoRegistration);

    /// Runs every submitted registration function.
    ///
    /// A failing type is logged and skipped, the others still register.
    pub(crate) fn register_all(registry: &mut TypeRegistry) {
        let mut count = 0_usize;
        for registration in inventory::iter::<AutoRegistration> {
            match (registration.0)(registry) {
                Ok(()) => count += 1,
                Err(err) => log::warn!("automatic type registration failed: {err}"),
            }
        }
        log::debug!("automatically registered {count} types");
    }
}
