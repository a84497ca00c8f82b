use crate::error::SchemaError;
use crate::value::CopyMode;
use crate::{Archivist, Describe};

/// Copies an object field by field.
///
/// The copy starts from a freshly constructed `T`, so fields outside the
/// schema keep their constructed value. In [`CopyMode::Shallow`], `Arc`
/// fields share their content with the source; everything else is copied
/// recursively.
pub fn copy_object<T: Describe>(
    source: &T,
    mode: CopyMode,
    cx: &Archivist,
) -> Result<T, SchemaError> {
    let schema = cx.schemas().get_or_build::<T>()?;
    let mut target = T::construct("", cx)?;
    for field in schema.fields() {
        field.copy_into(source, &mut target, mode, cx)?;
    }
    Ok(target)
}
