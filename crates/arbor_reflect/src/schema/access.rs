use std::any::Any;

use crate::error::SchemaError;
use crate::value::{CopyMode, Typed, Value};
use crate::{Archivist, Reflect};

/// Type-erased access to one field of an object.
///
/// Every method returns `None` (or `Ok(false)`) when the owner is not the
/// type the field was declared on.
pub trait FieldAccess: Send + Sync + 'static {
    fn get<'a>(&self, owner: &'a dyn Reflect) -> Option<&'a dyn Value>;

    fn get_mut<'a>(&self, owner: &'a mut dyn Reflect) -> Option<&'a mut dyn Value>;

    /// Overwrites the field of `target` with a copy of the field of `source`.
    fn copy_into(
        &self,
        source: &dyn Reflect,
        target: &mut dyn Reflect,
        mode: CopyMode,
        cx: &Archivist,
    ) -> Result<bool, SchemaError>;
}

// -----------------------------------------------------------------------------
// FieldAccessor

/// Accessor pair for field `F` of `T`.
pub(crate) struct FieldAccessor<T, F> {
    pub get: fn(&T) -> &F,
    pub get_mut: fn(&mut T) -> &mut F,
}

impl<T: Reflect, F: Typed> FieldAccess for FieldAccessor<T, F> {
    fn get<'a>(&self, owner: &'a dyn Reflect) -> Option<&'a dyn Value> {
        let owner: &'a dyn Any = owner;
        owner.downcast_ref::<T>().map(|t| (self.get)(t) as &dyn Value)
    }

    fn get_mut<'a>(&self, owner: &'a mut dyn Reflect) -> Option<&'a mut dyn Value> {
        let owner: &'a mut dyn Any = owner;
        owner
            .downcast_mut::<T>()
            .map(|t| (self.get_mut)(t) as &mut dyn Value)
    }

    fn copy_into(
        &self,
        source: &dyn Reflect,
        target: &mut dyn Reflect,
        mode: CopyMode,
        cx: &Archivist,
    ) -> Result<bool, SchemaError> {
        let source: &dyn Any = source;
        let target: &mut dyn Any = target;
        match (source.downcast_ref::<T>(), target.downcast_mut::<T>()) {
            (Some(source), Some(target)) => {
                *(self.get_mut)(target) = (self.get)(source).copy(mode, cx)?;
                Ok(true)
            }
            _ => Ok(false),
        }
    }
}

// -----------------------------------------------------------------------------
// Inherited

/// A field of base object `B` embedded in `T`.
pub(crate) struct Inherited<T, B> {
    pub get: fn(&T) -> &B,
    pub get_mut: fn(&mut T) -> &mut B,
    pub inner: Box<dyn FieldAccess>,
}

impl<T: Reflect, B: Reflect> FieldAccess for Inherited<T, B> {
    fn get<'a>(&self, owner: &'a dyn Reflect) -> Option<&'a dyn Value> {
        let owner: &'a dyn Any = owner;
        let base: &'a B = (self.get)(owner.downcast_ref::<T>()?);
        self.inner.get(base)
    }

    fn get_mut<'a>(&self, owner: &'a mut dyn Reflect) -> Option<&'a mut dyn Value> {
        let owner: &'a mut dyn Any = owner;
        let base: &'a mut B = (self.get_mut)(owner.downcast_mut::<T>()?);
        self.inner.get_mut(base)
    }

    fn copy_into(
        &self,
        source: &dyn Reflect,
        target: &mut dyn Reflect,
        mode: CopyMode,
        cx: &Archivist,
    ) -> Result<bool, SchemaError> {
        let source: &dyn Any = source;
        let target: &mut dyn Any = target;
        match (source.downcast_ref::<T>(), target.downcast_mut::<T>()) {
            (Some(source), Some(target)) => {
                self.inner
                    .copy_into((self.get)(source), (self.get_mut)(target), mode, cx)
            }
            _ => Ok(false),
        }
    }
}
