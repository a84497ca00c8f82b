use std::borrow::Cow;

use bitflags::bitflags;

use super::access::{FieldAccess, FieldAccessor, Inherited};
use crate::archiver::Archiver;
use crate::error::SchemaError;
use crate::value::{Category, CopyMode, Typed, Value};
use crate::{Archivist, Reflect};

bitflags! {
    /// Modifiers of a declared field.
    ///
    /// `OMIT` and `STATIC` mark fields that never take part in archiving; the
    /// schema builder rejects them. `IMMUTABLE` fields are rebuilt from
    /// scratch on merge instead of being updated in place.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct FieldTags: u8 {
        const OMIT = 1;
        const STATIC = 1 << 1;
        const IMMUTABLE = 1 << 2;
    }
}

/// One persistent field of an object: its name, declared type, archiver and
/// access path.
pub struct FieldDescriptor {
    name: &'static str,
    aliases: Vec<&'static str>,
    type_path: Cow<'static, str>,
    category: Category,
    archiver: Archiver,
    tags: FieldTags,
    access: Box<dyn FieldAccess>,
}

impl FieldDescriptor {
    pub(crate) fn new<T: Reflect, F: Typed>(
        name: &'static str,
        get: fn(&T) -> &F,
        get_mut: fn(&mut T) -> &mut F,
    ) -> Self {
        Self {
            name,
            aliases: Vec::new(),
            type_path: F::type_path(),
            category: F::CATEGORY,
            archiver: Archiver::for_category(F::CATEGORY),
            tags: FieldTags::empty(),
            access: Box::new(FieldAccessor { get, get_mut }),
        }
    }

    /// Re-roots a field of `B` on `T`, which embeds `B`.
    pub(crate) fn inherit<T: Reflect, B: Reflect>(
        self,
        get: fn(&T) -> &B,
        get_mut: fn(&mut T) -> &mut B,
    ) -> Self {
        Self {
            access: Box::new(Inherited {
                get,
                get_mut,
                inner: self.access,
            }),
            ..self
        }
    }

    /// Adds names accepted when reading.
    pub fn with_aliases(&mut self, aliases: &[&'static str]) -> &mut Self {
        self.aliases.extend_from_slice(aliases);
        self
    }

    pub fn with_tags(&mut self, tags: FieldTags) -> &mut Self {
        self.tags |= tags;
        self
    }

    /// Replaces the archiver chosen from the field category.
    pub fn with_archiver(&mut self, archiver: Archiver) -> &mut Self {
        self.archiver = archiver;
        self
    }

    #[inline]
    pub fn name(&self) -> &'static str {
        self.name
    }

    #[inline]
    pub fn aliases(&self) -> &[&'static str] {
        &self.aliases
    }

    /// Type path of the declared field type.
    #[inline]
    pub fn type_path(&self) -> &str {
        &self.type_path
    }

    #[inline]
    pub fn category(&self) -> Category {
        self.category
    }

    #[inline]
    pub fn archiver(&self) -> Archiver {
        self.archiver
    }

    #[inline]
    pub fn tags(&self) -> FieldTags {
        self.tags
    }

    #[inline]
    pub fn is_immutable(&self) -> bool {
        self.tags.contains(FieldTags::IMMUTABLE)
    }

    /// Borrows the field from `owner`.
    pub fn get<'a>(&self, owner: &'a dyn Reflect) -> Result<&'a dyn Value, SchemaError> {
        self.access.get(owner).ok_or_else(|| SchemaError::OwnerMismatch {
            owner: owner.value_type_path(),
            field: self.name,
        })
    }

    /// Mutably borrows the field from `owner`.
    pub fn get_mut<'a>(&self, owner: &'a mut dyn Reflect) -> Result<&'a mut dyn Value, SchemaError> {
        let owner_path = owner.value_type_path();
        self.access
            .get_mut(owner)
            .ok_or(SchemaError::OwnerMismatch {
                owner: owner_path,
                field: self.name,
            })
    }

    pub(crate) fn copy_into(
        &self,
        source: &dyn Reflect,
        target: &mut dyn Reflect,
        mode: CopyMode,
        cx: &Archivist,
    ) -> Result<(), SchemaError> {
        if self.access.copy_into(source, target, mode, cx)? {
            Ok(())
        } else {
            Err(SchemaError::OwnerMismatch {
                owner: target.value_type_path(),
                field: self.name,
            })
        }
    }

    pub(crate) fn validate(&self, owner: &Cow<'static, str>) -> Result<(), SchemaError> {
        for (tag, label) in [(FieldTags::OMIT, "OMIT"), (FieldTags::STATIC, "STATIC")] {
            if self.tags.contains(tag) {
                return Err(SchemaError::ExcludedField {
                    owner: owner.clone(),
                    field: self.name,
                    tag: label,
                });
            }
        }
        if !self.archiver.supports(self.category) {
            return Err(SchemaError::UnsupportedCategory {
                field: self.name,
                category: self.category,
                archiver: self.archiver,
            });
        }
        Ok(())
    }
}

impl core::fmt::Debug for FieldDescriptor {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("FieldDescriptor")
            .field("name", &self.name)
            .field("aliases", &self.aliases)
            .field("type_path", &self.type_path)
            .field("archiver", &self.archiver)
            .field("tags", &self.tags)
            .finish_non_exhaustive()
    }
}
