use std::any::TypeId;
use std::borrow::Cow;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use arbor_utils::TypeIdMap;
use arbor_utils::hash::{HashMap, HashSet};

use super::TypeMeta;
use super::type_meta::Constructor;
use crate::config::Config;
use crate::error::SchemaError;
use crate::value::Typed;

// -----------------------------------------------------------------------------
// TypeRegistry

/// Bidirectional table between canonical type names and types.
///
/// A type is reachable by its full path (`game::Piece`), by its short name
/// (`Piece`) as long as no other type shares it, and by any alias. Array
/// variants (`game::Piece[]`, `game::Piece[][]`) are registered with their
/// element type up to the configured dimension limit.
///
/// With [`Config::strip_qualifiers`], headers are written with short names,
/// so two types sharing a short name is a registration error instead of an
/// ambiguity.
///
/// # Example
///
/// ```
/// use arbor_reflect::Config;
/// use arbor_reflect::registry::TypeRegistry;
///
/// let registry = TypeRegistry::new(&Config::default());
/// assert_eq!(registry.canonical_name("i32").as_deref(), Some("int"));
/// assert_eq!(registry.canonical_name("i32[]").as_deref(), Some("int[]"));
/// assert!(registry.resolve("double").is_some());
/// ```
pub struct TypeRegistry {
    type_meta_table: TypeIdMap<TypeMeta>,
    type_path_to_id: HashMap<Cow<'static, str>, TypeId>,
    type_name_to_id: HashMap<Cow<'static, str>, TypeId>,
    alias_to_id: HashMap<Cow<'static, str>, TypeId>,
    ambiguous_names: HashSet<Cow<'static, str>>,
    strip_qualifiers: bool,
    array_dimensions: usize,
    #[cfg_attr(not(feature = "auto_register"), allow(dead_code))]
    auto_registered: bool,
}

impl TypeRegistry {
    /// Creates an empty registry.
    pub fn empty(config: &Config) -> Self {
        Self {
            type_meta_table: TypeIdMap::new(),
            type_path_to_id: HashMap::default(),
            type_name_to_id: HashMap::default(),
            alias_to_id: HashMap::default(),
            ambiguous_names: HashSet::default(),
            strip_qualifiers: config.strip_qualifiers,
            array_dimensions: config.array_dimensions(),
            auto_registered: false,
        }
    }

    /// Creates a registry with the primitive types.
    ///
    /// - `byte`, `short`, `int`, `long`, `float`, `double`, `boolean`, `string`,
    ///   read back under their Rust names (`i32`, `f64`, `String`...) as well
    /// - `char`, `isize`, `u8 - u64`, `usize`
    pub fn new(config: &Config) -> Self {
        let mut registry = Self::empty(config);
        registry.register_primitives();
        registry
    }

    fn register_primitives(&mut self) {
        macro_rules! register_all {
            ($($ty:ty),* $(,)?) => {
                $(
                    if let Err(e) = self.register::<$ty>() {
                        log::error!("registering `{}` failed: {e}", stringify!($ty));
                    }
                )*
            };
        }
        register_all!(bool, char, String, i8, i16, i32, i64, isize, u8, u16, u32, u64, usize, f32, f64);

        let aliases: [(&'static str, TypeId); 8] = [
            ("i8", TypeId::of::<i8>()),
            ("i16", TypeId::of::<i16>()),
            ("i32", TypeId::of::<i32>()),
            ("i64", TypeId::of::<i64>()),
            ("f32", TypeId::of::<f32>()),
            ("f64", TypeId::of::<f64>()),
            ("bool", TypeId::of::<bool>()),
            ("String", TypeId::of::<String>()),
        ];
        for (alias, type_id) in aliases {
            if let Err(e) = self.add_alias(alias, type_id) {
                log::error!("registering alias `{alias}` failed: {e}");
            }
        }
    }

    /// Registers `T` and, through [`Typed::register_type`], the types it holds.
    ///
    /// Registering the same type twice is a no-op.
    #[inline]
    pub fn register<T: Typed>(&mut self) -> Result<(), SchemaError> {
        T::register_type(self)
    }

    /// Registers the array variants of `T` up to the dimension limit.
    pub fn register_arrays<T: Typed>(&mut self) -> Result<(), SchemaError> {
        if self.array_dimensions >= 1 {
            self.insert_meta(TypeMeta::of::<Box<[T]>>())?;
        }
        if self.array_dimensions >= 2 {
            self.insert_meta(TypeMeta::of::<Box<[Box<[T]>]>>())?;
        }
        if self.array_dimensions >= 3 {
            self.insert_meta(TypeMeta::of::<Box<[Box<[Box<[T]>]>]>>())?;
        }
        Ok(())
    }

    /// Inserts an entry unless its type is already present.
    ///
    /// Returns `Ok(true)` if it was inserted. Nothing is inserted when one of
    /// its names is already bound to another type.
    pub fn insert_meta(&mut self, meta: TypeMeta) -> Result<bool, SchemaError> {
        let type_id = meta.type_id();
        if self.type_meta_table.contains(&type_id) {
            return Ok(false);
        }

        let path = meta.type_path();
        if self.is_bound_elsewhere(path, type_id) {
            return Err(SchemaError::DuplicateName { name: path.clone() });
        }
        if let Some(alias) = meta
            .aliases()
            .iter()
            .find(|alias| self.is_bound_elsewhere(alias, type_id))
        {
            return Err(SchemaError::DuplicateName {
                name: alias.clone(),
            });
        }

        let name = meta.type_name();
        if self.strip_qualifiers
            && (self.ambiguous_names.contains(name)
                || self.type_name_to_id.get(name).is_some_and(|id| *id != type_id))
        {
            return Err(SchemaError::AmbiguousName(Cow::Owned(name.to_owned())));
        }

        self.add_new_type_indices(&meta);
        log::debug!("registered type `{}`", meta.type_path());
        self.type_meta_table.insert(type_id, meta);
        Ok(true)
    }

    fn is_bound_elsewhere(&self, name: &str, type_id: TypeId) -> bool {
        let other = |id: &TypeId| *id != type_id;
        self.type_path_to_id.get(name).is_some_and(other)
            || self.alias_to_id.get(name).is_some_and(other)
    }

    // The type must not be present yet.
    fn add_new_type_indices(&mut self, meta: &TypeMeta) {
        let type_id = meta.type_id();
        let name = meta.type_name();

        if !self.ambiguous_names.contains(name) {
            if self.type_name_to_id.contains_key(name) {
                self.type_name_to_id.remove(name);
                self.ambiguous_names.insert(Cow::Owned(name.to_owned()));
            } else {
                self.type_name_to_id
                    .insert(Cow::Owned(name.to_owned()), type_id);
            }
        }

        self.type_path_to_id
            .insert(meta.type_path().clone(), type_id);
        for alias in meta.aliases() {
            self.alias_to_id.insert(alias.clone(), type_id);
        }
    }

    /// Adds an alternate name for a registered type.
    pub fn add_alias(
        &mut self,
        alias: impl Into<Cow<'static, str>>,
        type_id: TypeId,
    ) -> Result<(), SchemaError> {
        let alias = alias.into();
        if !self.type_meta_table.contains(&type_id) || self.is_bound_elsewhere(&alias, type_id) {
            return Err(SchemaError::DuplicateName { name: alias });
        }
        self.alias_to_id.insert(alias, type_id);
        Ok(())
    }

    /// Runs the registration functions submitted by `#[derive(Reflect)]`.
    ///
    /// Only the first call does any work. Returns `true` if it ran.
    /// Always `false` without the `auto_register` feature.
    pub fn auto_register(&mut self) -> bool {
        #[cfg(feature = "auto_register")]
        {
            if self.auto_registered {
                return false;
            }
            self.auto_registered = true;
            crate::__macro_exports::auto_register::register_all(self);
            true
        }
        #[cfg(not(feature = "auto_register"))]
        {
            false
        }
    }

    #[inline]
    pub fn contains(&self, type_id: TypeId) -> bool {
        self.type_meta_table.contains(&type_id)
    }

    #[inline]
    pub fn get(&self, type_id: TypeId) -> Option<&TypeMeta> {
        self.type_meta_table.get(&type_id)
    }

    /// Looks a type up by its full path.
    pub fn get_with_type_path(&self, type_path: &str) -> Option<&TypeMeta> {
        self.type_path_to_id
            .get(type_path)
            .and_then(|id| self.get(*id))
    }

    /// Looks a type up by its short name, `None` if the name is ambiguous.
    pub fn get_with_type_name(&self, type_name: &str) -> Option<&TypeMeta> {
        self.type_name_to_id
            .get(type_name)
            .and_then(|id| self.get(*id))
    }

    /// Whether several registered types share the short name.
    #[inline]
    pub fn is_ambiguous(&self, type_name: &str) -> bool {
        self.ambiguous_names.contains(type_name)
    }

    /// Looks a type up by full path, then alias, then short name.
    pub fn resolve(&self, name: &str) -> Option<&TypeMeta> {
        self.get_with_type_path(name)
            .or_else(|| self.alias_to_id.get(name).and_then(|id| self.get(*id)))
            .or_else(|| self.get_with_type_name(name))
    }

    /// The canonical path of `name`, also for array variants of a
    /// registered type beyond the dimension limit.
    pub fn canonical_name(&self, name: &str) -> Option<Cow<'static, str>> {
        if let Some(meta) = self.resolve(name) {
            return Some(meta.type_path().clone());
        }
        let element = name.strip_suffix("[]")?;
        let element = self.canonical_name(element)?;
        Some(Cow::Owned(format!("{element}[]")))
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.type_meta_table.len()
    }

    /// Iterates over all entries in arbitrary order.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = &TypeMeta> {
        self.type_meta_table.values()
    }
}

// -----------------------------------------------------------------------------
// TypeRegistryArc

/// A shared [`TypeRegistry`] behind a read-write lock.
#[derive(Clone)]
pub struct TypeRegistryArc {
    internal: Arc<RwLock<TypeRegistry>>,
}

impl TypeRegistryArc {
    pub fn new(registry: TypeRegistry) -> Self {
        Self {
            internal: Arc::new(RwLock::new(registry)),
        }
    }

    /// Takes a read lock, ignoring poisoning.
    pub fn read(&self) -> RwLockReadGuard<'_, TypeRegistry> {
        self.internal.read().unwrap_or_else(PoisonError::into_inner)
    }

    /// Takes a write lock, ignoring poisoning.
    pub fn write(&self) -> RwLockWriteGuard<'_, TypeRegistry> {
        self.internal.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// The constructor registered under `name`.
    ///
    /// A miss runs [`TypeRegistry::auto_register`] once and retries.
    pub fn constructor(&self, name: &str) -> Result<Constructor, SchemaError> {
        fn lookup(registry: &TypeRegistry, name: &str) -> Option<Result<Constructor, SchemaError>> {
            let meta = registry.resolve(name)?;
            Some(
                meta.constructor()
                    .ok_or_else(|| SchemaError::NotConstructible(meta.type_path().clone())),
            )
        }

        if let Some(found) = lookup(&self.read(), name) {
            return found;
        }
        let mut registry = self.write();
        if registry.auto_register()
            && let Some(found) = lookup(&registry, name)
        {
            return found;
        }
        Err(SchemaError::UnknownType(name.to_owned()))
    }
}

#[cfg(test)]
mod tests {
    use std::any::TypeId;

    use super::TypeRegistry;
    use crate::config::Config;
    use crate::error::SchemaError;
    use crate::registry::TypeMeta;

    #[test]
    fn primitives_and_aliases() {
        let registry = TypeRegistry::new(&Config::default());
        assert!(registry.contains(TypeId::of::<i32>()));
        assert!(registry.contains(TypeId::of::<Box<[i32]>>()));
        assert!(registry.contains(TypeId::of::<Box<[Box<[i32]>]>>()));
        assert!(!registry.contains(TypeId::of::<Box<[Box<[Box<[i32]>]>]>>()));
        assert_eq!(registry.resolve("i64").unwrap().type_path(), "long");
        assert_eq!(registry.canonical_name("bool[][]").as_deref(), Some("boolean[][]"));
        assert_eq!(registry.canonical_name("i32[][][]").as_deref(), Some("int[][][]"));
        assert_eq!(registry.canonical_name("String").as_deref(), Some("string"));
        assert!(registry.canonical_name("Unknown").is_none());
    }

    #[test]
    fn alias_conflict() {
        let mut registry = TypeRegistry::new(&Config::default());
        let err = registry.add_alias("int", TypeId::of::<i64>()).unwrap_err();
        assert!(matches!(err, SchemaError::DuplicateName { .. }));
        registry.add_alias("integer", TypeId::of::<i64>()).unwrap();
        assert_eq!(registry.resolve("integer").unwrap().type_path(), "long");
    }

    #[test]
    fn idempotent_insert() {
        let mut registry = TypeRegistry::empty(&Config::default());
        assert!(registry.insert_meta(TypeMeta::of::<u8>()).unwrap());
        assert!(!registry.insert_meta(TypeMeta::of::<u8>()).unwrap());
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn dimension_limit() {
        let config = Config {
            array_dimensions: 3,
            ..Config::default()
        };
        let registry = TypeRegistry::new(&config);
        assert!(registry.contains(TypeId::of::<Box<[Box<[Box<[u8]>]>]>>()));
    }
}
