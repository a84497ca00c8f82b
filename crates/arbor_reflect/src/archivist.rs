use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;
use std::sync::Arc;

use crate::config::Config;
use crate::dirty::write_dirty_fields;
use crate::error::{ArchiveError, SchemaError};
use crate::ops::{ChecksumWriter, values_equal};
use crate::registry::{TypeRegistry, TypeRegistryArc};
use crate::schema::{Schema, SchemaRegistry};
use crate::text::{TextReader, TextWriter};
use crate::value::{CopyMode, Typed, Value, short_name};
use crate::{Describe, Reflect};

/// Entry point of every archive operation.
///
/// Bundles the [`Config`], the [`TypeRegistry`] used to resolve header names
/// and the cache of field [`Schema`]s. An `Archivist` is cheap to share by
/// reference; clones of its [`TypeRegistryArc`] can back several instances.
///
/// # Examples
///
/// ```
/// use arbor_reflect::{Archivist, Reflect};
///
/// #[derive(Reflect, Default, Debug, PartialEq)]
/// struct Counter {
///     count: i32,
///     label: String,
/// }
///
/// let cx = Archivist::new();
/// let counter = Counter { count: 3, label: "hi".into() };
///
/// let text = cx.serialize(&counter).unwrap();
/// assert_eq!(text, "count=3\nlabel=\"hi\"\n");
///
/// let back: Counter = cx.deserialize(&text).unwrap();
/// assert_eq!(back, counter);
/// ```
pub struct Archivist {
    config: Config,
    types: TypeRegistryArc,
    schemas: SchemaRegistry,
}

impl Default for Archivist {
    fn default() -> Self {
        Self::new()
    }
}

impl Archivist {
    /// Creates an archivist with the default [`Config`].
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    pub fn with_config(config: Config) -> Self {
        let types = TypeRegistryArc::new(TypeRegistry::new(&config));
        Self::with_registry(config, types)
    }

    /// Creates an archivist over an existing, possibly shared, type registry.
    pub fn with_registry(config: Config, types: TypeRegistryArc) -> Self {
        Self {
            config,
            types,
            schemas: SchemaRegistry::new(),
        }
    }

    #[inline]
    pub fn config(&self) -> &Config {
        &self.config
    }

    #[inline]
    pub fn types(&self) -> &TypeRegistryArc {
        &self.types
    }

    #[inline]
    pub fn schemas(&self) -> &SchemaRegistry {
        &self.schemas
    }

    /// Registers `T` and the types it holds, making them constructible by
    /// name.
    pub fn register<T: Typed>(&self) -> Result<(), SchemaError> {
        self.types.write().register::<T>()
    }

    /// The schema of `T`, built on first use.
    pub fn schema_of<T: Describe>(&self) -> Result<Arc<Schema>, SchemaError> {
        self.schemas.get_or_build::<T>()
    }

    /// Constructs the registered object named `name`.
    pub fn construct_reflect(&self, name: &str) -> Result<Box<dyn Reflect>, SchemaError> {
        let constructor = self.types.constructor(name)?;
        Ok(constructor())
    }

    // -------------------------------------------------------------------------
    // Names

    /// The name written in headers for `type_path`.
    #[inline]
    pub fn header_name<'a>(&self, type_path: &'a str) -> &'a str {
        if self.config.strip_qualifiers {
            short_name(type_path)
        } else {
            type_path
        }
    }

    /// Whether a header names the type `type_path`.
    ///
    /// Accepts the full path and any registered alias. The short name is
    /// accepted while no other registered type shares it.
    pub fn matches_type(&self, header: &str, type_path: &str) -> bool {
        if header == type_path {
            return true;
        }
        if header == short_name(type_path) && !self.types.read().is_ambiguous(header) {
            return true;
        }
        let canonical = |types: &TypeRegistry| {
            types
                .canonical_name(header)
                .map(|name| name == type_path || types.canonical_name(type_path) == Some(name))
        };
        if let Some(matched) = canonical(&self.types.read()) {
            return matched;
        }
        let mut types = self.types.write();
        types.auto_register() && canonical(&types).unwrap_or(false)
    }

    // -------------------------------------------------------------------------
    // Serialize

    /// Writes the fields of `object` to a string.
    pub fn serialize(&self, object: &dyn Reflect) -> Result<String, ArchiveError> {
        let mut out = Vec::new();
        self.serialize_to(object, &mut out)?;
        Ok(String::from_utf8_lossy(&out).into_owned())
    }

    /// Writes the fields of `object` to caller-owned output, which is flushed
    /// but not closed.
    pub fn serialize_to(
        &self,
        object: &dyn Reflect,
        out: &mut dyn Write,
    ) -> Result<(), ArchiveError> {
        let mut writer = TextWriter::new(out).numbered(self.config.numbered_lines);
        object.write_fields(&mut writer, self)?;
        writer.flush()
    }

    /// Writes the fields of `object` to a new file at `path`.
    pub fn save(&self, object: &dyn Reflect, path: impl AsRef<Path>) -> Result<(), ArchiveError> {
        let path = path.as_ref();
        log::debug!("saving `{}` to {}", object.value_type_path(), path.display());
        let file = File::create(path).map_err(|source| ArchiveError::Io { line: 0, source })?;
        self.serialize_to(object, &mut BufWriter::new(file))
    }

    // -------------------------------------------------------------------------
    // Deserialize

    /// Builds a `T` from text.
    pub fn deserialize<T: Reflect + Typed>(&self, text: &str) -> Result<T, ArchiveError> {
        self.read::<T>(&mut text.as_bytes())
    }

    /// Builds a `T` from caller-owned input.
    pub fn read<T: Reflect + Typed>(&self, input: &mut dyn BufRead) -> Result<T, ArchiveError> {
        let mut object = T::construct("", self)?;
        self.read_from(input, &mut object, false)?;
        Ok(object)
    }

    /// Builds a `T` from the file at `path`.
    pub fn load<T: Reflect + Typed>(&self, path: impl AsRef<Path>) -> Result<T, ArchiveError> {
        let mut object = T::construct("", self)?;
        self.load_into(path, &mut object, false)?;
        Ok(object)
    }

    /// Replaces the state of `object` with the text.
    ///
    /// Fields missing from the text get their constructed value.
    pub fn deserialize_into(
        &self,
        text: &str,
        object: &mut dyn Reflect,
    ) -> Result<(), ArchiveError> {
        self.read_from(&mut text.as_bytes(), object, false)
    }

    /// Merges the text onto `object`.
    ///
    /// Fields missing from the text keep their value, nested objects and
    /// collections are updated in place where their shape still matches.
    pub fn merge(&self, text: &str, object: &mut dyn Reflect) -> Result<(), ArchiveError> {
        self.read_from(&mut text.as_bytes(), object, true)
    }

    /// Reads caller-owned input into `object`, merging with `keep`.
    pub fn read_from(
        &self,
        input: &mut dyn BufRead,
        object: &mut dyn Reflect,
        keep: bool,
    ) -> Result<(), ArchiveError> {
        let mut reader = TextReader::new(input);
        if !keep {
            object.reflect_reset();
        }
        object.read_fields(&mut reader, self, keep)
    }

    /// Reads the file at `path` into `object`, merging with `keep`.
    pub fn load_into(
        &self,
        path: impl AsRef<Path>,
        object: &mut dyn Reflect,
        keep: bool,
    ) -> Result<(), ArchiveError> {
        let path = path.as_ref();
        log::debug!("loading `{}` from {}", object.value_type_path(), path.display());
        let file = File::open(path).map_err(|source| ArchiveError::Io { line: 0, source })?;
        self.read_from(&mut BufReader::new(file), object, keep)
    }

    /// [`load_into`](Self::load_into), logging the error instead of
    /// returning it.
    pub fn try_load(&self, path: impl AsRef<Path>, object: &mut dyn Reflect, keep: bool) -> bool {
        let path = path.as_ref();
        match self.load_into(path, object, keep) {
            Ok(()) => true,
            Err(err) => {
                log::error!("failed to load {}: {err}", path.display());
                false
            }
        }
    }

    /// [`merge`](Self::merge), logging the error instead of returning it.
    pub fn try_merge(&self, text: &str, object: &mut dyn Reflect) -> bool {
        match self.merge(text, object) {
            Ok(()) => true,
            Err(err) => {
                log::error!("failed to merge into `{}`: {err}", object.value_type_path());
                false
            }
        }
    }

    // -------------------------------------------------------------------------
    // Structural operations

    /// Copies `value` recursively, including the content of `Arc` fields.
    pub fn deep_copy<T: Typed>(&self, value: &T) -> Result<T, SchemaError> {
        value.copy(CopyMode::Deep, self)
    }

    /// Copies `value` recursively, sharing the content of `Arc` fields.
    pub fn shallow_copy<T: Typed>(&self, value: &T) -> Result<T, SchemaError> {
        value.copy(CopyMode::Shallow, self)
    }

    /// Copies an object of any registered type.
    pub fn copy_dyn(
        &self,
        object: &dyn Reflect,
        mode: CopyMode,
    ) -> Result<Box<dyn Reflect>, SchemaError> {
        object.reflect_copy(mode, self)
    }

    /// Compares two values field by field.
    pub fn deep_equals(&self, a: &dyn Value, b: &dyn Value) -> Result<bool, SchemaError> {
        values_equal(a, b, self)
    }

    /// CRC32 of the unnumbered text form of `object`.
    pub fn checksum(&self, object: &dyn Reflect) -> Result<u32, ArchiveError> {
        let mut sink = ChecksumWriter::new();
        let mut writer = TextWriter::new(&mut sink);
        object.write_fields(&mut writer, self)?;
        Ok(sink.finish())
    }

    // -------------------------------------------------------------------------
    // Dirty tracking

    /// Whether anything inside `value` changed since the last
    /// [`mark_clean`](Self::mark_clean).
    #[inline]
    pub fn is_dirty(&self, value: &dyn Value) -> bool {
        value.is_dirty()
    }

    #[inline]
    pub fn mark_clean(&self, value: &mut dyn Value) {
        value.mark_clean();
    }

    /// Writes only the changed parts of `object`.
    ///
    /// The result can be [`merge`](Self::merge)d onto a copy taken at the
    /// last clean to bring it up to date.
    pub fn serialize_dirty(&self, object: &dyn Reflect) -> Result<String, ArchiveError> {
        let mut out = Vec::new();
        self.serialize_dirty_to(object, &mut out)?;
        Ok(String::from_utf8_lossy(&out).into_owned())
    }

    pub fn serialize_dirty_to(
        &self,
        object: &dyn Reflect,
        out: &mut dyn Write,
    ) -> Result<(), ArchiveError> {
        let mut writer = TextWriter::new(out).numbered(self.config.numbered_lines);
        write_dirty_fields(object, &mut writer, self)?;
        writer.flush()
    }
}

impl core::fmt::Debug for Archivist {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Archivist")
            .field("config", &self.config)
            .field("types", &self.types.read().len())
            .field("schemas", &self.schemas.len())
            .finish()
    }
}

