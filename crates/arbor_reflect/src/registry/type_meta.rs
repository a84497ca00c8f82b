use std::any::TypeId;
use std::borrow::Cow;
use std::fmt;

use crate::Reflect;
use crate::value::{Category, Typed, short_name};

/// Constructor of a registered object type.
pub type Constructor = fn() -> Box<dyn Reflect>;

/// Registry entry of one type.
#[derive(Clone)]
pub struct TypeMeta {
    type_id: TypeId,
    type_path: Cow<'static, str>,
    category: Category,
    aliases: Vec<Cow<'static, str>>,
    constructor: Option<Constructor>,
}

impl TypeMeta {
    /// Creates the entry of `T`, without aliases or constructor.
    pub fn of<T: Typed>() -> Self {
        Self {
            type_id: TypeId::of::<T>(),
            type_path: T::type_path(),
            category: T::CATEGORY,
            aliases: Vec::new(),
            constructor: None,
        }
    }

    /// Makes the type constructible by name.
    #[inline]
    pub fn with_constructor(mut self, constructor: Constructor) -> Self {
        self.constructor = Some(constructor);
        self
    }

    /// Adds alternate names, such as the path before a rename.
    pub fn with_aliases(mut self, aliases: &[&'static str]) -> Self {
        self.aliases.extend(aliases.iter().map(|a| Cow::Borrowed(*a)));
        self
    }

    #[inline]
    pub fn type_id(&self) -> TypeId {
        self.type_id
    }

    #[inline]
    pub fn type_path(&self) -> &Cow<'static, str> {
        &self.type_path
    }

    /// The last segment of the type path.
    #[inline]
    pub fn type_name(&self) -> &str {
        short_name(&self.type_path)
    }

    #[inline]
    pub fn category(&self) -> Category {
        self.category
    }

    #[inline]
    pub fn aliases(&self) -> &[Cow<'static, str>] {
        &self.aliases
    }

    #[inline]
    pub fn constructor(&self) -> Option<Constructor> {
        self.constructor
    }
}

impl fmt::Debug for TypeMeta {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeMeta")
            .field("type_path", &self.type_path)
            .field("category", &self.category)
            .field("aliases", &self.aliases)
            .field("constructible", &self.constructor.is_some())
            .finish()
    }
}
