use std::collections::BTreeMap;
use std::env;
use std::path::{Path, PathBuf};
use std::sync::{PoisonError, RwLock};
use std::time::SystemTime;

use toml_edit::{Document, Item, Table};

/// Locates the path of an `arbor` crate as seen from the Cargo.toml of the
/// crate invoking a derive.
///
/// # Example
///
/// ```rust
/// # use arbor_macro_utils::Manifest;
/// let p: syn::Path = Manifest::shared(|m| m.get_crate_path("arbor_reflect"));
/// ```
///
/// Reading the manifest is not free, call this once per macro invocation
/// and pass the resulting path around.
///
/// # Resolution rules
///
/// 1. If the crate is listed in `dependencies`, return `::crate_name`.
/// 2. If the name starts with `arbor_` and the caller depends on the facade
///    crate `arbor`, return `::arbor::short_name` (`arbor_reflect` -> `::arbor::reflect`).
/// 3. Repeat 1-2 with `dev-dependencies`.
/// 4. Otherwise fall back to `::crate_name`.
///
/// A crate referring to itself needs `extern crate self as crate_name;` in its
/// root for the fallback to resolve.
#[derive(Debug)]
pub struct Manifest {
    pub manifest: Document<Box<str>>,
    pub modified_time: Option<SystemTime>,
}

const FACADE_NAME: &str = "arbor";
const CRATE_PREFIX: &str = "arbor_";

impl Manifest {
    fn manifest_path() -> Option<PathBuf> {
        let mut path = PathBuf::from(env::var_os("CARGO_MANIFEST_DIR")?);
        path.push("Cargo.toml");
        path.exists().then_some(path)
    }

    fn modified_time(path: &Path) -> Option<SystemTime> {
        std::fs::metadata(path).and_then(|m| m.modified()).ok()
    }

    // An unreadable manifest behaves like one without dependencies.
    fn read_manifest(path: Option<&Path>) -> Document<Box<str>> {
        let text = path
            .and_then(|p| std::fs::read_to_string(p).ok())
            .unwrap_or_default()
            .into_boxed_str();
        Document::parse(text).unwrap_or_else(|_| Self::empty_document())
    }

    fn empty_document() -> Document<Box<str>> {
        match Document::parse(Box::<str>::from("")) {
            Ok(doc) => doc,
            Err(e) => panic!("empty manifest must parse: {e}"),
        }
    }

    fn parse_path(path: &str) -> Option<syn::Path> {
        syn::parse_str(path).ok()
    }

    fn find_in_deps(deps: &Table, name: &str) -> Option<syn::Path> {
        if deps.contains_key(name) {
            return Self::parse_path(&format!("::{name}"));
        }
        let module = name.strip_prefix(CRATE_PREFIX)?;
        if deps.contains_key(FACADE_NAME) {
            return Self::parse_path(&format!("::{FACADE_NAME}::{module}"));
        }
        None
    }

    /// Returns the path of the package `name` as resolved from the caller's
    /// Cargo.toml. See the type documentation for the rules.
    pub fn get_crate_path(&self, name: &str) -> syn::Path {
        for table in ["dependencies", "dev-dependencies"] {
            if let Some(Item::Table(deps)) = self.manifest.get(table)
                && let Some(path) = Self::find_in_deps(deps, name)
            {
                return path;
            }
        }

        Self::parse_path(&format!("::{name}"))
            .unwrap_or_else(|| panic!("`{name}` is not a valid crate name"))
    }

    /// Runs `func` with the cached manifest of the calling crate, re-reading
    /// it when the file changed since the last call.
    pub fn shared<R>(func: impl FnOnce(&Self) -> R) -> R {
        static MANIFESTS: RwLock<BTreeMap<PathBuf, Manifest>> = RwLock::new(BTreeMap::new());

        let Some(path) = Self::manifest_path() else {
            let manifest = Manifest {
                manifest: Self::empty_document(),
                modified_time: None,
            };
            return func(&manifest);
        };
        let modified_time = Self::modified_time(&path);

        let manifests = MANIFESTS.read().unwrap_or_else(PoisonError::into_inner);
        if let Some(manifest) = manifests.get(&path)
            && manifest.modified_time.is_some()
            && manifest.modified_time == modified_time
        {
            return func(manifest);
        }
        drop(manifests);

        let manifest = Manifest {
            manifest: Self::read_manifest(Some(&path)),
            modified_time,
        };
        let result = func(&manifest);

        MANIFESTS
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(path, manifest);

        result
    }
}

#[cfg(test)]
mod tests {
    use toml_edit::{Document, Item};

    use super::Manifest;

    fn manifest(text: &str) -> Manifest {
        Manifest {
            manifest: Document::parse(Box::<str>::from(text)).unwrap(),
            modified_time: None,
        }
    }

    fn path_string(path: &syn::Path) -> String {
        let segments: Vec<String> = path.segments.iter().map(|s| s.ident.to_string()).collect();
        segments.join("::")
    }

    #[test]
    fn direct_dependency() {
        let m = manifest("[dependencies]\narbor_reflect = \"0.0.1\"\n");
        assert!(matches!(m.manifest.get("dependencies"), Some(Item::Table(_))));
        assert_eq!(path_string(&m.get_crate_path("arbor_reflect")), "arbor_reflect");
    }

    #[test]
    fn through_facade() {
        let m = manifest("[dev-dependencies]\narbor = \"0.0.1\"\n");
        assert_eq!(path_string(&m.get_crate_path("arbor_reflect")), "arbor::reflect");
    }

    #[test]
    fn fallback() {
        let m = manifest("");
        assert_eq!(path_string(&m.get_crate_path("arbor_reflect")), "arbor_reflect");
    }
}
