//! See [`Reflect`].
#![cfg_attr(docsrs, feature(doc_cfg))]

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

static REFLECT_ATTRIBUTE_NAME: &str = "reflect";

// -----------------------------------------------------------------------------
// Modules

mod derive_data;
mod impls;
mod path;

// -----------------------------------------------------------------------------
// Macros

/// # Reflection Derivation
///
/// For a struct with named fields, `#[derive(Reflect)]` implements
/// `Value`, `Typed`, `Reflect` and `Describe`. Every field takes part in
/// the schema and must itself implement `Typed`. The struct must implement
/// `Default`, which is its zero-argument constructor.
///
/// For an enum whose variants are all units, it implements `Value`,
/// `Typed` and `Enum`. The first variant is the constructed value.
///
/// Generic types are not supported.
///
/// ```rust, ignore
/// #[derive(Reflect, Default)]
/// #[reflect(type_path = "game::Piece", alias = "game::OldPiece")]
/// struct Piece {
///     #[reflect(alias = "name")]
///     label: String,
///     #[reflect(immutable)]
///     id: u64,
///     #[reflect(skip)]
///     cache: Vec<u8>,
/// }
/// ```
///
/// ## Type attributes
///
/// - `type_path = "..."`: the registered name, `module_path!()::Ident` by default.
/// - `alias = "..."`: an alternate name resolved when reading. Repeatable.
///
/// ## Field attributes
///
/// - `rename = "..."`: the archived name, the field ident by default.
/// - `alias = "..."`: an alternate archived name accepted when reading. Repeatable.
/// - `immutable`: merged reads rebuild the field instead of updating it in place.
/// - `skip`: left out of the schema, reset to its default on rebuild.
/// - `flatten`: inline the fields of an embedded `Reflect` struct.
/// - `archiver = "Text"`: archive with a specific archiver, such as a number as text.
///
/// ## Variant attributes
///
/// - `rename = "..."`: the archived constant name.
///
/// ## Auto Registration
///
/// With the `auto_register` feature, derived types are collected at link
/// time and registered the first time a type name lookup fails.
#[proc_macro_derive(Reflect, attributes(reflect))]
pub fn derive_reflect(input: TokenStream) -> TokenStream {
    let ast = parse_macro_input!(input as DeriveInput);

    match impls::reflect_impls(&ast) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.into_compile_error().into(),
    }
}
