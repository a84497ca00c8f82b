use proc_macro2::Span;
use syn::meta::ParseNestedMeta;
use syn::{Attribute, LitStr};

use crate::REFLECT_ATTRIBUTE_NAME;

fn parse_lit(meta: &ParseNestedMeta) -> syn::Result<LitStr> {
    let lit: LitStr = meta.value()?.parse()?;
    if lit.value().is_empty() {
        return Err(syn::Error::new(lit.span(), "expected a non-empty string"));
    }
    Ok(lit)
}

/// Runs `parse` on every item of every `#[reflect(...)]` attribute.
fn for_each_reflect_meta(
    attrs: &[Attribute],
    mut parse: impl FnMut(ParseNestedMeta) -> syn::Result<()>,
) -> syn::Result<()> {
    for attr in attrs {
        if attr.path().is_ident(REFLECT_ATTRIBUTE_NAME) {
            attr.parse_nested_meta(&mut parse)?;
        }
    }
    Ok(())
}

// -----------------------------------------------------------------------------
// TypeAttributes

/// `#[reflect(...)]` on the type itself.
#[derive(Default, Debug)]
pub(crate) struct TypeAttributes {
    /// `type_path = "..."`
    pub type_path: Option<LitStr>,
    /// `alias = "..."`, repeatable.
    pub aliases: Vec<LitStr>,
}

impl TypeAttributes {
    pub fn parse_attrs(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut this = Self::default();
        for_each_reflect_meta(attrs, |meta| {
            if meta.path.is_ident("type_path") {
                if this.type_path.is_some() {
                    return Err(meta.error("`type_path` is already set"));
                }
                this.type_path = Some(parse_lit(&meta)?);
                Ok(())
            } else if meta.path.is_ident("alias") {
                this.aliases.push(parse_lit(&meta)?);
                Ok(())
            } else {
                Err(meta.error("unknown type attribute, expected `type_path` or `alias`"))
            }
        })?;
        Ok(this)
    }
}

// -----------------------------------------------------------------------------
// FieldAttributes

/// `#[reflect(...)]` on a field or an enum variant.
///
/// Flags hold the span of their attribute for error reporting.
#[derive(Default, Debug)]
pub(crate) struct FieldAttributes {
    pub rename: Option<LitStr>,
    pub aliases: Vec<LitStr>,
    pub archiver: Option<LitStr>,
    pub skip: Option<Span>,
    pub immutable: Option<Span>,
    pub flatten: Option<Span>,
}

const ARCHIVERS: &[&str] = &["Primitive", "Text", "Enum", "Object", "Array", "List", "Map"];

impl FieldAttributes {
    pub fn parse_attrs(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut this = Self::default();
        for_each_reflect_meta(attrs, |meta| {
            let span = meta.path.get_ident().map(syn::Ident::span);
            if meta.path.is_ident("rename") {
                if this.rename.is_some() {
                    return Err(meta.error("`rename` is already set"));
                }
                this.rename = Some(parse_lit(&meta)?);
            } else if meta.path.is_ident("alias") {
                this.aliases.push(parse_lit(&meta)?);
            } else if meta.path.is_ident("archiver") {
                let lit = parse_lit(&meta)?;
                if !ARCHIVERS.contains(&lit.value().as_str()) {
                    return Err(syn::Error::new(
                        lit.span(),
                        format!("unknown archiver, expected one of {ARCHIVERS:?}"),
                    ));
                }
                this.archiver = Some(lit);
            } else if meta.path.is_ident("skip") {
                this.skip = span;
            } else if meta.path.is_ident("immutable") {
                this.immutable = span;
            } else if meta.path.is_ident("flatten") {
                this.flatten = span;
            } else {
                return Err(meta.error(
                    "unknown field attribute, expected one of \
                     `rename`, `alias`, `archiver`, `skip`, `immutable`, `flatten`",
                ));
            }
            Ok(())
        })?;
        this.validity()?;
        Ok(this)
    }

    fn validity(&self) -> syn::Result<()> {
        if let Some(span) = self.skip
            && (self.rename.is_some()
                || !self.aliases.is_empty()
                || self.archiver.is_some()
                || self.immutable.is_some()
                || self.flatten.is_some())
        {
            return Err(syn::Error::new(span, "`skip` cannot be combined with other attributes"));
        }
        if let Some(span) = self.flatten
            && (self.rename.is_some() || !self.aliases.is_empty() || self.archiver.is_some())
        {
            return Err(syn::Error::new(
                span,
                "a flattened field has no name of its own, `rename`, `alias` and `archiver` do not apply",
            ));
        }
        Ok(())
    }

    /// Enum variants only accept `rename`.
    pub fn check_variant(&self, span: Span) -> syn::Result<()> {
        if !self.aliases.is_empty()
            || self.archiver.is_some()
            || self.skip.is_some()
            || self.immutable.is_some()
            || self.flatten.is_some()
        {
            return Err(syn::Error::new(span, "enum variants only accept `rename`"));
        }
        Ok(())
    }
}
