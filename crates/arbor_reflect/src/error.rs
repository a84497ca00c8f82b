//! Error types.
//!
//! [`FormatError`] describes malformed text, [`SchemaError`] a problem with the
//! declared types or fields. Both are wrapped in [`ArchiveError`], which
//! attaches the input (or output) line when one is known.

use std::borrow::Cow;
use std::io;

use thiserror::Error;

use crate::value::Category;

// -----------------------------------------------------------------------------
// FormatError

/// The text does not follow the archive grammar.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum FormatError {
    #[error("malformed field line `{0}`, expected `name=value`")]
    MalformedField(String),
    #[error("cannot read `{token}` as `{expected}`")]
    InvalidToken {
        token: String,
        expected: Cow<'static, str>,
    },
    #[error("invalid header `{0}`, expected `<type> <length>`")]
    InvalidHeader(String),
    #[error("invalid escape sequence in `{0}`")]
    InvalidEscape(String),
    #[error("expected {expected} elements, found {actual}")]
    LengthMismatch { expected: usize, actual: usize },
    #[error("expected closing `}}`, found `{0}`")]
    ExpectedClose(String),
    #[error("`{0}` must open a block")]
    ExpectedBlock(String),
    #[error("`{0}` cannot open a block")]
    UnexpectedBlock(String),
    #[error("unmatched closing `}}`")]
    UnexpectedClose,
    #[error("unexpected end of input inside a block at depth {depth}")]
    UnexpectedEnd { depth: usize },
    #[error("expected a value, found the end of the block")]
    MissingValue,
    #[error("unknown field `{field}` for `{owner}`, known fields: {known}")]
    UnknownField {
        field: String,
        owner: Cow<'static, str>,
        known: String,
    },
    #[error("expected `{expected}`, found `{found}`")]
    TypeMismatch {
        expected: Cow<'static, str>,
        found: String,
    },
    #[error("`null` is not allowed for `{0}`")]
    NullNotAllowed(Cow<'static, str>),
    #[error("`{token}` is not a constant of `{owner}`")]
    UnknownConstant {
        token: String,
        owner: Cow<'static, str>,
    },
}

// -----------------------------------------------------------------------------
// SchemaError

/// A type or field declaration cannot be used.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SchemaError {
    #[error("field `{field}` is registered twice on `{owner}`")]
    DuplicateField {
        owner: Cow<'static, str>,
        field: &'static str,
    },
    #[error("type name `{name}` is already bound to another type")]
    DuplicateName { name: Cow<'static, str> },
    #[error("short type name `{0}` is shared by several types")]
    AmbiguousName(Cow<'static, str>),
    #[error("archiver `{archiver:?}` cannot handle field `{field}` of category `{category:?}`")]
    UnsupportedCategory {
        field: &'static str,
        category: Category,
        archiver: crate::archiver::Archiver,
    },
    #[error("field `{field}` of `{owner}` is tagged {tag} and cannot be registered")]
    ExcludedField {
        owner: Cow<'static, str>,
        field: &'static str,
        tag: &'static str,
    },
    #[error("type `{0}` is not registered")]
    UnknownType(String),
    #[error("type `{0}` has no zero-argument constructor")]
    NotConstructible(Cow<'static, str>),
    #[error("expected a value of category `{expected:?}`, found `{found:?}`")]
    CategoryMismatch { expected: Category, found: Category },
    #[error("field `{field}` does not belong to `{owner}`")]
    OwnerMismatch {
        owner: Cow<'static, str>,
        field: &'static str,
    },
}

// -----------------------------------------------------------------------------
// ArchiveError

/// Any failure of an archive operation.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ArchiveError {
    #[error("line {line}: {source}")]
    Format { line: usize, source: FormatError },
    #[error("line {line}: {source}")]
    SchemaAt { line: usize, source: SchemaError },
    #[error(transparent)]
    Schema(#[from] SchemaError),
    #[error("line {line}: {source}")]
    Io { line: usize, source: io::Error },
}

impl ArchiveError {
    /// Attaches `line` to a schema error raised without position.
    pub fn at_line(self, line: usize) -> Self {
        match self {
            Self::Schema(source) => Self::SchemaAt { line, source },
            other => other,
        }
    }

    /// Returns the line the error refers to, if any.
    pub fn line(&self) -> Option<usize> {
        match self {
            Self::Format { line, .. } | Self::SchemaAt { line, .. } | Self::Io { line, .. } => {
                Some(*line)
            }
            Self::Schema(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{ArchiveError, FormatError, SchemaError};

    #[test]
    fn display_carries_line() {
        let err = ArchiveError::Format {
            line: 7,
            source: FormatError::LengthMismatch {
                expected: 3,
                actual: 2,
            },
        };
        assert_eq!(err.to_string(), "line 7: expected 3 elements, found 2");
        assert_eq!(err.line(), Some(7));
    }

    #[test]
    fn locate_schema_error() {
        let err = ArchiveError::from(SchemaError::UnknownType("Rook".into()));
        assert_eq!(err.line(), None);
        let err = err.at_line(12);
        assert_eq!(err.line(), Some(12));
        assert_eq!(err.to_string(), "line 12: type `Rook` is not registered");
    }
}
