use serde::{Deserialize, Serialize};

/// Highest array dimension registered for a type, see [`Config::array_dimensions`].
pub const MAX_ARRAY_DIMENSIONS: usize = 3;

/// Options of an [`Archivist`](crate::Archivist).
///
/// Missing keys take their default value, so a partial document is enough:
///
/// ```
/// use arbor_reflect::Config;
///
/// let config = Config {
///     strict_unknown_fields: true,
///     ..Config::default()
/// };
/// assert_eq!(config.array_dimensions, 2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Raise a format error on fields missing from the schema instead of
    /// logging and skipping them.
    pub strict_unknown_fields: bool,
    /// Write object headers with their short name (`Piece`) instead of the
    /// full path (`game::board::Piece`). Short names must be unique.
    pub strip_qualifiers: bool,
    /// Array variants (`T[]`, `T[][]`, ...) registered alongside each type.
    /// Clamped to [`MAX_ARRAY_DIMENSIONS`].
    pub array_dimensions: usize,
    /// Prefix every written line with its number. Diagnostic output only,
    /// numbered text cannot be read back.
    pub numbered_lines: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            strict_unknown_fields: false,
            strip_qualifiers: false,
            array_dimensions: 2,
            numbered_lines: false,
        }
    }
}

impl Config {
    /// The array dimension limit after clamping.
    #[inline]
    pub fn array_dimensions(&self) -> usize {
        self.array_dimensions.min(MAX_ARRAY_DIMENSIONS)
    }
}

#[cfg(test)]
mod tests {
    use super::Config;

    #[test]
    fn partial_ron() {
        let config: Config = ron::from_str("(strict_unknown_fields: true)").unwrap();
        assert!(config.strict_unknown_fields);
        assert!(!config.strip_qualifiers);
        assert_eq!(config.array_dimensions, 2);
    }

    #[test]
    fn clamp_dimensions() {
        let config: Config = ron::from_str("(array_dimensions: 9)").unwrap();
        assert_eq!(config.array_dimensions(), 3);
    }
}
