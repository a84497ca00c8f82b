use std::io::BufRead;

use crate::error::{ArchiveError, FormatError};

// -----------------------------------------------------------------------------
// Line

/// A significant line returned by [`TextReader`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    /// Trimmed content, without the trailing `{`.
    pub text: String,
    /// Whether the line opened a nested block.
    pub opens: bool,
}

struct Peeked {
    item: Option<Line>,
    depth: usize,
    line: usize,
}

// -----------------------------------------------------------------------------
// TextReader

/// Reads significant lines while tracking the line number and nesting depth.
///
/// - Blank lines and lines starting with `#` are skipped.
/// - A line ending with `{` opens a block; the brace is removed from the result.
/// - A line that is exactly `}` closes a block and reads as `None`.
/// - The end of input also reads as `None`, or fails when a block is still open.
///
/// # Examples
///
/// ```
/// use arbor_reflect::text::TextReader;
///
/// let mut input = "a=1\n# note\nb=Vec {\n}\n".as_bytes();
/// let mut reader = TextReader::new(&mut input);
///
/// assert_eq!(reader.read_line().unwrap().unwrap().text, "a=1");
/// let line = reader.read_line().unwrap().unwrap();
/// assert!(line.opens);
/// assert_eq!(reader.depth(), 1);
/// assert!(reader.read_line().unwrap().is_none());
/// assert_eq!(reader.depth(), 0);
/// ```
pub struct TextReader<'a> {
    input: &'a mut dyn BufRead,
    buffer: String,
    line: usize,
    depth: usize,
    peeked: Option<Peeked>,
}

impl<'a> TextReader<'a> {
    /// Creates a reader over caller-owned input.
    pub fn new(input: &'a mut dyn BufRead) -> Self {
        Self {
            input,
            buffer: String::new(),
            line: 0,
            depth: 0,
            peeked: None,
        }
    }

    /// Number of the last physical line consumed.
    #[inline]
    pub fn line(&self) -> usize {
        self.line
    }

    /// Current block nesting depth.
    #[inline]
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Builds a format error at the current line.
    #[inline]
    pub fn error(&self, source: FormatError) -> ArchiveError {
        ArchiveError::Format {
            line: self.line,
            source,
        }
    }

    /// Attaches the current line to an error raised without position.
    #[inline]
    pub fn locate(&self, err: impl Into<ArchiveError>) -> ArchiveError {
        err.into().at_line(self.line)
    }

    fn next_significant(&mut self) -> Result<Option<Line>, ArchiveError> {
        loop {
            self.buffer.clear();
            let read = self
                .input
                .read_line(&mut self.buffer)
                .map_err(|source| ArchiveError::Io {
                    line: self.line + 1,
                    source,
                })?;
            if read == 0 {
                if self.depth > 0 {
                    return Err(self.error(FormatError::UnexpectedEnd { depth: self.depth }));
                }
                return Ok(None);
            }
            self.line += 1;

            let trimmed = self.buffer.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }
            if trimmed == "}" {
                if self.depth == 0 {
                    return Err(self.error(FormatError::UnexpectedClose));
                }
                self.depth -= 1;
                return Ok(None);
            }
            if let Some(head) = trimmed.strip_suffix('{') {
                let text = head.trim_end().to_owned();
                self.depth += 1;
                return Ok(Some(Line { text, opens: true }));
            }
            let text = trimmed.to_owned();
            return Ok(Some(Line { text, opens: false }));
        }
    }

    /// Reads the next significant line.
    ///
    /// Returns `None` when a block closes or the input ends at depth zero.
    pub fn read_line(&mut self) -> Result<Option<Line>, ArchiveError> {
        if let Some(peeked) = self.peeked.take() {
            self.depth = peeked.depth;
            self.line = peeked.line;
            return Ok(peeked.item);
        }
        self.next_significant()
    }

    /// Returns the next significant line without consuming it.
    pub fn peek(&mut self) -> Result<Option<&Line>, ArchiveError> {
        if self.peeked.is_none() {
            let (depth, line) = (self.depth, self.line);
            let item = self.next_significant()?;
            self.peeked = Some(Peeked {
                item,
                depth: self.depth,
                line: self.line,
            });
            self.depth = depth;
            self.line = line;
        }
        Ok(self.peeked.as_ref().and_then(|p| p.item.as_ref()))
    }

    /// Reads a line that must exist in the current block.
    pub fn expect_line(&mut self) -> Result<Line, ArchiveError> {
        match self.read_line()? {
            Some(line) => Ok(line),
            None => Err(self.error(FormatError::MissingValue)),
        }
    }

    /// Reads the closing `}` of the current block.
    pub fn expect_close(&mut self) -> Result<(), ArchiveError> {
        match self.read_line()? {
            None => Ok(()),
            Some(line) => Err(self.error(FormatError::ExpectedClose(line.text))),
        }
    }

    /// Reads exactly one value line, then the `}` closing its block.
    ///
    /// Used for leaf payloads that never have children.
    pub fn read_leaf(&mut self) -> Result<Line, ArchiveError> {
        let line = self.expect_line()?;
        if line.opens {
            return Err(self.error(FormatError::UnexpectedBlock(line.text)));
        }
        self.expect_close()?;
        Ok(line)
    }

    /// Consumes lines until the depth is back to `depth`.
    pub fn skip_to_depth(&mut self, depth: usize) -> Result<(), ArchiveError> {
        while self.depth > depth {
            self.read_line()?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::TextReader;
    use crate::error::{ArchiveError, FormatError};

    #[test]
    fn skips_comments_and_blanks() {
        let mut input = "\n# header\n   \nvalue=1\n".as_bytes();
        let mut reader = TextReader::new(&mut input);
        let line = reader.read_line().unwrap().unwrap();
        assert_eq!(line.text, "value=1");
        assert_eq!(reader.line(), 4);
        assert!(reader.read_line().unwrap().is_none());
    }

    #[test]
    fn peek_then_read() {
        let mut input = "x=Item {\n}\n".as_bytes();
        let mut reader = TextReader::new(&mut input);
        assert_eq!(reader.peek().unwrap().unwrap().text, "x=Item");
        assert_eq!(reader.depth(), 0);
        assert_eq!(reader.line(), 0);
        let line = reader.read_line().unwrap().unwrap();
        assert!(line.opens);
        assert_eq!(reader.depth(), 1);
        assert!(reader.read_line().unwrap().is_none());
    }

    #[test]
    fn eof_inside_block() {
        let mut input = "a=Item {\nb=1\n".as_bytes();
        let mut reader = TextReader::new(&mut input);
        reader.read_line().unwrap();
        reader.read_line().unwrap();
        let err = reader.read_line().unwrap_err();
        assert!(matches!(
            err,
            ArchiveError::Format {
                line: 2,
                source: FormatError::UnexpectedEnd { depth: 1 }
            }
        ));
    }

    #[test]
    fn leaf_requires_close() {
        let mut input = "i32 2 {\n1 2\n3\n}\n".as_bytes();
        let mut reader = TextReader::new(&mut input);
        reader.read_line().unwrap();
        let err = reader.read_leaf().unwrap_err();
        assert!(matches!(
            err,
            ArchiveError::Format {
                line: 3,
                source: FormatError::ExpectedClose(ref text),
            } if text == "3"
        ));
    }

    #[test]
    fn skip_nested() {
        let mut input = "a=X {\nb=Y {\nc=1\n}\n}\nd=2\n".as_bytes();
        let mut reader = TextReader::new(&mut input);
        reader.read_line().unwrap();
        reader.skip_to_depth(0).unwrap();
        assert_eq!(reader.read_line().unwrap().unwrap().text, "d=2");
    }

    #[test]
    fn stray_close() {
        let mut input = "}\n".as_bytes();
        let mut reader = TextReader::new(&mut input);
        assert!(matches!(
            reader.read_line(),
            Err(ArchiveError::Format {
                source: FormatError::UnexpectedClose,
                ..
            })
        ));
    }
}
