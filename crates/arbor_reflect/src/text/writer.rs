use std::io::Write;

use crate::error::ArchiveError;

const INDENT: &str = "  ";

/// Writes lines with indentation that follows the block depth.
///
/// [`push`](Self::push) ends the current line with ` {` and indents what
/// follows; [`pop`](Self::pop) dedents and writes `}` on its own line.
///
/// # Examples
///
/// ```
/// use arbor_reflect::text::TextWriter;
///
/// let mut out = Vec::new();
/// let mut writer = TextWriter::new(&mut out);
/// writer.print("tags=Vec").unwrap();
/// writer.push().unwrap();
/// writer.write_line("int 2").unwrap();
/// writer.write_line("1 2").unwrap();
/// writer.pop().unwrap();
///
/// assert_eq!(String::from_utf8(out).unwrap(), "tags=Vec {\n  int 2\n  1 2\n}\n");
/// ```
pub struct TextWriter<'a> {
    out: &'a mut dyn Write,
    depth: usize,
    line: usize,
    pending: bool,
    numbered: bool,
}

impl<'a> TextWriter<'a> {
    /// Creates a writer over caller-owned output. The output is never closed.
    pub fn new(out: &'a mut dyn Write) -> Self {
        Self {
            out,
            depth: 0,
            line: 1,
            pending: false,
            numbered: false,
        }
    }

    /// Enables line numbering, a diagnostic aid the reader does not accept.
    pub fn numbered(mut self, numbered: bool) -> Self {
        self.numbered = numbered;
        self
    }

    /// Number of the line being written.
    #[inline]
    pub fn line(&self) -> usize {
        self.line
    }

    /// Current block depth.
    #[inline]
    pub fn depth(&self) -> usize {
        self.depth
    }

    fn raw(&mut self, text: &str) -> Result<(), ArchiveError> {
        self.out
            .write_all(text.as_bytes())
            .map_err(|source| ArchiveError::Io {
                line: self.line,
                source,
            })
    }

    /// Appends `text` to the current line, indenting it if the line is empty.
    pub fn print(&mut self, text: &str) -> Result<(), ArchiveError> {
        if !self.pending {
            self.pending = true;
            if self.numbered {
                let number = format!("{:>5}: ", self.line);
                self.raw(&number)?;
            }
            for _ in 0..self.depth {
                self.raw(INDENT)?;
            }
        }
        self.raw(text)
    }

    /// Ends the current line.
    pub fn println(&mut self) -> Result<(), ArchiveError> {
        self.pending = false;
        self.line += 1;
        self.raw("\n")
    }

    /// Prints `text` as a whole line.
    pub fn write_line(&mut self, text: &str) -> Result<(), ArchiveError> {
        self.print(text)?;
        self.println()
    }

    /// Opens a block at the end of the current line.
    pub fn push(&mut self) -> Result<(), ArchiveError> {
        self.print(" {")?;
        self.depth += 1;
        self.println()
    }

    /// Closes the innermost block.
    ///
    /// # Panics
    ///
    /// Panics if no block is open.
    pub fn pop(&mut self) -> Result<(), ArchiveError> {
        assert!(self.depth > 0, "`TextWriter::pop` without a matching `push`");
        self.depth -= 1;
        self.write_line("}")
    }

    /// Flushes the underlying output.
    pub fn flush(&mut self) -> Result<(), ArchiveError> {
        self.out.flush().map_err(|source| ArchiveError::Io {
            line: self.line,
            source,
        })
    }
}
