use std::io;

use crc32fast::Hasher;

/// An [`io::Write`] sink that only accumulates a CRC32 of the bytes.
///
/// Used by [`Archivist::checksum`](crate::Archivist::checksum) to hash the
/// text form without building it in memory.
#[derive(Default)]
pub struct ChecksumWriter {
    hasher: Hasher,
}

impl ChecksumWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// The checksum of everything written so far.
    pub fn finish(self) -> u32 {
        self.hasher.finalize()
    }
}

impl io::Write for ChecksumWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.hasher.update(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::ChecksumWriter;

    #[test]
    fn matches_one_shot_crc() {
        let mut sink = ChecksumWriter::new();
        sink.write_all(b"count=3\n").unwrap();
        sink.write_all(b"label=\"hi\"\n").unwrap();
        assert_eq!(sink.finish(), crc32fast::hash(b"count=3\nlabel=\"hi\"\n"));
    }
}
