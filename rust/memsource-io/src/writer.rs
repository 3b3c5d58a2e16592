//! Bounded writer over a source.

use memsource_bits::ByteOrder;
use memsource_common::{Error, Result};
use memsource_source::Source;

use crate::window::Window;

/// Writes bytes forward into `[start, start + length)` of a [`Source`].
///
/// A write that does not fit in the rest of the window fails with a capacity error and
/// writes nothing.
#[derive(Debug, Clone)]
pub struct SourceWriter {
    window: Window,
}

impl SourceWriter {
    /// A writer over the whole source.
    pub fn new(source: Source) -> SourceWriter {
        let length = source.length();
        SourceWriter {
            window: Window {
                source,
                start: 0,
                end: length,
                offset: 0,
            },
        }
    }

    /// A writer over `length` bytes starting at `start`.
    pub fn with_window(source: Source, start: u64, length: u64) -> Result<SourceWriter> {
        Ok(SourceWriter {
            window: Window::new(source, start, length)?,
        })
    }

    pub fn source(&self) -> &Source {
        &self.window.source
    }

    pub fn begin_offset(&self) -> u64 {
        self.window.start
    }

    /// Absolute source offset of the next byte to write.
    pub fn offset(&self) -> u64 {
        self.window.offset
    }

    pub fn length(&self) -> u64 {
        self.window.length()
    }

    /// Bytes that can still be written.
    pub fn available(&self) -> u64 {
        self.window.available()
    }

    /// Moves to an absolute source offset within `[start, start + length]`.
    pub fn seek_to(&mut self, offset: u64) -> Result<()> {
        self.window.seek_to(offset)
    }

    /// Skips up to `n` bytes, leaving them unchanged, and returns how many were skipped.
    pub fn skip(&mut self, n: u64) -> u64 {
        self.window.skip(n)
    }

    /// Writes all of `buf`, or nothing if it does not fit.
    pub fn write_from(&mut self, buf: &[u8]) -> Result<()> {
        let available = self.window.available();
        if buf.len() as u64 > available {
            return Err(Error::capacity_exceeded(buf.len() as u64, available));
        }
        self.window
            .source
            .put_slice(self.window.offset, buf, ByteOrder::NATIVE)?;
        self.window.offset += buf.len() as u64;
        Ok(())
    }

    pub fn write_byte(&mut self, byte: u8) -> Result<()> {
        self.write_from(&[byte])
    }
}

impl std::io::Write for SourceWriter {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.write_from(buf)?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

impl std::io::Seek for SourceWriter {
    fn seek(&mut self, pos: std::io::SeekFrom) -> std::io::Result<u64> {
        self.window.seek(pos)
    }
}

#[cfg(test)]
mod tests {
    use std::io::{Seek, SeekFrom, Write};

    use memsource_source::Source;

    use super::SourceWriter;

    #[test]
    fn test_source_writer_basic() {
        let source = Source::new_array(8);
        let mut writer = SourceWriter::new(source.clone());
        writer.write_all(b"abc").unwrap();
        writer.write_byte(b'd').unwrap();
        assert_eq!(writer.offset(), 4);
        assert_eq!(writer.available(), 4);
        assert_eq!(&source.to_vec().unwrap()[..4], b"abcd");
    }

    #[test]
    fn test_source_writer_rejects_overflow_without_partial_write() {
        let source = Source::new_array(8);
        let mut writer = SourceWriter::with_window(source.clone(), 2, 4).unwrap();
        writer.write_all(b"xy").unwrap();

        let err = writer.write_from(b"123").unwrap_err();
        assert!(err.is_capacity_exceeded());
        assert_eq!(writer.offset(), 4);
        assert_eq!(source.to_vec().unwrap(), [0, 0, b'x', b'y', 0, 0, 0, 0]);

        let err = writer.write(b"123").unwrap_err();
        assert_eq!(err.kind(), std::io::ErrorKind::WriteZero);

        writer.write_all(b"zw").unwrap();
        assert!(writer.write_byte(b'!').unwrap_err().is_capacity_exceeded());
        assert_eq!(source.to_vec().unwrap(), [0, 0, b'x', b'y', b'z', b'w', 0, 0]);
    }

    #[test]
    fn test_source_writer_seek() {
        let source = Source::new_array(8);
        let mut writer = SourceWriter::with_window(source.clone(), 4, 4).unwrap();
        writer.seek_to(6).unwrap();
        writer.write_byte(1).unwrap();
        assert!(writer.seek_to(3).unwrap_err().is_out_of_bounds());
        assert_eq!(writer.seek(SeekFrom::Start(1)).unwrap(), 1);
        assert_eq!(writer.offset(), 5);
        writer.write_byte(2).unwrap();
        assert_eq!(writer.skip(10), 2);
        assert_eq!(source.to_vec().unwrap(), [0, 0, 0, 0, 0, 2, 1, 0]);
    }

    #[test]
    fn test_source_writer_respects_read_only_sources() {
        let source = Source::new_array(4);
        let mut writer = SourceWriter::new(source.read_only().unwrap());
        let err = writer.write(b"a").unwrap_err();
        assert_eq!(err.kind(), std::io::ErrorKind::PermissionDenied);
        assert_eq!(writer.offset(), 0);
    }
}
