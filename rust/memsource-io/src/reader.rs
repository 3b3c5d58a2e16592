//! Bounded reader over a source.

use memsource_bits::ByteOrder;
use memsource_common::Result;
use memsource_source::Source;

use crate::window::Window;

/// Reads bytes forward from `[start, start + length)` of a [`Source`].
///
/// Reads are clamped at the end of the window: a read there returns a short or zero
/// count rather than an error. Seeking via `std::io::Seek` is relative to the start of
/// the window; [`seek_to`](Self::seek_to) takes an absolute source offset.
#[derive(Debug, Clone)]
pub struct SourceReader {
    window: Window,
}

impl SourceReader {
    /// A reader over the whole source.
    pub fn new(source: Source) -> SourceReader {
        let length = source.length();
        SourceReader {
            window: Window {
                source,
                start: 0,
                end: length,
                offset: 0,
            },
        }
    }

    /// A reader over `length` bytes starting at `start`.
    pub fn with_window(source: Source, start: u64, length: u64) -> Result<SourceReader> {
        Ok(SourceReader {
            window: Window::new(source, start, length)?,
        })
    }

    pub fn source(&self) -> &Source {
        &self.window.source
    }

    /// Absolute source offset of the window start.
    pub fn begin_offset(&self) -> u64 {
        self.window.start
    }

    /// Absolute source offset of the next byte to read.
    pub fn offset(&self) -> u64 {
        self.window.offset
    }

    /// Length of the window.
    pub fn length(&self) -> u64 {
        self.window.length()
    }

    /// Bytes left before the end of the window.
    pub fn available(&self) -> u64 {
        self.window.available()
    }

    /// Moves to an absolute source offset within `[start, start + length]`.
    pub fn seek_to(&mut self, offset: u64) -> Result<()> {
        self.window.seek_to(offset)
    }

    /// Skips up to `n` bytes and returns how many were skipped.
    pub fn skip(&mut self, n: u64) -> u64 {
        self.window.skip(n)
    }

    /// Reads up to `buf.len()` bytes and returns how many were read; zero at the end
    /// of the window.
    pub fn read_into(&mut self, buf: &mut [u8]) -> Result<usize> {
        let count = (buf.len() as u64).min(self.window.available()) as usize;
        if count == 0 {
            return Ok(0);
        }
        self.window
            .source
            .get_slice(self.window.offset, &mut buf[..count], ByteOrder::NATIVE)?;
        self.window.offset += count as u64;
        Ok(count)
    }

    /// Reads one byte, or `None` at the end of the window.
    pub fn read_byte(&mut self) -> Result<Option<u8>> {
        let mut byte = [0u8];
        match self.read_into(&mut byte)? {
            0 => Ok(None),
            _ => Ok(Some(byte[0])),
        }
    }
}

impl std::io::Read for SourceReader {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        Ok(self.read_into(buf)?)
    }
}

impl std::io::Seek for SourceReader {
    fn seek(&mut self, pos: std::io::SeekFrom) -> std::io::Result<u64> {
        self.window.seek(pos)
    }
}
