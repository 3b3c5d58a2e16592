//! Offset bookkeeping shared by the stream adapters.

use memsource_common::{Error, Result, range::check_range};
use memsource_source::Source;

/// An absolute offset moving forward through `[start, end]` of a source.
#[derive(Debug, Clone)]
pub(crate) struct Window {
    pub source: Source,
    pub start: u64,
    pub end: u64,
    pub offset: u64,
}

impl Window {
    pub fn new(source: Source, start: u64, length: u64) -> Result<Window> {
        check_range(source.length(), start, length)?;
        Ok(Window {
            source,
            start,
            end: start + length,
            offset: start,
        })
    }

    pub fn length(&self) -> u64 {
        self.end - self.start
    }

    pub fn available(&self) -> u64 {
        self.end - self.offset
    }

    /// Moves to an absolute offset within `[start, end]`.
    pub fn seek_to(&mut self, offset: u64) -> Result<()> {
        if offset < self.start || offset > self.end {
            return Err(Error::out_of_bounds(offset, 0, self.end));
        }
        self.offset = offset;
        Ok(())
    }

    /// Moves forward by up to `n` bytes, stopping at the window end.
    pub fn skip(&mut self, n: u64) -> u64 {
        let skipped = n.min(self.available());
        self.offset += skipped;
        skipped
    }

    /// `std::io::Seek` with positions relative to the window start.
    pub fn seek(&mut self, pos: std::io::SeekFrom) -> std::io::Result<u64> {
        use std::io::SeekFrom;

        let base = match pos {
            SeekFrom::Start(_) => self.start,
            SeekFrom::End(_) => self.end,
            SeekFrom::Current(_) => self.offset,
        };
        let delta = match pos {
            SeekFrom::Start(offset) => i64::try_from(offset).ok(),
            SeekFrom::End(offset) | SeekFrom::Current(offset) => Some(offset),
        };
        let target = delta.and_then(|delta| base.checked_add_signed(delta));
        match target {
            Some(target) => {
                self.seek_to(target)?;
                Ok(target - self.start)
            }
            None => Err(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                "seek outside of the stream window",
            )),
        }
    }
}
