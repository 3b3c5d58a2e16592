//! Bounds validation shared by sources, cursors and streams.

use crate::{Result, error::Error};

/// Verifies that `[offset, offset + length)` lies within `[0, total]`.
///
/// The check is overflow-safe: it never computes `offset + length` directly.
#[inline]
pub fn check_range(total: u64, offset: u64, length: u64) -> Result<()> {
    if offset <= total && length <= total - offset {
        Ok(())
    } else {
        out_of_bounds(total, offset, length)
    }
}

/// Verifies that `offset` is a valid position within `[0, total]`.
#[inline]
pub fn check_offset(total: u64, offset: u64) -> Result<()> {
    check_range(total, offset, 0)
}

/// Byte size of `count` elements of `width` bytes each, failing instead of
/// overflowing.
#[inline]
pub fn byte_len(count: usize, width: usize) -> Result<u64> {
    count
        .checked_mul(width)
        .map(|n| n as u64)
        .ok_or_else(|| Error::invalid_arg("count", "element count overflows the address space"))
}

/// Converts a validated `u64` offset into a `usize` index.
#[inline]
pub fn to_usize(value: u64) -> Result<usize> {
    usize::try_from(value)
        .map_err(|_| Error::invalid_arg("offset", "value does not fit the address space"))
}

#[cold]
fn out_of_bounds(total: u64, offset: u64, length: u64) -> Result<()> {
    Err(Error::out_of_bounds(offset, length, total))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_range_accepts_edges() {
        check_range(16, 0, 16).unwrap();
        check_range(16, 16, 0).unwrap();
        check_range(16, 8, 8).unwrap();
        check_range(0, 0, 0).unwrap();
    }

    #[test]
    fn test_check_range_rejects_overflow() {
        assert!(check_range(16, 8, 9).unwrap_err().is_out_of_bounds());
        assert!(check_range(16, 17, 0).unwrap_err().is_out_of_bounds());
        assert!(check_range(16, u64::MAX, 2).unwrap_err().is_out_of_bounds());
        assert!(check_range(16, 2, u64::MAX).unwrap_err().is_out_of_bounds());
    }

    #[test]
    fn test_byte_len() {
        assert_eq!(byte_len(4, 8).unwrap(), 32);
        assert!(byte_len(usize::MAX, 2).is_err());
    }
}
