//! Shared memory on platforms without System V IPC: every operation fails.

use std::path::Path;

pub type Key = i32;

pub type SegmentId = i32;

pub const CREATE: i32 = 0o1000;

pub const EXCLUSIVE: i32 = 0o2000;

fn unsupported() -> std::io::Error {
    std::io::Error::new(
        std::io::ErrorKind::Unsupported,
        "shared memory segments are not supported on this platform",
    )
}

pub fn derive_key(_path: &Path, _project_id: u8) -> std::io::Result<Key> {
    Err(unsupported())
}

pub fn get_or_create_segment(_key: Key, _size: usize, _flags: i32) -> std::io::Result<SegmentId> {
    Err(unsupported())
}

pub fn attach(_id: SegmentId) -> std::io::Result<*mut u8> {
    Err(unsupported())
}

/// # Safety
///
/// Never touches `addr`.
pub unsafe fn detach(_addr: *mut u8) -> std::io::Result<()> {
    Err(unsupported())
}

pub fn remove(_id: SegmentId) -> std::io::Result<()> {
    Err(unsupported())
}
