//! System V shared memory.
//!
//! Thin wrappers over `ftok`, `shmget`, `shmat`, `shmdt` and `shmctl`. Every sentinel
//! return is turned into an `io::Error` built from the OS error code.

use std::{ffi::CString, os::unix::ffi::OsStrExt, path::Path};

/// Key naming a shared-memory segment.
pub type Key = i32;

/// OS identifier of a shared-memory segment.
pub type SegmentId = i32;

/// Flag requesting creation of the segment if it does not exist.
pub const CREATE: i32 = libc::IPC_CREAT;

/// Flag making creation fail if the segment already exists.
pub const EXCLUSIVE: i32 = libc::IPC_EXCL;

/// Derives a segment key from an existing file path and a project id.
pub fn derive_key(path: &Path, project_id: u8) -> std::io::Result<Key> {
    let path = CString::new(path.as_os_str().as_bytes())
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidInput, e))?;
    let key = unsafe { libc::ftok(path.as_ptr(), project_id as libc::c_int) };
    if key == -1 {
        return Err(std::io::Error::last_os_error());
    }
    Ok(key as Key)
}

/// Looks up (or, with [`CREATE`] in `flags`, creates) the segment named by `key`.
///
/// The low nine bits of `flags` are the segment's access permissions.
pub fn get_or_create_segment(key: Key, size: usize, flags: i32) -> std::io::Result<SegmentId> {
    let id = unsafe { libc::shmget(key as libc::key_t, size, flags) };
    if id == -1 {
        return Err(std::io::Error::last_os_error());
    }
    log::debug!("shmget(key={key}, size={size}, flags={flags:#o}) -> {id}");
    Ok(id)
}

/// Maps the segment into the address space of the calling process.
pub fn attach(id: SegmentId) -> std::io::Result<*mut u8> {
    let addr = unsafe { libc::shmat(id, std::ptr::null(), 0) };
    if addr as isize == -1 {
        return Err(std::io::Error::last_os_error());
    }
    log::debug!("attached segment {id} at {addr:p}");
    Ok(addr as *mut u8)
}

/// Unmaps a segment previously mapped by [`attach`].
///
/// # Safety
///
/// `addr` must have been returned by [`attach`] and must not be accessed afterwards.
pub unsafe fn detach(addr: *mut u8) -> std::io::Result<()> {
    let res = unsafe { libc::shmdt(addr as *const libc::c_void) };
    if res == -1 {
        return Err(std::io::Error::last_os_error());
    }
    log::debug!("detached segment at {addr:p}");
    Ok(())
}

/// Marks the segment for removal; the OS destroys it once the last process detaches.
pub fn remove(id: SegmentId) -> std::io::Result<()> {
    let res = unsafe { libc::shmctl(id, libc::IPC_RMID, std::ptr::null_mut()) };
    if res == -1 {
        return Err(std::io::Error::last_os_error());
    }
    log::debug!("removed segment {id}");
    Ok(())
}
