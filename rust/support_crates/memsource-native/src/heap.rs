//! Process-heap allocation of native (off-Rust-heap) memory.
//!
//! Blocks returned by these functions must be released with [`free`].

/// Allocates `size` bytes with unspecified contents.
///
/// A zero-sized request still yields a valid, unique, freeable address.
pub fn allocate(size: usize) -> std::io::Result<*mut u8> {
    let ptr = unsafe { libc::malloc(size.max(1)) } as *mut u8;
    if ptr.is_null() {
        return Err(out_of_memory(size));
    }
    log::debug!("allocated {size} bytes at {ptr:p}");
    Ok(ptr)
}

/// Allocates `size` zero-filled bytes.
pub fn allocate_zeroed(size: usize) -> std::io::Result<*mut u8> {
    let ptr = unsafe { libc::calloc(1, size.max(1)) } as *mut u8;
    if ptr.is_null() {
        return Err(out_of_memory(size));
    }
    log::debug!("allocated {size} zeroed bytes at {ptr:p}");
    Ok(ptr)
}

/// Allocates `size` bytes, every one of them set to `byte`.
pub fn allocate_filled(size: usize, byte: u8) -> std::io::Result<*mut u8> {
    let ptr = allocate(size)?;
    unsafe { memset(ptr, size, byte) };
    Ok(ptr)
}

/// Frees a block returned by one of the allocation functions. A null address is a no-op.
///
/// # Safety
///
/// `ptr` must be null or an address returned by [`allocate`], [`allocate_zeroed`] or
/// [`allocate_filled`] that has not been freed yet.
pub unsafe fn free(ptr: *mut u8) {
    if ptr.is_null() {
        return;
    }
    log::debug!("freeing native block at {ptr:p}");
    unsafe { libc::free(ptr as *mut libc::c_void) };
}

/// Sets `size` bytes starting at `ptr` to `byte`.
///
/// # Safety
///
/// `[ptr, ptr + size)` must be valid for writes.
#[inline]
pub unsafe fn memset(ptr: *mut u8, size: usize, byte: u8) {
    unsafe { std::ptr::write_bytes(ptr, byte, size) };
}

fn out_of_memory(size: usize) -> std::io::Error {
    let err = std::io::Error::last_os_error();
    if err.raw_os_error().unwrap_or(0) != 0 {
        err
    } else {
        std::io::Error::new(
            std::io::ErrorKind::OutOfMemory,
            format!("failed to allocate {size} bytes"),
        )
    }
}
