//! Page-aligned anonymous memory, usable as an externally owned buffer.

use crate::{
    external::{ExternalBuffer, ExternalMemory},
    mmap,
};

/// A page-aligned, zero-initialized memory block obtained directly from the OS.
///
/// The block is unmapped when the buffer is dropped. Since it is owned here rather than
/// by any source built on top of it, `PageBuffer` is the stock [`ExternalBuffer`]
/// implementation: wrap it in an `Arc` and hand it to an external-buffer source.
pub struct PageBuffer {
    /// Raw pointer to the mapped memory region.
    ptr: *mut u8,
    /// The requested size of the buffer in bytes.
    len: usize,
    /// The mapped capacity, `len` rounded up to the page size.
    capacity: usize,
}

impl PageBuffer {
    /// Maps a new buffer of `size` bytes, rounded up to the page size internally.
    pub fn allocate(size: usize) -> std::io::Result<PageBuffer> {
        let (ptr, capacity) = mmap::allocate(size.max(1))?;
        assert!((ptr as usize).is_multiple_of(mmap::get_page_size()));
        log::debug!("mapped page buffer of {size} bytes ({capacity} capacity) at {ptr:p}");
        Ok(PageBuffer {
            ptr: ptr as _,
            len: size,
            capacity,
        })
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Returns a raw pointer to the beginning of the mapped memory.
    #[inline]
    pub fn ptr(&self) -> *mut u8 {
        self.ptr
    }

    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        unsafe { std::slice::from_raw_parts(self.ptr, self.len) }
    }

    #[inline]
    pub fn as_bytes_mut(&mut self) -> &mut [u8] {
        unsafe { std::slice::from_raw_parts_mut(self.ptr, self.len) }
    }

    /// Reinterprets the buffer's bytes as a slice of `T`.
    ///
    /// # Panics
    ///
    /// Panics if the buffer's length is not evenly divisible by the size of `T`.
    #[inline]
    pub fn as_slice<T>(&self) -> &[T]
    where
        T: bytemuck::AnyBitPattern,
    {
        bytemuck::cast_slice(self.as_bytes())
    }
}

impl std::ops::Deref for PageBuffer {
    type Target = [u8];

    #[inline]
    fn deref(&self) -> &Self::Target {
        self.as_bytes()
    }
}

impl std::ops::DerefMut for PageBuffer {
    #[inline]
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.as_bytes_mut()
    }
}

// SAFETY: the mapping stays at `ptr` for `len` bytes until the buffer is dropped, and
// sources writing through the raw address never hold Rust references into it.
unsafe impl ExternalBuffer for PageBuffer {
    fn memory(&self) -> ExternalMemory {
        ExternalMemory {
            ptr: self.ptr,
            len: self.len,
        }
    }
}

impl Drop for PageBuffer {
    fn drop(&mut self) {
        if !self.ptr.is_null() {
            if let Err(e) = unsafe { mmap::free(self.ptr as _, self.capacity) } {
                log::warn!("failed to unmap page buffer at {:p}: {e}", self.ptr);
            }
        }
    }
}

// SAFETY: PageBuffer owns its mapping and unmaps it on drop.
unsafe impl Send for PageBuffer {}

// SAFETY: shared access only hands out the address; users must synchronize writes to
// the underlying memory.
unsafe impl Sync for PageBuffer {}

impl std::fmt::Debug for PageBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PageBuffer")
            .field("ptr", &self.ptr)
            .field("len", &self.len)
            .field("capacity", &self.capacity)
            .finish()
    }
}
