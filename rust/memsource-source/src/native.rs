//! Sources backed by natively allocated memory.

use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};

use memsource_common::{Error, Result};
use memsource_native::heap;

use crate::region::{AccessPath, RawRegion};

/// A source that owns a block of native memory.
///
/// The block is freed exactly once: by the first [`release`](Self::release), or when
/// the last handle is dropped if the source was never released.
#[derive(Clone)]
pub struct NativeMemorySource {
    inner: Arc<NativeInner>,
}

struct NativeInner {
    ptr: *mut u8,
    len: usize,
    valid: AtomicBool,
}

impl NativeMemorySource {
    /// Allocates `size` bytes with unspecified contents.
    pub fn allocate(size: usize) -> Result<NativeMemorySource> {
        let ptr = heap::allocate(size).map_err(|e| Error::native("allocate", e))?;
        Ok(Self::from_raw(ptr, size))
    }

    /// Allocates `size` zero-filled bytes.
    pub fn allocate_zeroed(size: usize) -> Result<NativeMemorySource> {
        let ptr = heap::allocate_zeroed(size).map_err(|e| Error::native("allocate_zeroed", e))?;
        Ok(Self::from_raw(ptr, size))
    }

    /// Allocates `size` bytes, each set to `byte`.
    pub fn allocate_filled(size: usize, byte: u8) -> Result<NativeMemorySource> {
        let ptr =
            heap::allocate_filled(size, byte).map_err(|e| Error::native("allocate_filled", e))?;
        Ok(Self::from_raw(ptr, size))
    }

    fn from_raw(ptr: *mut u8, len: usize) -> NativeMemorySource {
        NativeMemorySource {
            inner: Arc::new(NativeInner {
                ptr,
                len,
                valid: AtomicBool::new(true),
            }),
        }
    }

    /// Address of the first byte of the block.
    pub fn address(&self) -> usize {
        self.inner.ptr as usize
    }

    pub fn len(&self) -> usize {
        self.inner.len
    }

    pub fn is_empty(&self) -> bool {
        self.inner.len == 0
    }

    pub fn is_valid(&self) -> bool {
        self.inner.valid.load(Ordering::Acquire)
    }

    /// Invalidates the source and frees its memory. Idempotent.
    pub fn release(&self) {
        self.inner.release();
    }

    pub(crate) fn raw(&self) -> RawRegion {
        RawRegion::new(self.inner.ptr, AccessPath::Native)
    }
}

impl NativeInner {
    fn release(&self) {
        if self.valid.swap(false, Ordering::AcqRel) {
            unsafe { heap::free(self.ptr) };
            log::debug!("freed native source of {} bytes", self.len);
        }
    }
}

impl Drop for NativeInner {
    fn drop(&mut self) {
        self.release();
    }
}

// SAFETY: the block is owned by `NativeInner` and freed once, guarded by the atomic
// validity flag.
unsafe impl Send for NativeInner {}

// SAFETY: shared handles only reach the block through validated raw accesses.
unsafe impl Sync for NativeInner {}

impl std::fmt::Debug for NativeMemorySource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NativeMemorySource")
            .field("ptr", &self.inner.ptr)
            .field("len", &self.inner.len)
            .field("valid", &self.is_valid())
            .finish()
    }
}
