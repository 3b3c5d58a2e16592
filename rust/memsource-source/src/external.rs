//! Sources over memory owned by an external buffer.

use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};

use memsource_common::{Error, Result, range::check_range};
use memsource_native::{ExternalBuffer, resolve_address};

use crate::region::{AccessPath, RawRegion};

/// A source over memory whose lifetime is controlled by an [`ExternalBuffer`].
///
/// The source holds a reference to the buffer, so the memory stays mapped for as long
/// as any handle to the source exists. This is the one variant that never frees its
/// memory: [`release`](Self::release) only invalidates the source, and reclaiming the
/// memory is up to the buffer's owner.
#[derive(Clone)]
pub struct ExternalBufferSource {
    inner: Arc<ExternalInner>,
}

struct ExternalInner {
    buffer: Arc<dyn ExternalBuffer>,
    ptr: *mut u8,
    len: usize,
    valid: AtomicBool,
}

impl ExternalBufferSource {
    /// Creates a source over the whole buffer.
    pub fn wrap(buffer: Arc<dyn ExternalBuffer>) -> Result<ExternalBufferSource> {
        let memory =
            resolve_address(buffer.as_ref()).map_err(|e| Error::native("resolve_address", e))?;
        Ok(Self::from_parts(buffer, memory.ptr, memory.len))
    }

    /// Creates a source over `length` bytes of the buffer starting at `offset`.
    pub fn wrap_range(
        buffer: Arc<dyn ExternalBuffer>,
        offset: usize,
        length: usize,
    ) -> Result<ExternalBufferSource> {
        let memory =
            resolve_address(buffer.as_ref()).map_err(|e| Error::native("resolve_address", e))?;
        check_range(memory.len as u64, offset as u64, length as u64)?;
        Ok(Self::from_parts(
            buffer,
            memory.ptr.wrapping_add(offset),
            length,
        ))
    }

    fn from_parts(buffer: Arc<dyn ExternalBuffer>, ptr: *mut u8, len: usize) -> ExternalBufferSource {
        ExternalBufferSource {
            inner: Arc::new(ExternalInner {
                buffer,
                ptr,
                len,
                valid: AtomicBool::new(true),
            }),
        }
    }

    /// The buffer this source keeps alive.
    pub fn buffer(&self) -> &Arc<dyn ExternalBuffer> {
        &self.inner.buffer
    }

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

    /// Invalidates the source without freeing anything. Idempotent.
    pub fn release(&self) {
        self.inner.valid.store(false, Ordering::Release);
    }

    pub(crate) fn raw(&self) -> RawRegion {
        RawRegion::new(self.inner.ptr, AccessPath::Native)
    }
}

// SAFETY: the address belongs to `buffer`, which is `Send + Sync` and kept alive here.
unsafe impl Send for ExternalInner {}

// SAFETY: see above.
unsafe impl Sync for ExternalInner {}

impl std::fmt::Debug for ExternalBufferSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExternalBufferSource")
            .field("ptr", &self.inner.ptr)
            .field("len", &self.inner.len)
            .field("valid", &self.is_valid())
            .finish()
    }
}
