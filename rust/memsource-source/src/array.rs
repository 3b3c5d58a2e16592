//! Sources backed by an owned byte array.

use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};

use memsource_common::{Result, range::check_range};

use crate::region::{AccessPath, RawRegion};

/// A source over a heap-allocated byte array owned by the source.
///
/// Scalars are converted in software through the codec. Releasing the source only
/// invalidates it; the array itself is dropped together with the last handle.
#[derive(Clone)]
pub struct ArraySource {
    inner: Arc<ArrayInner>,
}

struct ArrayInner {
    /// Start of the whole array, as obtained from `Box::into_raw`.
    storage: *mut u8,
    storage_len: usize,
    /// Fixed offset of the source's first byte within the array.
    base: usize,
    len: usize,
    valid: AtomicBool,
}

impl ArraySource {
    /// Creates a source over a new zero-filled array of `size` bytes.
    pub fn new(size: usize) -> ArraySource {
        Self::from_vec(vec![0u8; size])
    }

    /// Creates a source over the whole of `data`.
    pub fn from_vec(data: Vec<u8>) -> ArraySource {
        let len = data.len();
        Self::from_boxed(data.into_boxed_slice(), 0, len)
    }

    /// Creates a source over `data[offset..offset + length]`.
    ///
    /// The rest of the array is kept but not addressable through the source.
    pub fn from_vec_range(data: Vec<u8>, offset: usize, length: usize) -> Result<ArraySource> {
        check_range(data.len() as u64, offset as u64, length as u64)?;
        Ok(Self::from_boxed(data.into_boxed_slice(), offset, length))
    }

    fn from_boxed(data: Box<[u8]>, base: usize, len: usize) -> ArraySource {
        let storage_len = data.len();
        let storage = Box::into_raw(data) as *mut u8;
        ArraySource {
            inner: Arc::new(ArrayInner {
                storage,
                storage_len,
                base,
                len,
                valid: AtomicBool::new(true),
            }),
        }
    }

    /// Offset of the source's first byte within its backing array.
    pub fn base_offset(&self) -> usize {
        self.inner.base
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

    /// Invalidates the source. Idempotent.
    pub fn release(&self) {
        if self.inner.valid.swap(false, Ordering::AcqRel) {
            log::debug!("released array source of {} bytes", self.inner.len);
        }
    }

    pub(crate) fn raw(&self) -> RawRegion {
        RawRegion::new(self.inner.storage, AccessPath::Codec).offset(self.inner.base)
    }
}

impl Drop for ArrayInner {
    fn drop(&mut self) {
        let slice = std::ptr::slice_from_raw_parts_mut(self.storage, self.storage_len);
        drop(unsafe { Box::from_raw(slice) });
    }
}

// SAFETY: the array is owned by `ArrayInner` and only reached through validated raw
// accesses; concurrent access to disjoint ranges does not alias.
unsafe impl Send for ArrayInner {}

// SAFETY: see above; ordering of overlapping accesses is left to the caller.
unsafe impl Sync for ArrayInner {}

impl std::fmt::Debug for ArraySource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ArraySource")
            .field("base", &self.inner.base)
            .field("len", &self.inner.len)
            .field("valid", &self.is_valid())
            .finish()
    }
}
