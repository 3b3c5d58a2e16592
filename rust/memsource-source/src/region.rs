//! Unchecked access to the memory behind a source, used after validation passed.

use memsource_bits::{ByteOrder, Scalar};
use memsource_native::{access, heap};

/// How scalars are moved in and out of a region.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum AccessPath {
    /// Bytes are converted in software through the codec.
    Codec,
    /// Values are read and written at native width and swapped when needed.
    Native,
}

/// Start address of a validated range plus the way to access it.
#[derive(Debug, Clone, Copy)]
pub(crate) struct RawRegion {
    ptr: *mut u8,
    path: AccessPath,
}

impl RawRegion {
    #[inline]
    pub fn new(ptr: *mut u8, path: AccessPath) -> RawRegion {
        RawRegion { ptr, path }
    }

    /// Shifts the start of the region by `offset` bytes.
    #[inline]
    pub fn offset(self, offset: usize) -> RawRegion {
        RawRegion {
            ptr: self.ptr.wrapping_add(offset),
            path: self.path,
        }
    }

    // SAFETY (all methods below): the caller has validated that
    // `[offset, offset + byte length)` lies inside a live region.

    #[inline]
    pub unsafe fn load<T: Scalar>(self, offset: usize, order: ByteOrder) -> T {
        let ptr = unsafe { self.ptr.add(offset) };
        match self.path {
            AccessPath::Codec => {
                let mut bytes = T::Bytes::default();
                bytes
                    .as_mut()
                    .copy_from_slice(unsafe { std::slice::from_raw_parts(ptr, T::WIDTH) });
                T::decode(&bytes, order)
            }
            AccessPath::Native => unsafe { access::load(ptr, order) },
        }
    }

    #[inline]
    pub unsafe fn store<T: Scalar>(self, offset: usize, value: T, order: ByteOrder) {
        let ptr = unsafe { self.ptr.add(offset) };
        match self.path {
            AccessPath::Codec => {
                let bytes = unsafe { std::slice::from_raw_parts_mut(ptr, T::WIDTH) };
                value.encode_into(bytes, order);
            }
            AccessPath::Native => unsafe { access::store(ptr, value, order) },
        }
    }

    pub unsafe fn load_slice<T: Scalar>(self, offset: usize, dst: &mut [T], order: ByteOrder) {
        let ptr = unsafe { self.ptr.add(offset) };
        match self.path {
            AccessPath::Codec => {
                let bytes = unsafe { std::slice::from_raw_parts(ptr, dst.len() * T::WIDTH) };
                T::decode_slice(bytes, dst, order);
            }
            AccessPath::Native => unsafe { access::load_slice(ptr, dst, order) },
        }
    }

    pub unsafe fn store_slice<T: Scalar>(self, offset: usize, src: &[T], order: ByteOrder) {
        let ptr = unsafe { self.ptr.add(offset) };
        match self.path {
            AccessPath::Codec => {
                let bytes = unsafe { std::slice::from_raw_parts_mut(ptr, src.len() * T::WIDTH) };
                T::encode_slice(src, bytes, order);
            }
            AccessPath::Native => unsafe { access::store_slice(ptr, src, order) },
        }
    }

    #[inline]
    pub unsafe fn fill(self, offset: usize, len: usize, byte: u8) {
        unsafe { heap::memset(self.ptr.add(offset), len, byte) };
    }
}
