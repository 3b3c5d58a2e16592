use std::sync::Arc;

use memsource_bits::{ByteOrder, Scalar};
use memsource_common::{
    Access, Error, Result,
    range::{byte_len, check_range, to_usize},
};
use memsource_native::{ExternalBuffer, ipc::Key};

use crate::{
    ArraySource, ExternalBufferSource, NativeMemorySource, Permissions, SharedSegmentSource,
    region::RawRegion,
    view::{SourceView, ViewKind},
};

/// A bounds-checked, permission-gated, byte-addressable memory region.
///
/// `Source` is a cheap handle: clones share the same backing memory and validity.
/// All offsets are in bytes and relative to the start of the source.
#[derive(Debug, Clone)]
pub enum Source {
    Array(ArraySource),
    Native(NativeMemorySource),
    External(ExternalBufferSource),
    Shared(SharedSegmentSource),
    View(SourceView),
}

impl Source {
    /// A zero-filled array source of `size` bytes.
    pub fn new_array(size: usize) -> Source {
        Source::Array(ArraySource::new(size))
    }

    pub fn from_vec(data: Vec<u8>) -> Source {
        Source::Array(ArraySource::from_vec(data))
    }

    pub fn from_vec_range(data: Vec<u8>, offset: usize, length: usize) -> Result<Source> {
        ArraySource::from_vec_range(data, offset, length).map(Source::Array)
    }

    pub fn allocate(size: usize) -> Result<Source> {
        NativeMemorySource::allocate(size).map(Source::Native)
    }

    pub fn allocate_zeroed(size: usize) -> Result<Source> {
        NativeMemorySource::allocate_zeroed(size).map(Source::Native)
    }

    pub fn allocate_filled(size: usize, byte: u8) -> Result<Source> {
        NativeMemorySource::allocate_filled(size, byte).map(Source::Native)
    }

    pub fn wrap_external(buffer: Arc<dyn ExternalBuffer>) -> Result<Source> {
        ExternalBufferSource::wrap(buffer).map(Source::External)
    }

    pub fn wrap_external_range(
        buffer: Arc<dyn ExternalBuffer>,
        offset: usize,
        length: usize,
    ) -> Result<Source> {
        ExternalBufferSource::wrap_range(buffer, offset, length).map(Source::External)
    }

    pub fn attach(key: Key, size: usize, flags: i32) -> Result<Source> {
        SharedSegmentSource::attach(key, size, flags).map(Source::Shared)
    }

    pub fn create(key: Key, size: usize, flags: i32, persistent: bool) -> Result<Source> {
        SharedSegmentSource::create(key, size, flags, persistent).map(Source::Shared)
    }

    /// Total length in bytes. Never changes.
    pub fn length(&self) -> u64 {
        match self {
            Source::Array(s) => s.len() as u64,
            Source::Native(s) => s.len() as u64,
            Source::External(s) => s.len() as u64,
            Source::Shared(s) => s.len() as u64,
            Source::View(v) => v.length(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.length() == 0
    }

    /// `false` once the source (or, for a view, its parent) has been released.
    pub fn is_valid(&self) -> bool {
        match self {
            Source::Array(s) => s.is_valid(),
            Source::Native(s) => s.is_valid(),
            Source::External(s) => s.is_valid(),
            Source::Shared(s) => s.is_valid(),
            Source::View(v) => v.is_valid(),
        }
    }

    pub fn permissions(&self) -> Permissions {
        match self {
            Source::View(v) => v.permissions(),
            _ => Permissions::READ_WRITE,
        }
    }

    pub fn is_readable(&self) -> bool {
        self.permissions().allows(Access::Read)
    }

    pub fn is_writable(&self) -> bool {
        !self.is_read_only() && self.permissions().allows(Access::Write)
    }

    pub fn is_read_only(&self) -> bool {
        matches!(self, Source::View(v) if v.is_read_only())
    }

    pub fn as_view(&self) -> Option<&SourceView> {
        match self {
            Source::View(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_shared(&self) -> Option<&SharedSegmentSource> {
        match self {
            Source::Shared(s) => Some(s),
            _ => None,
        }
    }

    /// Zero-copy view of `length` bytes starting at `offset`, with this source's
    /// permissions.
    pub fn slice(&self, offset: u64, length: u64) -> Result<Source> {
        self.ensure_valid()?;
        check_range(self.length(), offset, length)?;
        Ok(self.derive(offset, length, Permissions::READ_WRITE, ViewKind::Slice))
    }

    /// View from `offset` to the end of the source.
    pub fn slice_from(&self, offset: u64) -> Result<Source> {
        self.slice(offset, self.length().saturating_sub(offset))
    }

    /// View over `[from, to)`.
    pub fn slice_range(&self, from: u64, to: u64) -> Result<Source> {
        if to < from {
            return Err(Error::out_of_bounds(from, 0, to));
        }
        self.slice(from, to - from)
    }

    /// View over the whole source whose permissions are `self.permissions() & mask`.
    pub fn with_permissions(&self, mask: Permissions) -> Result<Source> {
        self.ensure_valid()?;
        Ok(self.derive(0, self.length(), mask, ViewKind::Slice))
    }

    /// View over the whole source on which every mutation fails as unsupported.
    pub fn read_only(&self) -> Result<Source> {
        self.ensure_valid()?;
        Ok(self.derive(0, self.length(), Permissions::READ, ViewKind::ReadOnly))
    }

    fn derive(&self, offset: u64, length: u64, mask: Permissions, kind: ViewKind) -> Source {
        log::trace!("deriving {kind:?} view [{offset}, +{length}) mask={mask:?}");
        match self {
            Source::View(v) => Source::View(v.derive(offset, length, mask, kind)),
            root => Source::View(SourceView::new(
                Arc::new(root.clone()),
                offset,
                length,
                Permissions::READ_WRITE & mask,
                kind,
            )),
        }
    }

    /// Ends the source's usable lifetime, freeing or unmapping owned memory.
    ///
    /// Idempotent and infallible, so cleanup paths may call it unconditionally.
    /// A no-op on views.
    pub fn release(&self) {
        match self {
            Source::Array(s) => s.release(),
            Source::Native(s) => s.release(),
            Source::External(s) => s.release(),
            Source::Shared(s) => s.release(),
            Source::View(_) => (),
        }
    }

    /// Reads a `T` at `offset` in the given byte order.
    pub fn get<T: Scalar>(&self, offset: u64, order: ByteOrder) -> Result<T> {
        let offset = self.validate(Access::Read, "get", offset, T::WIDTH as u64)?;
        // SAFETY: `validate` checked liveness and that the range lies within the region.
        Ok(unsafe { self.raw().load(offset, order) })
    }

    /// Writes `value` at `offset` in the given byte order.
    pub fn put<T: Scalar>(&self, offset: u64, value: T, order: ByteOrder) -> Result<()> {
        let offset = self.validate(Access::Write, "put", offset, T::WIDTH as u64)?;
        // SAFETY: as in `get`.
        unsafe { self.raw().store(offset, value, order) };
        Ok(())
    }

    /// Fills `dst` with consecutive values starting at `offset`.
    pub fn get_slice<T: Scalar>(&self, offset: u64, dst: &mut [T], order: ByteOrder) -> Result<()> {
        let len = byte_len(dst.len(), T::WIDTH)?;
        let offset = self.validate(Access::Read, "get", offset, len)?;
        if !dst.is_empty() {
            unsafe { self.raw().load_slice(offset, dst, order) };
        }
        Ok(())
    }

    /// Writes the values of `src` consecutively starting at `offset`.
    pub fn put_slice<T: Scalar>(&self, offset: u64, src: &[T], order: ByteOrder) -> Result<()> {
        let len = byte_len(src.len(), T::WIDTH)?;
        let offset = self.validate(Access::Write, "put", offset, len)?;
        if !src.is_empty() {
            unsafe { self.raw().store_slice(offset, src, order) };
        }
        Ok(())
    }

    /// Reads `count` values at `offset` into `dst[dst_offset..dst_offset + count]`.
    ///
    /// The source is validated first (state, permission, bounds), then the destination
    /// range. Nothing is transferred unless every check passes.
    pub fn get_elements<T: Scalar>(
        &self,
        offset: u64,
        dst: &mut [T],
        dst_offset: usize,
        count: usize,
        order: ByteOrder,
    ) -> Result<()> {
        let len = byte_len(count, T::WIDTH)?;
        let offset = self.validate(Access::Read, "get", offset, len)?;
        check_range(dst.len() as u64, dst_offset as u64, count as u64)?;
        if count != 0 {
            // SAFETY: as in `get`; the destination range was checked above.
            unsafe {
                self.raw()
                    .load_slice(offset, &mut dst[dst_offset..dst_offset + count], order)
            };
        }
        Ok(())
    }

    /// Writes `src[src_offset..src_offset + count]` at `offset`.
    pub fn put_elements<T: Scalar>(
        &self,
        offset: u64,
        src: &[T],
        src_offset: usize,
        count: usize,
        order: ByteOrder,
    ) -> Result<()> {
        let len = byte_len(count, T::WIDTH)?;
        let offset = self.validate(Access::Write, "put", offset, len)?;
        check_range(src.len() as u64, src_offset as u64, count as u64)?;
        if count != 0 {
            // SAFETY: as in `get`; the source range was checked above.
            unsafe {
                self.raw()
                    .store_slice(offset, &src[src_offset..src_offset + count], order)
            };
        }
        Ok(())
    }

    /// Sets `length` bytes starting at `offset` to `byte`.
    pub fn clear(&self, byte: u8, offset: u64, length: u64) -> Result<()> {
        let offset = self.validate(Access::Write, "clear", offset, length)?;
        if length != 0 {
            unsafe { self.raw().fill(offset, to_usize(length)?, byte) };
        }
        Ok(())
    }

    /// Sets every byte of the source to `byte`.
    pub fn clear_all(&self, byte: u8) -> Result<()> {
        self.clear(byte, 0, self.length())
    }

    /// Sets the bytes in `[from, to)` to `byte`.
    pub fn clear_range(&self, byte: u8, from: u64, to: u64) -> Result<()> {
        if to < from {
            return Err(Error::out_of_bounds(from, 0, to));
        }
        self.clear(byte, from, to - from)
    }

    /// Copies the whole source into a new vector.
    pub fn to_vec(&self) -> Result<Vec<u8>> {
        let mut data = vec![0u8; to_usize(self.length())?];
        self.get_slice(0, &mut data, ByteOrder::NATIVE)?;
        Ok(data)
    }

    pub fn get_u8(&self, offset: u64) -> Result<u8> {
        self.get(offset, ByteOrder::NATIVE)
    }

    pub fn put_u8(&self, offset: u64, value: u8) -> Result<()> {
        self.put(offset, value, ByteOrder::NATIVE)
    }

    pub fn get_i8(&self, offset: u64) -> Result<i8> {
        self.get(offset, ByteOrder::NATIVE)
    }

    pub fn put_i8(&self, offset: u64, value: i8) -> Result<()> {
        self.put(offset, value, ByteOrder::NATIVE)
    }

    /// Validates an access and returns the offset as an index.
    fn validate(&self, access: Access, operation: &str, offset: u64, length: u64) -> Result<usize> {
        self.ensure_valid()?;
        if access == Access::Write && self.is_read_only() {
            return Err(Error::read_only(operation));
        }
        if !self.permissions().allows(access) {
            return Err(Error::permission(access));
        }
        check_range(self.length(), offset, length)?;
        to_usize(offset)
    }

    #[inline]
    fn ensure_valid(&self) -> Result<()> {
        if self.is_valid() {
            Ok(())
        } else {
            Err(Error::released())
        }
    }

    fn raw(&self) -> RawRegion {
        match self {
            Source::Array(s) => s.raw(),
            Source::Native(s) => s.raw(),
            Source::External(s) => s.raw(),
            Source::Shared(s) => s.raw(),
            Source::View(v) => v.parent().raw().offset(v.base_offset() as usize),
        }
    }
}

macro_rules! scalar_accessors {
    ($($t:ident),* $(,)?) => {
        paste::paste! {
            impl Source {
                $(
                    /// Typed shorthand for [`Source::get`].
                    #[inline]
                    pub fn [<get_ $t>](&self, offset: u64, order: ByteOrder) -> Result<$t> {
                        self.get(offset, order)
                    }

                    /// Typed shorthand for [`Source::put`].
                    #[inline]
                    pub fn [<put_ $t>](&self, offset: u64, value: $t, order: ByteOrder) -> Result<()> {
                        self.put(offset, value, order)
                    }
                )*
            }
        }
    };
}

scalar_accessors!(u16, i16, u32, i32, u64, i64, f32, f64);

impl From<ArraySource> for Source {
    fn from(source: ArraySource) -> Self {
        Source::Array(source)
    }
}

impl From<NativeMemorySource> for Source {
    fn from(source: NativeMemorySource) -> Self {
        Source::Native(source)
    }
}

impl From<ExternalBufferSource> for Source {
    fn from(source: ExternalBufferSource) -> Self {
        Source::External(source)
    }
}

impl From<SharedSegmentSource> for Source {
    fn from(source: SharedSegmentSource) -> Self {
        Source::Shared(source)
    }
}

impl From<SourceView> for Source {
    fn from(view: SourceView) -> Self {
        Source::View(view)
    }
}
