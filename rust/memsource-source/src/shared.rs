//! Sources backed by System V shared-memory segments.

use std::{
    path::Path,
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    },
};

use memsource_common::{Error, Result};
use memsource_native::ipc::{self, Key, SegmentId};

use crate::region::{AccessPath, RawRegion};

/// A source mapped onto a named OS shared-memory segment.
///
/// The segment is either *detached* (unmapped from this process, left in the OS) or
/// *destroyed* (unmapped and removed). [`release`](Self::release) picks one of the two
/// based on how the source was obtained, exactly once. Dropping the last handle of an
/// unreleased source releases it.
#[derive(Clone)]
pub struct SharedSegmentSource {
    inner: Arc<SharedInner>,
}

struct SharedInner {
    key: Key,
    id: SegmentId,
    ptr: *mut u8,
    len: usize,
    destroy_on_release: bool,
    attached: AtomicBool,
    removed: AtomicBool,
    released: AtomicBool,
}

impl SharedSegmentSource {
    /// Maps the existing segment named by `key`.
    ///
    /// `flags` are passed to the OS lookup; the segment must be at least `size` bytes.
    /// Releasing an attached source only detaches it.
    pub fn attach(key: Key, size: usize, flags: i32) -> Result<SharedSegmentSource> {
        let id =
            ipc::get_or_create_segment(key, size, flags).map_err(|e| Error::native("shmget", e))?;
        Self::map(key, id, size, false)
    }

    /// Maps the segment named by `key`, creating it if it does not exist yet.
    ///
    /// A non-persistent segment is destroyed on release; a persistent one is only
    /// detached and outlives the process.
    pub fn create(
        key: Key,
        size: usize,
        flags: i32,
        persistent: bool,
    ) -> Result<SharedSegmentSource> {
        let id = ipc::get_or_create_segment(key, size, flags | ipc::CREATE)
            .map_err(|e| Error::native("shmget", e))?;
        Self::map(key, id, size, !persistent)
    }

    /// Like [`attach`](Self::attach), with the key derived from `path` and `project_id`.
    pub fn attach_at(
        path: impl AsRef<Path>,
        project_id: u8,
        size: usize,
        flags: i32,
    ) -> Result<SharedSegmentSource> {
        Self::attach(derive_key(path.as_ref(), project_id)?, size, flags)
    }

    /// Like [`create`](Self::create), with the key derived from `path` and `project_id`.
    pub fn create_at(
        path: impl AsRef<Path>,
        project_id: u8,
        size: usize,
        flags: i32,
        persistent: bool,
    ) -> Result<SharedSegmentSource> {
        Self::create(
            derive_key(path.as_ref(), project_id)?,
            size,
            flags,
            persistent,
        )
    }

    fn map(
        key: Key,
        id: SegmentId,
        size: usize,
        destroy_on_release: bool,
    ) -> Result<SharedSegmentSource> {
        let ptr = ipc::attach(id).map_err(|e| Error::native("shmat", e))?;
        log::debug!(
            "mapped shared segment key={key} id={id} size={size} destroy_on_release={destroy_on_release}"
        );
        Ok(SharedSegmentSource {
            inner: Arc::new(SharedInner {
                key,
                id,
                ptr,
                len: size,
                destroy_on_release,
                attached: AtomicBool::new(true),
                removed: AtomicBool::new(false),
                released: AtomicBool::new(false),
            }),
        })
    }

    pub fn key(&self) -> Key {
        self.inner.key
    }

    pub fn segment_id(&self) -> SegmentId {
        self.inner.id
    }

    pub fn destroy_on_release(&self) -> bool {
        self.inner.destroy_on_release
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

    /// `true` while the segment is mapped into this process.
    pub fn is_valid(&self) -> bool {
        self.inner.attached.load(Ordering::Acquire)
    }

    /// Unmaps the segment, leaving it in the OS. A no-op once detached.
    pub fn detach(&self) -> Result<()> {
        self.inner.detach()
    }

    /// Unmaps the segment if still mapped and removes it from the OS.
    pub fn destroy_region(&self) -> Result<()> {
        self.inner.destroy_region()
    }

    /// Detaches or destroys the segment, once. Never fails: errors are logged.
    pub fn release(&self) {
        self.inner.release();
    }

    pub(crate) fn raw(&self) -> RawRegion {
        RawRegion::new(self.inner.ptr, AccessPath::Native)
    }
}

impl SharedInner {
    /// A failed `shmdt` leaves the source attached, so the call can be retried.
    fn detach(&self) -> Result<()> {
        if self.attached.swap(false, Ordering::AcqRel) {
            if let Err(e) = unsafe { ipc::detach(self.ptr) } {
                self.attached.store(true, Ordering::Release);
                return Err(Error::native("shmdt", e));
            }
        }
        Ok(())
    }

    fn destroy_region(&self) -> Result<()> {
        self.detach()?;
        if !self.removed.swap(true, Ordering::AcqRel) {
            if let Err(e) = ipc::remove(self.id) {
                self.removed.store(false, Ordering::Release);
                return Err(Error::native("shmctl", e));
            }
        }
        Ok(())
    }

    fn release(&self) {
        if self.released.swap(true, Ordering::AcqRel) {
            return;
        }
        let result = if self.destroy_on_release {
            self.destroy_region()
        } else {
            self.detach()
        };
        if let Err(e) = result {
            log::warn!("failed to release shared segment {}, mapping leaked: {e}", self.id);
        }
    }
}

impl Drop for SharedInner {
    fn drop(&mut self) {
        self.release();
    }
}

// SAFETY: the mapping is owned by `SharedInner` and unmapped once, guarded by the
// atomic flags.
unsafe impl Send for SharedInner {}

// SAFETY: shared handles only reach the mapping through validated raw accesses.
unsafe impl Sync for SharedInner {}

impl std::fmt::Debug for SharedSegmentSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SharedSegmentSource")
            .field("key", &self.inner.key)
            .field("id", &self.inner.id)
            .field("ptr", &self.inner.ptr)
            .field("len", &self.inner.len)
            .field("destroy_on_release", &self.inner.destroy_on_release)
            .field("valid", &self.is_valid())
            .finish()
    }
}

/// Derives a segment key from an existing file and a project id.
pub fn derive_key(path: &Path, project_id: u8) -> Result<Key> {
    ipc::derive_key(path, project_id).map_err(|e| Error::native("ftok", e))
}

/// Options for attaching to or creating a shared-memory segment.
///
/// ```ignore
/// let segment = SegmentOptions::new(4096).persistent(true).create(key)?;
/// ```
#[derive(Debug, Clone)]
pub struct SegmentOptions {
    size: usize,
    flags: i32,
    persistent: bool,
}

impl SegmentOptions {
    /// Owner read/write access, non-persistent.
    pub fn new(size: usize) -> SegmentOptions {
        SegmentOptions {
            size,
            flags: 0o600,
            persistent: false,
        }
    }

    /// OS flags, including the segment's access permission bits.
    pub fn flags(mut self, flags: i32) -> Self {
        self.flags = flags;
        self
    }

    /// Whether a created segment survives the release of its source.
    pub fn persistent(mut self, persistent: bool) -> Self {
        self.persistent = persistent;
        self
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn create(&self, key: Key) -> Result<SharedSegmentSource> {
        SharedSegmentSource::create(key, self.size, self.flags, self.persistent)
    }

    pub fn attach(&self, key: Key) -> Result<SharedSegmentSource> {
        SharedSegmentSource::attach(key, self.size, self.flags)
    }

    pub fn create_at(&self, path: impl AsRef<Path>, project_id: u8) -> Result<SharedSegmentSource> {
        SharedSegmentSource::create_at(path, project_id, self.size, self.flags, self.persistent)
    }

    pub fn attach_at(&self, path: impl AsRef<Path>, project_id: u8) -> Result<SharedSegmentSource> {
        SharedSegmentSource::attach_at(path, project_id, self.size, self.flags)
    }
}
