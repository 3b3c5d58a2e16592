//! One-time initialization of the raw memory backend.

use std::sync::OnceLock;

use memsource_bits::ByteOrder;

use crate::mmap;

/// Facts about the host that the access layers depend on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BackendInfo {
    /// Size of a regular memory page in bytes.
    pub page_size: usize,
    /// Machine word (pointer) size in bytes, used for word padding and alignment.
    pub word_size: usize,
    /// Byte order of the host platform.
    pub native_order: ByteOrder,
}

static BACKEND: OnceLock<BackendInfo> = OnceLock::new();

/// Initializes the raw memory backend.
///
/// Meant to be called once at process start. Subsequent calls return the already
/// resolved [`BackendInfo`] without doing any work.
pub fn init() -> &'static BackendInfo {
    BACKEND.get_or_init(|| {
        let info = BackendInfo {
            page_size: mmap::get_page_size(),
            word_size: std::mem::size_of::<usize>(),
            native_order: ByteOrder::NATIVE,
        };
        log::debug!(
            "memory backend initialized: page_size={}, word_size={}, order={}",
            info.page_size,
            info.word_size,
            info.native_order
        );
        info
    })
}

/// Returns the backend facts, initializing the backend if [`init`] was never called.
#[inline]
pub fn backend() -> &'static BackendInfo {
    match BACKEND.get() {
        Some(info) => info,
        None => init(),
    }
}
