//! # memsource
//!
//! Uniform, bounds-checked and byte-order-aware random access to scalar and array data
//! across heterogeneous memory: process-heap arrays, natively allocated memory,
//! externally owned buffers and OS shared-memory segments.
//!
//! ## Module Organization
//!
//! * [`common`] - error taxonomy and range checks
//! * [`source`] - the [`Source`] abstraction and its variants
//! * [`cursor`] - a position/limit/order [`Cursor`] with a state stack
//! * [`io`] - `std::io` adapters over a window of a source
//!
//! ### Support Modules
//!
//! * [`support::bits`] - byte-order codec for fixed-width scalars
//! * [`support::native`] - raw memory primitives and the OS shared-memory layer
//!
//! ## Getting started
//!
//! ```ignore
//! memsource::init();
//!
//! let source = Source::allocate_zeroed(64)?;
//! let mut cursor = Cursor::with_order(source.clone(), ByteOrder::BigEndian);
//! cursor.put(0x0102u16)?;
//! cursor.pad_to(8, 0)?;
//! cursor.put(1.5f64)?;
//! assert_eq!(source.get_u16(0, ByteOrder::BigEndian)?, 0x0102);
//! source.release();
//! ```

pub use memsource_common as common;
pub use memsource_cursor as cursor;
pub use memsource_io as io;
pub use memsource_source as source;

pub mod support {
    pub use memsource_bits as bits;
    pub use memsource_native as native;
}

pub use memsource_bits::{ByteOrder, Scalar};
pub use memsource_common::{Error, ErrorKind, Result};
pub use memsource_cursor::{Cursor, CursorOptions, CursorState};
pub use memsource_io::{SourceReader, SourceWriter};
pub use memsource_native::BackendInfo;
pub use memsource_source::{
    ArraySource, ExternalBufferSource, NativeMemorySource, PageBuffer, Permissions,
    SegmentOptions, SharedSegmentSource, Source, SourceView, ViewKind,
};

/// Initializes the raw memory backend. Call once at process start.
///
/// Returns the resolved backend facts; calling it again is cheap and returns the same
/// value.
pub fn init() -> &'static BackendInfo {
    let info = memsource_native::init();
    log::info!(
        "memsource ready (page size {}, word size {}, {})",
        info.page_size,
        info.word_size,
        info.native_order
    );
    info
}
