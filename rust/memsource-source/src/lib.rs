//! The `Source` abstraction: bounds-checked, permission-gated, byte-order-aware random
//! access to a fixed-length memory region.
//!
//! Four backing stores are supported, each with its own ownership model:
//!
//! * [`ArraySource`] - a byte array owned by the source itself.
//! * [`NativeMemorySource`] - memory allocated outside of the Rust heap and freed
//!   exactly once on release.
//! * [`ExternalBufferSource`] - memory owned by an [`ExternalBuffer`] which the
//!   source keeps alive but never frees.
//! * [`SharedSegmentSource`] - a System V shared-memory segment, detached (and
//!   optionally destroyed) on release.
//!
//! All of them are unified by the [`Source`] enum, which also carries zero-copy
//! [`SourceView`]s: sub-ranges of a parent with a permission mask that can only shrink.
//!
//! Every access validates, in order, that the source has not been released, that the
//! requested direction is permitted and that the byte range is in bounds. Nothing is
//! touched unless all checks pass.
//!
//! # Concurrency
//!
//! Sources are cheap to clone and may be shared between threads. Validity is tracked
//! atomically, and accesses to disjoint ranges from different threads are safe. No
//! ordering is provided for overlapping writes, and releasing a source while another
//! thread is still accessing it is a caller error.

pub mod array;
pub mod external;
pub mod native;
pub mod permissions;
mod region;
pub mod shared;
pub mod source;
pub mod view;

pub use array::ArraySource;
pub use external::ExternalBufferSource;
pub use memsource_bits::{ByteOrder, Scalar};
pub use memsource_common::{Error, Result};
pub use memsource_native::{ExternalBuffer, ExternalMemory, PageBuffer};
pub use native::NativeMemorySource;
pub use permissions::Permissions;
pub use shared::{SegmentOptions, SharedSegmentSource};
pub use source::Source;
pub use view::{SourceView, ViewKind};
