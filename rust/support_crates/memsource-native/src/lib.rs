//! Raw memory primitives and the OS shared-memory layer.
//!
//! Everything in this crate operates on raw addresses and performs no bounds checking;
//! callers validate ranges before calling in. The safe, checked surface lives in
//! `memsource-source`.

pub mod access;
pub mod backend;
pub mod external;
pub mod heap;
pub mod page_buffer;

#[cfg_attr(unix, path = "mmap_unix.rs")]
#[cfg_attr(not(unix), path = "mmap_fallback.rs")]
pub mod mmap;

#[cfg_attr(
    any(target_os = "linux", target_os = "macos", target_os = "freebsd"),
    path = "ipc_unix.rs"
)]
#[cfg_attr(
    not(any(target_os = "linux", target_os = "macos", target_os = "freebsd")),
    path = "ipc_fallback.rs"
)]
pub mod ipc;

pub use backend::{BackendInfo, backend, init};
pub use external::{ExternalBuffer, ExternalMemory, resolve_address};
pub use page_buffer::PageBuffer;

#[cfg(test)]
mod tests;
