//! Helpers for tests touching OS shared-memory segments.

use std::sync::atomic::{AtomicU32, Ordering};

use tempfile::NamedTempFile;

/// Returns a segment key unique to this process and call.
///
/// The key mixes the process id with a per-process counter, so tests running in
/// parallel (in one process or several) do not step on each other's segments.
pub fn unique_key() -> i32 {
    static COUNTER: AtomicU32 = AtomicU32::new(1);
    let seq = COUNTER.fetch_add(1, Ordering::Relaxed) & 0xff;
    let pid = std::process::id() & 0x3f_ffff;
    (0x4000_0000 | (pid << 8) | seq) as i32
}

/// Creates a temporary file whose path can be used to derive segment keys.
///
/// The key stays stable as long as the returned file exists.
pub fn key_file() -> anyhow::Result<NamedTempFile> {
    Ok(tempfile::Builder::new().prefix("memsource-key").tempfile()?)
}
