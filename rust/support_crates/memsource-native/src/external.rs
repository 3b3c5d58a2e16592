//! Memory owned outside of this system.

/// Location of an externally owned memory block.
#[derive(Debug, Clone, Copy)]
pub struct ExternalMemory {
    pub ptr: *mut u8,
    pub len: usize,
}

/// A buffer whose backing memory is owned and reclaimed by someone else.
///
/// Holding a value of the implementing type (typically behind an `Arc`) must keep
/// the memory it describes alive and at a fixed address.
///
/// # Safety
///
/// Implementors guarantee that:
/// - [`ExternalBuffer::memory`] describes a block valid for reads and writes of `len`
///   bytes for as long as the buffer value is alive
/// - the address and length never change during that time
/// - the memory is not reachable through Rust references that would conflict with
///   writes made through the raw address
pub unsafe trait ExternalBuffer: Send + Sync + 'static {
    fn memory(&self) -> ExternalMemory;
}

/// Resolves the base address and length of an external buffer.
///
/// Fails if the buffer reports a null address for a non-empty block.
pub fn resolve_address(buffer: &dyn ExternalBuffer) -> std::io::Result<ExternalMemory> {
    let memory = buffer.memory();
    if memory.ptr.is_null() && memory.len != 0 {
        return Err(std::io::Error::new(
            std::io::ErrorKind::InvalidInput,
            "external buffer has no backing address",
        ));
    }
    Ok(memory)
}
