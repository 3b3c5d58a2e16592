//! Address-level scalar access and byte-order-aware copies.
//!
//! None of these functions check bounds; the caller guarantees that every address
//! range they touch is valid.

use memsource_bits::{ByteOrder, Scalar};

/// Reads a `T` stored at `addr` in the given byte order.
///
/// # Safety
///
/// `[addr, addr + T::WIDTH)` must be valid for reads. No alignment is required.
#[inline]
pub unsafe fn load<T: Scalar>(addr: *const u8, order: ByteOrder) -> T {
    let raw = unsafe { std::ptr::read_unaligned(addr as *const T) };
    raw.to_order(order)
}

/// Writes `value` at `addr` in the given byte order.
///
/// # Safety
///
/// `[addr, addr + T::WIDTH)` must be valid for writes. No alignment is required.
#[inline]
pub unsafe fn store<T: Scalar>(addr: *mut u8, value: T, order: ByteOrder) {
    unsafe { std::ptr::write_unaligned(addr as *mut T, value.to_order(order)) };
}

/// Copies `count` elements of `width` bytes from `src` to `dst`, converting each
/// element from `src_order` to `dst_order`.
///
/// When both orders match (or elements are single bytes) this is a plain memory
/// move; otherwise every element has its bytes reversed on the way.
///
/// # Safety
///
/// `[src, src + width * count)` must be valid for reads and
/// `[dst, dst + width * count)` valid for writes. `width` must not exceed 16.
pub unsafe fn copy_elements(
    src: *const u8,
    dst: *mut u8,
    width: usize,
    count: usize,
    src_order: ByteOrder,
    dst_order: ByteOrder,
) {
    debug_assert!(width <= 16);
    if src_order == dst_order || width <= 1 {
        unsafe { std::ptr::copy(src, dst, width * count) };
        return;
    }
    let mut element = [0u8; 16];
    for i in 0..count {
        let offset = i * width;
        unsafe { std::ptr::copy_nonoverlapping(src.add(offset), element.as_mut_ptr(), width) };
        element[..width].reverse();
        unsafe { std::ptr::copy_nonoverlapping(element.as_ptr(), dst.add(offset), width) };
    }
}

/// Reads `dst.len()` consecutive values stored at `addr` in the given byte order.
///
/// # Safety
///
/// `[addr, addr + dst.len() * T::WIDTH)` must be valid for reads and must not
/// overlap `dst`.
pub unsafe fn load_slice<T: Scalar>(addr: *const u8, dst: &mut [T], order: ByteOrder) {
    let bytes: &mut [u8] = bytemuck::cast_slice_mut(dst);
    unsafe {
        copy_elements(
            addr,
            bytes.as_mut_ptr(),
            T::WIDTH,
            bytes.len() / T::WIDTH,
            order,
            ByteOrder::NATIVE,
        )
    };
}

/// Writes `src` as consecutive values at `addr` in the given byte order.
///
/// # Safety
///
/// `[addr, addr + src.len() * T::WIDTH)` must be valid for writes and must not
/// overlap `src`.
pub unsafe fn store_slice<T: Scalar>(addr: *mut u8, src: &[T], order: ByteOrder) {
    let bytes: &[u8] = bytemuck::cast_slice(src);
    unsafe {
        copy_elements(
            bytes.as_ptr(),
            addr,
            T::WIDTH,
            src.len(),
            ByteOrder::NATIVE,
            order,
        )
    };
}
