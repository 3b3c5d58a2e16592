use std::sync::Arc;

use memsource_bits::{ByteOrder, Scalar};

use crate::{access, backend, external, heap, ipc, mmap, page_buffer::PageBuffer};

#[test]
fn test_backend_init_is_idempotent() {
    let first = crate::init();
    let second = crate::init();
    assert!(std::ptr::eq(first, second));
    assert_eq!(backend(), first);
    assert!(first.page_size.is_power_of_two());
    assert_eq!(first.word_size, std::mem::size_of::<usize>());
    assert!(first.native_order.is_native());
}

#[test]
fn test_heap_allocate_filled_and_zeroed() {
    let ptr = heap::allocate_filled(64, 0xa5).unwrap();
    let bytes = unsafe { std::slice::from_raw_parts(ptr, 64) };
    assert!(bytes.iter().all(|&b| b == 0xa5));
    unsafe { heap::free(ptr) };

    let ptr = heap::allocate_zeroed(64).unwrap();
    let bytes = unsafe { std::slice::from_raw_parts(ptr, 64) };
    assert!(bytes.iter().all(|&b| b == 0));
    unsafe { heap::memset(ptr.add(8), 8, 7) };
    let bytes = unsafe { std::slice::from_raw_parts(ptr, 64) };
    assert_eq!(&bytes[6..18], &[0, 0, 7, 7, 7, 7, 7, 7, 7, 7, 0, 0]);
    unsafe { heap::free(ptr) };
}

#[test]
fn test_heap_zero_size_and_null_free() {
    let ptr = heap::allocate(0).unwrap();
    assert!(!ptr.is_null());
    unsafe { heap::free(ptr) };
    unsafe { heap::free(std::ptr::null_mut()) };
}

#[test]
fn test_load_store_honors_order() {
    let mut buf = [0u8; 16];
    let base = buf.as_mut_ptr();
    unsafe {
        access::store(base.add(1), 0x0102_0304u32, ByteOrder::BigEndian);
        access::store(base.add(5), 0x0102_0304u32, ByteOrder::LittleEndian);
    }
    assert_eq!(&buf[1..9], &[1, 2, 3, 4, 4, 3, 2, 1]);
    let be: u32 = unsafe { access::load(buf.as_ptr().add(1), ByteOrder::BigEndian) };
    let le: u32 = unsafe { access::load(buf.as_ptr().add(5), ByteOrder::LittleEndian) };
    assert_eq!(be, 0x0102_0304);
    assert_eq!(le, 0x0102_0304);
}

#[test]
fn test_access_matches_codec() {
    let mut rng = fastrand::Rng::with_seed(11);
    let mut buf = [0u8; 8];
    for _ in 0..200 {
        let value = f64::from_bits(rng.u64(..));
        for order in [ByteOrder::BigEndian, ByteOrder::LittleEndian] {
            unsafe { access::store(buf.as_mut_ptr(), value, order) };
            assert_eq!(buf, value.encode(order));
            let back: f64 = unsafe { access::load(buf.as_ptr(), order) };
            assert_eq!(back.to_bits(), value.to_bits());
        }
    }
}

#[test]
fn test_slice_copies_swap_when_orders_differ() {
    let values = [0x0102u16, 0x0304, 0x0506];
    let mut buf = [0u8; 6];
    unsafe { access::store_slice(buf.as_mut_ptr(), &values, ByteOrder::BigEndian) };
    assert_eq!(buf, [1, 2, 3, 4, 5, 6]);

    let mut back = [0u16; 3];
    unsafe { access::load_slice(buf.as_ptr(), &mut back, ByteOrder::BigEndian) };
    assert_eq!(back, values);

    unsafe { access::load_slice(buf.as_ptr(), &mut back, ByteOrder::LittleEndian) };
    assert_eq!(back, [0x0201, 0x0403, 0x0605]);
}

#[test]
fn test_copy_elements_between_orders() {
    let src = [1u8, 2, 3, 4, 5, 6, 7, 8];
    let mut dst = [0u8; 8];
    unsafe {
        access::copy_elements(
            src.as_ptr(),
            dst.as_mut_ptr(),
            4,
            2,
            ByteOrder::BigEndian,
            ByteOrder::LittleEndian,
        )
    };
    assert_eq!(dst, [4, 3, 2, 1, 8, 7, 6, 5]);

    unsafe {
        access::copy_elements(
            src.as_ptr(),
            dst.as_mut_ptr(),
            2,
            4,
            ByteOrder::LittleEndian,
            ByteOrder::LittleEndian,
        )
    };
    assert_eq!(dst, src);
}

#[test]
fn test_page_buffer_allocation() {
    let page_size = mmap::get_page_size();
    let mut buf = PageBuffer::allocate(100).unwrap();
    assert_eq!(buf.len(), 100);
    assert_eq!(buf.capacity(), page_size);
    assert!((buf.ptr() as usize).is_multiple_of(page_size));
    assert!(buf.iter().all(|&b| b == 0));
    buf[99] = 1;
    assert_eq!(buf.as_bytes()[99], 1);

    let buf = PageBuffer::allocate(0).unwrap();
    assert!(buf.is_empty());
    assert_eq!(buf.capacity(), page_size);
}

#[test]
fn test_resolve_external_address() {
    let buf = Arc::new(PageBuffer::allocate(64).unwrap());
    let memory = external::resolve_address(buf.as_ref()).unwrap();
    assert_eq!(memory.ptr, buf.ptr());
    assert_eq!(memory.len, 64);

    struct Dangling;
    unsafe impl external::ExternalBuffer for Dangling {
        fn memory(&self) -> external::ExternalMemory {
            external::ExternalMemory {
                ptr: std::ptr::null_mut(),
                len: 8,
            }
        }
    }
    assert!(external::resolve_address(&Dangling).is_err());
}

#[cfg(any(target_os = "linux", target_os = "macos", target_os = "freebsd"))]
#[test]
fn test_shared_segment_lifecycle() {
    let key = 0x4d53_0000 | (std::process::id() as i32 & 0xffff);
    let id = ipc::get_or_create_segment(key, 4096, ipc::CREATE | 0o600).unwrap();
    let addr = ipc::attach(id).unwrap();
    unsafe { heap::memset(addr, 4096, 0x11) };

    let second = ipc::attach(id).unwrap();
    assert_eq!(unsafe { *second.add(4095) }, 0x11);
    unsafe { ipc::detach(second).unwrap() };

    unsafe { ipc::detach(addr).unwrap() };
    ipc::remove(id).unwrap();
    let err = ipc::get_or_create_segment(key, 4096, 0o600).unwrap_err();
    assert!(err.raw_os_error().is_some());
}

#[cfg(any(target_os = "linux", target_os = "macos", target_os = "freebsd"))]
#[test]
fn test_derive_key_from_path() {
    let file = tempfile::NamedTempFile::new().unwrap();
    let a = ipc::derive_key(file.path(), 1).unwrap();
    let b = ipc::derive_key(file.path(), 1).unwrap();
    let c = ipc::derive_key(file.path(), 2).unwrap();
    assert_eq!(a, b);
    assert_ne!(a, c);

    let missing = file.path().with_extension("missing");
    assert!(ipc::derive_key(&missing, 1).is_err());
}
