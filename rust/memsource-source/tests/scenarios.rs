use memsource_source::{ByteOrder, Permissions, Source};

#[test]
fn test_native_source_slices_see_written_bytes() {
    let source = Source::allocate(32).unwrap();
    for i in 0..32u8 {
        source.put_u8(i as u64, i).unwrap();
    }
    for i in 0..32u64 {
        let slice = source.slice_from(i).unwrap();
        assert_eq!(slice.length(), 32 - i);
        assert_eq!(slice.get_u8(0).unwrap(), i as u8);
    }
    source.release();
}

#[cfg(any(target_os = "linux", target_os = "macos", target_os = "freebsd"))]
#[test]
fn test_non_persistent_segment_is_destroyed_on_release() {
    let flags = 0o600;
    let source = Source::create(42, 4096, flags, false).unwrap();
    for i in 0..512u64 {
        source.put_u64(i * 8, i * 0x0101_0101, ByteOrder::BigEndian).unwrap();
    }
    assert_eq!(
        source.get_u64(511 * 8, ByteOrder::BigEndian).unwrap(),
        511 * 0x0101_0101
    );
    source.release();
    assert!(!source.is_valid());

    let err = Source::attach(42, 4096, flags).unwrap_err();
    assert!(err.is_native(), "{err}");
}

#[test]
fn test_read_permission_view_rejects_writes() {
    let source = Source::from_vec((0..16).collect());
    let view = source.with_permissions(Permissions::READ).unwrap();
    let err = view.put_u8(0, 5).unwrap_err();
    assert!(err.is_permission(), "{err}");
    assert_eq!(view.get_u8(0).unwrap(), 0);
    assert_eq!(source.get_u8(0).unwrap(), 0);
}

#[test]
fn test_read_only_view_rejects_writes_as_unsupported() {
    let source = Source::from_vec((0..16).collect());
    let view = source.read_only().unwrap();
    let err = view.put_u8(0, 5).unwrap_err();
    assert!(err.is_unsupported(), "{err}");
    assert_eq!(view.get_u8(0).unwrap(), 0);
}
