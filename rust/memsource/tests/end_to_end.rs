use std::{io::Read, sync::Arc};

use memsource::{
    ByteOrder, Cursor, PageBuffer, Permissions, Source, SourceReader, SourceWriter,
};

#[test]
fn test_init_is_repeatable() {
    let first = memsource::init();
    let second = memsource::init();
    assert!(std::ptr::eq(first, second));
    assert_eq!(first.native_order, ByteOrder::NATIVE);
}

#[test]
fn test_cursor_over_external_buffer() {
    memsource::init();
    let buffer = Arc::new(PageBuffer::allocate(128).unwrap());
    let source = Source::wrap_external(buffer.clone()).unwrap();

    let mut cursor = Cursor::with_order(source.clone(), ByteOrder::BigEndian);
    cursor.put(0xcafeu16).unwrap();
    cursor.pad_to_word(0).unwrap();
    cursor.put(-7i64).unwrap();
    assert_eq!(&buffer.as_bytes()[..2], &[0xca, 0xfe]);

    let header = cursor.slice_at(0, 2).unwrap();
    assert_eq!(header.get_at::<u16>(0).unwrap(), 0xcafe);

    source.release();
    assert!(cursor.get_at::<u16>(0).unwrap_err().is_invalid_state());
    assert_eq!(&buffer.as_bytes()[..2], &[0xca, 0xfe]);
}

#[test]
fn test_streams_and_cursor_share_a_source() {
    let source = Source::new_array(32);
    let mut writer = SourceWriter::with_window(source.clone(), 8, 16).unwrap();
    std::io::Write::write_all(&mut writer, b"memsource").unwrap();

    let cursor = Cursor::new(source.with_permissions(Permissions::READ).unwrap());
    assert_eq!(cursor.get_at::<u8>(8).unwrap(), b'm');
    assert!(cursor.put_at(8, 0u8).unwrap_err().is_permission());

    let mut reader = SourceReader::with_window(cursor.source().clone(), 8, 9).unwrap();
    let mut text = String::new();
    reader.read_to_string(&mut text).unwrap();
    assert_eq!(text, "memsource");
}
