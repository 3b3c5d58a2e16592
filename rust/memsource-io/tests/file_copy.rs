use std::io::{Read, Seek, SeekFrom, Write};

use memsource_io::{SourceReader, SourceWriter};
use memsource_source::Source;
use memsource_testkit::data_gen;

#[test]
fn test_copy_source_window_through_file() {
    let data = data_gen::random_bytes(42, 10_000);
    let source = Source::allocate(data.len()).unwrap();
    SourceWriter::new(source.clone()).write_all(&data).unwrap();

    let mut file = tempfile::tempfile().unwrap();
    let mut reader = SourceReader::with_window(source.clone(), 1000, 5000).unwrap();
    let copied = std::io::copy(&mut reader, &mut file).unwrap();
    assert_eq!(copied, 5000);
    assert_eq!(reader.available(), 0);

    let target = Source::allocate_zeroed(6000).unwrap();
    let mut writer = SourceWriter::with_window(target.clone(), 500, 5000).unwrap();
    file.seek(SeekFrom::Start(0)).unwrap();
    std::io::copy(&mut file, &mut writer).unwrap();
    assert_eq!(writer.available(), 0);

    let bytes = target.to_vec().unwrap();
    assert!(bytes[..500].iter().all(|&b| b == 0));
    assert_eq!(&bytes[500..5500], &data[1000..6000]);
    assert!(bytes[5500..].iter().all(|&b| b == 0));

    source.release();
    target.release();
}

#[test]
fn test_oversized_copy_fails_without_partial_write() {
    let target = Source::allocate_zeroed(16).unwrap();
    let mut writer = SourceWriter::new(target.clone());
    let data = data_gen::sequential_bytes(32);
    let err = writer.write_all(&data).unwrap_err();
    assert_eq!(err.kind(), std::io::ErrorKind::WriteZero);
    assert_eq!(target.to_vec().unwrap(), [0; 16]);
}

#[test]
fn test_readers_have_independent_offsets() {
    let source = Source::from_vec(data_gen::sequential_bytes(64));
    let mut a = SourceReader::new(source.clone());
    let mut b = SourceReader::with_window(source, 32, 32).unwrap();
    let mut buf = [0u8; 4];
    a.read_exact(&mut buf).unwrap();
    assert_eq!(buf, [0, 1, 2, 3]);
    b.read_exact(&mut buf).unwrap();
    assert_eq!(buf, [32, 33, 34, 35]);
    a.read_exact(&mut buf).unwrap();
    assert_eq!(buf, [4, 5, 6, 7]);
}
