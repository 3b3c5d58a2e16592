use crate::{ByteOrder, Scalar, decode, encode};

const ORDERS: [ByteOrder; 2] = [ByteOrder::BigEndian, ByteOrder::LittleEndian];

fn check_round_trip<T: Scalar>(value: T) {
    for order in ORDERS {
        let bytes = encode(value, order);
        assert_eq!(bytes.as_ref().len(), T::WIDTH);
        let decoded: T = decode(&bytes, order);
        assert_eq!(
            bytemuck::bytes_of(&decoded),
            bytemuck::bytes_of(&value),
            "{value:?} in {order}"
        );
    }
}

#[test]
fn test_known_encodings() {
    assert_eq!(encode(0x0102u16, ByteOrder::BigEndian), [1, 2]);
    assert_eq!(encode(0x0102u16, ByteOrder::LittleEndian), [2, 1]);
    assert_eq!(
        encode(0x01020304u32, ByteOrder::BigEndian),
        [1, 2, 3, 4]
    );
    assert_eq!(
        encode(-2i64, ByteOrder::LittleEndian),
        [0xfe, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff]
    );
    assert_eq!(encode(1.0f32, ByteOrder::BigEndian), [0x3f, 0x80, 0, 0]);
    assert_eq!(encode(0xabu8, ByteOrder::BigEndian), [0xab]);
}

#[test]
fn test_round_trip_random_values() {
    let mut rng = fastrand::Rng::with_seed(7);
    for _ in 0..1000 {
        check_round_trip(rng.u8(..));
        check_round_trip(rng.i8(..));
        check_round_trip(rng.u16(..));
        check_round_trip(rng.i16(..));
        check_round_trip(rng.u32(..));
        check_round_trip(rng.i32(..));
        check_round_trip(rng.u64(..));
        check_round_trip(rng.i64(..));
        check_round_trip(f32::from_bits(rng.u32(..)));
        check_round_trip(f64::from_bits(rng.u64(..)));
    }
}

#[test]
fn test_round_trip_special_floats() {
    for value in [
        f32::NAN,
        f32::from_bits(0x7fc0_1234),
        f32::from_bits(0xff80_0001),
        f32::INFINITY,
        f32::NEG_INFINITY,
        -0.0f32,
        f32::MIN_POSITIVE,
    ] {
        check_round_trip(value);
    }
    for value in [
        f64::NAN,
        f64::from_bits(0x7ff8_0000_dead_beef),
        f64::INFINITY,
        f64::NEG_INFINITY,
        -0.0f64,
        f64::EPSILON,
    ] {
        check_round_trip(value);
    }
}

#[test]
fn test_opposite_orders_are_byte_reversed() {
    let be = encode(0x1122_3344_5566_7788u64, ByteOrder::BigEndian);
    let mut le = encode(0x1122_3344_5566_7788u64, ByteOrder::LittleEndian);
    le.reverse();
    assert_eq!(be, le);
}

#[test]
fn test_swap_bytes_and_to_order() {
    assert_eq!(0x0102u16.swap_bytes(), 0x0201);
    assert_eq!(
        f64::from_bits(0x0102_0304_0506_0708).swap_bytes().to_bits(),
        0x0807_0605_0403_0201
    );
    let value = 0x0a0b_0c0du32;
    assert_eq!(value.to_order(ByteOrder::NATIVE), value);
    assert_eq!(value.to_order(ByteOrder::NATIVE.opposite()), value.swap_bytes());
}

#[test]
fn test_slice_codec() {
    let values = [1.5f64, -0.25, f64::INFINITY];
    for order in ORDERS {
        let mut bytes = vec![0u8; values.len() * f64::WIDTH];
        f64::encode_slice(&values, &mut bytes, order);
        for (i, value) in values.iter().enumerate() {
            let single = encode(*value, order);
            assert_eq!(&bytes[i * 8..i * 8 + 8], single.as_ref());
        }
        let mut decoded = [0f64; 3];
        f64::decode_slice(&bytes, &mut decoded, order);
        assert_eq!(decoded, values);
    }

    let values = [-1i16, 2, i16::MIN];
    let mut bytes = [0u8; 6];
    i16::encode_slice(&values, &mut bytes, ByteOrder::BigEndian);
    assert_eq!(bytes, [0xff, 0xff, 0, 2, 0x80, 0]);
}

#[test]
fn test_byte_order_helpers() {
    assert_eq!(ByteOrder::BigEndian.opposite(), ByteOrder::LittleEndian);
    assert_eq!(ByteOrder::LittleEndian.opposite(), ByteOrder::BigEndian);
    assert!(ByteOrder::NATIVE.is_native());
    assert!(!ByteOrder::NATIVE.opposite().is_native());
    assert_eq!(ByteOrder::default(), ByteOrder::NATIVE);
}

fn check_width<T: Scalar>() {
    assert_eq!(T::WIDTH, std::mem::size_of::<T>());
    assert_eq!(std::mem::size_of::<T::Bytes>(), T::WIDTH);
}

#[test]
fn test_width_matches_layout() {
    check_width::<u8>();
    check_width::<i8>();
    check_width::<u16>();
    check_width::<i16>();
    check_width::<u32>();
    check_width::<i32>();
    check_width::<u64>();
    check_width::<i64>();
    check_width::<f32>();
    check_width::<f64>();
}

#[test]
fn test_decode_from_fixed_width_bytes() {
    assert_eq!(decode::<u16>(&[1, 2], ByteOrder::BigEndian), 0x0102);
    assert_eq!(decode::<u16>(&[1, 2], ByteOrder::LittleEndian), 0x0201);
    assert_eq!(decode::<i8>(&[0xff], ByteOrder::BigEndian), -1);
    assert_eq!(
        decode::<f32>(&[0, 0, 0x80, 0x3f], ByteOrder::LittleEndian),
        1.0
    );
}
