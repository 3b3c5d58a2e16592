use byteorder::{BigEndian, ByteOrder as _, LittleEndian};

use crate::ByteOrder;

/// A fixed-width value that can be moved to and from raw memory in either byte order.
///
/// Implemented for `u8`, `i8`, `u16`, `i16`, `u32`, `i32`, `u64`, `i64`, `f32` and `f64`.
/// All implementations are plain-old-data, so a native-order value may be copied
/// to memory bit-for-bit and only needs [`Scalar::swap_bytes`] when the requested
/// order differs from [`ByteOrder::NATIVE`].
///
/// The trait is sealed: sources check ranges against `WIDTH` and then move
/// `size_of::<Self>()` bytes, so the two must agree for every implementation.
///
/// ```compile_fail
/// use memsource_bits::{ByteOrder, Scalar};
///
/// #[derive(Clone, Copy, PartialEq, Debug)]
/// #[repr(transparent)]
/// struct Wide([u8; 16]);
///
/// unsafe impl bytemuck::Zeroable for Wide {}
/// unsafe impl bytemuck::Pod for Wide {}
///
/// impl Scalar for Wide {
///     const WIDTH: usize = 1;
///     type Bytes = [u8; 1];
///
///     fn encode_into(self, dst: &mut [u8], _order: ByteOrder) {
///         dst[0] = self.0[0];
///     }
///
///     fn decode(src: &[u8; 1], _order: ByteOrder) -> Self {
///         Wide([src[0]; 16])
///     }
///
///     fn encode_slice(_values: &[Self], _dst: &mut [u8], _order: ByteOrder) {}
///
///     fn decode_slice(_src: &[u8], _dst: &mut [Self], _order: ByteOrder) {}
///
///     fn swap_bytes(self) -> Self {
///         self
///     }
/// }
/// ```
pub trait Scalar:
    sealed::Sealed + bytemuck::Pod + PartialEq + std::fmt::Debug + Send + Sync + 'static
{
    /// Encoded width in bytes. Always `size_of::<Self>()`.
    const WIDTH: usize;

    /// Fixed-size byte array holding one encoded value.
    type Bytes: AsRef<[u8]> + AsMut<[u8]> + Default + Copy + std::fmt::Debug;

    /// Writes the value into the first `WIDTH` bytes of `dst`.
    ///
    /// # Panics
    ///
    /// Panics if `dst` is shorter than `WIDTH`.
    fn encode_into(self, dst: &mut [u8], order: ByteOrder);

    /// Reads a value from its encoded bytes.
    fn decode(src: &Self::Bytes, order: ByteOrder) -> Self;

    /// Encodes `values` into `dst`, which must be exactly `values.len() * WIDTH` bytes.
    fn encode_slice(values: &[Self], dst: &mut [u8], order: ByteOrder);

    /// Decodes `src`, which must be exactly `dst.len() * WIDTH` bytes, into `dst`.
    fn decode_slice(src: &[u8], dst: &mut [Self], order: ByteOrder);

    /// Reverses the byte order of the value's bit pattern.
    fn swap_bytes(self) -> Self;

    fn encode(self, order: ByteOrder) -> Self::Bytes {
        let mut bytes = Self::Bytes::default();
        self.encode_into(bytes.as_mut(), order);
        bytes
    }

    /// Converts a value between native order and `order`.
    ///
    /// The conversion is its own inverse.
    #[inline]
    fn to_order(self, order: ByteOrder) -> Self {
        if order.is_native() {
            self
        } else {
            self.swap_bytes()
        }
    }
}

/// Encodes `value` in the given byte order.
#[inline]
pub fn encode<T: Scalar>(value: T, order: ByteOrder) -> T::Bytes {
    value.encode(order)
}

/// Decodes a value of type `T` from its encoded bytes.
#[inline]
pub fn decode<T: Scalar>(bytes: &T::Bytes, order: ByteOrder) -> T {
    T::decode(bytes, order)
}

mod sealed {
    pub trait Sealed {}

    macro_rules! sealed {
        ($($t:ty),*) => {
            $(impl Sealed for $t {})*
        };
    }

    sealed!(u8, i8, u16, i16, u32, i32, u64, i64, f32, f64);
}

impl Scalar for u8 {
    const WIDTH: usize = 1;
    type Bytes = [u8; 1];

    #[inline]
    fn encode_into(self, dst: &mut [u8], _order: ByteOrder) {
        dst[0] = self;
    }

    #[inline]
    fn decode(src: &[u8; 1], _order: ByteOrder) -> Self {
        src[0]
    }

    fn encode_slice(values: &[Self], dst: &mut [u8], _order: ByteOrder) {
        dst.copy_from_slice(values);
    }

    fn decode_slice(src: &[u8], dst: &mut [Self], _order: ByteOrder) {
        dst.copy_from_slice(src);
    }

    #[inline]
    fn swap_bytes(self) -> Self {
        self
    }
}

impl Scalar for i8 {
    const WIDTH: usize = 1;
    type Bytes = [u8; 1];

    #[inline]
    fn encode_into(self, dst: &mut [u8], _order: ByteOrder) {
        dst[0] = self as u8;
    }

    #[inline]
    fn decode(src: &[u8; 1], _order: ByteOrder) -> Self {
        src[0] as i8
    }

    fn encode_slice(values: &[Self], dst: &mut [u8], _order: ByteOrder) {
        dst.copy_from_slice(bytemuck::cast_slice(values));
    }

    fn decode_slice(src: &[u8], dst: &mut [Self], _order: ByteOrder) {
        dst.copy_from_slice(bytemuck::cast_slice(src));
    }

    #[inline]
    fn swap_bytes(self) -> Self {
        self
    }
}

macro_rules! impl_scalar {
    ($($t:ident: $width:literal, $bits:ty);* $(;)?) => {
        paste::paste! {
            $(
                impl Scalar for $t {
                    const WIDTH: usize = $width;
                    type Bytes = [u8; $width];

                    #[inline]
                    fn encode_into(self, dst: &mut [u8], order: ByteOrder) {
                        match order {
                            ByteOrder::BigEndian => BigEndian::[<write_ $t>](dst, self),
                            ByteOrder::LittleEndian => LittleEndian::[<write_ $t>](dst, self),
                        }
                    }

                    #[inline]
                    fn decode(src: &[u8; $width], order: ByteOrder) -> Self {
                        match order {
                            ByteOrder::BigEndian => BigEndian::[<read_ $t>](src),
                            ByteOrder::LittleEndian => LittleEndian::[<read_ $t>](src),
                        }
                    }

                    fn encode_slice(values: &[Self], dst: &mut [u8], order: ByteOrder) {
                        match order {
                            ByteOrder::BigEndian => BigEndian::[<write_ $t _into>](values, dst),
                            ByteOrder::LittleEndian => {
                                LittleEndian::[<write_ $t _into>](values, dst)
                            }
                        }
                    }

                    fn decode_slice(src: &[u8], dst: &mut [Self], order: ByteOrder) {
                        match order {
                            ByteOrder::BigEndian => BigEndian::[<read_ $t _into>](src, dst),
                            ByteOrder::LittleEndian => LittleEndian::[<read_ $t _into>](src, dst),
                        }
                    }

                    #[inline]
                    fn swap_bytes(self) -> Self {
                        bytemuck::cast::<$bits, Self>(bytemuck::cast::<Self, $bits>(self).swap_bytes())
                    }
                }
            )*
        }
    };
}

impl_scalar! {
    u16: 2, u16;
    i16: 2, u16;
    u32: 4, u32;
    i32: 4, u32;
    u64: 8, u64;
    i64: 8, u64;
    f32: 4, u32;
    f64: 8, u64;
}
