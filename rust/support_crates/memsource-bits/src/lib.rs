//! Byte-order codec for fixed-width scalars.
//!
//! Converts between scalars (8/16/32/64-bit integers and IEEE-754 floats) and their
//! byte representation in a requested [`ByteOrder`]. Floating point values are always
//! converted through their integer bit pattern, so NaN payloads and infinities survive
//! a round trip unchanged.

extern crate byteorder;

pub mod order;
pub mod scalar;

pub use order::ByteOrder;
pub use scalar::{Scalar, decode, encode};

#[cfg(test)]
mod tests;
