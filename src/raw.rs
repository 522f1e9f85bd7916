//! Encodings read straight out of storage.
//!
//! The bytes of the value are copied into an integer of the same width with
//! no arithmetic interpretation, so every bit pattern (NaN payloads and
//! infinities included) survives unchanged.

use crate::width::{BinaryFloat, EncodingBits};

/// Return the encoding of `x` by copying its bits.
#[inline]
pub fn raw_bits<F: BinaryFloat>(x: F) -> F::Bits {
    F::Bits::read_native(x.to_ne_bytes().as_ref())
}

/// Inverse of [`raw_bits`]: the value whose storage holds `bits`.
#[inline]
pub fn decode<F: BinaryFloat>(bits: F::Bits) -> F {
    let mut bytes = F::Bytes::default();
    bits.write_native(bytes.as_mut());
    F::from_ne_bytes(bytes)
}

/// Split an encoding into `(sign, exponent field, significand field)`.
pub fn fields<F: BinaryFloat>(bits: F::Bits) -> (bool, u64, u64) {
    let width = F::WIDTH;
    let bits = bits.to_u64();
    let sign = bits & width.high_bit() != 0;
    let exponent = (bits >> width.mantissa_bits()) & width.exponent_mask();
    let significand = bits & width.mantissa_mask();
    (sign, exponent, significand)
}
