//! Cross-checked encodings.
//!
//! Every encoding handed to the distance metric is computed twice, once by
//! copying storage ([`raw_bits`]) and once by arithmetic
//! ([`arithmetic_bits`]). The two must agree for every finite value; a
//! disagreement means the arithmetic encoder is broken, not that the input
//! was bad, so [`encode`] treats it as fatal.

use std::fmt;

use log::{error, trace};

use crate::arithmetic::arithmetic_bits;
use crate::config::{CrossCheck, DistanceConfig};
use crate::error::{DistanceError, DistanceResult};
use crate::raw::{fields, raw_bits};
use crate::width::{BinaryFloat, EncodingBits, FloatWidth};

/// Run both encoders on `x` and return the shared encoding.
///
/// Non-finite values have no arithmetic decomposition; their raw encoding is
/// returned unchecked.
pub fn check_encoding<F: BinaryFloat>(x: F) -> DistanceResult<F::Bits> {
    let raw = raw_bits(x);
    match arithmetic_bits(x) {
        Some(arithmetic) if arithmetic == raw => {
            trace!("encoding of {:?} verified: {:#X}", x, raw);
            Ok(raw)
        }
        Some(arithmetic) => Err(DistanceError::InternalEncodingMismatch {
            value: x.to_f64(),
            raw: raw.to_u64(),
            arithmetic: arithmetic.to_u64(),
        }),
        None => Ok(raw),
    }
}

/// Return the encoding of `x`, verified by both encoders.
///
/// # Panics
///
/// Panics when the two encoders disagree, naming the operand and both
/// encodings.
pub fn encode<F: BinaryFloat>(x: F) -> F::Bits {
    match check_encoding(x) {
        Ok(bits) => bits,
        Err(err) => {
            error!("{}", err);
            panic!("{}", err);
        }
    }
}

/// [`encode`], or the raw encoding alone when the configuration turns the
/// cross-check off.
pub fn encode_with<F: BinaryFloat>(x: F, config: &DistanceConfig) -> F::Bits {
    match config.cross_check {
        CrossCheck::Always => encode(x),
        CrossCheck::Never => raw_bits(x),
    }
}

/// IEEE 754 class of an encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FloatClass {
    Zero,
    Subnormal,
    Normal,
    Infinite,
    Nan,
}

impl fmt::Display for FloatClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FloatClass::Zero => "zero",
            FloatClass::Subnormal => "subnormal",
            FloatClass::Normal => "normal",
            FloatClass::Infinite => "infinite",
            FloatClass::Nan => "nan",
        };
        f.write_str(name)
    }
}

/// Everything both encoders know about one value.
#[derive(Debug, Clone, PartialEq)]
pub struct EncodingDebugInfo {
    pub value: f64,
    pub width: FloatWidth,
    pub class: FloatClass,
    pub sign: bool,
    pub exponent_field: u64,
    pub significand_field: u64,
    /// Exponent of the leading significand bit's weight; `None` for zero,
    /// infinities and NaN.
    pub unbiased_exponent: Option<i32>,
    pub raw_bits: u64,
    /// `None` where the arithmetic encoder has no answer (NaN, infinities).
    pub arithmetic_bits: Option<u64>,
}

impl EncodingDebugInfo {
    pub fn encoders_agree(&self) -> bool {
        self.arithmetic_bits.map_or(true, |bits| bits == self.raw_bits)
    }
}

impl fmt::Display for EncodingDebugInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let digits = (self.width.bits() / 4) as usize;
        write!(
            f,
            "{} ({}, {}): sign {}, exponent field {}, significand {:#X}, raw {:#0w$X}",
            self.value,
            self.width,
            self.class,
            u8::from(self.sign),
            self.exponent_field,
            self.significand_field,
            self.raw_bits,
            w = digits + 2
        )?;
        if let Some(exponent) = self.unbiased_exponent {
            write!(f, ", 2^{}", exponent)?;
        }
        match self.arithmetic_bits {
            Some(bits) if bits == self.raw_bits => write!(f, ", arithmetic agrees"),
            Some(bits) => write!(f, ", arithmetic MISMATCH {:#X}", bits),
            None => write!(f, ", no arithmetic encoding"),
        }
    }
}

/// Decompose `x` with both encoders without failing on a mismatch.
pub fn inspect<F: BinaryFloat>(x: F) -> EncodingDebugInfo {
    let width = F::WIDTH;
    let raw = raw_bits(x);
    let (sign, exponent_field, significand_field) = fields::<F>(raw);

    let class = match (exponent_field, significand_field) {
        (0, 0) => FloatClass::Zero,
        (0, _) => FloatClass::Subnormal,
        (e, 0) if e == width.max_exponent() as u64 => FloatClass::Infinite,
        (e, _) if e == width.max_exponent() as u64 => FloatClass::Nan,
        _ => FloatClass::Normal,
    };
    let unbiased_exponent = match class {
        FloatClass::Normal => Some(exponent_field as i32 - width.bias()),
        FloatClass::Subnormal => Some(1 - width.bias()),
        _ => None,
    };

    EncodingDebugInfo {
        value: x.to_f64(),
        width,
        class,
        sign,
        exponent_field,
        significand_field,
        unbiased_exponent,
        raw_bits: raw.to_u64(),
        arithmetic_bits: arithmetic_bits(x).map(EncodingBits::to_u64),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_agrees_with_storage() {
        assert_eq!(encode(0.1f64), 0x3FB9_9999_9999_999A);
        assert_eq!(encode(-0.0f64), 0x8000_0000_0000_0000);
        assert_eq!(encode(1.0f32), 0x3F80_0000);
        assert_eq!(encode(f32::SMALLEST_SUBNORMAL), 1);
    }

    #[test]
    fn test_check_encoding_passes_non_finite_through() {
        assert_eq!(check_encoding(f64::INFINITY), Ok(0x7FF0_0000_0000_0000));
        assert_eq!(check_encoding(f32::NEG_INFINITY), Ok(0xFF80_0000));
    }

    #[test]
    fn test_encode_with_unchecked() {
        let config = DistanceConfig::unchecked();
        assert_eq!(encode_with(2.0f64, &config), 0x4000_0000_0000_0000);
        assert_eq!(encode_with(2.0f64, &DistanceConfig::default()), 0x4000_0000_0000_0000);
    }

    #[test]
    fn test_inspect_classes() {
        assert_eq!(inspect(0.0f64).class, FloatClass::Zero);
        assert_eq!(inspect(f64::SMALLEST_SUBNORMAL).class, FloatClass::Subnormal);
        assert_eq!(inspect(1.0f32).class, FloatClass::Normal);
        assert_eq!(inspect(f32::INFINITY).class, FloatClass::Infinite);
        assert_eq!(inspect(f64::NAN).class, FloatClass::Nan);
    }

    #[test]
    fn test_inspect_fields() {
        let info = inspect(-1.5f64);
        assert!(info.sign);
        assert_eq!(info.exponent_field, 1023);
        assert_eq!(info.significand_field, 1 << 51);
        assert_eq!(info.unbiased_exponent, Some(0));
        assert!(info.encoders_agree());

        let info = inspect(f32::SMALLEST_SUBNORMAL);
        assert_eq!(info.unbiased_exponent, Some(-126));
        assert_eq!(info.arithmetic_bits, Some(1));

        let info = inspect(f64::NAN);
        assert_eq!(info.arithmetic_bits, None);
        assert!(info.encoders_agree());
    }

    #[test]
    fn test_debug_info_display() {
        let line = inspect(1.0f32).to_string();
        assert_eq!(
            line,
            "1 (f32, normal): sign 0, exponent field 127, significand 0x0, raw 0x3F800000, 2^0, arithmetic agrees"
        );
    }
}
