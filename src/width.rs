//! Binary floating point formats understood by the encoders.
//!
//! [`BinaryFloat`] carries the per-format constants (significand digits,
//! minimum exponent, the high bit) as associated constants so that every
//! derived quantity is fixed at compile time. [`FloatWidth`] is the runtime
//! descriptor of the same information, used for diagnostics and the CLI.

use std::fmt;
use std::hash::Hash;
use std::ops::{BitAnd, BitOr, Mul, Neg, Shl, Shr, Sub};
use std::str::FromStr;

use byteorder::{ByteOrder, NativeEndian};

use crate::error::DistanceError;

/// Supported IEEE 754 binary formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FloatWidth {
    /// binary32 - 1 sign, 8 exponent, 23 explicit significand bits
    Width32,
    /// binary64 - 1 sign, 11 exponent, 52 explicit significand bits
    Width64,
}

impl FloatWidth {
    /// Total number of bits in an encoding.
    pub const fn bits(self) -> u32 {
        match self {
            FloatWidth::Width32 => 32,
            FloatWidth::Width64 => 64,
        }
    }

    /// Width of the exponent field.
    pub const fn exponent_bits(self) -> u32 {
        match self {
            FloatWidth::Width32 => 8,
            FloatWidth::Width64 => 11,
        }
    }

    /// Width of the explicit significand field (the implicit bit excluded).
    pub const fn mantissa_bits(self) -> u32 {
        match self {
            FloatWidth::Width32 => 23,
            FloatWidth::Width64 => 52,
        }
    }

    /// Significand precision in digits, implicit bit included.
    pub const fn significand_digits(self) -> u32 {
        self.mantissa_bits() + 1
    }

    /// Exponent bias of the stored exponent field.
    pub const fn bias(self) -> i32 {
        match self {
            FloatWidth::Width32 => 127,
            FloatWidth::Width64 => 1023,
        }
    }

    /// Smallest exponent `e` of a normal value written as `f * 2^e` with
    /// `f` in `[0.5, 1)`.
    pub const fn min_exponent(self) -> i32 {
        2 - self.bias()
    }

    /// The all-ones exponent field reserved for infinities and NaN.
    pub const fn max_exponent(self) -> u32 {
        (1 << self.exponent_bits()) - 1
    }

    pub const fn mantissa_mask(self) -> u64 {
        (1u64 << self.mantissa_bits()) - 1
    }

    pub const fn exponent_mask(self) -> u64 {
        (1u64 << self.exponent_bits()) - 1
    }

    /// The encoding with only the sign bit set, also the encoding of -0.
    pub const fn high_bit(self) -> u64 {
        1u64 << (self.bits() - 1)
    }
}

impl fmt::Display for FloatWidth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FloatWidth::Width32 => write!(f, "f32"),
            FloatWidth::Width64 => write!(f, "f64"),
        }
    }
}

impl FromStr for FloatWidth {
    type Err = DistanceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "32" | "f32" | "single" => Ok(FloatWidth::Width32),
            "64" | "f64" | "double" => Ok(FloatWidth::Width64),
            other => Err(DistanceError::InvalidWidth(other.to_string())),
        }
    }
}

/// Unsigned integer holding an encoding of the same width as its float.
pub trait EncodingBits:
    Copy
    + Eq
    + Ord
    + Hash
    + fmt::Debug
    + fmt::Display
    + fmt::UpperHex
    + BitOr<Output = Self>
    + BitAnd<Output = Self>
    + Shl<u32, Output = Self>
    + Shr<u32, Output = Self>
    + Send
    + Sync
    + 'static
{
    const ZERO: Self;
    /// Only the most significant bit set.
    const HIGH_BIT: Self;

    fn wrapping_sub(self, rhs: Self) -> Self;
    fn wrapping_add(self, rhs: Self) -> Self;
    fn from_u32(value: u32) -> Self;
    fn to_u64(self) -> u64;
    fn to_u128(self) -> u128;

    /// Read an integer from bytes in native order.
    fn read_native(bytes: &[u8]) -> Self;
    /// Write the integer into bytes in native order.
    fn write_native(self, bytes: &mut [u8]);
}

macro_rules! encoding_bits_impl {
    ($u:ty, $read:ident, $write:ident) => {
        impl EncodingBits for $u {
            const ZERO: Self = 0;
            const HIGH_BIT: Self = <$u>::MAX ^ (<$u>::MAX >> 1);

            #[inline]
            fn wrapping_sub(self, rhs: Self) -> Self {
                <$u>::wrapping_sub(self, rhs)
            }
            #[inline]
            fn wrapping_add(self, rhs: Self) -> Self {
                <$u>::wrapping_add(self, rhs)
            }
            #[inline]
            fn from_u32(value: u32) -> Self {
                value as $u
            }
            #[inline]
            fn to_u64(self) -> u64 {
                self as u64
            }
            #[inline]
            fn to_u128(self) -> u128 {
                self as u128
            }
            #[inline]
            fn read_native(bytes: &[u8]) -> Self {
                NativeEndian::$read(bytes)
            }
            #[inline]
            fn write_native(self, bytes: &mut [u8]) {
                NativeEndian::$write(bytes, self)
            }
        }
    };
}

encoding_bits_impl!(u32, read_u32, write_u32);
encoding_bits_impl!(u64, read_u64, write_u64);

/// A binary floating point type with an unsigned integer of identical width.
pub trait BinaryFloat:
    Copy
    + PartialOrd
    + fmt::Debug
    + fmt::Display
    + FromStr
    + Mul<Output = Self>
    + Sub<Output = Self>
    + Neg<Output = Self>
    + Send
    + Sync
    + 'static
{
    type Bits: EncodingBits;
    /// Storage for the native byte view of a value.
    type Bytes: AsRef<[u8]> + AsMut<[u8]> + Default;

    const WIDTH: FloatWidth;
    /// Significand digits, implicit bit included.
    const SIGNIFICAND_BITS: i32;
    /// Minimum normal exponent in the `[0.5, 1)` normalisation.
    const MIN_EXPONENT: i32;
    /// Largest `k` for which both `2^k` and `2^-k` are normal values of
    /// this format; bounds the scaling steps in `frexp`/`ldexp`.
    const MAX_SCALE_STEP: i32;

    const ZERO: Self;
    const HALF: Self;
    const ONE: Self;
    const TWO: Self;
    const SMALLEST_SUBNORMAL: Self;
    const SMALLEST_NORMAL: Self;

    fn is_sign_negative(self) -> bool;
    fn is_finite(self) -> bool;
    fn is_nan(self) -> bool;
    fn abs(self) -> Self;

    /// Truncating conversion of an integral, in-range value to its integer.
    fn truncate(self) -> Self::Bits;

    fn to_ne_bytes(self) -> Self::Bytes;
    fn from_ne_bytes(bytes: Self::Bytes) -> Self;

    /// Lossless widening for diagnostics and errors.
    fn to_f64(self) -> f64;
}

macro_rules! binary_float_impl {
    ($f:ident, $u:ty, $n:expr, $width:expr, $step:expr, $denorm_min:expr) => {
        impl BinaryFloat for $f {
            type Bits = $u;
            type Bytes = [u8; $n];

            const WIDTH: FloatWidth = $width;
            const SIGNIFICAND_BITS: i32 = $f::MANTISSA_DIGITS as i32;
            const MIN_EXPONENT: i32 = $f::MIN_EXP;
            const MAX_SCALE_STEP: i32 = $step;

            const ZERO: Self = 0.0;
            const HALF: Self = 0.5;
            const ONE: Self = 1.0;
            const TWO: Self = 2.0;
            const SMALLEST_SUBNORMAL: Self = $denorm_min;
            const SMALLEST_NORMAL: Self = $f::MIN_POSITIVE;

            #[inline]
            fn is_sign_negative(self) -> bool {
                $f::is_sign_negative(self)
            }
            #[inline]
            fn is_finite(self) -> bool {
                $f::is_finite(self)
            }
            #[inline]
            fn is_nan(self) -> bool {
                $f::is_nan(self)
            }
            #[inline]
            fn abs(self) -> Self {
                $f::abs(self)
            }
            #[inline]
            fn truncate(self) -> Self::Bits {
                self as $u
            }
            #[inline]
            fn to_ne_bytes(self) -> Self::Bytes {
                $f::to_ne_bytes(self)
            }
            #[inline]
            fn from_ne_bytes(bytes: Self::Bytes) -> Self {
                $f::from_ne_bytes(bytes)
            }
            #[inline]
            fn to_f64(self) -> f64 {
                self as f64
            }
        }
    };
}

binary_float_impl!(f32, u32, 4, FloatWidth::Width32, 64, 1.4e-45);
binary_float_impl!(f64, u64, 8, FloatWidth::Width64, 512, 4.9406564584124654e-324);
