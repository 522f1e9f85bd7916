//! Encodings rebuilt from arithmetic alone.
//!
//! Nothing here looks at storage. The value is split into sign, a fraction
//! in `[0.5, 1)` and a binary exponent, and the sign, exponent and
//! significand fields are assembled from those numbers. All rescaling is a
//! multiplication by an exact power of two, so no step rounds as long as the
//! scaled result is representable, which holds for every intermediate the
//! encoder produces.

use log::trace;

use crate::width::{BinaryFloat, EncodingBits};

// Enough doubling steps for 2^512, the largest step any supported width uses.
const MAX_STEPS: usize = 10;

/// Exact powers of two `(k, 2^k, 2^-k)` for `k = 1, 2, 4, ..` up to
/// `F::MAX_SCALE_STEP`, largest first.
struct ScaleSteps<F: BinaryFloat> {
    steps: [(i32, F, F); MAX_STEPS],
    len: usize,
}

impl<F: BinaryFloat> ScaleSteps<F> {
    fn new() -> Self {
        let mut steps = [(0, F::ONE, F::ONE); MAX_STEPS];
        let mut len = 0;
        let (mut step, mut up, mut down) = (1, F::TWO, F::HALF);
        while step <= F::MAX_SCALE_STEP && len < MAX_STEPS {
            steps[len] = (step, up, down);
            len += 1;
            step *= 2;
            up = up * up;
            down = down * down;
        }
        steps[..len].reverse();
        Self { steps, len }
    }

    fn descending(&self) -> &[(i32, F, F)] {
        &self.steps[..self.len]
    }
}

/// Split a value into a fraction and an exponent, `x = f * 2^e`.
///
/// For finite nonzero `x` the fraction's magnitude lies in `[0.5, 1)`;
/// subnormal inputs are brought up into that range as well. Zero returns
/// `(x, 0)` and non-finite input is returned unchanged with exponent 0.
pub fn frexp<F: BinaryFloat>(x: F) -> (F, i32) {
    if x == F::ZERO || !x.is_finite() {
        return (x, 0);
    }

    let negative = x < F::ZERO;
    let mut m = x.abs();
    let mut e = 0;
    let steps = ScaleSteps::<F>::new();

    // Scale down to below 2.
    for &(step, up, down) in steps.descending() {
        while m >= up {
            m = m * down;
            e += step;
        }
    }
    if m >= F::ONE {
        m = m * F::HALF;
        e += 1;
    }
    // Scale up to at least 0.5.
    for &(step, up, down) in steps.descending() {
        while m < down {
            m = m * up;
            e -= step;
        }
    }

    (if negative { -m } else { m }, e)
}

/// Multiply `x` by `2^e` in exact power-of-two steps.
///
/// Exact whenever the result is a normal value or an integer reached by
/// scaling up; a result that lands in the subnormal range may round.
pub fn ldexp<F: BinaryFloat>(x: F, e: i32) -> F {
    let mut x = x;
    let mut e = e;
    for &(step, up, down) in ScaleSteps::<F>::new().descending() {
        while e >= step {
            x = x * up;
            e -= step;
        }
        while e <= -step {
            x = x * down;
            e += step;
        }
    }
    x
}

/// Return the encoding of `x` by using math.
///
/// `None` for NaN and infinities, which have no fraction/exponent
/// decomposition.
pub fn arithmetic_bits<F: BinaryFloat>(x: F) -> Option<F::Bits> {
    if !x.is_finite() {
        return None;
    }

    let mut result = if x.is_sign_negative() { F::Bits::HIGH_BIT } else { F::Bits::ZERO };

    // Zero of either sign has nothing below the sign bit.
    if x == F::ZERO {
        return Some(result);
    }

    let (fraction, exponent) = frexp(x.abs());

    if exponent < F::MIN_EXPONENT {
        // Subnormal: exponent field is zero, shift the fraction so its lowest
        // bit lands on the 1 position.
        let significand = ldexp(fraction, exponent - F::MIN_EXPONENT + F::SIGNIFICAND_BITS).truncate();
        trace!("arithmetic encoding of subnormal {:?}: significand {:#X}", x, significand);
        result = result | significand;
    } else {
        // Normal: drop the implicit leading bit, then store the exponent with
        // a bias of MIN_EXPONENT - 1.
        let significand = ldexp(fraction - F::HALF, F::SIGNIFICAND_BITS).truncate();
        let biased = F::Bits::from_u32((exponent - F::MIN_EXPONENT + 1) as u32);
        trace!(
            "arithmetic encoding of {:?}: exponent field {}, significand {:#X}",
            x,
            biased,
            significand
        );
        result = result | significand | (biased << (F::SIGNIFICAND_BITS - 1) as u32);
    }

    Some(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frexp_normalises_to_half_open_unit() {
        assert_eq!(frexp(1.0f64), (0.5, 1));
        assert_eq!(frexp(8.0f64), (0.5, 4));
        assert_eq!(frexp(0.75f64), (0.75, 0));
        assert_eq!(frexp(3.0f32), (0.75, 2));
        assert_eq!(frexp(-6.0f64), (-0.75, 3));
        assert_eq!(frexp(f64::MAX), (1.0 - f64::EPSILON / 2.0, 1024));
    }

    #[test]
    fn test_frexp_subnormals() {
        assert_eq!(frexp(f64::SMALLEST_SUBNORMAL), (0.5, -1073));
        assert_eq!(frexp(f32::SMALLEST_SUBNORMAL), (0.5, -148));
        assert_eq!(frexp(f64::MIN_POSITIVE), (0.5, -1021));
        assert_eq!(frexp(f32::MIN_POSITIVE), (0.5, -125));
    }

    #[test]
    fn test_frexp_passes_through_zero_and_non_finite() {
        assert_eq!(frexp(0.0f64), (0.0, 0));
        assert_eq!(frexp(f64::INFINITY), (f64::INFINITY, 0));
        assert!(frexp(f32::NAN).0.is_nan());
    }

    #[test]
    fn test_ldexp_is_exact_for_powers_of_two() {
        assert_eq!(ldexp(0.5f64, 1), 1.0);
        assert_eq!(ldexp(0.5f64, -1073), f64::SMALLEST_SUBNORMAL);
        assert_eq!(ldexp(0.5f64, 1024), f64::from_bits(0x7FE0_0000_0000_0000));
        assert_eq!(ldexp(0.75f32, 24), 12_582_912.0);
        assert_eq!(ldexp(3.0f64, 0), 3.0);
    }

    #[test]
    fn test_frexp_ldexp_inverse() {
        for x in [1.0e-310f64, 0.1, 1.0 / 3.0, 123456.789, 1.0e300] {
            let (f, e) = frexp(x);
            assert_eq!(ldexp(f, e), x, "frexp/ldexp of {}", x);
        }
    }

    #[test]
    fn test_arithmetic_bits_match_storage() {
        let values = [
            0.0f64,
            -0.0,
            1.0,
            -1.0,
            0.1,
            0.2,
            1.0 / 3.0,
            f64::SMALLEST_SUBNORMAL,
            f64::MIN_POSITIVE - f64::SMALLEST_SUBNORMAL,
            f64::MIN_POSITIVE,
            -f64::MIN_POSITIVE,
            f64::MAX,
            f64::MIN,
        ];
        for x in values {
            assert_eq!(arithmetic_bits(x), Some(x.to_bits()), "arithmetic bits of {:e}", x);
        }

        let values = [
            0.0f32,
            -0.0,
            1.0,
            0.1,
            f32::SMALLEST_SUBNORMAL,
            f32::MIN_POSITIVE - f32::SMALLEST_SUBNORMAL,
            f32::MIN_POSITIVE,
            f32::MAX,
            -f32::MAX,
        ];
        for x in values {
            assert_eq!(arithmetic_bits(x), Some(x.to_bits()), "arithmetic bits of {:e}", x);
        }
    }

    #[test]
    fn test_arithmetic_bits_distinguish_signed_zero() {
        assert_eq!(arithmetic_bits(-0.0f64), Some(0x8000_0000_0000_0000));
        assert_eq!(arithmetic_bits(0.0f64), Some(0));
    }

    #[test]
    fn test_arithmetic_bits_reject_non_finite() {
        assert_eq!(arithmetic_bits(f64::NAN), None);
        assert_eq!(arithmetic_bits(f32::INFINITY), None);
        assert_eq!(arithmetic_bits(f64::NEG_INFINITY), None);
    }
}
