//! Raw and arithmetic encoders must agree on every finite value.
//!
//! Values are drawn from seeded random bit patterns so every exponent,
//! subnormals included, is visited, plus a strided sweep of the entire f32
//! encoding space.

use float_distance::{arithmetic_bits, check_encoding, decode, encode, raw_bits, BinaryFloat};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

const SAMPLES: usize = 20_000;

fn assert_encoders_agree<F: BinaryFloat>(x: F) {
    if !x.is_finite() {
        return;
    }
    assert_eq!(arithmetic_bits(x), Some(raw_bits(x)), "encoders disagree on {:e}", x.to_f64());
}

#[test]
fn test_special_points_agree() {
    let s1 = f64::SMALLEST_SUBNORMAL;
    let n1 = f64::MIN_POSITIVE;
    for x in [0.0, -0.0, s1, -s1, n1 - s1, n1, 1.0 / 3.0, f64::MAX, f64::MIN, f64::EPSILON] {
        assert_encoders_agree(x);
    }
    let s1 = f32::SMALLEST_SUBNORMAL;
    let n1 = f32::MIN_POSITIVE;
    for x in [0.0, -0.0, s1, -s1, n1 - s1, n1, 1.0 / 3.0, f32::MAX, f32::MIN, f32::EPSILON] {
        assert_encoders_agree(x);
    }
}

#[test]
fn test_random_f64_bit_patterns_agree() {
    let mut rng = ChaCha8Rng::from_seed([42u8; 32]);
    for _ in 0..SAMPLES {
        assert_encoders_agree(f64::from_bits(rng.gen::<u64>()));
    }
}

#[test]
fn test_random_f64_subnormals_agree() {
    let mut rng = ChaCha8Rng::from_seed([7u8; 32]);
    for _ in 0..SAMPLES {
        let bits = rng.gen_range(1u64..0x0010_0000_0000_0000);
        let sign = if rng.gen::<bool>() { 1u64 << 63 } else { 0 };
        assert_encoders_agree(f64::from_bits(sign | bits));
    }
}

#[test]
fn test_f32_encoding_space_sweep() {
    let mut bits = 0u32;
    loop {
        assert_encoders_agree(f32::from_bits(bits));
        match bits.checked_add(65_521) {
            Some(next) => bits = next,
            None => break,
        }
    }
}

#[test]
fn test_round_trip_reproduces_encoding() {
    let mut rng = ChaCha8Rng::from_seed([1u8; 32]);
    for _ in 0..SAMPLES {
        let bits = rng.gen::<u64>();
        let x: f64 = decode(bits);
        if x.is_finite() {
            assert_eq!(encode(x), bits);
        }
    }
    for bits in [0u32, 1, 0x8000_0000, 0x8000_0001, 0x7F7F_FFFF, 0x0080_0000] {
        assert_eq!(encode(decode::<f32>(bits)), bits);
    }
}

#[test]
fn test_check_encoding_never_reports_mismatch() {
    let mut rng = ChaCha8Rng::from_seed([9u8; 32]);
    for _ in 0..SAMPLES {
        let x = f32::from_bits(rng.gen::<u32>());
        if x.is_finite() {
            assert!(check_encoding(x).is_ok(), "{:e}", x);
        }
    }
}
