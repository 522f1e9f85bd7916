//! Text reports of interval populations.

use std::io::{self, Write};

use log::warn;

use crate::config::DistanceConfig;
use crate::distance::inclusive_count_with;
use crate::width::BinaryFloat;

/// Successive doublings starting from the first interval above zero.
pub const SAMPLE_PAIRS: [(f64, f64); 6] = [
    (0.0, 0.1),
    (0.1, 0.2),
    (0.2, 0.4),
    (0.4, 0.8),
    (0.8, 1.6),
    (1.6, 3.2),
];

/// Sample pairs narrowed to the target width.
pub fn sample_pairs<F: BinaryFloat>() -> Vec<(F, F)> {
    SAMPLE_PAIRS
        .iter()
        .filter_map(|&(a, b)| Some((narrow::<F>(a)?, narrow::<F>(b)?)))
        .collect()
}

// Round-trips through the decimal form, which is exact for f64 and rounds
// to nearest for f32.
fn narrow<F: BinaryFloat>(x: f64) -> Option<F> {
    x.to_string().parse::<F>().ok()
}

/// Intervals around the subnormal range.
///
/// Built from zero, the smallest subnormal `S1`, the largest subnormal `S2`,
/// the smallest normal `N1` and one third: every ordered pair with
/// `0 <= a <= b`, their mirror images with `a <= b <= 0`, and pairs with
/// `a <= 0 <= b` that straddle zero.
pub fn boundary_pairs<F: BinaryFloat>() -> Vec<(F, F)> {
    let s1 = F::SMALLEST_SUBNORMAL;
    let n1 = F::SMALLEST_NORMAL;
    let s2 = n1 - s1;
    let third = narrow::<F>(1.0 / 3.0).unwrap_or(F::HALF);
    let points = [F::ZERO, s1, s2, n1, third];

    let mut pairs = Vec::new();
    for (i, &a) in points.iter().enumerate() {
        for &b in &points[i..] {
            pairs.push((a, b));
        }
    }
    for (i, &a) in points.iter().enumerate() {
        for &b in &points[i..] {
            pairs.push((-b, -a));
        }
    }
    for &a in &points {
        for &b in &points {
            pairs.push((-a, b));
        }
    }
    pairs
}

/// Bounds are printed in their shortest round-trip form, so subnormals and
/// tiny normals stay distinguishable from zero.
pub fn format_line<F: BinaryFloat>(a: F, b: F, count: u128) -> String {
    format!("[{:?}, {:?}] contains: {} representable values.", a, b, count)
}

/// Write one line per pair. Pairs the metric rejects are reported as such
/// and the run carries on.
pub fn write_report<F: BinaryFloat, W: Write>(
    out: &mut W,
    pairs: &[(F, F)],
    config: &DistanceConfig,
) -> io::Result<usize> {
    let mut rejected = 0;
    for &(a, b) in pairs {
        match inclusive_count_with(a, b, config) {
            Ok(count) => writeln!(out, "{}", format_line(a, b, count))?,
            Err(err) => {
                warn!("skipping [{:?}, {:?}]: {}", a, b, err);
                writeln!(out, "[{:?}, {:?}] rejected: {}", a, b, err)?;
                rejected += 1;
            }
        }
    }
    Ok(rejected)
}
