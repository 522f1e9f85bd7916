//! Distance between floats measured in representable values.
//!
//! For encodings from +0 up to infinity the binary formats are ascending and
//! consecutive, so subtracting two encodings counts the representable values
//! between them (one endpoint included, the other not). Negative encodings
//! run the other way and sit above all positive ones. The sign fold in
//! [`OrderedIndex::from_encoding`] maps each negative encoding `e` to
//! `HIGH_BIT - e`, which lays the negatives out just below zero in ascending
//! order (wrapping past the top of the integer range) and sends -0 onto +0,
//! so the two zeros count as one point. A single wrapping subtraction of two
//! folded indices is then the distance.

use std::cmp::Ordering;
use std::fmt;
use std::marker::PhantomData;

use log::debug;

use crate::config::{DistanceConfig, NonFinitePolicy};
use crate::error::{DistanceError, DistanceResult};
use crate::raw::decode;
use crate::validate::encode_with;
use crate::width::{BinaryFloat, EncodingBits};

/// Position of a value in the total order of representable values.
///
/// Zero maps to index 0, positive values to their encodings, and negative
/// values to the two's-complement negation of their magnitude's encoding.
/// Compare indices with [`OrderedIndex::cmp_order`] or subtract them; the
/// raw integers of negative indices are large because they wrap.
pub struct OrderedIndex<F: BinaryFloat> {
    index: F::Bits,
    _float: PhantomData<F>,
}

impl<F: BinaryFloat> Clone for OrderedIndex<F> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<F: BinaryFloat> Copy for OrderedIndex<F> {}

impl<F: BinaryFloat> PartialEq for OrderedIndex<F> {
    fn eq(&self, other: &Self) -> bool {
        self.index == other.index
    }
}

impl<F: BinaryFloat> Eq for OrderedIndex<F> {}

impl<F: BinaryFloat> fmt::Debug for OrderedIndex<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("OrderedIndex").field(&self.index).finish()
    }
}

impl<F: BinaryFloat> OrderedIndex<F> {
    /// The sign-fold transform.
    #[inline]
    pub fn from_encoding(bits: F::Bits) -> Self {
        let index = if bits & F::Bits::HIGH_BIT != F::Bits::ZERO {
            F::Bits::HIGH_BIT.wrapping_sub(bits)
        } else {
            bits
        };
        Self { index, _float: PhantomData }
    }

    /// Index of a value, encoded with the default cross-check.
    pub fn of(x: F) -> Self {
        Self::of_with(x, &DistanceConfig::default())
    }

    pub fn of_with(x: F, config: &DistanceConfig) -> Self {
        Self::from_encoding(encode_with(x, config))
    }

    /// The folded integer.
    pub fn get(self) -> F::Bits {
        self.index
    }

    /// Whether the index belongs to a value below zero.
    pub fn is_negative(self) -> bool {
        self.index & F::Bits::HIGH_BIT != F::Bits::ZERO
    }

    /// Undo the fold. Index 0 yields +0.
    pub fn to_encoding(self) -> F::Bits {
        if self.is_negative() {
            F::Bits::HIGH_BIT.wrapping_sub(self.index)
        } else {
            self.index
        }
    }

    pub fn to_float(self) -> F {
        decode(self.to_encoding())
    }

    /// Number of steps from `self` up to `other`, wrapping.
    pub fn steps_to(self, other: Self) -> F::Bits {
        other.index.wrapping_sub(self.index)
    }

    /// The index `steps` positions above this one, wrapping.
    pub fn offset(self, steps: F::Bits) -> Self {
        Self { index: self.index.wrapping_add(steps), _float: PhantomData }
    }

    /// Order of the values the indices stand for.
    pub fn cmp_order(self, other: Self) -> Ordering {
        match (self.is_negative(), other.is_negative()) {
            (true, false) => Ordering::Less,
            (false, true) => Ordering::Greater,
            _ => self.index.cmp(&other.index),
        }
    }
}

fn admit<F: BinaryFloat>(x: F, config: &DistanceConfig) -> DistanceResult<()> {
    if x.is_nan() {
        return Err(DistanceError::NonFiniteOperand { value: x.to_f64() });
    }
    if !x.is_finite() && config.non_finite == NonFinitePolicy::Reject {
        return Err(DistanceError::NonFiniteOperand { value: x.to_f64() });
    }
    Ok(())
}

/// Number of representable values from `a` to `b`, counting one endpoint.
///
/// Add one for the inclusive count of `[a, b]`; [`inclusive_count`] does
/// that. The zeros are a single point, so `distance(-0.0, 0.0)` is 0.
/// Requires `a <= b` and finite operands.
pub fn distance<F: BinaryFloat>(a: F, b: F) -> DistanceResult<F::Bits> {
    distance_with(a, b, &DistanceConfig::default())
}

/// [`distance`] under an explicit configuration.
pub fn distance_with<F: BinaryFloat>(a: F, b: F, config: &DistanceConfig) -> DistanceResult<F::Bits> {
    admit(a, config)?;
    admit(b, config)?;
    if a > b {
        return Err(DistanceError::UnorderedOperands { a: a.to_f64(), b: b.to_f64() });
    }

    let steps = OrderedIndex::of_with(a, config).steps_to(OrderedIndex::of_with(b, config));
    debug!("distance from {:?} to {:?}: {}", a, b, steps);
    Ok(steps)
}

/// Count of representable values in `[a, b]`.
///
/// Returned as `u128` so counts of both widths share one type.
pub fn inclusive_count<F: BinaryFloat>(a: F, b: F) -> DistanceResult<u128> {
    inclusive_count_with(a, b, &DistanceConfig::default())
}

pub fn inclusive_count_with<F: BinaryFloat>(a: F, b: F, config: &DistanceConfig) -> DistanceResult<u128> {
    Ok(distance_with(a, b, config)?.to_u128() + 1)
}

/// A closed interval `[a, b]` of floats with `a <= b`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Interval<F: BinaryFloat> {
    low: F,
    high: F,
    config: DistanceConfig,
}

impl<F: BinaryFloat> Interval<F> {
    pub fn new(low: F, high: F) -> DistanceResult<Self> {
        Self::new_with(low, high, &DistanceConfig::default())
    }

    pub fn new_with(low: F, high: F, config: &DistanceConfig) -> DistanceResult<Self> {
        admit(low, config)?;
        admit(high, config)?;
        if low > high {
            return Err(DistanceError::UnorderedOperands { a: low.to_f64(), b: high.to_f64() });
        }
        Ok(Self { low, high, config: *config })
    }

    pub fn low(&self) -> F {
        self.low
    }

    pub fn high(&self) -> F {
        self.high
    }

    pub fn config(&self) -> &DistanceConfig {
        &self.config
    }

    /// Steps from `low` to `high`, encoded under the interval's configuration.
    pub fn width_in_steps(&self) -> F::Bits {
        OrderedIndex::of_with(self.low, &self.config).steps_to(OrderedIndex::of_with(self.high, &self.config))
    }

    /// Number of representable values in the interval.
    pub fn population(&self) -> u128 {
        self.width_in_steps().to_u128() + 1
    }

    pub fn contains(&self, x: F) -> bool {
        self.low <= x && x <= self.high
    }
}

impl<F: BinaryFloat> fmt::Display for Interval<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{:?}, {:?}]", self.low, self.high)
    }
}
