//! Configuration for encoding and distance computations.

/// Whether every encode runs both encoders and compares them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CrossCheck {
    /// Raw and arithmetic encodings are compared on every call.
    #[default]
    Always,
    /// Only the raw encoding is computed; the agreement of the two paths is
    /// left to the test suite.
    Never,
}

/// Treatment of NaN and infinite operands by the distance metric.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NonFinitePolicy {
    /// Any non-finite operand is an error.
    #[default]
    Reject,
    /// Infinities are the extreme points of the order, one step past the
    /// largest finite magnitude. NaN is still rejected.
    ExtendInfinities,
}

/// Options for [`distance_with`](crate::distance::distance_with) and friends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DistanceConfig {
    pub cross_check: CrossCheck,
    pub non_finite: NonFinitePolicy,
}

impl DistanceConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_cross_check(mut self, cross_check: CrossCheck) -> Self {
        self.cross_check = cross_check;
        self
    }

    pub fn with_non_finite(mut self, non_finite: NonFinitePolicy) -> Self {
        self.non_finite = non_finite;
        self
    }

    /// Configuration without the per-call cross-check.
    pub fn unchecked() -> Self {
        Self::default().with_cross_check(CrossCheck::Never)
    }
}
