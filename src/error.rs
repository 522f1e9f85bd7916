//! Error types for encoding and distance operations.

use thiserror::Error;

/// Errors surfaced by the distance metric and its supporting layers.
///
/// Operands and encodings are widened to `f64`/`u64` so a single error type
/// serves both supported widths.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DistanceError {
    #[error("internal error encoding {value:e}: raw bits say {raw:#X}, arithmetic says {arithmetic:#X}")]
    InternalEncodingMismatch { value: f64, raw: u64, arithmetic: u64 },

    #[error("operands out of order: {a:e} > {b:e}")]
    UnorderedOperands { a: f64, b: f64 },

    #[error("non-finite operand: {value}")]
    NonFiniteOperand { value: f64 },

    #[error("unsupported float width: {0}")]
    InvalidWidth(String),

    #[error("not a floating point number: {0:?}")]
    InvalidOperand(String),
}

pub type DistanceResult<T> = Result<T, DistanceError>;
