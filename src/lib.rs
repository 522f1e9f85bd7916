//! # float-distance
//!
//! Exact IEEE 754 encodings of `f32` and `f64` values, derived two independent
//! ways and cross-checked, and a distance metric that counts the
//! representable values between two floats.
//!
//! ```rust
//! use float_distance::{distance, encode, inclusive_count};
//!
//! assert_eq!(encode(-0.0f64), 0x8000_0000_0000_0000);
//! // one binade of f64 holds 2^52 values
//! assert_eq!(distance(0.5f64, 1.0), Ok(1 << 52));
//! // the two zeros are a single point
//! assert_eq!(inclusive_count(-0.0f64, 0.0), Ok(1));
//! ```

pub mod arithmetic;
pub mod config;
pub mod distance;
pub mod error;
pub mod raw;
pub mod report;
pub mod validate;
pub mod width;

pub use arithmetic::{arithmetic_bits, frexp, ldexp};
pub use config::{CrossCheck, DistanceConfig, NonFinitePolicy};
pub use distance::{distance, distance_with, inclusive_count, inclusive_count_with, Interval, OrderedIndex};
pub use error::{DistanceError, DistanceResult};
pub use raw::{decode, raw_bits};
pub use report::{boundary_pairs, format_line, sample_pairs, write_report, SAMPLE_PAIRS};
pub use validate::{check_encoding, encode, encode_with, inspect, EncodingDebugInfo, FloatClass};
pub use width::{BinaryFloat, EncodingBits, FloatWidth};
