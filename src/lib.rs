// ============================================================================
// Compressed Decimal Library
// Fixed-width decimal accumulation for columnar aggregation
// ============================================================================

//! # Compressed Decimal
//!
//! Sums decimal values into a fixed number of 32-bit limbs, so the cost and
//! footprint of every aggregate are known before the first row arrives.
//!
//! ## Features
//!
//! - **Fixed width**: a value is `size` two's-complement limbs plus a scale;
//!   overflow wraps modulo `2^(32 * size)`
//! - **One addition algorithm** for heap values, plain slices and regions of
//!   caller-owned byte buffers
//! - **Coercion** of integers, floats, text and decimals into operands
//! - **Sum aggregators** for per-bucket heap state and buffer state
//!
//! ## Example
//!
//! ```rust
//! use compressed_decimal::prelude::*;
//!
//! let mut total = ArrayDecimal::zero(2, 2);
//! accumulate_i64(&mut total, 12345, 2).unwrap();
//! accumulate_i64(&mut total, 12345, 2).unwrap();
//! assert_eq!(total.to_string(), "246.90");
//!
//! // The same sum, held in an aggregation buffer
//! let agg = BufferSumAggregator::new(AccumulatorConfig::currency()).unwrap();
//! let mut buf = vec![0u8; agg.state_size()];
//! agg.init(&mut buf, 0).unwrap();
//! agg.aggregate(&mut buf, 0, "123.45".into()).unwrap();
//! agg.aggregate(&mut buf, 0, "123.45".into()).unwrap();
//! assert_eq!(agg.get(&buf, 0).unwrap().to_string(), "246.90");
//! ```

pub mod aggregator;
pub mod numeric;

// Re-exports for convenience
pub mod prelude {
    pub use crate::aggregator::{AccumulatorConfig, BufferSumAggregator, SumAggregator};
    pub use crate::numeric::{
        accumulate_buffer, accumulate_coded, accumulate_decimal, accumulate_i64, scale_up,
        scale_up_to, to_fixed_width, ArrayDecimal, BufferDecimal, DecimalError, DecimalResult,
        ExternalValue, FixedWidthDecimal, IndexedWords,
    };
}

/// Install a `tracing` subscriber that prints to stderr at `level`.
///
/// Returns `false` if a global subscriber was already installed.
#[cfg(feature = "logging")]
pub fn init_logging(level: tracing::Level) -> bool {
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .try_init()
        .is_ok()
}
