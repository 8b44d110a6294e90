// ============================================================================
// Numeric Module
// Fixed-width, limb-based decimals and their accumulation
// ============================================================================
//
// This module provides:
// - FixedWidthDecimal: the value contract (scale + little-endian i32 limbs)
// - ArrayDecimal / BufferDecimal: heap-owned and buffer-resident values
// - add_into: the carry-propagating engine, generic over limb storage
// - accumulate_*: entry points that build operands and pick a width policy
// - to_fixed_width: coercion of heterogeneous row values
// - DecimalError: error types for all of the above
//
// Design principles:
// - Width and scale never change after construction
// - Overflow wraps modulo 2^(32 * size), never widens
// - Errors are reported before any limb is written

mod accumulate;
mod array_decimal;
mod buffer;
mod coerce;
mod engine;
mod errors;
mod limbs;
mod rescale;
mod value;

#[cfg(test)]
mod proptests;

/// Limb count used when none is configured.
pub const DEFAULT_SIZE: usize = 6;

/// Scale used when none is configured, and the target of [`scale_up`].
pub const DEFAULT_SCALE: u32 = 9;

pub use accumulate::{
    accumulate_buffer, accumulate_coded, accumulate_decimal, accumulate_i64, IndexedWords,
};
pub use array_decimal::ArrayDecimal;
pub use buffer::{read_region, BufferCursor, BufferDecimal};
pub use coerce::{to_fixed_width, ExternalValue};
pub use engine::{add_into, WidthPolicy};
pub use errors::{DecimalError, DecimalResult};
pub use limbs::{LimbSink, LimbSource, LIMB_BYTES};
pub use rescale::{scale_up, scale_up_to};
pub use value::{FixedWidthDecimal, Limbs, INLINE_LIMBS};
