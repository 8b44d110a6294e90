// ============================================================================
// Accumulator Configuration
// Width, scale and parsing behaviour of a decimal sum aggregator
// ============================================================================

use crate::numeric::{DecimalError, DecimalResult, DEFAULT_SCALE, DEFAULT_SIZE, LIMB_BYTES};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Largest accepted limb count (2048-bit values).
pub const MAX_SIZE: usize = 64;

/// Largest accepted scale.
pub const MAX_SCALE: u32 = 1000;

/// Configuration shared by the heap and buffer sum aggregators.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct AccumulatorConfig {
    /// Number of 32-bit limbs per accumulated value
    pub size: usize,

    /// Number of implied fractional digits
    pub scale: u32,

    /// Fail on unparseable text instead of skipping the row
    pub strict_number_parsing: bool,
}

impl AccumulatorConfig {
    /// Create a new configuration with lenient parsing
    pub fn new(size: usize, scale: u32) -> Self {
        Self {
            size,
            scale,
            strict_number_parsing: false,
        }
    }

    /// Builder method: Set limb count
    pub fn with_size(mut self, size: usize) -> Self {
        self.size = size;
        self
    }

    /// Builder method: Set scale
    pub fn with_scale(mut self, scale: u32) -> Self {
        self.scale = scale;
        self
    }

    /// Builder method: Set strict number parsing
    pub fn with_strict_number_parsing(mut self, strict: bool) -> Self {
        self.strict_number_parsing = strict;
        self
    }

    /// Bytes one accumulated value occupies in an aggregation buffer
    pub fn state_size(&self) -> usize {
        self.size * LIMB_BYTES
    }

    /// Validate the configuration
    pub fn validate(&self) -> DecimalResult<()> {
        if self.size == 0 || self.size > MAX_SIZE {
            return Err(DecimalError::InvalidConfig(format!(
                "size must be between 1 and {}, got {}",
                MAX_SIZE, self.size
            )));
        }

        if self.scale > MAX_SCALE {
            return Err(DecimalError::InvalidConfig(format!(
                "scale must be at most {}, got {}",
                MAX_SCALE, self.scale
            )));
        }

        Ok(())
    }
}

impl Default for AccumulatorConfig {
    fn default() -> Self {
        Self::new(DEFAULT_SIZE, DEFAULT_SCALE)
    }
}

// ============================================================================
// Preset Configurations (Factory Methods)
// ============================================================================

impl AccumulatorConfig {
    /// Monetary totals
    /// - 4 limbs (128-bit)
    /// - 2 fractional digits
    pub fn currency() -> Self {
        Self::new(4, 2)
    }

    /// Values that round-trip through an i64 column
    /// - 2 limbs (64-bit)
    pub fn long_compatible(scale: u32) -> Self {
        Self::new(2, scale)
    }
}
