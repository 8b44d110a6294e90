// ============================================================================
// Decimal Errors
// Error types for fixed-width decimal construction and accumulation
// ============================================================================

use std::fmt;

/// Errors that can occur while building or accumulating fixed-width decimals.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum DecimalError {
    /// Right-hand operand has more limbs than the destination accepts
    ArgumentSize {
        /// Limb count of the operand
        rhs: usize,
        /// Limb count of the destination
        lhs: usize,
    },
    /// Coercion was asked to convert a value kind it does not understand
    UnsupportedType(&'static str),
    /// Rescaling would discard nonzero digits
    PrecisionLoss {
        /// Scale of the value being rescaled
        from_scale: i64,
        /// Requested scale
        to_scale: u32,
    },
    /// Operand and destination scales differ after alignment
    ScaleMismatch {
        /// Scale of the operand
        rhs: u32,
        /// Scale of the destination
        lhs: u32,
    },
    /// Input string could not be parsed as a decimal
    InvalidInput(String),
    /// Floating point input was NaN or infinite
    NonFinite,
    /// Buffer region does not fit inside the buffer
    BufferOutOfBounds {
        /// Byte offset of the region
        position: usize,
        /// Limb count of the region
        size: usize,
        /// Total buffer length in bytes
        len: usize,
    },
    /// Accumulator configuration is invalid
    InvalidConfig(String),
    /// Serialized bytes do not describe a fixed-width decimal
    Malformed(String),
}

impl fmt::Display for DecimalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DecimalError::ArgumentSize { rhs, lhs } => write!(
                f,
                "right hand side too big to fit in the result value: {} limbs into {}",
                rhs, lhs
            ),
            DecimalError::UnsupportedType(kind) => {
                write!(f, "unknown extraction value type: [{}]", kind)
            },
            DecimalError::PrecisionLoss {
                from_scale,
                to_scale,
            } => write!(
                f,
                "precision loss: rescaling from scale {} to {} would drop digits",
                from_scale, to_scale
            ),
            DecimalError::ScaleMismatch { rhs, lhs } => write!(
                f,
                "scale mismatch: operand scale {} cannot be added at scale {}",
                rhs, lhs
            ),
            DecimalError::InvalidInput(input) => {
                write!(f, "invalid input: could not parse [{}] as a decimal", input)
            },
            DecimalError::NonFinite => write!(f, "invalid input: value is not finite"),
            DecimalError::BufferOutOfBounds {
                position,
                size,
                len,
            } => write!(
                f,
                "buffer region of {} limbs at {} exceeds buffer of {} bytes",
                size, position, len
            ),
            DecimalError::InvalidConfig(reason) => write!(f, "invalid config: {}", reason),
            DecimalError::Malformed(reason) => write!(f, "malformed decimal bytes: {}", reason),
        }
    }
}

impl std::error::Error for DecimalError {}

/// Result type alias for decimal operations
pub type DecimalResult<T> = Result<T, DecimalError>;
