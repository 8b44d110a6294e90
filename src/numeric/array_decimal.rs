// ============================================================================
// Array Decimal
// Heap-owned fixed-width decimal, the canonical operand and accumulator type
// ============================================================================

use super::errors::{DecimalError, DecimalResult};
use super::limbs::{LimbSink, LimbSource, LIMB_BYTES};
use super::rescale::rescale_exact;
use super::value::{
    natural_width, split_limbs, DisplayDecimal, FixedWidthDecimal, Limbs,
};
use bigdecimal::BigDecimal;
use num_bigint::BigInt;
use std::fmt;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Fixed-width decimal owning its limbs.
///
/// Equality and hashing are structural (same scale, same limbs). Use
/// [`FixedWidthDecimal::compare`] to compare decimal values across scales
/// or widths.
///
/// # Example
/// ```
/// use compressed_decimal::numeric::{ArrayDecimal, FixedWidthDecimal};
///
/// let mut total = ArrayDecimal::zero(2, 2);
/// let operand = ArrayDecimal::from_i64(12345, 2);
/// total.accumulate(&operand).unwrap();
/// total.accumulate(&operand).unwrap();
/// assert_eq!(total.to_string(), "246.90");
/// ```
#[derive(Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ArrayDecimal {
    limbs: Limbs,
    scale: u32,
}

// ============================================================================
// Construction
// ============================================================================

impl ArrayDecimal {
    /// A zero value of the given width and scale.
    pub fn zero(size: usize, scale: u32) -> Self {
        Self {
            limbs: Limbs::from_elem(0, size),
            scale,
        }
    }

    /// Take ownership of existing limbs (least significant first).
    pub fn wrap(limbs: Vec<i32>, scale: u32) -> Self {
        Self {
            limbs: Limbs::from_vec(limbs),
            scale,
        }
    }

    /// Two limbs holding `value`, sign-extended, at `scale`.
    pub fn from_i64(value: i64, scale: u32) -> Self {
        let limbs = [value as i32, (value >> 32) as i32];
        Self {
            limbs: Limbs::from_slice(&limbs),
            scale,
        }
    }

    /// Natural-width value at the decimal's own scale.
    ///
    /// Uses the fewest limbs that hold the unscaled value. A negative
    /// exponent (e.g. `1E+3`) is normalised to scale 0.
    ///
    /// # Errors
    /// Returns `InvalidInput` if the scale does not fit a `u32`, or if
    /// normalising a negative exponent needs a power of ten beyond the
    /// supported magnitude.
    pub fn from_big_decimal(value: &BigDecimal) -> DecimalResult<Self> {
        let (unscaled, exponent) = value.as_bigint_and_exponent();
        if exponent < 0 {
            let unscaled = rescale_exact(value, 0)?;
            return Ok(Self::from_unscaled(&unscaled, 0));
        }
        let scale = u32::try_from(exponent)
            .map_err(|_| DecimalError::InvalidInput(format!("scale {exponent} out of range")))?;
        Ok(Self::from_unscaled(&unscaled, scale))
    }

    /// Natural-width value rescaled exactly to `scale`.
    ///
    /// # Errors
    /// Returns `PrecisionLoss` when nonzero digits would be dropped.
    pub fn from_rescaled(value: &BigDecimal, scale: u32) -> DecimalResult<Self> {
        let unscaled = rescale_exact(value, scale)?;
        Ok(Self::from_unscaled(&unscaled, scale))
    }

    /// Exactly `size` limbs at `scale`.
    ///
    /// The decimal is rescaled without rounding. If the result needs more
    /// than `size` limbs, only the low-order `size` limbs are kept.
    ///
    /// # Errors
    /// Returns `PrecisionLoss` when nonzero digits would be dropped.
    pub fn with_size(value: &BigDecimal, size: usize, scale: u32) -> DecimalResult<Self> {
        let unscaled = rescale_exact(value, scale)?;
        Ok(Self {
            limbs: split_limbs(&unscaled, size),
            scale,
        })
    }

    /// Owned copy of any fixed-width value, including a buffer view.
    pub fn copy_of<D: FixedWidthDecimal + ?Sized>(value: &D) -> Self {
        Self {
            limbs: (0..value.size()).map(|i| value.limb_at(i)).collect(),
            scale: value.scale(),
        }
    }

    pub(crate) fn from_unscaled(unscaled: &BigInt, scale: u32) -> Self {
        Self {
            limbs: split_limbs(unscaled, natural_width(unscaled)),
            scale,
        }
    }

    /// Limbs, least significant first.
    #[inline]
    pub fn limbs(&self) -> &[i32] {
        &self.limbs
    }
}

// ============================================================================
// Serialized Form
// ============================================================================

impl ArrayDecimal {
    /// Encode as `[scale][limb 0]..[limb n-1]`, each a little-endian i32.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity((self.limbs.len() + 1) * LIMB_BYTES);
        out.extend_from_slice(&(self.scale as i32).to_le_bytes());
        for limb in &self.limbs {
            out.extend_from_slice(&limb.to_le_bytes());
        }
        out
    }

    /// Decode the layout written by [`ArrayDecimal::to_bytes`].
    ///
    /// # Errors
    /// Returns `Malformed` for a length that is not a whole number of limbs
    /// after the scale, an empty limb list, or a negative scale.
    pub fn from_bytes(bytes: &[u8]) -> DecimalResult<Self> {
        if bytes.len() < 2 * LIMB_BYTES || bytes.len() % LIMB_BYTES != 0 {
            return Err(DecimalError::Malformed(format!(
                "length {} is not a scale followed by whole limbs",
                bytes.len()
            )));
        }

        let mut words = bytes.chunks_exact(LIMB_BYTES).map(|chunk| {
            let mut word = [0u8; LIMB_BYTES];
            word.copy_from_slice(chunk);
            i32::from_le_bytes(word)
        });

        let scale = words.next().unwrap_or_default();
        let scale = u32::try_from(scale)
            .map_err(|_| DecimalError::Malformed(format!("negative scale {}", scale)))?;

        Ok(Self {
            limbs: words.collect(),
            scale,
        })
    }
}

// ============================================================================
// Trait Implementations
// ============================================================================

impl LimbSource for ArrayDecimal {
    #[inline]
    fn limb_count(&self) -> usize {
        self.limbs.len()
    }

    #[inline]
    fn limb(&self, index: usize) -> i32 {
        self.limbs[index]
    }
}

impl LimbSink for ArrayDecimal {
    #[inline]
    fn set_limb(&mut self, index: usize, value: i32) {
        self.limbs[index] = value;
    }
}

impl FixedWidthDecimal for ArrayDecimal {
    #[inline]
    fn scale(&self) -> u32 {
        self.scale
    }
}

impl FromStr for ArrayDecimal {
    type Err = DecimalError;

    /// Parse a decimal literal at its natural width and scale.
    ///
    /// # Examples
    /// - "123.45" -> scale 2, one limb
    /// - "-0.001" -> scale 3, one limb
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let parsed = BigDecimal::from_str(trimmed)
            .map_err(|_| DecimalError::InvalidInput(trimmed.to_string()))?;
        Self::from_big_decimal(&parsed)
    }
}

impl fmt::Display for ArrayDecimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", DisplayDecimal::new(&self.unscaled(), self.scale))
    }
}

impl fmt::Debug for ArrayDecimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ArrayDecimal({}, scale={}, limbs={:?})",
            self, self.scale, self.limbs
        )
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::cmp::Ordering;

    fn dec(s: &str) -> BigDecimal {
        BigDecimal::from_str(s).unwrap()
    }

    #[test]
    fn test_zero() {
        let z = ArrayDecimal::zero(3, 4);
        assert_eq!(z.size(), 3);
        assert_eq!(z.scale(), 4);
        assert!(z.is_zero());
        assert_eq!(z.signum(), 0);
        assert_eq!(z.to_string(), "0.0000");
    }

    #[test]
    fn test_from_i64_sign_extends() {
        let x = ArrayDecimal::from_i64(-1, 0);
        assert_eq!(x.limbs(), &[-1, -1]);
        assert_eq!(x.to_decimal(), dec("-1"));

        let y = ArrayDecimal::from_i64(i64::MAX, 3);
        assert_eq!(y.to_decimal(), dec("9223372036854775.807"));
    }

    #[test]
    fn test_from_big_decimal_natural_width() {
        let x = ArrayDecimal::from_big_decimal(&dec("123.45")).unwrap();
        assert_eq!(x.scale(), 2);
        assert_eq!(x.size(), 1);
        assert_eq!(x.to_string(), "123.45");

        let wide =
            ArrayDecimal::from_big_decimal(&dec("123456789012345678901234567890")).unwrap();
        assert_eq!(wide.size(), 4);
        assert_eq!(wide.to_string(), "123456789012345678901234567890");
    }

    #[test]
    fn test_from_big_decimal_negative_exponent() {
        let x = ArrayDecimal::from_big_decimal(&dec("1E+3")).unwrap();
        assert_eq!(x.scale(), 0);
        assert_eq!(x.to_string(), "1000");
    }

    #[test]
    fn test_from_big_decimal_exponent_out_of_range() {
        // 1e4294967297 must not come back as 10
        for literal in ["1e4294967297", "1e999999999", "1e-4294967297"] {
            assert!(
                matches!(
                    ArrayDecimal::from_big_decimal(&dec(literal)),
                    Err(DecimalError::InvalidInput(_))
                ),
                "{literal}"
            );
        }
        assert!(matches!(
            "1e999999999".parse::<ArrayDecimal>(),
            Err(DecimalError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_with_size_rescales_exactly() {
        let x = ArrayDecimal::with_size(&dec("1.5"), 3, 4).unwrap();
        assert_eq!(x.size(), 3);
        assert_eq!(x.to_string(), "1.5000");

        let err = ArrayDecimal::with_size(&dec("1.2345"), 3, 2).unwrap_err();
        assert_eq!(
            err,
            DecimalError::PrecisionLoss {
                from_scale: 4,
                to_scale: 2
            }
        );
    }

    #[test]
    fn test_with_size_truncates_wide_literal() {
        // 2^32 + 5 keeps only its low limb at width 1
        let x = ArrayDecimal::with_size(&dec("4294967301"), 1, 0).unwrap();
        assert_eq!(x.limbs(), &[5]);
    }

    #[test]
    fn test_rescale_drops_only_zero_digits() {
        let x = ArrayDecimal::from_rescaled(&dec("1.500"), 1).unwrap();
        assert_eq!(x.to_string(), "1.5");
    }

    #[test]
    fn test_signum_and_conversions() {
        let neg: ArrayDecimal = "-12.75".parse().unwrap();
        assert_eq!(neg.signum(), -1);
        assert_eq!(neg.to_i64(), Some(-12));
        assert_eq!(neg.to_f64(), Some(-12.75));

        let pos: ArrayDecimal = "0.01".parse().unwrap();
        assert_eq!(pos.signum(), 1);
        assert_eq!(pos.to_i64(), Some(0));
    }

    #[test]
    fn test_compare_across_scales() {
        let a: ArrayDecimal = "1.50".parse().unwrap();
        let b: ArrayDecimal = "1.5".parse().unwrap();
        let c: ArrayDecimal = "-2".parse().unwrap();
        assert_eq!(a.compare(&b), Ordering::Equal);
        assert_eq!(c.compare(&a), Ordering::Less);
        assert_ne!(a, b);
    }

    #[test]
    fn test_accumulate_scale_mismatch() {
        let mut total = ArrayDecimal::zero(2, 2);
        let operand = ArrayDecimal::from_i64(1, 3);
        let err = total.accumulate(&operand).unwrap_err();
        assert_eq!(err, DecimalError::ScaleMismatch { rhs: 3, lhs: 2 });
        assert!(total.is_zero());
    }

    #[test]
    fn test_reset_keeps_shape() {
        let mut x = ArrayDecimal::from_i64(-99, 2);
        x.reset();
        assert!(x.is_zero());
        assert_eq!(x.size(), 2);
        assert_eq!(x.scale(), 2);
    }

    #[test]
    fn test_bytes_roundtrip() {
        let x: ArrayDecimal = "-98765.4321".parse().unwrap();
        let bytes = x.to_bytes();
        assert_eq!(bytes.len(), 4 + 4 * x.size());
        assert_eq!(ArrayDecimal::from_bytes(&bytes).unwrap(), x);
    }

    #[test]
    fn test_from_bytes_malformed() {
        assert!(matches!(
            ArrayDecimal::from_bytes(&[0, 0, 0, 0]),
            Err(DecimalError::Malformed(_))
        ));
        assert!(matches!(
            ArrayDecimal::from_bytes(&[0, 0, 0, 0, 1, 0]),
            Err(DecimalError::Malformed(_))
        ));

        let mut negative_scale = (-1i32).to_le_bytes().to_vec();
        negative_scale.extend_from_slice(&7i32.to_le_bytes());
        assert!(matches!(
            ArrayDecimal::from_bytes(&negative_scale),
            Err(DecimalError::Malformed(_))
        ));
    }

    #[test]
    fn test_from_str_invalid() {
        let result: Result<ArrayDecimal, _> = "not_a_number".parse();
        assert_eq!(
            result,
            Err(DecimalError::InvalidInput("not_a_number".to_string()))
        );
    }

    #[test]
    fn test_copy_of() {
        let x: ArrayDecimal = "3.14".parse().unwrap();
        assert_eq!(ArrayDecimal::copy_of(&x), x);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_serde_roundtrip() {
        let x: ArrayDecimal = "42.125".parse().unwrap();
        let json = serde_json::to_string(&x).unwrap();
        let back: ArrayDecimal = serde_json::from_str(&json).unwrap();
        assert_eq!(back, x);
    }
}
