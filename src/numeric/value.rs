// ============================================================================
// Fixed-Width Decimal Contract
// Shared behaviour of heap-owned and buffer-resident decimal values
// ============================================================================

use super::engine::{add_into, WidthPolicy};
use super::errors::{DecimalError, DecimalResult};
use super::limbs::{LimbSink, LimbSource, LIMB_BYTES};
use bigdecimal::BigDecimal;
use num_bigint::BigInt;
use num_traits::{Signed, ToPrimitive};
use smallvec::SmallVec;
use std::cmp::Ordering;
use std::fmt;

/// Limb count kept inline before a value spills to the heap.
pub const INLINE_LIMBS: usize = 6;

/// Limb storage for heap-owned values.
pub type Limbs = SmallVec<[i32; INLINE_LIMBS]>;

/// A decimal held as `size` two's-complement 32-bit limbs plus a scale.
///
/// The represented value is `integer(limbs) / 10^scale`. Neither the scale
/// nor the size change after construction.
pub trait FixedWidthDecimal: LimbSink {
    /// Number of implied fractional digits.
    fn scale(&self) -> u32;

    /// Number of limbs.
    #[inline]
    fn size(&self) -> usize {
        self.limb_count()
    }

    /// Limb at `index` (0 = least significant).
    #[inline]
    fn limb_at(&self, index: usize) -> i32 {
        self.limb(index)
    }

    /// Replace the limb at `index`.
    #[inline]
    fn set_limb_at(&mut self, index: usize, value: i32) {
        self.set_limb(index, value);
    }

    /// The unscaled two's-complement integer.
    fn unscaled(&self) -> BigInt {
        limbs_to_big_int(self)
    }

    /// Materialize as an arbitrary-precision decimal.
    fn to_decimal(&self) -> BigDecimal {
        BigDecimal::new(self.unscaled(), i64::from(self.scale()))
    }

    /// -1, 0 or 1 according to the sign of the value.
    fn signum(&self) -> i32 {
        let size = self.size();
        if size == 0 {
            return 0;
        }
        if self.limb(size - 1) < 0 {
            -1
        } else if self.is_zero() {
            0
        } else {
            1
        }
    }

    /// True when every limb is zero.
    fn is_zero(&self) -> bool {
        (0..self.size()).all(|i| self.limb(i) == 0)
    }

    /// Zero every limb, keeping size and scale.
    fn reset(&mut self) {
        for i in 0..self.size() {
            self.set_limb(i, 0);
        }
    }

    /// Nearest `f64`, or `None` if the value is out of `f64` range.
    fn to_f64(&self) -> Option<f64> {
        let text = DisplayDecimal::new(&self.unscaled(), self.scale()).to_string();
        text.parse::<f64>().ok().filter(|v| v.is_finite())
    }

    /// Integer part truncated toward zero, or `None` if it does not fit an i64.
    fn to_i64(&self) -> Option<i64> {
        let (integer, _) = div_rem_pow10(&self.unscaled(), u64::from(self.scale()));
        integer.to_i64()
    }

    /// Compare by decimal value, regardless of scale or width.
    fn compare<R>(&self, other: &R) -> Ordering
    where
        Self: Sized,
        R: FixedWidthDecimal + ?Sized,
    {
        self.to_decimal().cmp(&other.to_decimal())
    }

    /// Add a same-scale value into this one.
    ///
    /// Limbs of `rhs` above this value's width are dropped (fixed-width
    /// overflow), as is any carry out of the top limb.
    ///
    /// # Errors
    /// Returns `ScaleMismatch` if the scales differ.
    fn accumulate<R>(&mut self, rhs: &R) -> DecimalResult<&mut Self>
    where
        Self: Sized,
        R: FixedWidthDecimal + ?Sized,
    {
        if rhs.scale() != self.scale() {
            return Err(DecimalError::ScaleMismatch {
                rhs: rhs.scale(),
                lhs: self.scale(),
            });
        }
        add_into(self, rhs, WidthPolicy::Truncate)?;
        Ok(self)
    }
}

// ============================================================================
// Limb <-> Integer Conversion
// ============================================================================

/// Largest power of ten ever materialized: a rescale across the widest
/// configurable scale plus the digits of a 64-limb value, with headroom.
pub(crate) const MAX_POW10: usize = 2048;

/// 10^exp as a big integer.
pub(crate) fn pow10(exp: usize) -> BigInt {
    num_traits::pow(BigInt::from(10u8), exp)
}

/// 10^exp, or `InvalidInput` above [`MAX_POW10`].
pub(crate) fn checked_pow10(exp: u64) -> DecimalResult<BigInt> {
    match usize::try_from(exp) {
        Ok(exp) if exp <= MAX_POW10 => Ok(pow10(exp)),
        _ => Err(DecimalError::InvalidInput(format!(
            "10^{exp} is beyond the supported magnitude"
        ))),
    }
}

/// Truncating division by 10^exp: the quotient and the remainder, which
/// carries the sign of `value`.
///
/// A divisor larger than `value` is never built.
pub(crate) fn div_rem_pow10(value: &BigInt, exp: u64) -> (BigInt, BigInt) {
    // |value| < 2^bits <= 8^exp < 10^exp
    if value.bits() <= exp.saturating_mul(3) {
        return (BigInt::from(0u8), value.clone());
    }
    match usize::try_from(exp) {
        Ok(exp) => {
            let divisor = pow10(exp);
            (value / &divisor, value % &divisor)
        },
        Err(_) => (BigInt::from(0u8), value.clone()),
    }
}

/// Concatenate limbs into the two's-complement integer they encode.
pub(crate) fn limbs_to_big_int<S: LimbSource + ?Sized>(limbs: &S) -> BigInt {
    let count = limbs.limb_count();
    let mut bytes = Vec::with_capacity(count * LIMB_BYTES);
    for i in 0..count {
        bytes.extend_from_slice(&limbs.limb(i).to_le_bytes());
    }
    BigInt::from_signed_bytes_le(&bytes)
}

/// Minimal number of limbs that hold `value` in two's complement.
pub(crate) fn natural_width(value: &BigInt) -> usize {
    let bytes = value.to_signed_bytes_le().len();
    bytes.div_ceil(LIMB_BYTES).max(1)
}

/// Split `value` into exactly `size` limbs, sign-extending or dropping
/// high-order limbs as needed.
pub(crate) fn split_limbs(value: &BigInt, size: usize) -> Limbs {
    let bytes = value.to_signed_bytes_le();
    let fill = if value.is_negative() { 0xFFu8 } else { 0 };

    (0..size)
        .map(|i| {
            let mut word = [fill; LIMB_BYTES];
            for (j, byte) in word.iter_mut().enumerate() {
                if let Some(b) = bytes.get(i * LIMB_BYTES + j) {
                    *byte = *b;
                }
            }
            i32::from_le_bytes(word)
        })
        .collect()
}

// ============================================================================
// Display
// ============================================================================

/// Plain (never exponential) rendering of `unscaled / 10^scale`.
pub(crate) struct DisplayDecimal<'a> {
    unscaled: &'a BigInt,
    scale: u32,
}

impl<'a> DisplayDecimal<'a> {
    pub(crate) fn new(unscaled: &'a BigInt, scale: u32) -> Self {
        Self { unscaled, scale }
    }
}

impl fmt::Display for DisplayDecimal<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.unscaled.is_negative() { "-" } else { "" };
        let digits = self.unscaled.magnitude().to_string();
        let scale = self.scale as usize;

        if scale == 0 {
            return write!(f, "{}{}", sign, digits);
        }

        let padded = if digits.len() <= scale {
            format!("{:0>width$}", digits, width = scale + 1)
        } else {
            digits
        };
        let (int_part, frac_part) = padded.split_at(padded.len() - scale);
        write!(f, "{}{}.{}", sign, int_part, frac_part)
    }
}
