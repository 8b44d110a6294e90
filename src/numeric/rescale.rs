// ============================================================================
// Scale Alignment
// Exact and round-up rescaling of unscaled integers
// ============================================================================

use super::array_decimal::ArrayDecimal;
use super::errors::{DecimalError, DecimalResult};
use super::value::{checked_pow10, div_rem_pow10, FixedWidthDecimal};
use super::DEFAULT_SCALE;
use bigdecimal::BigDecimal;
use num_bigint::BigInt;
use num_traits::{Signed, Zero};

/// Unscaled integer of `value` at `scale`, refusing to drop nonzero digits.
///
/// # Errors
/// - `PrecisionLoss` when nonzero digits would be dropped
/// - `InvalidInput` when raising the scale needs a power of ten beyond the
///   supported magnitude
pub(crate) fn rescale_exact(value: &BigDecimal, scale: u32) -> DecimalResult<BigInt> {
    let (unscaled, from_scale) = value.as_bigint_and_exponent();
    let (quotient, remainder) = shift(unscaled, from_scale, scale)?;
    if remainder.is_zero() {
        Ok(quotient)
    } else {
        Err(DecimalError::PrecisionLoss {
            from_scale,
            to_scale: scale,
        })
    }
}

/// Unscaled integer of `value` at `scale`; a nonzero discarded remainder
/// moves the result one unit away from zero.
pub(crate) fn rescale_round_up(value: &BigDecimal, scale: u32) -> DecimalResult<BigInt> {
    let (unscaled, from_scale) = value.as_bigint_and_exponent();
    let (quotient, remainder) = shift(unscaled, from_scale, scale)?;
    if remainder.is_zero() {
        Ok(quotient)
    } else {
        Ok(quotient + remainder.signum())
    }
}

/// Move `unscaled` from `from_scale` to `to_scale`, returning the truncated
/// quotient and the discarded remainder (sign of the input).
fn shift(unscaled: BigInt, from_scale: i64, to_scale: u32) -> DecimalResult<(BigInt, BigInt)> {
    if unscaled.is_zero() {
        return Ok((unscaled, BigInt::zero()));
    }
    let diff = i64::from(to_scale).checked_sub(from_scale).ok_or_else(|| {
        DecimalError::InvalidInput(format!("exponent {} out of range", -i128::from(from_scale)))
    })?;
    if diff >= 0 {
        let factor = checked_pow10(diff.unsigned_abs())?;
        Ok((unscaled * factor, BigInt::zero()))
    } else {
        Ok(div_rem_pow10(&unscaled, diff.unsigned_abs()))
    }
}

/// Copy of `value` at the default scale.
///
/// See [`scale_up_to`] for the rounding rule.
pub fn scale_up<D: FixedWidthDecimal + ?Sized>(value: &D) -> DecimalResult<ArrayDecimal> {
    scale_up_to(value, DEFAULT_SCALE)
}

/// Copy of `value` at `scale`, at its natural width.
///
/// Raising the scale is exact. Lowering it rounds any nonzero discarded
/// digits away from zero (`1.231 -> 1.24`, `-1.231 -> -1.24`), never
/// half-up.
///
/// # Errors
/// Returns `InvalidInput` if raising the scale needs a power of ten beyond
/// the supported magnitude.
pub fn scale_up_to<D: FixedWidthDecimal + ?Sized>(
    value: &D,
    scale: u32,
) -> DecimalResult<ArrayDecimal> {
    let unscaled = rescale_round_up(&value.to_decimal(), scale)?;
    Ok(ArrayDecimal::from_unscaled(&unscaled, scale))
}
