// ============================================================================
// Accumulation Entry Points
// Turn external operands into limb sources and add them into a destination
// ============================================================================
//
// Width policy per entry point:
// - decimal literal, (i64, scale): operand limbs above the destination width
//   are dropped (fixed-width overflow)
// - externally coded words, buffer region: an operand wider than the
//   destination is rejected before any limb is written

use super::array_decimal::ArrayDecimal;
use super::buffer::BufferCursor;
use super::engine::{add_into, WidthPolicy};
use super::errors::{DecimalError, DecimalResult};
use super::limbs::LimbSource;
use super::rescale::scale_up;
use super::value::FixedWidthDecimal;
use bigdecimal::BigDecimal;

/// An ordered sequence of 32-bit words produced by a columnar encoding.
///
/// The words are read as a two's-complement integer: the top word carries
/// the sign, and it is sign-extended into a wider destination.
pub trait IndexedWords {
    /// Number of words.
    fn size(&self) -> usize;

    /// Word at `index` (0 = least significant).
    fn value_at(&self, index: usize) -> i32;
}

impl IndexedWords for [i32] {
    fn size(&self) -> usize {
        self.len()
    }

    fn value_at(&self, index: usize) -> i32 {
        self[index]
    }
}

/// Each word is reinterpreted bit-for-bit as an `i32`. A top word of
/// `0x8000_0000` or more makes the sequence negative, so an unsigned
/// magnitude needs a zero word on top.
impl IndexedWords for [u32] {
    fn size(&self) -> usize {
        self.len()
    }

    fn value_at(&self, index: usize) -> i32 {
        self[index] as i32
    }
}

impl IndexedWords for Vec<i32> {
    fn size(&self) -> usize {
        self.len()
    }

    fn value_at(&self, index: usize) -> i32 {
        self[index]
    }
}

/// Adapts an [`IndexedWords`] sequence to the engine's limb interface.
struct CodedWords<'a, W: ?Sized>(&'a W);

impl<W: IndexedWords + ?Sized> LimbSource for CodedWords<'_, W> {
    #[inline]
    fn limb_count(&self) -> usize {
        self.0.size()
    }

    #[inline]
    fn limb(&self, index: usize) -> i32 {
        self.0.value_at(index)
    }
}

/// Add a decimal literal into `lhs`.
///
/// The literal is rescaled exactly to `lhs.scale()`; limbs beyond the
/// destination width are dropped.
///
/// # Errors
/// Returns `PrecisionLoss` if the literal has nonzero digits below the
/// destination scale. `lhs` is unchanged.
pub fn accumulate_decimal<'d, D>(lhs: &'d mut D, rhs: &BigDecimal) -> DecimalResult<&'d mut D>
where
    D: FixedWidthDecimal,
{
    let operand = ArrayDecimal::from_rescaled(rhs, lhs.scale())?;
    lhs.accumulate(&operand)
}

/// Add `rhs / 10^rhs_scale` into `lhs` without going through a decimal.
///
/// # Errors
/// Returns `ScaleMismatch` if `rhs_scale` differs from the destination's.
pub fn accumulate_i64<D>(lhs: &mut D, rhs: i64, rhs_scale: u32) -> DecimalResult<&mut D>
where
    D: FixedWidthDecimal,
{
    let operand = ArrayDecimal::from_i64(rhs, rhs_scale);
    lhs.accumulate(&operand)
}

/// Add an externally coded word sequence into `lhs`.
///
/// The caller vouches that `rhs_scale` already equals `lhs.scale()`; no
/// realignment happens here.
///
/// # Errors
/// Returns `ArgumentSize` if the sequence is longer than `lhs`. `lhs` is
/// unchanged.
pub fn accumulate_coded<'d, D, W>(
    lhs: &'d mut D,
    rhs: &W,
    rhs_scale: u32,
) -> DecimalResult<&'d mut D>
where
    D: FixedWidthDecimal,
    W: IndexedWords + ?Sized,
{
    tracing::trace!(
        words = rhs.size(),
        rhs_scale,
        lhs_size = lhs.size(),
        "accumulating coded words"
    );
    add_into(lhs, &CodedWords(rhs), WidthPolicy::Reject)?;
    Ok(lhs)
}

/// Add `rhs` into the `lhs_size` limbs at `position` of `buf`.
///
/// An operand whose scale differs from `lhs_scale` is first raised to the
/// default scale. The addition only runs when the operand then matches the
/// destination in scale and fits its width.
///
/// # Errors
/// - `BufferOutOfBounds` if the region does not fit in `buf`
/// - `ArgumentSize` if the operand is wider than `lhs_size`
/// - `ScaleMismatch` if the operand's scale still differs after raising
/// - `InvalidInput` if raising the scale is beyond the supported magnitude
///
/// The buffer is untouched on every error.
pub fn accumulate_buffer<R>(
    buf: &mut [u8],
    position: usize,
    lhs_size: usize,
    lhs_scale: u32,
    rhs: &R,
) -> DecimalResult<()>
where
    R: FixedWidthDecimal + ?Sized,
{
    if rhs.size() > lhs_size {
        tracing::debug!(
            rhs_size = rhs.size(),
            lhs_size,
            position,
            "rejecting operand wider than buffer region"
        );
        return Err(DecimalError::ArgumentSize {
            rhs: rhs.size(),
            lhs: lhs_size,
        });
    }

    let mut cursor = BufferCursor::prepare(buf, position, lhs_size)?;

    if rhs.scale() == lhs_scale {
        return add_into(&mut cursor, rhs, WidthPolicy::Reject);
    }

    let scaled = scale_up(rhs)?;
    tracing::debug!(
        from = rhs.scale(),
        to = scaled.scale(),
        lhs_scale,
        "rescaled buffer operand to default scale"
    );
    if scaled.scale() != lhs_scale {
        return Err(DecimalError::ScaleMismatch {
            rhs: scaled.scale(),
            lhs: lhs_scale,
        });
    }
    add_into(&mut cursor, &scaled, WidthPolicy::Reject)
}
