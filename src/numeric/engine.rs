// ============================================================================
// Accumulation Engine
// Carry-propagating two's-complement addition over any limb storage
// ============================================================================

use super::errors::{DecimalError, DecimalResult};
use super::limbs::{LimbSink, LimbSource};

/// What to do with an operand that has more limbs than the destination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WidthPolicy {
    /// Drop the operand's high-order limbs, like storing an i64 sum in an i32.
    Truncate,
    /// Fail with [`DecimalError::ArgumentSize`] before touching the destination.
    Reject,
}

/// Add `rhs` into `lhs` in place.
///
/// Both sides must already share a scale; only the limbs are looked at here.
/// A narrower `rhs` is sign-extended to the destination width. Any carry out
/// of the most significant destination limb is discarded.
///
/// # Errors
/// Returns `ArgumentSize` under [`WidthPolicy::Reject`] when `rhs` is wider
/// than `lhs`. The destination is unchanged in that case.
pub fn add_into<L, R>(lhs: &mut L, rhs: &R, policy: WidthPolicy) -> DecimalResult<()>
where
    L: LimbSink + ?Sized,
    R: LimbSource + ?Sized,
{
    let lhs_size = lhs.limb_count();
    let rhs_size = rhs.limb_count();

    if policy == WidthPolicy::Reject && rhs_size > lhs_size {
        return Err(DecimalError::ArgumentSize {
            rhs: rhs_size,
            lhs: lhs_size,
        });
    }

    internal_add(lhs, lhs_size, rhs, rhs_size);
    Ok(())
}

fn internal_add<L, R>(lhs: &mut L, lhs_size: usize, rhs: &R, rhs_size: usize)
where
    L: LimbSink + ?Sized,
    R: LimbSource + ?Sized,
{
    let shared = lhs_size.min(rhs_size);
    let mut carry: u64 = 0;

    for i in 0..shared {
        let sum = u64::from(lhs.limb(i) as u32) + u64::from(rhs.limb(i) as u32) + carry;
        lhs.set_limb(i, sum as u32 as i32);
        carry = sum >> 32;
    }

    if rhs_size < lhs_size {
        let extension: u64 = if rhs_size > 0 && rhs.limb(rhs_size - 1) < 0 {
            u64::from(u32::MAX)
        } else {
            0
        };

        for i in rhs_size..lhs_size {
            if extension == 0 && carry == 0 {
                break;
            }
            let sum = u64::from(lhs.limb(i) as u32) + extension + carry;
            lhs.set_limb(i, sum as u32 as i32);
            carry = sum >> 32;
        }
    }
}
