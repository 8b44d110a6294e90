// ============================================================================
// Buffer Access
// Limb-level addressing into caller-owned byte buffers
// ============================================================================
//
// Layout of a region: `size` consecutive little-endian i32 words starting at
// a byte position. The buffer belongs to the caller; nothing here allocates
// or frees it.

use super::array_decimal::ArrayDecimal;
use super::errors::{DecimalError, DecimalResult};
use super::limbs::{LimbSink, LimbSource, LIMB_BYTES};
use super::value::{DisplayDecimal, FixedWidthDecimal};
use std::fmt;

fn check_region(len: usize, position: usize, size: usize) -> DecimalResult<()> {
    let end = size
        .checked_mul(LIMB_BYTES)
        .and_then(|bytes| position.checked_add(bytes));
    match end {
        Some(end) if end <= len => Ok(()),
        _ => Err(DecimalError::BufferOutOfBounds { position, size, len }),
    }
}

/// Addressing adapter over `size` limbs of a byte buffer.
///
/// Built on the stack for each call; it borrows the buffer exclusively for
/// its lifetime, so two cursors can never write the same region at once.
pub struct BufferCursor<'a> {
    buf: &'a mut [u8],
    base: usize,
    size: usize,
}

impl<'a> BufferCursor<'a> {
    /// Cursor over `[position, position + size * 4)` of `buf`.
    ///
    /// # Errors
    /// Returns `BufferOutOfBounds` if the region does not fit.
    pub fn prepare(buf: &'a mut [u8], position: usize, size: usize) -> DecimalResult<Self> {
        check_region(buf.len(), position, size)?;
        Ok(Self {
            buf,
            base: position,
            size,
        })
    }

    /// Word at limb `index`.
    ///
    /// # Panics
    /// If `index` is outside the region.
    #[inline]
    pub fn get(&self, index: usize) -> i32 {
        let offset = self.offset(index);
        let mut word = [0u8; LIMB_BYTES];
        word.copy_from_slice(&self.buf[offset..offset + LIMB_BYTES]);
        i32::from_le_bytes(word)
    }

    /// Store `value` at limb `index`.
    ///
    /// # Panics
    /// If `index` is outside the region.
    #[inline]
    pub fn set(&mut self, index: usize, value: i32) {
        let offset = self.offset(index);
        self.buf[offset..offset + LIMB_BYTES].copy_from_slice(&value.to_le_bytes());
    }

    /// Byte position of limb 0.
    #[inline]
    pub fn base(&self) -> usize {
        self.base
    }

    #[inline]
    fn offset(&self, index: usize) -> usize {
        assert!(
            index < self.size,
            "limb index {} out of range for region of {} limbs",
            index,
            self.size
        );
        self.base + index * LIMB_BYTES
    }
}

impl LimbSource for BufferCursor<'_> {
    #[inline]
    fn limb_count(&self) -> usize {
        self.size
    }

    #[inline]
    fn limb(&self, index: usize) -> i32 {
        self.get(index)
    }
}

impl LimbSink for BufferCursor<'_> {
    #[inline]
    fn set_limb(&mut self, index: usize, value: i32) {
        self.set(index, value);
    }
}

/// A fixed-width decimal living inside a caller buffer.
///
/// Owns nothing: every read and write goes straight to the buffer region.
pub struct BufferDecimal<'a> {
    cursor: BufferCursor<'a>,
    scale: u32,
}

impl<'a> BufferDecimal<'a> {
    /// View `size` limbs at `position` as a decimal with `scale`.
    ///
    /// # Errors
    /// Returns `BufferOutOfBounds` if the region does not fit.
    pub fn new(buf: &'a mut [u8], position: usize, size: usize, scale: u32) -> DecimalResult<Self> {
        Ok(Self {
            cursor: BufferCursor::prepare(buf, position, size)?,
            scale,
        })
    }
}

impl LimbSource for BufferDecimal<'_> {
    #[inline]
    fn limb_count(&self) -> usize {
        self.cursor.size
    }

    #[inline]
    fn limb(&self, index: usize) -> i32 {
        self.cursor.get(index)
    }
}

impl LimbSink for BufferDecimal<'_> {
    #[inline]
    fn set_limb(&mut self, index: usize, value: i32) {
        self.cursor.set(index, value);
    }
}

impl FixedWidthDecimal for BufferDecimal<'_> {
    #[inline]
    fn scale(&self) -> u32 {
        self.scale
    }
}

impl fmt::Display for BufferDecimal<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", DisplayDecimal::new(&self.unscaled(), self.scale))
    }
}

/// Copy a buffer region out into an owned value.
///
/// # Errors
/// Returns `BufferOutOfBounds` if the region does not fit.
pub fn read_region(
    buf: &[u8],
    position: usize,
    size: usize,
    scale: u32,
) -> DecimalResult<ArrayDecimal> {
    check_region(buf.len(), position, size)?;
    let limbs = buf[position..position + size * LIMB_BYTES]
        .chunks_exact(LIMB_BYTES)
        .map(|chunk| {
            let mut word = [0u8; LIMB_BYTES];
            word.copy_from_slice(chunk);
            i32::from_le_bytes(word)
        })
        .collect();
    Ok(ArrayDecimal::wrap(limbs, scale))
}
