// ============================================================================
// Limb Access Traits
// Storage-agnostic get/set capabilities for 32-bit limb sequences
// ============================================================================

/// Number of bytes in one limb.
pub const LIMB_BYTES: usize = 4;

/// Read access to a little-endian sequence of 32-bit limbs.
///
/// Index 0 is the least significant limb. The most significant limb carries
/// the sign bit of the whole two's-complement value.
///
/// # Panics
/// Implementations panic when `index >= limb_count()`.
pub trait LimbSource {
    /// Number of limbs in the sequence.
    fn limb_count(&self) -> usize;

    /// Limb at `index`.
    fn limb(&self, index: usize) -> i32;
}

/// Write access to a fixed-width limb sequence.
///
/// The width never changes; only individual limbs are replaced.
pub trait LimbSink: LimbSource {
    /// Replace the limb at `index`.
    fn set_limb(&mut self, index: usize, value: i32);
}

impl LimbSource for [i32] {
    #[inline]
    fn limb_count(&self) -> usize {
        self.len()
    }

    #[inline]
    fn limb(&self, index: usize) -> i32 {
        self[index]
    }
}

impl LimbSink for [i32] {
    #[inline]
    fn set_limb(&mut self, index: usize, value: i32) {
        self[index] = value;
    }
}

impl LimbSource for Vec<i32> {
    #[inline]
    fn limb_count(&self) -> usize {
        self.len()
    }

    #[inline]
    fn limb(&self, index: usize) -> i32 {
        self[index]
    }
}

impl LimbSink for Vec<i32> {
    #[inline]
    fn set_limb(&mut self, index: usize, value: i32) {
        self[index] = value;
    }
}
