//! Per-slice write masks.

use std::fmt;

use crate::bits::Bits;

/// Selects which slices of a write are committed.
///
/// Bit `i` enables slice `i`, counting from the least significant slice.
/// The mask is exactly one slice wide per bit; there is no finer-grained
/// merging within a slice.
///
/// # Examples
///
/// ```
/// use membank_core::WriteMask;
///
/// let low = WriteMask::from_u64(2, 0b01);
/// assert!(low.is_set(0));
/// assert!(!low.is_set(1));
/// assert_eq!(low.complement(), WriteMask::from_u64(2, 0b10));
/// ```
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct WriteMask {
    bits: Bits,
}

impl WriteMask {
    /// A mask enabling all `slices` slices.
    pub fn all(slices: usize) -> Self {
        Self {
            bits: Bits::ones(slices),
        }
    }

    /// A mask enabling no slices.
    pub fn none(slices: usize) -> Self {
        Self {
            bits: Bits::zero(slices),
        }
    }

    /// A mask from the low `slices` bits of `value`.
    pub fn from_u64(slices: usize, value: u64) -> Self {
        Self {
            bits: Bits::from_u64(slices, value),
        }
    }

    /// A mask enabling exactly the slices for which `f` returns true.
    pub fn from_fn(slices: usize, mut f: impl FnMut(usize) -> bool) -> Self {
        let mut bits = Bits::zero(slices);
        for i in 0..slices {
            bits.set_bit(i, f(i));
        }
        Self { bits }
    }

    /// Number of slices covered by the mask.
    pub fn len(&self) -> usize {
        self.bits.width()
    }

    /// True if the mask covers no slices at all.
    pub fn is_empty(&self) -> bool {
        self.bits.width() == 0
    }

    /// True if no slice is enabled.
    pub fn is_none(&self) -> bool {
        self.bits.is_zero()
    }

    /// True if every slice is enabled.
    pub fn is_all(&self) -> bool {
        self.bits.count_ones() as usize == self.bits.width()
    }

    /// Whether slice `i` is enabled.
    ///
    /// # Panics
    ///
    /// Panics if `i >= len()`.
    pub fn is_set(&self, i: usize) -> bool {
        self.bits.bit(i)
    }

    /// Enable or disable slice `i`.
    pub fn set(&mut self, i: usize, enabled: bool) {
        self.bits.set_bit(i, enabled);
    }

    /// The mask with every slice flipped.
    pub fn complement(&self) -> Self {
        Self::from_fn(self.len(), |i| !self.is_set(i))
    }

    /// Indices of the enabled slices, in ascending order.
    pub fn iter_set(&self) -> impl Iterator<Item = usize> + '_ {
        (0..self.len()).filter(move |&i| self.is_set(i))
    }

    /// The mask as a bit vector, slice 0 in bit 0.
    pub fn as_bits(&self) -> &Bits {
        &self.bits
    }
}

impl fmt::Debug for WriteMask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "WriteMask(")?;
        for i in (0..self.len()).rev() {
            f.write_str(if self.is_set(i) { "1" } else { "0" })?;
        }
        write!(f, ")")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_and_none() {
        assert!(WriteMask::all(4).is_all());
        assert!(WriteMask::none(4).is_none());
        assert!(!WriteMask::all(4).is_none());
        assert_eq!(WriteMask::all(4).len(), 4);
    }

    #[test]
    fn from_u64_truncates_to_slice_count() {
        let m = WriteMask::from_u64(2, 0xFF);
        assert!(m.is_all());
        assert_eq!(m.len(), 2);
    }

    #[test]
    fn iter_set_ascending() {
        let m = WriteMask::from_u64(6, 0b10_1001);
        assert_eq!(m.iter_set().collect::<Vec<_>>(), vec![0, 3, 5]);
    }

    #[test]
    fn complement_flips_every_slice() {
        let m = WriteMask::from_u64(5, 0b10110);
        assert_eq!(m.complement(), WriteMask::from_u64(5, 0b01001));
        assert_eq!(m.complement().complement(), m);
    }

    #[test]
    fn debug_lists_msb_first() {
        assert_eq!(format!("{:?}", WriteMask::from_u64(4, 0b0011)), "WriteMask(0011)");
    }
}
