//! A single bank: a flat run of equally sized slices.

use membank_core::Bits;

/// One independently addressable partition of a memory array.
///
/// Stores `entries * slices_per_entry` slices back to back; entry `i`
/// owns slots `i * slices_per_entry .. (i + 1) * slices_per_entry`.
/// Slices up to 128 bits wide are held inline.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Bank {
    slices: Vec<Bits>,
}

impl Bank {
    /// Create a bank of `entries` entries, each initialized to `pattern`
    /// (the slices of one entry, least significant first).
    pub fn new(entries: usize, pattern: &[Bits]) -> Self {
        let mut slices = Vec::with_capacity(entries * pattern.len());
        for _ in 0..entries {
            slices.extend_from_slice(pattern);
        }
        Self { slices }
    }

    /// Number of slices stored.
    pub fn slots(&self) -> usize {
        self.slices.len()
    }

    /// The slice at `slot`.
    ///
    /// # Panics
    ///
    /// Panics if `slot >= slots()`.
    pub fn slice(&self, slot: usize) -> &Bits {
        &self.slices[slot]
    }

    /// The `count` slices starting at `first`.
    ///
    /// # Panics
    ///
    /// Panics if the run extends past the end of the bank.
    pub fn entry(&self, first: usize, count: usize) -> &[Bits] {
        &self.slices[first..first + count]
    }

    /// Mutable view of the `count` slices starting at `first`.
    ///
    /// # Panics
    ///
    /// Panics if the run extends past the end of the bank.
    pub fn entry_mut(&mut self, first: usize, count: usize) -> &mut [Bits] {
        &mut self.slices[first..first + count]
    }

    /// Overwrite every slice with `value`.
    pub fn fill(&mut self, value: &Bits) {
        for slice in &mut self.slices {
            slice.clone_from(value);
        }
    }

    /// Storage held by this bank in bits.
    pub fn memory_bits(&self) -> usize {
        self.slices.iter().map(|s| s.width()).sum()
    }
}
