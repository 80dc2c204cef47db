//! Derived array geometry.
//!
//! A [`Geometry`] is produced by [`ArrayConfig::validate`](crate::ArrayConfig::validate)
//! and is the single source of truth for slice widths, slot arithmetic and
//! index ranges. It cannot be built from inconsistent parameters.

use membank_core::{index_width, BankIndex, LocalIndex};

use crate::error::ArrayError;

/// Validated shape of a banked, sliced memory array.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Geometry {
    entries_per_bank: usize,
    bank_count: usize,
    byte_enables: usize,
    word_width: usize,
    slice_width: usize,
    local_index_width: u32,
    bank_index_width: u32,
}

impl Geometry {
    /// Derive the geometry. Callers have already checked divisibility.
    pub(crate) fn new(
        entries_per_bank: usize,
        bank_count: usize,
        byte_enables: usize,
        word_width: usize,
    ) -> Self {
        Self {
            entries_per_bank,
            bank_count,
            byte_enables,
            word_width,
            slice_width: word_width / byte_enables,
            local_index_width: index_width(entries_per_bank),
            bank_index_width: index_width(bank_count),
        }
    }

    /// Entries held by each bank.
    pub fn entries_per_bank(&self) -> usize {
        self.entries_per_bank
    }

    /// Number of banks.
    pub fn bank_count(&self) -> usize {
        self.bank_count
    }

    /// Slices per entry (the write-mask width).
    pub fn byte_enables(&self) -> usize {
        self.byte_enables
    }

    /// Serialized width of one entry in bits.
    pub fn word_width(&self) -> usize {
        self.word_width
    }

    /// Width of one slice in bits.
    pub fn slice_width(&self) -> usize {
        self.slice_width
    }

    /// Bit width of a local index, `ceil(log2(entries_per_bank))`.
    pub fn local_index_width(&self) -> u32 {
        self.local_index_width
    }

    /// Bit width of a bank selector, `ceil(log2(bank_count))`.
    pub fn bank_index_width(&self) -> u32 {
        self.bank_index_width
    }

    /// Total entries across all banks.
    pub fn total_entries(&self) -> usize {
        self.entries_per_bank * self.bank_count
    }

    /// Slices stored by each bank.
    pub fn slots_per_bank(&self) -> usize {
        self.entries_per_bank * self.byte_enables
    }

    /// Total storage in bits.
    pub fn total_bits(&self) -> usize {
        self.total_entries() * self.word_width
    }

    /// Position of `slice` of entry `index` within its bank.
    pub fn slot(&self, index: LocalIndex, slice: usize) -> usize {
        index.0 * self.byte_enables + slice
    }

    /// True if `index` and `bank` both lie within the array.
    pub fn contains(&self, index: LocalIndex, bank: BankIndex) -> bool {
        index.0 < self.entries_per_bank && bank.0 < self.bank_count
    }

    /// Range-check an index pair at an interface boundary.
    pub fn check(&self, index: LocalIndex, bank: BankIndex) -> Result<(), ArrayError> {
        if bank.0 >= self.bank_count {
            return Err(ArrayError::BankOutOfRange {
                bank: bank.0,
                bank_count: self.bank_count,
            });
        }
        if index.0 >= self.entries_per_bank {
            return Err(ArrayError::LocalIndexOutOfRange {
                index: index.0,
                entries_per_bank: self.entries_per_bank,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::ArrayConfig;

    use super::*;

    #[test]
    fn slot_layout_is_entry_major() {
        let geo = ArrayConfig::new(8, 2).with_byte_enables(4).validate(32).unwrap();
        assert_eq!(geo.slots_per_bank(), 16);
        assert_eq!(geo.slot(LocalIndex(0), 3), 3);
        assert_eq!(geo.slot(LocalIndex(2), 1), 9);
    }

    #[test]
    fn index_widths() {
        let geo = ArrayConfig::new(64, 4).validate(8).unwrap();
        assert_eq!(geo.entries_per_bank(), 16);
        assert_eq!(geo.local_index_width(), 4);
        assert_eq!(geo.bank_index_width(), 2);

        let single = ArrayConfig::single_bank(1).validate(8).unwrap();
        assert_eq!(single.local_index_width(), 1);
        assert_eq!(single.bank_index_width(), 1);
    }

    #[test]
    fn totals() {
        let geo = ArrayConfig::new(12, 3).validate(24).unwrap();
        assert_eq!(geo.total_entries(), 12);
        assert_eq!(geo.total_bits(), 12 * 24);
    }

    #[test]
    fn check_reports_bank_before_index() {
        let geo = ArrayConfig::new(4, 2).validate(8).unwrap();
        assert!(geo.check(LocalIndex(1), BankIndex(1)).is_ok());
        assert_eq!(
            geo.check(LocalIndex(2), BankIndex(0)),
            Err(ArrayError::LocalIndexOutOfRange {
                index: 2,
                entries_per_bank: 2
            })
        );
        assert_eq!(
            geo.check(LocalIndex(9), BankIndex(2)),
            Err(ArrayError::BankOutOfRange {
                bank: 2,
                bank_count: 2
            })
        );
        assert!(!geo.contains(LocalIndex(2), BankIndex(0)));
    }
}
