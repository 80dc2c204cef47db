//! Array configuration parameters.

use crate::error::ArrayError;
use crate::geometry::Geometry;

/// Configuration for a banked memory array.
///
/// Holds the three construction-time parameters. Everything else (slice
/// width, entries per bank, index widths) is derived by
/// [`validate`](ArrayConfig::validate) once the element width is known.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ArrayConfig {
    /// Total number of entries across all banks.
    ///
    /// Must be positive and a multiple of `bank_count`.
    pub total_entries: usize,

    /// Number of independently addressable banks.
    ///
    /// Default: 1.
    pub bank_count: usize,

    /// Number of write-enable slices each entry is split into.
    ///
    /// Default: 1 (whole-word writes). Must divide the element type's
    /// serialized width.
    pub byte_enables: usize,
}

impl ArrayConfig {
    /// Default bank count.
    pub const DEFAULT_BANK_COUNT: usize = 1;

    /// Default byte-enable count: one slice per entry.
    pub const DEFAULT_BYTE_ENABLES: usize = 1;

    /// Create a config for `total_entries` entries split over `bank_count` banks.
    ///
    /// Uses one byte enable per entry.
    pub fn new(total_entries: usize, bank_count: usize) -> Self {
        Self {
            total_entries,
            bank_count,
            byte_enables: Self::DEFAULT_BYTE_ENABLES,
        }
    }

    /// Create a single-bank config.
    pub fn single_bank(total_entries: usize) -> Self {
        Self::new(total_entries, Self::DEFAULT_BANK_COUNT)
    }

    /// Set the byte-enable count.
    pub fn with_byte_enables(mut self, byte_enables: usize) -> Self {
        self.byte_enables = byte_enables;
        self
    }

    /// Check the divisibility invariants and derive the array geometry
    /// for an element type of `word_width` bits.
    pub fn validate(&self, word_width: usize) -> Result<Geometry, ArrayError> {
        if self.total_entries == 0 {
            return Err(ArrayError::ZeroEntries);
        }
        if self.bank_count == 0 {
            return Err(ArrayError::ZeroBanks);
        }
        if self.byte_enables == 0 {
            return Err(ArrayError::ZeroByteEnables);
        }
        if word_width == 0 {
            return Err(ArrayError::ZeroWidth);
        }
        if self.total_entries % self.bank_count != 0 {
            return Err(ArrayError::EntriesNotDivisible {
                total_entries: self.total_entries,
                bank_count: self.bank_count,
            });
        }
        if word_width % self.byte_enables != 0 {
            return Err(ArrayError::WidthNotDivisible {
                word_width,
                byte_enables: self.byte_enables,
            });
        }
        Ok(Geometry::new(
            self.total_entries / self.bank_count,
            self.bank_count,
            self.byte_enables,
            word_width,
        ))
    }
}
