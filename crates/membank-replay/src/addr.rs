//! Byte-address decoding for banked memories.
//!
//! A bus address is a byte address. The low bits select a byte within a
//! word and are ignored; the remaining word number is interleaved across
//! banks so that consecutive words land in consecutive banks:
//!
//! ```text
//! addr = [ word number | byte offset ]
//!                 │
//!                 ├── bank  = word % bank_count
//!                 └── local = word / bank_count
//! ```

use membank_array::Geometry;
use membank_core::{BankIndex, LocalIndex};

use crate::error::ReplayError;

/// Maps byte addresses to `(local index, bank)` pairs and back.
///
/// # Examples
///
/// ```
/// use membank_array::ArrayConfig;
/// use membank_core::{BankIndex, LocalIndex};
/// use membank_replay::AddressMap;
///
/// // 16 x u32 in 4 banks: 4 bytes per word, 2 offset bits.
/// let geometry = ArrayConfig::new(16, 4).validate(32).unwrap();
/// let map = AddressMap::new(&geometry);
/// assert_eq!(map.offset_bits(), 2);
/// assert_eq!(map.decode(0x14).unwrap(), (LocalIndex(1), BankIndex(1)));
/// assert_eq!(map.encode(LocalIndex(1), BankIndex(1)), 0x14);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AddressMap {
    offset_bits: u32,
    bank_count: usize,
    entries_per_bank: usize,
}

impl AddressMap {
    /// Derive the map for a memory with the given geometry.
    pub fn new(geometry: &Geometry) -> Self {
        Self::from_parts(
            geometry.word_width(),
            geometry.bank_count(),
            geometry.entries_per_bank(),
        )
    }

    /// Build a map from raw dimensions.
    ///
    /// # Panics
    ///
    /// Panics if `bank_count` is zero.
    pub fn from_parts(word_width: usize, bank_count: usize, entries_per_bank: usize) -> Self {
        assert!(bank_count > 0, "address map needs at least one bank");
        let bytes_per_word = word_width.div_ceil(8).max(1);
        Self {
            offset_bits: bytes_per_word.next_power_of_two().trailing_zeros(),
            bank_count,
            entries_per_bank,
        }
    }

    /// Low address bits that select a byte within a word.
    pub fn offset_bits(&self) -> u32 {
        self.offset_bits
    }

    /// Bytes spanned by one word on the bus.
    pub fn word_stride(&self) -> u64 {
        1 << self.offset_bits
    }

    /// Addressable words across all banks.
    pub fn capacity(&self) -> usize {
        self.entries_per_bank * self.bank_count
    }

    /// Decode a byte address.
    ///
    /// # Errors
    ///
    /// [`ReplayError::AddressOutOfRange`] if the word number is past the
    /// end of the memory.
    pub fn decode(&self, addr: u64) -> Result<(LocalIndex, BankIndex), ReplayError> {
        let out_of_range = || ReplayError::AddressOutOfRange {
            addr,
            capacity: self.capacity(),
        };
        let word = usize::try_from(addr >> self.offset_bits).map_err(|_| out_of_range())?;
        if word >= self.capacity() {
            return Err(out_of_range());
        }
        Ok((
            LocalIndex(word / self.bank_count),
            BankIndex(word % self.bank_count),
        ))
    }

    /// Byte address of the first byte of an entry.
    pub fn encode(&self, index: LocalIndex, bank: BankIndex) -> u64 {
        let word = index.0 * self.bank_count + bank.0;
        (word as u64) << self.offset_bits
    }
}
