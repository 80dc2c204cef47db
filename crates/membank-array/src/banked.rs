//! The banked, byte-sliced memory array.
//!
//! [`BankedMemory`] partitions its entries across independent banks and
//! stores each entry as a run of equally sized slices, so that a write can
//! commit any subset of an entry's slices:
//!
//! ```text
//! BankedMemory<T>
//! ├── Geometry (entries/bank, slice width, index widths)
//! └── Bank × bank_count
//!     └── Bits × (entries_per_bank × byte_enables)
//!         entry i = slots [i·BE, (i+1)·BE), slice 0 least significant
//! ```

use std::fmt;
use std::marker::PhantomData;

use log::{debug, trace};
use membank_core::{BankIndex, Bits, LocalIndex, Marshal, MemoryAccess, WriteMask};

use crate::bank::Bank;
use crate::config::ArrayConfig;
use crate::error::ArrayError;
use crate::geometry::Geometry;

/// A fixed-capacity, multi-bank memory with per-slice write enables.
///
/// Every slice is initialized to the serialized form of `T::default()`;
/// [`clear`](Self::clear) resets to all-zero bits instead, which is a
/// different state whenever `T::default()` does not serialize to zero.
///
/// Indices are a caller contract. [`read`](Self::read) and
/// [`write`](Self::write) assert them and panic on out-of-range
/// entries in every build, before any slot arithmetic; [`try_read`](Self::try_read) and
/// [`try_write`](Self::try_write) return [`ArrayError`] instead.
///
/// # Examples
///
/// ```
/// use membank_array::{ArrayConfig, BankedMemory};
/// use membank_core::{BankIndex, LocalIndex, WriteMask};
///
/// let config = ArrayConfig::new(4, 2).with_byte_enables(2);
/// let mut mem = BankedMemory::<u16>::new(config).unwrap();
///
/// let (idx, bank) = (LocalIndex(0), BankIndex(0));
/// mem.write(idx, bank, &0x1234, &WriteMask::from_u64(2, 0b01), true);
/// mem.write(idx, bank, &0x5678, &WriteMask::from_u64(2, 0b10), true);
/// assert_eq!(mem.read(idx, bank), 0x5634);
///
/// mem.clear();
/// assert_eq!(mem.read(idx, bank), 0x0000);
/// ```
pub struct BankedMemory<T> {
    config: ArrayConfig,
    geometry: Geometry,
    banks: Vec<Bank>,
    _element: PhantomData<fn() -> T>,
}

impl<T: Marshal + Default> BankedMemory<T> {
    /// Build an array from `config`, initializing every entry to `T::default()`.
    ///
    /// # Errors
    ///
    /// Returns [`ArrayError`] if the config violates a divisibility
    /// invariant for `T`'s serialized width.
    pub fn new(config: ArrayConfig) -> Result<Self, ArrayError> {
        let geometry = config.validate(T::WIDTH)?;
        let pattern: Vec<Bits> = T::default()
            .to_bits()
            .chunks(geometry.slice_width())
            .collect();
        let banks = (0..geometry.bank_count())
            .map(|_| Bank::new(geometry.entries_per_bank(), &pattern))
            .collect();
        debug!(
            "banked memory: {} entries in {} banks, {} x {}-bit slices per entry",
            geometry.total_entries(),
            geometry.bank_count(),
            geometry.byte_enables(),
            geometry.slice_width()
        );
        Ok(Self {
            config,
            geometry,
            banks,
            _element: PhantomData,
        })
    }
}

impl<T: Marshal> BankedMemory<T> {
    /// The configuration this array was built from.
    pub fn config(&self) -> &ArrayConfig {
        &self.config
    }

    /// The derived geometry.
    pub fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    /// Reset every slice in every bank to all-zero bits.
    pub fn clear(&mut self) {
        let zero = Bits::zero(self.geometry.slice_width());
        for bank in &mut self.banks {
            bank.fill(&zero);
        }
        let bits: usize = self.banks.iter().map(Bank::memory_bits).sum();
        debug!("banked memory cleared ({bits} bits)");
    }

    /// Read the entry at `index` in `bank`.
    ///
    /// # Panics
    ///
    /// Panics if `index` or `bank` is out of range.
    pub fn read(&self, index: LocalIndex, bank: BankIndex) -> T {
        T::from_bits(&self.read_bits(index, bank))
    }

    /// Read the entry at `index` in bank 0.
    pub fn read_bank0(&self, index: LocalIndex) -> T {
        self.read(index, BankIndex(0))
    }

    /// Read the serialized word at `index` in `bank`.
    ///
    /// Slice `i` lands at bits `[i * slice_width, (i + 1) * slice_width)`.
    ///
    /// # Panics
    ///
    /// Panics if `index` or `bank` is out of range.
    pub fn read_bits(&self, index: LocalIndex, bank: BankIndex) -> Bits {
        self.assert_in_range(index, bank);
        let first = self.geometry.slot(index, 0);
        Bits::concat(self.banks[bank.0].entry(first, self.geometry.byte_enables()))
    }

    /// Write `value` to `index` in `bank`.
    ///
    /// Does nothing if `enable` is false. Otherwise slice `i` of the
    /// serialized value replaces the stored slice iff bit `i` of `mask` is
    /// set; masked-out stored slices are left exactly as they were.
    ///
    /// # Panics
    ///
    /// Panics if `index` or `bank` is out of range, or if `mask` is
    /// narrower than the slice count.
    pub fn write(
        &mut self,
        index: LocalIndex,
        bank: BankIndex,
        value: &T,
        mask: &WriteMask,
        enable: bool,
    ) {
        if !enable {
            return;
        }
        self.write_bits(index, bank, &value.to_bits(), mask);
    }

    /// Write `value` to `index` in `bank` with every slice enabled.
    pub fn store(&mut self, index: LocalIndex, bank: BankIndex, value: &T) {
        let mask = WriteMask::all(self.geometry.byte_enables());
        self.write(index, bank, value, &mask, true);
    }

    /// Write a serialized word under `mask`.
    ///
    /// # Panics
    ///
    /// Panics if `index` or `bank` is out of range, or if `mask` is
    /// narrower than the slice count.
    pub fn write_bits(&mut self, index: LocalIndex, bank: BankIndex, word: &Bits, mask: &WriteMask) {
        self.assert_in_range(index, bank);
        debug_assert_eq!(word.width(), self.geometry.word_width());
        debug_assert_eq!(mask.len(), self.geometry.byte_enables());

        let first = self.geometry.slot(index, 0);
        let slice_width = self.geometry.slice_width();
        let stored = self.banks[bank.0].entry_mut(first, self.geometry.byte_enables());
        for (i, (slot, slice)) in stored.iter_mut().zip(word.chunks(slice_width)).enumerate() {
            if mask.is_set(i) {
                *slot = slice;
            }
        }
        trace!("write bank {bank} entry {index}: {word} under {mask:?}");
    }

    /// Range-checked [`read`](Self::read).
    pub fn try_read(&self, index: LocalIndex, bank: BankIndex) -> Result<T, ArrayError> {
        self.geometry.check(index, bank)?;
        Ok(self.read(index, bank))
    }

    /// Range-checked [`write`](Self::write), also validating the mask width.
    pub fn try_write(
        &mut self,
        index: LocalIndex,
        bank: BankIndex,
        value: &T,
        mask: &WriteMask,
        enable: bool,
    ) -> Result<(), ArrayError> {
        self.geometry.check(index, bank)?;
        if mask.len() != self.geometry.byte_enables() {
            return Err(ArrayError::MaskWidthMismatch {
                mask: mask.len(),
                slices: self.geometry.byte_enables(),
            });
        }
        self.write(index, bank, value, mask, enable);
        Ok(())
    }

    /// The stored slice `slice` of entry `index` in `bank`.
    ///
    /// # Panics
    ///
    /// Panics if any coordinate is out of range.
    pub fn slice(&self, index: LocalIndex, bank: BankIndex, slice: usize) -> &Bits {
        self.assert_in_range(index, bank);
        assert!(
            slice < self.geometry.byte_enables(),
            "slice {slice} out of range for {} slices per entry",
            self.geometry.byte_enables()
        );
        self.banks[bank.0].slice(self.geometry.slot(index, slice))
    }

    fn assert_in_range(&self, index: LocalIndex, bank: BankIndex) {
        assert!(
            self.geometry.contains(index, bank),
            "entry {index} in bank {bank} outside {} entries x {} banks",
            self.geometry.entries_per_bank(),
            self.geometry.bank_count()
        );
    }
}

impl<T: Marshal> MemoryAccess<T> for BankedMemory<T> {
    fn slices_per_entry(&self) -> usize {
        self.geometry.byte_enables()
    }

    fn read(&self, index: LocalIndex, bank: BankIndex) -> T {
        BankedMemory::read(self, index, bank)
    }

    fn write(&mut self, index: LocalIndex, bank: BankIndex, value: &T, mask: &WriteMask, enable: bool) {
        BankedMemory::write(self, index, bank, value, mask, enable);
    }

    fn clear(&mut self) {
        BankedMemory::clear(self);
    }
}

impl<T> fmt::Debug for BankedMemory<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BankedMemory")
            .field("geometry", &self.geometry)
            .finish_non_exhaustive()
    }
}
