//! Core abstraction trait for memory-shaped stores.

use crate::index::{BankIndex, LocalIndex};
use crate::mask::WriteMask;

/// Indexed, bank-selected storage of typed values.
///
/// This trait decouples stimulus drivers (script players, test benches)
/// from any concrete memory model. Calls are synchronous and complete
/// before returning; indices must be in range for the implementing store.
pub trait MemoryAccess<T> {
    /// Number of write-mask slices per entry.
    fn slices_per_entry(&self) -> usize;

    /// Read the value stored at `index` in `bank`.
    fn read(&self, index: LocalIndex, bank: BankIndex) -> T;

    /// Write `value` to `index` in `bank`, committing only the slices
    /// selected by `mask`, and only if `enable` is true.
    fn write(&mut self, index: LocalIndex, bank: BankIndex, value: &T, mask: &WriteMask, enable: bool);

    /// Write `value` with every slice enabled.
    fn store(&mut self, index: LocalIndex, bank: BankIndex, value: &T) {
        let mask = WriteMask::all(self.slices_per_entry());
        self.write(index, bank, value, &mask, true);
    }

    /// Reset every stored bit to zero.
    fn clear(&mut self);
}
