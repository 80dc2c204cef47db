//! The bus-port seam between the script player and a memory.

use membank_array::BankedMemory;
use membank_core::{Bits, Marshal, MemoryAccess};

use crate::addr::AddressMap;
use crate::error::ReplayError;

/// A blocking request/response bus as seen by a master.
///
/// Each call completes one transaction: `write` returns once the write
/// is acknowledged, `read` once the data has come back.
pub trait BusPort {
    /// Write `data` to byte address `addr` with every byte strobe set.
    fn write(&mut self, addr: u64, data: u64) -> Result<(), ReplayError>;

    /// Read the word at byte address `addr`.
    fn read(&mut self, addr: u64) -> Result<u64, ReplayError>;

    /// Let `cycles` bus cycles pass without a request.
    fn idle(&mut self, cycles: u64);
}

/// Serves bus transactions directly from a memory on the caller's thread.
///
/// Data is carried as `u64`: writes keep the low `T::WIDTH` bits, reads
/// zero-extend (or truncate, for elements wider than 64 bits).
pub struct MemoryPort<'a, T> {
    memory: &'a mut dyn MemoryAccess<T>,
    map: AddressMap,
    idle_cycles: u64,
}

impl<'a, T: Marshal> MemoryPort<'a, T> {
    /// Port over a banked memory, deriving the address map from its geometry.
    pub fn new(memory: &'a mut BankedMemory<T>) -> Self {
        let map = AddressMap::new(memory.geometry());
        Self::with_map(memory, map)
    }

    /// Port over any memory-shaped store with an explicit address map.
    pub fn with_map(memory: &'a mut dyn MemoryAccess<T>, map: AddressMap) -> Self {
        Self {
            memory,
            map,
            idle_cycles: 0,
        }
    }

    /// The address map in use.
    pub fn map(&self) -> &AddressMap {
        &self.map
    }

    /// Idle cycles seen so far.
    pub fn idle_cycles(&self) -> u64 {
        self.idle_cycles
    }
}

impl<T: Marshal> BusPort for MemoryPort<'_, T> {
    fn write(&mut self, addr: u64, data: u64) -> Result<(), ReplayError> {
        let (index, bank) = self.map.decode(addr)?;
        let value = T::from_bits(&Bits::from_u64(T::WIDTH, data));
        self.memory.store(index, bank, &value);
        Ok(())
    }

    fn read(&mut self, addr: u64) -> Result<u64, ReplayError> {
        let (index, bank) = self.map.decode(addr)?;
        Ok(self.memory.read(index, bank).to_bits().to_u64())
    }

    fn idle(&mut self, cycles: u64) {
        self.idle_cycles = self.idle_cycles.saturating_add(cycles);
    }
}
