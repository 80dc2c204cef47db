//! membank: banked, byte-sliced memory models.
//!
//! This is the top-level facade crate that re-exports the public API from all
//! membank sub-crates. For most users, adding `membank` as a single dependency
//! is sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use membank::prelude::*;
//!
//! // 4 entries of u16 in 2 banks, each entry split into 2 byte slices.
//! let config = ArrayConfig::new(4, 2).with_byte_enables(2);
//! let mut mem = BankedMemory::<u16>::new(config).unwrap();
//!
//! let (idx, bank) = (LocalIndex(0), BankIndex(0));
//! mem.write(idx, bank, &0x1234, &WriteMask::from_u64(2, 0b01), true);
//! mem.write(idx, bank, &0x5678, &WriteMask::from_u64(2, 0b10), true);
//! assert_eq!(mem.read(idx, bank), 0x5634);
//!
//! // Drive the same memory from a request script.
//! let player = ScriptPlayer::new(vec![Command::read(0x0, 0x5634)]).with_warmup(0);
//! let report = player.play(&mut MemoryPort::new(&mut mem)).unwrap();
//! assert_eq!(report.reads, 1);
//! ```
//!
//! # Modules
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `membank-core` | `Bits`, `Marshal`, `WriteMask`, index newtypes, `MemoryAccess` |
//! | [`array`] | `membank-array` | `BankedMemory`, configuration, geometry, line arrays |
//! | [`replay`] | `membank-replay` | Request scripts, bus ports, script player |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Bit vectors, serialization, masks, and indices (`membank-core`).
///
/// Element types implement [`types::Marshal`] to be storable.
pub use membank_core as types;

/// Memory arrays (`membank-array`).
///
/// [`array::BankedMemory`] is the banked, masked store;
/// [`array::LineArray`] and [`array::LineArray2d`] are the plain shapes.
pub use membank_array as array;

/// Request-script playback (`membank-replay`).
///
/// Load scripts with [`replay::ScriptReader`], play them with
/// [`replay::ScriptPlayer`] over any [`replay::BusPort`].
pub use membank_replay as replay;

/// Common imports for typical membank usage.
///
/// ```rust
/// use membank::prelude::*;
/// ```
pub mod prelude {
    // Core types and traits
    pub use membank_core::{BankIndex, Bits, LocalIndex, Marshal, MemoryAccess, WriteMask};

    // Arrays
    pub use membank_array::{
        ArrayConfig, ArrayError, BankedMemory, Geometry, Layout, LineArray, LineArray2d,
    };

    // Replay
    pub use membank_replay::{
        AddressMap, BusPort, Command, MemoryPort, PlaybackReport, ReplayError, Request,
        ScriptPlayer,
    };
}
