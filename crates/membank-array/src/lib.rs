//! Banked, byte-sliced memory arrays.
//!
//! Models a multi-bank SRAM or register file with per-byte write enables:
//! a fixed-capacity store that partitions its entries across independent
//! banks, splits each stored word into equal slices, and commits only the
//! slices selected by a write mask.
//!
//! # Architecture
//!
//! ```text
//! ArrayConfig (total entries, banks, byte enables)
//! └── validate(T::WIDTH) → Geometry (entries/bank, slice width, index widths)
//!     └── BankedMemory<T>
//!         └── Bank × bank_count → Bits slices
//! ```
//!
//! Element types implement [`Marshal`](membank_core::Marshal); the array
//! never depends on their in-memory layout.
//!
//! [`LineArray`] and [`LineArray2d`] are the plain (unbanked, unsliced)
//! storage shapes that accompany the banked array.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod bank;
pub mod banked;
pub mod config;
pub mod error;
pub mod geometry;
pub mod lines;

// Public re-exports for the primary API surface.
pub use bank::Bank;
pub use banked::BankedMemory;
pub use config::ArrayConfig;
pub use error::ArrayError;
pub use geometry::Geometry;
pub use lines::{Layout, LineArray, LineArray2d};
