//! Core types and traits for the membank workspace.
//!
//! This is the leaf crate with zero internal dependencies. It defines
//! the vocabulary shared by every memory model in the workspace:
//!
//! - [`Bits`]: a fixed-width bit vector, the serialized form of a word.
//! - [`Marshal`]: the serialize/deserialize capability every storable
//!   element type implements.
//! - [`WriteMask`]: a per-slice write-enable bitset.
//! - [`LocalIndex`] / [`BankIndex`]: strongly-typed entry and bank selectors.
//! - [`MemoryAccess`]: the trait seam for memory-shaped stores.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod bits;
pub mod index;
pub mod marshal;
pub mod mask;
pub mod traits;

pub use bits::Bits;
pub use index::{index_width, BankIndex, LocalIndex};
pub use marshal::Marshal;
pub use mask::WriteMask;
pub use traits::MemoryAccess;
