//! Test utilities and element types for membank development.
//!
//! Provides small [`Marshal`](membank_core::Marshal) types whose serialized form is easy to reason
//! about in assertions, plus a helper for building write masks.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod fixtures;

pub use fixtures::{Rgb, Tag12};

use membank_core::WriteMask;

/// Mask enabling only the slices listed in `slices`.
pub fn mask_of(width: usize, slices: &[usize]) -> WriteMask {
    WriteMask::from_fn(width, |i| slices.contains(&i))
}
