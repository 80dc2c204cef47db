//! Strongly-typed entry and bank selectors.

use std::fmt;

/// Bit width of an index that selects one of `n` items.
///
/// Equal to `ceil(log2(n))`, but never less than one: a dimension with a
/// single item still carries a one-bit selector, since a zero-width
/// integer is not representable on a bus.
///
/// # Examples
///
/// ```
/// use membank_core::index_width;
///
/// assert_eq!(index_width(1), 1);
/// assert_eq!(index_width(2), 1);
/// assert_eq!(index_width(5), 3);
/// assert_eq!(index_width(1024), 10);
/// ```
pub fn index_width(n: usize) -> u32 {
    if n <= 2 {
        1
    } else {
        usize::BITS - (n - 1).leading_zeros()
    }
}

/// Selects an entry within one bank.
///
/// Valid values lie in `[0, entries_per_bank)`. Range checking is the
/// responsibility of the memory model that receives the index.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LocalIndex(pub usize);

impl fmt::Display for LocalIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<usize> for LocalIndex {
    fn from(v: usize) -> Self {
        Self(v)
    }
}

/// Selects one bank of a banked memory.
///
/// Valid values lie in `[0, bank_count)`. The default is bank 0.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BankIndex(pub usize);

impl fmt::Display for BankIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<usize> for BankIndex {
    fn from(v: usize) -> Self {
        Self(v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_width_matches_ceil_log2() {
        let expected = [(3, 2), (4, 2), (8, 3), (9, 4), (16, 4), (17, 5)];
        for (n, w) in expected {
            assert_eq!(index_width(n), w, "index_width({n})");
        }
    }

    #[test]
    fn degenerate_sizes_keep_one_bit() {
        assert_eq!(index_width(0), 1);
        assert_eq!(index_width(1), 1);
    }

    #[test]
    fn bank_defaults_to_zero() {
        assert_eq!(BankIndex::default(), BankIndex(0));
    }
}
