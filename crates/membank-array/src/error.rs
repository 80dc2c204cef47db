//! Array-specific error types.

use std::error::Error;
use std::fmt;

/// Errors from array construction and checked access.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ArrayError {
    /// The array was configured with zero entries (or zero lines).
    ZeroEntries,
    /// The array was configured with zero banks.
    ZeroBanks,
    /// The array was configured with zero byte enables.
    ZeroByteEnables,
    /// The element type serializes to zero bits.
    ZeroWidth,
    /// The entry count is not a multiple of the bank count.
    EntriesNotDivisible {
        /// Configured total entry count.
        total_entries: usize,
        /// Configured bank count.
        bank_count: usize,
    },
    /// The serialized word width is not a multiple of the byte-enable count.
    WidthNotDivisible {
        /// Serialized width of the element type in bits.
        word_width: usize,
        /// Configured byte-enable count.
        byte_enables: usize,
    },
    /// A local index beyond the entries of one bank.
    LocalIndexOutOfRange {
        /// The offending index.
        index: usize,
        /// Number of entries in each bank.
        entries_per_bank: usize,
    },
    /// A bank selector beyond the configured bank count.
    BankOutOfRange {
        /// The offending bank selector.
        bank: usize,
        /// Number of banks in the array.
        bank_count: usize,
    },
    /// A write mask whose width differs from the slices per entry.
    MaskWidthMismatch {
        /// Number of bits in the supplied mask.
        mask: usize,
        /// Number of slices per entry.
        slices: usize,
    },
    /// A two-dimensional line array was configured with zero ways.
    ZeroWays,
    /// The line count is not a multiple of the way count.
    WaysNotDivisible {
        /// Configured line count.
        lines: usize,
        /// Configured way count.
        ways: usize,
    },
}

impl fmt::Display for ArrayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroEntries => write!(f, "array must have at least one entry"),
            Self::ZeroBanks => write!(f, "array must have at least one bank"),
            Self::ZeroByteEnables => write!(f, "array must have at least one byte enable"),
            Self::ZeroWidth => write!(f, "element type serializes to zero bits"),
            Self::EntriesNotDivisible {
                total_entries,
                bank_count,
            } => {
                write!(
                    f,
                    "{total_entries} entries cannot be split evenly across {bank_count} banks"
                )
            }
            Self::WidthNotDivisible {
                word_width,
                byte_enables,
            } => {
                write!(
                    f,
                    "{word_width}-bit word cannot be split into {byte_enables} equal slices"
                )
            }
            Self::LocalIndexOutOfRange {
                index,
                entries_per_bank,
            } => {
                write!(
                    f,
                    "local index {index} out of range: each bank holds {entries_per_bank} entries"
                )
            }
            Self::BankOutOfRange { bank, bank_count } => {
                write!(f, "bank {bank} out of range: array has {bank_count} banks")
            }
            Self::MaskWidthMismatch { mask, slices } => {
                write!(f, "write mask has {mask} bits but entries have {slices} slices")
            }
            Self::ZeroWays => write!(f, "line array must have at least one way"),
            Self::WaysNotDivisible { lines, ways } => {
                write!(f, "{lines} lines cannot be split evenly into {ways} ways")
            }
        }
    }
}

impl Error for ArrayError {}
