//! Error types for script loading and playback.

use std::fmt;
use std::io;

use membank_array::ArrayError;

/// Errors that can occur while reading, playing, or serving a script.
#[derive(Debug)]
pub enum ReplayError {
    /// An I/O error occurred while reading or writing a script.
    Io(io::Error),
    /// A script line could not be parsed.
    MalformedLine {
        /// 1-based line number in the script.
        line: usize,
        /// Human-readable description of what went wrong.
        detail: String,
    },
    /// The request kind field was neither `R` nor `W`.
    UnknownRequestKind {
        /// 1-based line number in the script.
        line: usize,
        /// The unrecognized kind field.
        kind: String,
    },
    /// A bus address decodes to a word past the end of the memory.
    AddressOutOfRange {
        /// The byte address as issued.
        addr: u64,
        /// Capacity of the memory in words.
        capacity: usize,
    },
    /// Read data did not match the value the script expected.
    ReadMismatch {
        /// 1-based line number of the read request.
        line: usize,
        /// The byte address read.
        addr: u64,
        /// Data the script expected.
        expected: u64,
        /// Data the port returned.
        actual: u64,
    },
    /// The other end of a bus channel has gone away.
    Disconnected,
    /// The memory slave answered with a response of the wrong kind.
    Protocol {
        /// Human-readable description of the violation.
        detail: String,
    },
    /// The memory slave thread panicked.
    SlavePanicked,
    /// The memory could not be built from the requested configuration.
    Array(ArrayError),
}

impl fmt::Display for ReplayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::MalformedLine { line, detail } => {
                write!(f, "malformed request on line {line}: {detail}")
            }
            Self::UnknownRequestKind { line, kind } => {
                write!(f, "line {line}: request kind must be R or W, found {kind:?}")
            }
            Self::AddressOutOfRange { addr, capacity } => {
                write!(f, "address {addr:#x} is past the end of a {capacity}-word memory")
            }
            Self::ReadMismatch {
                line,
                addr,
                expected,
                actual,
            } => {
                write!(
                    f,
                    "read response did not match on line {line}: \
                     addr={addr:#x}, expected={expected:#x}, actual={actual:#x}"
                )
            }
            Self::Disconnected => write!(f, "bus channel disconnected"),
            Self::Protocol { detail } => write!(f, "bus protocol violation: {detail}"),
            Self::SlavePanicked => write!(f, "memory slave thread panicked"),
            Self::Array(e) => write!(f, "memory configuration: {e}"),
        }
    }
}

impl std::error::Error for ReplayError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Array(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for ReplayError {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<ArrayError> for ReplayError {
    fn from(e: ArrayError) -> Self {
        Self::Array(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn mismatch_message_is_hex() {
        let err = ReplayError::ReadMismatch {
            line: 7,
            addr: 0x40,
            expected: 0xBEEF,
            actual: 0xDEAD,
        };
        assert_eq!(
            err.to_string(),
            "read response did not match on line 7: addr=0x40, expected=0xbeef, actual=0xdead"
        );
    }

    #[test]
    fn wrapped_errors_expose_source() {
        let err = ReplayError::from(ArrayError::ZeroBanks);
        assert!(err.source().is_some());
        assert!(ReplayError::Disconnected.source().is_none());
    }
}
