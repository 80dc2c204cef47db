//! Data types for request scripts.

use std::fmt;

/// One bus request from a script.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Request {
    /// Write `data` to byte address `addr` with every byte strobe set.
    Write {
        /// Byte address.
        addr: u64,
        /// Write data.
        data: u64,
    },
    /// Read byte address `addr` and check the response against `expected`.
    Read {
        /// Byte address.
        addr: u64,
        /// Data the response must carry.
        expected: u64,
    },
}

impl Request {
    /// The byte address this request targets.
    pub fn addr(&self) -> u64 {
        match *self {
            Self::Write { addr, .. } | Self::Read { addr, .. } => addr,
        }
    }

    /// True for writes.
    pub fn is_write(&self) -> bool {
        matches!(self, Self::Write { .. })
    }
}

/// A request together with its timing and source position.
///
/// # Examples
///
/// ```
/// use membank_replay::{Command, Request};
///
/// let cmd = Command::new(3, Request::Write { addr: 0x10, data: 0xAB });
/// assert_eq!(cmd.delay, 3);
/// assert_eq!(cmd.to_string(), "3,W,10,ab");
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Command {
    /// Idle cycles to insert before issuing the request.
    pub delay: u64,
    /// The request itself.
    pub request: Request,
    /// 1-based script line, or 0 for commands built in code.
    pub line: usize,
}

impl Command {
    /// A command not tied to any script line.
    pub fn new(delay: u64, request: Request) -> Self {
        Self {
            delay,
            request,
            line: 0,
        }
    }

    /// Shorthand for an immediate full-strobe write.
    pub fn write(addr: u64, data: u64) -> Self {
        Self::new(0, Request::Write { addr, data })
    }

    /// Shorthand for an immediate checked read.
    pub fn read(addr: u64, expected: u64) -> Self {
        Self::new(0, Request::Read { addr, expected })
    }

    /// Same command with a different delay.
    pub fn after(mut self, delay: u64) -> Self {
        self.delay = delay;
        self
    }
}

/// Formats as a script line (without the trailing newline).
impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.request {
            Request::Write { addr, data } => write!(f, "{},W,{addr:x},{data:x}", self.delay),
            Request::Read { addr, expected } => {
                write!(f, "{},R,{addr:x},{expected:x}", self.delay)
            }
        }
    }
}

/// Counters from a completed playback.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PlaybackReport {
    /// Write requests issued.
    pub writes: usize,
    /// Read requests issued and matched.
    pub reads: usize,
    /// Idle cycles inserted, including warm-up.
    pub idle_cycles: u64,
}

impl PlaybackReport {
    /// Total requests issued.
    pub fn requests(&self) -> usize {
        self.writes + self.reads
    }
}

impl fmt::Display for PlaybackReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} writes, {} reads, {} idle cycles",
            self.writes, self.reads, self.idle_cycles
        )
    }
}
