//! Script playback.
//!
//! [`ScriptPlayer`] issues a fixed command list against a [`BusPort`] in
//! order: it lets each command's delay pass as idle cycles, sends the
//! request, and for reads compares the response with the expected data.
//! Playback stops at the first failure.

use std::io::BufRead;
use std::path::Path;

use log::{info, trace, warn};

use crate::error::ReplayError;
use crate::port::BusPort;
use crate::reader::{load_script, ScriptReader};
use crate::types::{Command, PlaybackReport, Request};

/// Replays a request script against a bus port.
///
/// # Examples
///
/// ```
/// use membank_array::{ArrayConfig, BankedMemory};
/// use membank_replay::{Command, MemoryPort, ScriptPlayer};
///
/// let mut mem = BankedMemory::<u16>::new(ArrayConfig::new(8, 2)).unwrap();
/// let player = ScriptPlayer::new(vec![
///     Command::write(0x2, 0xBEEF),
///     Command::read(0x2, 0xBEEF).after(5),
/// ])
/// .with_warmup(0);
///
/// let report = player.play(&mut MemoryPort::new(&mut mem)).unwrap();
/// assert_eq!((report.writes, report.reads, report.idle_cycles), (1, 1, 5));
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScriptPlayer {
    commands: Vec<Command>,
    warmup_cycles: u64,
}

impl ScriptPlayer {
    /// Idle cycles before the first request, letting the device under
    /// test come out of reset.
    pub const DEFAULT_WARMUP_CYCLES: u64 = 20;

    /// Player over an in-memory command list.
    pub fn new(commands: Vec<Command>) -> Self {
        Self {
            commands,
            warmup_cycles: Self::DEFAULT_WARMUP_CYCLES,
        }
    }

    /// Load every command from a script reader.
    pub fn from_reader<R: BufRead>(reader: ScriptReader<R>) -> Result<Self, ReplayError> {
        let commands = reader.commands().collect::<Result<Vec<_>, _>>()?;
        Ok(Self::new(commands))
    }

    /// Load a script file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ReplayError> {
        Ok(Self::new(load_script(path)?))
    }

    /// Override the warm-up idle period.
    pub fn with_warmup(mut self, cycles: u64) -> Self {
        self.warmup_cycles = cycles;
        self
    }

    /// The command list, in issue order.
    pub fn commands(&self) -> &[Command] {
        &self.commands
    }

    /// Warm-up idle cycles issued before the first command.
    pub fn warmup_cycles(&self) -> u64 {
        self.warmup_cycles
    }

    /// Issue every command against `port`.
    ///
    /// # Errors
    ///
    /// Returns the first port error, or [`ReplayError::ReadMismatch`] for
    /// the first read whose response differs from the expected data. No
    /// further commands are issued after an error.
    pub fn play(&self, port: &mut dyn BusPort) -> Result<PlaybackReport, ReplayError> {
        let mut report = PlaybackReport::default();

        if self.warmup_cycles > 0 {
            port.idle(self.warmup_cycles);
            report.idle_cycles = report.idle_cycles.saturating_add(self.warmup_cycles);
        }

        for cmd in &self.commands {
            if cmd.delay > 0 {
                port.idle(cmd.delay);
                report.idle_cycles = report.idle_cycles.saturating_add(cmd.delay);
            }
            trace!(
                "line {}: sending {} request: addr={:#x}",
                cmd.line,
                if cmd.request.is_write() { "write" } else { "read" },
                cmd.request.addr()
            );
            match cmd.request {
                Request::Write { addr, data } => {
                    port.write(addr, data)?;
                    trace!("write acknowledged: data={data:#x}");
                    report.writes += 1;
                }
                Request::Read { addr, expected } => {
                    let actual = port.read(addr)?;
                    trace!("received read response: data={actual:#x}");
                    if actual != expected {
                        warn!(
                            "line {}: read {addr:#x} returned {actual:#x}, expected {expected:#x}",
                            cmd.line
                        );
                        return Err(ReplayError::ReadMismatch {
                            line: cmd.line,
                            addr,
                            expected,
                            actual,
                        });
                    }
                    report.reads += 1;
                }
            }
        }

        info!("playback complete: {report}");
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Records every call; reads return the last value written anywhere.
    #[derive(Default)]
    struct LoopbackPort {
        log: Vec<String>,
        last: u64,
    }

    impl BusPort for LoopbackPort {
        fn write(&mut self, addr: u64, data: u64) -> Result<(), ReplayError> {
            self.log.push(format!("W {addr:x} {data:x}"));
            self.last = data;
            Ok(())
        }

        fn read(&mut self, addr: u64) -> Result<u64, ReplayError> {
            self.log.push(format!("R {addr:x}"));
            Ok(self.last)
        }

        fn idle(&mut self, cycles: u64) {
            self.log.push(format!("I {cycles}"));
        }
    }

    #[test]
    fn issues_in_order_with_delays() {
        let player = ScriptPlayer::new(vec![
            Command::write(0x0, 0xA),
            Command::read(0x4, 0xA).after(2),
            Command::write(0x8, 0xB).after(1),
        ]);
        let mut port = LoopbackPort::default();
        let report = player.play(&mut port).unwrap();

        assert_eq!(
            port.log,
            ["I 20", "W 0 a", "I 2", "R 4", "I 1", "W 8 b"]
        );
        assert_eq!(
            report,
            PlaybackReport {
                writes: 2,
                reads: 1,
                idle_cycles: 23
            }
        );
    }

    #[test]
    fn first_mismatch_stops_playback() {
        let mut mismatched = Command::read(0x0, 0xFF);
        mismatched.line = 7;
        let player = ScriptPlayer::new(vec![
            Command::write(0x0, 0x1),
            mismatched,
            Command::write(0x0, 0x2),
        ])
        .with_warmup(0);
        let mut port = LoopbackPort::default();

        match player.play(&mut port) {
            Err(ReplayError::ReadMismatch {
                line,
                addr,
                expected,
                actual,
            }) => {
                assert_eq!((line, addr, expected, actual), (7, 0, 0xFF, 0x1));
            }
            other => panic!("expected ReadMismatch, got {other:?}"),
        }
        assert_eq!(port.log, ["W 0 1", "R 0"]);
    }

    #[test]
    fn idle_cycles_saturate_instead_of_overflowing() {
        let player = ScriptPlayer::new(vec![
            Command::write(0x0, 0x1).after(u64::MAX),
            Command::read(0x0, 0x1).after(u64::MAX),
        ]);
        let mut port = LoopbackPort::default();
        let report = player.play(&mut port).unwrap();
        assert_eq!(report.idle_cycles, u64::MAX);
        assert_eq!(report.requests(), 2);
    }

    #[test]
    fn empty_script_only_warms_up() {
        let mut port = LoopbackPort::default();
        let report = ScriptPlayer::new(Vec::new()).play(&mut port).unwrap();
        assert_eq!(report.requests(), 0);
        assert_eq!(report.idle_cycles, ScriptPlayer::DEFAULT_WARMUP_CYCLES);
    }

    #[test]
    fn from_reader_parses_whole_script() {
        let reader = ScriptReader::new("0,W,0,1\n# comment\n3,R,0,1\n".as_bytes());
        let player = ScriptPlayer::from_reader(reader).unwrap();
        assert_eq!(player.commands().len(), 2);
        assert_eq!(player.commands()[1].line, 3);
    }
}
