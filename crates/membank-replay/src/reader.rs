//! Script reader.
//!
//! [`ScriptReader`] pulls commands one line at a time from any `BufRead`
//! source, so a script never has to be held in memory to be validated.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use log::debug;

use crate::codec::parse_line;
use crate::error::ReplayError;
use crate::types::Command;

/// Reads commands from a line-oriented script.
///
/// Generic over `R: BufRead` so tests can use `&[u8]` and production
/// code can use `BufReader<File>`.
pub struct ScriptReader<R: BufRead> {
    reader: R,
    line: usize,
    commands_read: u64,
    buf: String,
}

impl ScriptReader<BufReader<File>> {
    /// Open a script file.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, ReplayError> {
        let file = File::open(path.as_ref())?;
        debug!("reading script {}", path.as_ref().display());
        Ok(Self::new(BufReader::new(file)))
    }
}

impl<R: BufRead> ScriptReader<R> {
    /// Wrap a buffered source positioned at the start of a script.
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            line: 0,
            commands_read: 0,
            buf: String::new(),
        }
    }

    /// Read the next command, or `None` at end of input.
    ///
    /// Blank and comment lines are skipped.
    pub fn next_command(&mut self) -> Result<Option<Command>, ReplayError> {
        loop {
            self.buf.clear();
            if self.reader.read_line(&mut self.buf)? == 0 {
                return Ok(None);
            }
            self.line += 1;
            if let Some(cmd) = parse_line(self.line, &self.buf)? {
                self.commands_read += 1;
                return Ok(Some(cmd));
            }
        }
    }

    /// Number of commands read so far.
    pub fn commands_read(&self) -> u64 {
        self.commands_read
    }

    /// Number of lines consumed so far, including skipped ones.
    pub fn lines_read(&self) -> usize {
        self.line
    }

    /// Convert into a command iterator.
    pub fn commands(self) -> CommandIter<R> {
        CommandIter {
            reader: self,
            done: false,
        }
    }
}

/// Iterator adapter over script commands.
///
/// Yields `Err` at most once; iteration stops after the first error.
pub struct CommandIter<R: BufRead> {
    reader: ScriptReader<R>,
    done: bool,
}

impl<R: BufRead> Iterator for CommandIter<R> {
    type Item = Result<Command, ReplayError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match self.reader.next_command() {
            Ok(Some(cmd)) => Some(Ok(cmd)),
            Ok(None) => {
                self.done = true;
                None
            }
            Err(e) => {
                self.done = true;
                Some(Err(e))
            }
        }
    }
}

/// Read a whole script file into memory.
pub fn load_script(path: impl AsRef<Path>) -> Result<Vec<Command>, ReplayError> {
    let commands: Vec<Command> = ScriptReader::open(path.as_ref())?
        .commands()
        .collect::<Result<_, _>>()?;
    debug!(
        "loaded {} commands from {}",
        commands.len(),
        path.as_ref().display()
    );
    Ok(commands)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Request;

    const SCRIPT: &str = "\
# delay,kind,addr,data
0,W,0,1234

2,R,0,1234
1,W,8,ff
";

    #[test]
    fn reads_commands_and_tracks_lines() {
        let mut reader = ScriptReader::new(SCRIPT.as_bytes());
        let first = reader.next_command().unwrap().unwrap();
        assert_eq!(first.line, 2);
        assert_eq!(
            first.request,
            Request::Write {
                addr: 0,
                data: 0x1234
            }
        );

        let second = reader.next_command().unwrap().unwrap();
        assert_eq!(second.line, 4);
        assert_eq!(second.delay, 2);

        assert!(reader.next_command().unwrap().is_some());
        assert!(reader.next_command().unwrap().is_none());
        assert_eq!(reader.commands_read(), 3);
        assert_eq!(reader.lines_read(), 5);
    }

    #[test]
    fn iterator_stops_after_first_error() {
        let script = "0,W,0,1\n0,Q,0,1\n0,W,0,2\n";
        let items: Vec<_> = ScriptReader::new(script.as_bytes()).commands().collect();
        assert_eq!(items.len(), 2);
        assert!(items[0].is_ok());
        assert!(matches!(
            items[1],
            Err(ReplayError::UnknownRequestKind { line: 2, .. })
        ));
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = load_script("/nonexistent/membank/script.csv").unwrap_err();
        assert!(matches!(err, ReplayError::Io(_)));
    }
}
