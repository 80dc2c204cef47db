//! Script writer.
//!
//! [`ScriptWriter`] records commands in the text format that
//! [`ScriptReader`](crate::ScriptReader) reads back.

use std::io::Write;

use crate::codec::format_command;
use crate::error::ReplayError;
use crate::types::Command;

/// Writes commands to any `Write` sink.
pub struct ScriptWriter<W: Write> {
    writer: W,
    commands_written: u64,
}

impl<W: Write> ScriptWriter<W> {
    /// Wrap a sink. Nothing is written until the first command.
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            commands_written: 0,
        }
    }

    /// Write a `#` comment line.
    pub fn write_comment(&mut self, text: &str) -> Result<(), ReplayError> {
        for line in text.lines() {
            writeln!(self.writer, "# {line}")?;
        }
        Ok(())
    }

    /// Append one command.
    pub fn write_command(&mut self, cmd: &Command) -> Result<(), ReplayError> {
        self.writer.write_all(format_command(cmd).as_bytes())?;
        self.commands_written += 1;
        Ok(())
    }

    /// Number of commands written so far.
    pub fn commands_written(&self) -> u64 {
        self.commands_written
    }

    /// Flush and return the underlying sink.
    pub fn finish(mut self) -> Result<W, ReplayError> {
        self.writer.flush()?;
        Ok(self.writer)
    }
}
