//! Text codec for request scripts.
//!
//! One request per line, four comma-separated fields:
//!
//! ```text
//! delay,W,address_hex,data_hex
//! delay,R,address_hex,expected_data_hex
//! ```
//!
//! `delay` is decimal. Hex fields take an optional `0x` prefix. Fields may
//! carry surrounding whitespace. Blank lines and lines starting with `#`
//! carry no request.

use crate::error::ReplayError;
use crate::types::{Command, Request};

/// Parse one script line.
///
/// Returns `Ok(None)` for blank and comment lines. `line` is the 1-based
/// line number used in errors and stored in the command.
pub fn parse_line(line: usize, text: &str) -> Result<Option<Command>, ReplayError> {
    let text = text.trim();
    if text.is_empty() || text.starts_with('#') {
        return Ok(None);
    }

    let fields: Vec<&str> = text.split(',').map(str::trim).collect();
    if fields.len() != 4 {
        return Err(ReplayError::MalformedLine {
            line,
            detail: format!("expected 4 fields, found {}", fields.len()),
        });
    }

    let delay = fields[0]
        .parse::<u64>()
        .map_err(|_| ReplayError::MalformedLine {
            line,
            detail: format!("invalid delay {:?}", fields[0]),
        })?;
    let addr = parse_hex(line, "address", fields[2])?;
    let data = parse_hex(line, "data", fields[3])?;

    let request = match fields[1] {
        "W" => Request::Write { addr, data },
        "R" => Request::Read {
            addr,
            expected: data,
        },
        other => {
            return Err(ReplayError::UnknownRequestKind {
                line,
                kind: other.to_string(),
            })
        }
    };

    Ok(Some(Command {
        delay,
        request,
        line,
    }))
}

/// Parse a hex field with an optional `0x`/`0X` prefix.
pub fn parse_hex(line: usize, what: &str, field: &str) -> Result<u64, ReplayError> {
    let digits = field
        .strip_prefix("0x")
        .or_else(|| field.strip_prefix("0X"))
        .unwrap_or(field);
    u64::from_str_radix(digits, 16).map_err(|e| ReplayError::MalformedLine {
        line,
        detail: format!("invalid {what} {field:?}: {e}"),
    })
}

/// Render a command as a script line, newline included.
pub fn format_command(cmd: &Command) -> String {
    format!("{cmd}\n")
}
