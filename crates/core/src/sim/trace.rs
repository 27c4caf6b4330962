//! Memory trace parsing.
//!
//! A trace holds one access per line:
//!
//! ```text
//! <op> <hex-address> [<ignored>]
//! ```
//!
//! where `<op>` is `l` (load) or `s` (store) and `<hex-address>` is base 16, with or
//! without a `0x` prefix. The third field, usually the instruction count since the
//! previous access, carries no meaning for the cache and may be omitted.
//!
//! Parsing is lenient: blank lines and lines that
//! cannot be parsed are skipped. They are never counted as accesses and never
//! abort a run.

use std::io::{self, BufRead};

use tracing::debug;

use crate::common::addr::Address;

/// Kind of memory access.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Operation {
    /// A read (`l`).
    Load,
    /// A write (`s`).
    Store,
}

/// One well-formed trace line.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TraceRecord {
    /// Load or store.
    pub op: Operation,
    /// Accessed byte address.
    pub address: Address,
}

impl TraceRecord {
    /// Creates a load of `address`.
    pub const fn load(address: u32) -> Self {
        Self {
            op: Operation::Load,
            address: Address::new(address),
        }
    }

    /// Creates a store to `address`.
    pub const fn store(address: u32) -> Self {
        Self {
            op: Operation::Store,
            address: Address::new(address),
        }
    }
}

impl Operation {
    /// Parses the single-character operation token.
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "l" => Some(Self::Load),
            "s" => Some(Self::Store),
            _ => None,
        }
    }
}

/// Parses a base-16 address token.
///
/// An optional `0x`/`0X` prefix is accepted and parsing stops at the first
/// non-hex character, so `1f,` reads as `0x1f`. At least one hex digit is
/// required. Values wider than 32 bits keep their low 32 bits; values that do not
/// even fit in 64 bits are rejected.
pub fn parse_address(token: &str) -> Option<u32> {
    let digits = token
        .strip_prefix("0x")
        .or_else(|| token.strip_prefix("0X"))
        .filter(|rest| rest.starts_with(|c: char| c.is_ascii_hexdigit()))
        .unwrap_or(token);
    let end = digits
        .find(|c: char| !c.is_ascii_hexdigit())
        .unwrap_or(digits.len());
    if end == 0 {
        return None;
    }
    u64::from_str_radix(&digits[..end], 16)
        .ok()
        .map(|value| value as u32)
}

/// Parses one trace line.
///
/// Returns `None` for blank lines, an operation other than `l`/`s`, or an
/// unparsable address. Fields after the address are ignored.
///
/// # Examples
///
/// ```
/// use csim_core::sim::trace::{Operation, parse_line};
///
/// let record = parse_line("s 1fffff50 7").unwrap();
/// assert_eq!(record.op, Operation::Store);
/// assert_eq!(record.address.val(), 0x1fff_ff50);
///
/// assert!(parse_line("x 1fffff50 7").is_none());
/// assert!(parse_line("l zz 1").is_none());
/// ```
pub fn parse_line(line: &str) -> Option<TraceRecord> {
    let mut fields = line.split_whitespace();
    let op = Operation::from_token(fields.next()?)?;
    let address = parse_address(fields.next()?)?;
    Some(TraceRecord {
        op,
        address: Address::new(address),
    })
}

/// Iterator over the well-formed records of a trace stream.
///
/// Yields `Err` only for I/O failures of the underlying reader. Lines that are not
/// valid UTF-8 are decoded lossily and then parsed like any other line, which in
/// practice means they are skipped.
#[derive(Debug)]
pub struct TraceReader<R> {
    reader: R,
    buf: Vec<u8>,
    lines_read: u64,
    lines_skipped: u64,
}

impl<R: BufRead> TraceReader<R> {
    /// Wraps a buffered reader.
    pub const fn new(reader: R) -> Self {
        Self {
            reader,
            buf: Vec::new(),
            lines_read: 0,
            lines_skipped: 0,
        }
    }

    /// Lines consumed so far, including skipped ones.
    pub const fn lines_read(&self) -> u64 {
        self.lines_read
    }

    /// Blank or malformed lines skipped so far.
    pub const fn lines_skipped(&self) -> u64 {
        self.lines_skipped
    }
}

impl<R: BufRead> Iterator for TraceReader<R> {
    type Item = io::Result<TraceRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            self.buf.clear();
            match self.reader.read_until(b'\n', &mut self.buf) {
                Ok(0) => return None,
                Ok(_) => {}
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Some(Err(e)),
            }
            self.lines_read += 1;

            let line = String::from_utf8_lossy(&self.buf);
            if let Some(record) = parse_line(&line) {
                return Some(Ok(record));
            }

            self.lines_skipped += 1;
            if !line.trim().is_empty() {
                debug!(
                    line = self.lines_read,
                    text = %line.trim_end(),
                    "skipping malformed trace line"
                );
            }
        }
    }
}
