//! Incremental Invocation Parser
//!
//! Decodes request frames (a RESP array of bulk strings) into `Invocation`s.
//!
//! The parser reads from a buffer and returns either:
//! - `Ok(Some((invocation, consumed)))` - a complete frame, `consumed` bytes used
//! - `Ok(None)` - the frame is incomplete, wait for more data
//! - `Err(ParseError)` - the data can never become a valid frame
//!
//! The caller appends socket data to a buffer, calls `parse()`, and advances
//! the buffer by `consumed` on success.

use crate::protocol::types::{prefix, Invocation, CRLF};
use std::num::ParseIntError;
use thiserror::Error;

/// Errors that can occur while decoding a request frame.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ParseError {
    /// A request must be an array
    #[error("expected array, got prefix {0:#04x}")]
    ExpectedArray(u8),

    /// Every array element must be a bulk string
    #[error("expected bulk string, got prefix {0:#04x}")]
    ExpectedBulkString(u8),

    /// The array carried no function name
    #[error("empty invocation")]
    EmptyInvocation,

    /// Invalid integer in a length header
    #[error("invalid integer: {0}")]
    InvalidInteger(String),

    /// Function names and arguments must be UTF-8
    #[error("invalid UTF-8: {0}")]
    InvalidUtf8(String),

    /// Negative bulk string length
    #[error("invalid bulk string length: {0}")]
    InvalidBulkLength(i64),

    /// Negative array length
    #[error("invalid array length: {0}")]
    InvalidArrayLength(i64),

    /// Protocol violation (missing CRLF, etc.)
    #[error("protocol error: {0}")]
    ProtocolError(String),

    /// The frame exceeds a size limit
    #[error("message too large: {size} (max: {max})")]
    MessageTooLarge { size: usize, max: usize },
}

/// Result type for parsing operations.
pub type ParseResult<T> = Result<T, ParseError>;

/// Maximum size of one argument (1 MB)
pub const MAX_ARG_SIZE: usize = 1024 * 1024;

/// Maximum number of array elements, function name included
pub const MAX_ARGS: usize = 256;

/// Decodes request frames.
///
/// # Example
///
/// ```
/// use studentcc::protocol::InvocationParser;
///
/// let parser = InvocationParser::new();
/// let frame = b"*2\r\n$12\r\nqueryStudent\r\n$2\r\ns1\r\n";
///
/// let (invocation, consumed) = parser.parse(frame).unwrap().unwrap();
/// assert_eq!(invocation.function, "queryStudent");
/// assert_eq!(invocation.args, vec!["s1".to_string()]);
/// assert_eq!(consumed, frame.len());
/// ```
#[derive(Debug, Clone, Copy)]
pub struct InvocationParser {
    max_arg_size: usize,
    max_args: usize,
}

impl Default for InvocationParser {
    fn default() -> Self {
        Self::new()
    }
}

impl InvocationParser {
    pub fn new() -> Self {
        Self {
            max_arg_size: MAX_ARG_SIZE,
            max_args: MAX_ARGS,
        }
    }

    /// Overrides the per-argument size limit.
    pub fn with_max_arg_size(mut self, max: usize) -> Self {
        self.max_arg_size = max;
        self
    }

    /// Attempts to decode one invocation from the front of `buf`.
    pub fn parse(&self, buf: &[u8]) -> ParseResult<Option<(Invocation, usize)>> {
        if buf.is_empty() {
            return Ok(None);
        }
        if buf[0] != prefix::ARRAY {
            return Err(ParseError::ExpectedArray(buf[0]));
        }

        let (count, mut consumed) = match read_header(buf)? {
            Some(header) => header,
            None => return Ok(None),
        };
        if count < 0 {
            return Err(ParseError::InvalidArrayLength(count));
        }
        if count == 0 {
            return Err(ParseError::EmptyInvocation);
        }
        let count = count as usize;
        if count > self.max_args {
            return Err(ParseError::MessageTooLarge {
                size: count,
                max: self.max_args,
            });
        }

        let mut parts = Vec::with_capacity(count);
        for _ in 0..count {
            match self.parse_bulk(&buf[consumed..])? {
                Some((part, used)) => {
                    parts.push(part);
                    consumed += used;
                }
                None => return Ok(None),
            }
        }

        let mut parts = parts.into_iter();
        let function = parts.next().ok_or(ParseError::EmptyInvocation)?;
        Ok(Some((Invocation::new(function, parts.collect()), consumed)))
    }

    /// Parses a bulk string: `$<length>\r\n<data>\r\n`
    fn parse_bulk(&self, buf: &[u8]) -> ParseResult<Option<(String, usize)>> {
        if buf.is_empty() {
            return Ok(None);
        }
        if buf[0] != prefix::BULK_STRING {
            return Err(ParseError::ExpectedBulkString(buf[0]));
        }

        let (length, data_start) = match read_header(buf)? {
            Some(header) => header,
            None => return Ok(None),
        };
        if length < 0 {
            return Err(ParseError::InvalidBulkLength(length));
        }
        let length = length as usize;
        if length > self.max_arg_size {
            return Err(ParseError::MessageTooLarge {
                size: length,
                max: self.max_arg_size,
            });
        }

        let total = data_start + length + CRLF.len();
        if buf.len() < total {
            return Ok(None);
        }
        if &buf[data_start + length..total] != CRLF {
            return Err(ParseError::ProtocolError(
                "bulk string missing trailing CRLF".to_string(),
            ));
        }

        let data = std::str::from_utf8(&buf[data_start..data_start + length])
            .map_err(|e| ParseError::InvalidUtf8(e.to_string()))?;
        Ok(Some((data.to_string(), total)))
    }
}

/// Reads `<prefix><integer>\r\n`, returning the integer and bytes consumed.
fn read_header(buf: &[u8]) -> ParseResult<Option<(i64, usize)>> {
    let end = match find_crlf(&buf[1..]) {
        Some(pos) => pos,
        None => return Ok(None),
    };

    let text = std::str::from_utf8(&buf[1..1 + end])
        .map_err(|e| ParseError::InvalidUtf8(e.to_string()))?;
    let n: i64 = text
        .parse()
        .map_err(|e: ParseIntError| ParseError::InvalidInteger(e.to_string()))?;

    Ok(Some((n, 1 + end + CRLF.len())))
}

fn find_crlf(buf: &[u8]) -> Option<usize> {
    buf.windows(2).position(|w| w == CRLF)
}

/// Convenience wrapper around a default parser.
pub fn parse_invocation(buf: &[u8]) -> ParseResult<Option<(Invocation, usize)>> {
    InvocationParser::new().parse(buf)
}
