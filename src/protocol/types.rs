//! Invocation and Response Types
//!
//! An `Invocation` is what the ledger delivers: a function name and its
//! positional string arguments. A `Response` is what the contract hands back.
//!
//! ## Wire Format
//!
//! The development peer frames both with a subset of RESP:
//!
//! ```text
//! request   *2\r\n$12\r\nqueryStudent\r\n$2\r\ns1\r\n      (array of bulk strings)
//! success   +OK\r\n                                          (empty payload)
//! success   $<len>\r\n{"id":"s1",...}\r\n                    (payload)
//! error     -Student not found\r\n
//! ```

use bytes::Bytes;
use std::fmt;

/// The CRLF terminator
pub const CRLF: &[u8] = b"\r\n";

/// Type prefix bytes used by the framing
pub mod prefix {
    pub const SIMPLE_STRING: u8 = b'+';
    pub const ERROR: u8 = b'-';
    pub const BULK_STRING: u8 = b'$';
    pub const ARRAY: u8 = b'*';
}

/// Status code the ledger attaches to a successful response
pub const STATUS_OK: u16 = 200;

/// Status code the ledger attaches to an error response
pub const STATUS_ERROR: u16 = 500;

/// A single request from the ledger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub function: String,
    pub args: Vec<String>,
}

impl Invocation {
    pub fn new(function: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            function: function.into(),
            args,
        }
    }

    /// Builds an invocation from string slices.
    ///
    /// ```
    /// use studentcc::protocol::Invocation;
    /// let inv = Invocation::from_strs("queryStudent", &["s1"]);
    /// assert_eq!(inv.args, vec!["s1".to_string()]);
    /// ```
    pub fn from_strs(function: &str, args: &[&str]) -> Self {
        Self::new(function, args.iter().map(|s| s.to_string()).collect())
    }

    /// Encodes the invocation as a request frame.
    pub fn serialize(&self) -> Vec<u8> {
        let mut buf = Vec::new();
        buf.push(prefix::ARRAY);
        buf.extend_from_slice((self.args.len() + 1).to_string().as_bytes());
        buf.extend_from_slice(CRLF);
        for part in std::iter::once(&self.function).chain(&self.args) {
            write_bulk(&mut buf, part.as_bytes());
        }
        buf
    }
}

/// The outcome of an invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Response {
    /// The invocation succeeded. The payload may be empty.
    Success(Bytes),
    /// The invocation failed with a human-readable message.
    Error(String),
}

impl Response {
    /// A success with no payload.
    pub fn success() -> Self {
        Response::Success(Bytes::new())
    }

    /// A success carrying `payload`.
    pub fn payload(payload: impl Into<Bytes>) -> Self {
        Response::Success(payload.into())
    }

    pub fn error(message: impl Into<String>) -> Self {
        Response::Error(message.into())
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Response::Success(_))
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Response::Error(_))
    }

    /// The ledger status code for this response.
    pub fn status(&self) -> u16 {
        match self {
            Response::Success(_) => STATUS_OK,
            Response::Error(_) => STATUS_ERROR,
        }
    }

    /// The success payload, if any.
    pub fn as_payload(&self) -> Option<&Bytes> {
        match self {
            Response::Success(payload) => Some(payload),
            Response::Error(_) => None,
        }
    }

    /// The error message, if any.
    pub fn as_message(&self) -> Option<&str> {
        match self {
            Response::Success(_) => None,
            Response::Error(message) => Some(message),
        }
    }

    /// Encodes the response for the wire.
    pub fn serialize(&self) -> Vec<u8> {
        let mut buf = Vec::new();
        self.serialize_into(&mut buf);
        buf
    }

    /// Encodes the response into an existing buffer.
    pub fn serialize_into(&self, buf: &mut Vec<u8>) {
        match self {
            Response::Success(payload) if payload.is_empty() => {
                buf.push(prefix::SIMPLE_STRING);
                buf.extend_from_slice(b"OK");
                buf.extend_from_slice(CRLF);
            }
            Response::Success(payload) => write_bulk(buf, payload),
            Response::Error(message) => {
                buf.push(prefix::ERROR);
                // A bare CR or LF would end the frame early
                for b in message.bytes() {
                    buf.push(if b == b'\r' || b == b'\n' { b' ' } else { b });
                }
                buf.extend_from_slice(CRLF);
            }
        }
    }
}

fn write_bulk(buf: &mut Vec<u8>, data: &[u8]) {
    buf.push(prefix::BULK_STRING);
    buf.extend_from_slice(data.len().to_string().as_bytes());
    buf.extend_from_slice(CRLF);
    buf.extend_from_slice(data);
    buf.extend_from_slice(CRLF);
}

impl fmt::Display for Response {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Response::Success(payload) if payload.is_empty() => write!(f, "(ok)"),
            Response::Success(payload) => match std::str::from_utf8(payload) {
                Ok(s) => write!(f, "{}", s),
                Err(_) => write!(f, "(binary data, {} bytes)", payload.len()),
            },
            Response::Error(message) => write!(f, "(error) {}", message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_success_serialize() {
        assert_eq!(Response::success().serialize(), b"+OK\r\n");
    }

    #[test]
    fn test_payload_serialize() {
        let response = Response::payload(Bytes::from("hello"));
        assert_eq!(response.serialize(), b"$5\r\nhello\r\n");
    }

    #[test]
    fn test_error_serialize() {
        let response = Response::error("Student not found");
        assert_eq!(response.serialize(), b"-Student not found\r\n");

        let response = Response::error("line one\r\nline two");
        assert_eq!(response.serialize(), b"-line one  line two\r\n");
    }

    #[test]
    fn test_status() {
        assert_eq!(Response::success().status(), 200);
        assert_eq!(Response::error("nope").status(), 500);
        assert!(Response::success().is_success());
        assert_eq!(Response::error("nope").as_message(), Some("nope"));
        assert_eq!(Response::error("nope").as_payload(), None);
    }

    #[test]
    fn test_invocation_serialize() {
        let inv = Invocation::from_strs("queryStudent", &["s1"]);
        assert_eq!(
            inv.serialize(),
            b"*2\r\n$12\r\nqueryStudent\r\n$2\r\ns1\r\n"
        );
    }

    #[test]
    fn test_display() {
        assert_eq!(Response::success().to_string(), "(ok)");
        assert_eq!(Response::payload("{}").to_string(), "{}");
        assert_eq!(Response::error("bad").to_string(), "(error) bad");
    }
}
