//! Protocol Module
//!
//! The types that cross the contract boundary and the framing the
//! development peer uses to carry them over TCP.
//!
//! ## Modules
//!
//! - `types`: `Invocation`, `Response` and response encoding
//! - `parser`: incremental decoder for request frames
//!
//! ## Example
//!
//! ```
//! use studentcc::protocol::{parse_invocation, Invocation, Response};
//!
//! let frame = Invocation::from_strs("queryStudent", &["s1"]).serialize();
//! let (invocation, _) = parse_invocation(&frame).unwrap().unwrap();
//! assert_eq!(invocation.function, "queryStudent");
//!
//! assert_eq!(Response::error("Student not found").serialize(), b"-Student not found\r\n");
//! ```

pub mod parser;
pub mod types;

pub use parser::{parse_invocation, InvocationParser, ParseError, ParseResult};
pub use types::{Invocation, Response, STATUS_ERROR, STATUS_OK};
