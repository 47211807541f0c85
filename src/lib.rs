//! # studentcc - Student Record Chaincode
//!
//! A state-transition handler for a single record type, `Student`, on a
//! permissioned ledger. Given a function name and positional string
//! arguments, the contract creates, queries, updates or deletes one record
//! in a key-value world state owned by the host.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Development Peer (binary)                       │
//! │                                                                         │
//! │  ┌─────────────┐    ┌─────────────┐    ┌──────────────────────────┐     │
//! │  │ TCP Server  │───>│ Connection  │───>│ Peer                     │     │
//! │  │ (Listener)  │    │  Handler    │    │  Transaction per request │     │
//! │  └─────────────┘    └─────────────┘    └────────────┬─────────────┘     │
//! │                                                     │                   │
//! │                                                     ▼                   │
//! │  ┌─────────────┐                        ┌──────────────────────────┐    │
//! │  │ Invocation  │                        │ StudentContract          │    │
//! │  │   Parser    │                        │  dispatch -> handler     │    │
//! │  └─────────────┘                        └────────────┬─────────────┘    │
//! │                                                      │ &mut dyn         │
//! │                                                      ▼ WorldState       │
//! │                                         ┌──────────────────────────┐    │
//! │                                         │ MemoryWorldState         │    │
//! │                                         └──────────────────────────┘    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```
//! use studentcc::{MemoryWorldState, Response, StudentContract};
//!
//! let contract = StudentContract::new();
//! let mut state = MemoryWorldState::new();
//!
//! let create = ["s1", "Alice", "21", "CS"].map(String::from);
//! assert_eq!(contract.invoke(&mut state, "createStudent", &create), Response::success());
//!
//! let query = ["s1".to_string()];
//! let response = contract.invoke(&mut state, "queryStudent", &query);
//! assert_eq!(
//!     &response.as_payload().unwrap()[..],
//!     br#"{"id":"s1","name":"Alice","age":21,"major":"CS"}"#
//! );
//! ```
//!
//! ## Functions
//!
//! | Function        | Arguments              | Success payload |
//! |-----------------|------------------------|-----------------|
//! | `createStudent` | id, name, age, major   | empty           |
//! | `queryStudent`  | id                     | stored record   |
//! | `updateStudent` | id, name, age, major   | empty           |
//! | `deleteStudent` | id                     | empty           |
//!
//! `createStudent` overwrites an existing record with the same id.
//! `updateStudent` and `deleteStudent` fail with `Student not found` when the
//! id is absent.
//!
//! ## Module Overview
//!
//! - [`contract`]: dispatcher, argument parsing, handlers and the record type
//! - [`ledger`]: world-state trait, in-memory state, transactions, the peer
//! - [`protocol`]: invocation/response types and request framing
//! - [`connection`]: client connection handling for the peer
//! - [`config`]: command-line configuration

pub mod config;
pub mod connection;
pub mod contract;
pub mod ledger;
pub mod protocol;

pub use config::Config;
pub use connection::{handle_connection, ConnectionStats};
pub use contract::{ContractError, Function, Student, StudentContract};
pub use ledger::{MemoryWorldState, Peer, StateError, WorldState};
pub use protocol::{Invocation, InvocationParser, ParseError, Response};

/// Version of studentcc
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
