//! Connection Module
//!
//! Client connections to the development peer. Each accepted socket gets
//! its own task that decodes request frames and answers them in order.
//!
//! ## Example
//!
//! ```ignore
//! use studentcc::connection::{handle_connection, ConnectionStats};
//! use studentcc::ledger::Peer;
//! use std::sync::Arc;
//!
//! let peer = Arc::new(Peer::default());
//! let stats = Arc::new(ConnectionStats::new());
//!
//! let (stream, addr) = listener.accept().await?;
//! tokio::spawn(handle_connection(stream, addr, Arc::clone(&peer), Arc::clone(&stats)));
//! ```

pub mod handler;

pub use handler::{handle_connection, ConnectionError, ConnectionHandler, ConnectionStats};
