//! Contract Module
//!
//! The state-transition logic for Student records. The contract receives
//! parsed invocations, runs them against a world state supplied by the
//! host, and returns a `Response`.
//!
//! ```text
//! Invocation (function, args)
//!       │
//!       ▼
//! ┌─────────────────┐
//! │ StudentContract │  (this module)
//! │                 │
//! │  - Dispatch     │
//! │  - Validate     │
//! │  - Execute      │
//! └────────┬────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │   WorldState    │  (ledger module)
//! └─────────────────┘
//! ```

pub mod args;
pub mod error;
pub mod handler;
pub mod record;

pub use args::Function;
pub use error::{ContractError, ContractResult};
pub use handler::StudentContract;
pub use record::Student;
