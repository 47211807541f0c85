//! The Student record and its stored form.
//!
//! Records are stored as compact JSON with the fields in declaration order:
//!
//! ```text
//! {"id":"s1","name":"Alice","age":21,"major":"CS"}
//! ```

use crate::contract::error::ContractResult;
use bytes::Bytes;
use serde::{Deserialize, Serialize};

/// A student, keyed in world state by `id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Student {
    pub id: String,
    pub name: String,
    pub age: i64,
    pub major: String,
}

impl Student {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        age: i64,
        major: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            age,
            major: major.into(),
        }
    }

    /// The world-state key for this record.
    pub fn key(&self) -> &str {
        &self.id
    }

    /// Encodes the record for storage.
    pub fn to_bytes(&self) -> ContractResult<Bytes> {
        Ok(Bytes::from(serde_json::to_vec(self)?))
    }

    /// Decodes a stored record.
    pub fn from_bytes(data: &[u8]) -> ContractResult<Self> {
        Ok(serde_json::from_slice(data)?)
    }
}
