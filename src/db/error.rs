//! Database-specific error types
//!
//! This module defines all error types that can occur during store operations.
//!
//! # Error Types
//!
//! - **`SledError`**: Errors from the underlying sled embedded database
//! - **`DecodeError`** / **`EncodeError`**: bincode failures on record values
//! - **`SerializeError`**: Malformed keys or other representation problems
//! - **`NotFound`**: A referenced record does not exist
//! - **`InvalidInput`**: A record failed validation before being written
//!
//! All errors implement `std::error::Error` via the `thiserror` crate.

use thiserror::Error;

/// Database-specific errors
#[derive(Debug, Error)]
pub enum DbError {
    /// Represents a sled database error
    #[error("Database error: {0}")]
    SledError(#[from] sled::Error),

    /// Represents a bincode decoding error
    #[error("Error while decoding data: {0}")]
    DecodeError(#[from] bincode::error::DecodeError),

    /// Represents a bincode encoding error
    #[error("Error while encoding data: {0}")]
    EncodeError(#[from] bincode::error::EncodeError),

    /// Generic serialization/deserialization error
    #[error("Error during serialization: {0}")]
    SerializeError(String),

    /// A record referenced by id does not exist
    #[error("{kind} {id} not found")]
    NotFound {
        /// Record kind ("group", "category", "tag", "entry")
        kind: &'static str,
        /// Raw id that was looked up
        id: u64,
    },

    /// Invalid input provided (e.g., a blank title)
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl DbError {
    /// Build a `NotFound` error for any record id
    pub fn not_found<K: super::types::RecordKey>(id: K) -> Self {
        Self::NotFound { kind: K::KIND, id: id.get() }
    }
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod error_tests;
