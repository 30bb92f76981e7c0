//! Selector-specific error types
//!
//! Rendering the selector never fails on account of the tag data itself:
//! empty taxonomies and unknown selection values degrade gracefully. The only
//! failures are read-port failures, including an uncategorized tag whose
//! owning group cannot be resolved, which signals broken referential
//! integrity upstream and is surfaced rather than masked.

use thiserror::Error;

/// Selector-specific errors
#[derive(Debug, Error)]
pub enum FacetError {
    /// The backing store failed or a referenced record is missing
    #[error("Database error: {0}")]
    DatabaseError(#[from] crate::db::DbError),

    /// A read port could not resolve a lookup
    #[error("Lookup failed: {0}")]
    LookupError(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{DbError, TagId};
    use std::error::Error;

    #[test]
    fn test_database_error_wraps_source() {
        let error: FacetError = DbError::not_found(TagId::new(4)).into();
        assert_eq!(error.to_string(), "Database error: tag 4 not found");
        assert!(error.source().is_some());
    }

    #[test]
    fn test_lookup_error_display() {
        let error = FacetError::LookupError("no group for tag 9".into());
        assert_eq!(error.to_string(), "Lookup failed: no group for tag 9");
    }
}
