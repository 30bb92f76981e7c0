//! Unit tests for database error types

#[cfg(test)]
mod tests {
    use crate::db::error::DbError;
    use crate::db::types::{CategoryId, TagId};
    use std::error::Error;

    #[test]
    fn test_not_found_error() {
        let error = DbError::not_found(TagId::new(3));
        assert_eq!(error.to_string(), "tag 3 not found");
    }

    #[test]
    fn test_not_found_carries_kind() {
        match DbError::not_found(CategoryId::new(8)) {
            DbError::NotFound { kind, id } => {
                assert_eq!(kind, "category");
                assert_eq!(id, 8);
            }
            other => panic!("Expected NotFound variant, got {other:?}"),
        }
    }

    #[test]
    fn test_serialize_error() {
        let error = DbError::SerializeError("bad key".to_string());
        assert_eq!(error.to_string(), "Error during serialization: bad key");
    }

    #[test]
    fn test_invalid_input_display() {
        let error = DbError::InvalidInput("Oops, your idea needs a title.".to_string());
        let display = format!("{error}");
        assert!(display.starts_with("Invalid input"));
        assert!(display.contains("needs a title"));
    }

    #[test]
    fn test_error_source() {
        let error = DbError::not_found(TagId::new(1));
        assert!(error.source().is_none());
    }

    #[test]
    fn test_error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<DbError>();
    }
}
