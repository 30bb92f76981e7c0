//! Type wrappers for database keys
//!
//! Every record tree in the store is keyed by a numeric id. The ids are
//! distinct newtypes so a tag id can never be used to look up a category,
//! and they all encode to big-endian bytes so sled iterates each tree in
//! ascending id order.
//!
//! # Examples
//!
//! ```
//! use ideaboard::db::types::{RecordKey, TagId};
//!
//! let id = TagId::new(7);
//! let key = id.to_key();
//! assert_eq!(TagId::from_key(&key).unwrap(), id);
//! assert_eq!("7".parse::<TagId>().unwrap(), id);
//! ```

use super::error::DbError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

/// Conversion between an id and its sled key representation
pub trait RecordKey: Sized + Copy {
    /// Human-readable record kind, used in error messages
    const KIND: &'static str;

    /// Raw numeric value of the id
    fn get(self) -> u64;

    /// Build an id from its raw numeric value
    fn from_raw(raw: u64) -> Self;

    /// Big-endian key bytes
    fn to_key(self) -> [u8; 8] {
        self.get().to_be_bytes()
    }

    /// # Errors
    ///
    /// Returns `DbError::SerializeError` if the key is not exactly eight bytes.
    fn from_key(bytes: &[u8]) -> Result<Self, DbError> {
        let raw: [u8; 8] = bytes.try_into().map_err(|_| {
            DbError::SerializeError(format!(
                "{} key has {} bytes, expected 8",
                Self::KIND,
                bytes.len()
            ))
        })?;
        Ok(Self::from_raw(u64::from_be_bytes(raw)))
    }
}

macro_rules! record_id {
    ($(#[$meta:meta])* $name:ident, $kind:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(u64);

        impl $name {
            #[must_use]
            pub const fn new(raw: u64) -> Self {
                Self(raw)
            }
        }

        impl RecordKey for $name {
            const KIND: &'static str = $kind;

            fn get(self) -> u64 {
                self.0
            }

            fn from_raw(raw: u64) -> Self {
                Self(raw)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = ParseIntError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                s.trim().parse().map(Self)
            }
        }
    };
}

record_id!(
    /// Id of an entry group
    GroupId,
    "group"
);
record_id!(
    /// Id of a category (facet)
    CategoryId,
    "category"
);
record_id!(
    /// Id of a tag
    TagId,
    "tag"
);
record_id!(
    /// Id of an entry
    EntryId,
    "entry"
);

#[cfg(test)]
#[path = "types_tests.rs"]
mod types_tests;
