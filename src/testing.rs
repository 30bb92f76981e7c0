//! Testing utilities for ideaboard
//!
//! This module provides a `TestDb` wrapper for temporary database management
//! plus shorthand builders for board fixtures.
//!
//! Only available when compiled with `cfg(test)`.

use crate::db::{CategoryId, Database, EntryId, GroupId, TagId};
use crate::models::{NewCategory, NewEntry, NewGroup, NewTag};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Wrapper for a temporary test database that cleans up on drop
///
/// The database lives in its own temporary directory, which is removed
/// when the wrapper goes out of scope, so tests never share state.
pub struct TestDb {
    // Field order matters: the database must close before the directory goes.
    db: Database,
    path: PathBuf,
    _dir: TempDir,
}

impl TestDb {
    /// Create an empty database in a fresh temporary directory
    ///
    /// # Panics
    /// Panics if the directory or database cannot be created.
    #[must_use]
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("board");
        let db = Database::open(&path).expect("Failed to open test database");
        Self { db, path, _dir: dir }
    }

    /// Get a reference to the underlying database
    #[must_use]
    pub const fn db(&self) -> &Database {
        &self.db
    }

    /// Get the path to the test database
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Create a group whose title and short title are both `short_title`
    ///
    /// # Panics
    /// Panics if the group cannot be stored.
    pub fn group(&self, short_title: &str) -> GroupId {
        self.db
            .create_group(NewGroup {
                title: short_title.to_string(),
                short_title: short_title.to_string(),
                ..NewGroup::default()
            })
            .expect("Failed to create group")
            .id
    }

    /// Create a category in `group`
    ///
    /// # Panics
    /// Panics if the category cannot be stored.
    pub fn category(&self, group: GroupId, name: &str) -> CategoryId {
        self.db
            .create_category(NewCategory { group, name: name.to_string(), description: String::new() })
            .expect("Failed to create category")
            .id
    }

    /// Create a tag in `group`, optionally under `category`
    ///
    /// # Panics
    /// Panics if the tag cannot be stored.
    pub fn tag(&self, group: GroupId, name: &str, category: Option<CategoryId>) -> TagId {
        self.db
            .create_tag(NewTag { group, name: name.to_string(), category })
            .expect("Failed to create tag")
            .id
    }

    /// Create an entry in `group` carrying `tags`
    ///
    /// # Panics
    /// Panics if the entry cannot be stored.
    pub fn entry(&self, group: GroupId, title: &str, tags: &[TagId]) -> EntryId {
        self.db
            .create_entry(NewEntry {
                group,
                title: title.to_string(),
                body: String::new(),
                tags: tags.to_vec(),
            })
            .expect("Failed to create entry")
            .id
    }
}

impl Default for TestDb {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_testdb_cleanup() {
        let dir_path = {
            let test_db = TestDb::new();
            test_db.group("Shop");
            assert!(test_db.path().exists());
            test_db.path().parent().map(Path::to_path_buf)
        };
        if let Some(dir) = dir_path {
            assert!(!dir.exists());
        }
    }

    #[test]
    fn test_fixture_builders() {
        let test_db = TestDb::new();
        let group = test_db.group("Shop");
        let tools = test_db.category(group, "Tools");
        let saw = test_db.tag(group, "saw", Some(tools));
        let entry = test_db.entry(group, "Bench", &[saw]);

        let stored = test_db.db().require_entry(entry).unwrap();
        assert_eq!(stored.tags, vec![saw]);
        assert_eq!(test_db.db().require_tag(saw).unwrap().category, Some(tools));
    }

    #[test]
    fn test_databases_are_isolated() {
        let a = TestDb::new();
        let b = TestDb::new();
        a.group("Shop");
        assert_eq!(a.db().list_groups().unwrap().len(), 1);
        assert!(b.db().list_groups().unwrap().is_empty());
    }
}
