//! Database wrapper module for ideaboard
//!
//! Provides a clean API for storing and retrieving board records using sled
//! as the embedded database backend.
//!
//! Uses one sled tree per record kind, each keyed by big-endian id so that
//! iteration follows id order:
//! - `groups`: entry groups (board tabs)
//! - `categories`: facets grouping tags
//! - `tags`: tags with their optional category
//! - `entries`: ideas with their tag ids
//!
//! Deletes cascade: a group takes its categories, tags and entries with it,
//! a category takes its tags, and a deleted tag is detached from every entry
//! that carried it.

use crate::models::{Category, Entry, EntryGroup, NewCategory, NewEntry, NewGroup, NewTag, Tag};
use chrono::Utc;
use serde::Serialize;
use serde::de::DeserializeOwned;
use sled::{Db, Tree};
use std::collections::{HashMap, HashSet};
use std::path::Path;
use tracing::{debug, warn};

pub mod error;
pub mod types;

pub use error::DbError;
pub use types::{CategoryId, EntryId, GroupId, RecordKey, TagId};

/// A value stored in one of the record trees
trait Record: Serialize + DeserializeOwned {
    type Id: RecordKey;

    fn key(&self) -> Self::Id;

    fn tree(db: &Database) -> &Tree;
}

impl Record for EntryGroup {
    type Id = GroupId;

    fn key(&self) -> GroupId {
        self.id
    }

    fn tree(db: &Database) -> &Tree {
        &db.groups
    }
}

impl Record for Category {
    type Id = CategoryId;

    fn key(&self) -> CategoryId {
        self.id
    }

    fn tree(db: &Database) -> &Tree {
        &db.categories
    }
}

impl Record for Tag {
    type Id = TagId;

    fn key(&self) -> TagId {
        self.id
    }

    fn tree(db: &Database) -> &Tree {
        &db.tags
    }
}

impl Record for Entry {
    type Id = EntryId;

    fn key(&self) -> EntryId {
        self.id
    }

    fn tree(db: &Database) -> &Tree {
        &db.entries
    }
}

/// Reject blank required text, trimming what is kept
fn required(value: &str, message: &str) -> Result<String, DbError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Err(DbError::InvalidInput(message.to_string()))
    } else {
        Ok(trimmed.to_string())
    }
}

/// Database wrapper that encapsulates all database operations
pub struct Database {
    db: Db,
    groups: Tree,
    categories: Tree,
    tags: Tree,
    entries: Tree,
}

impl Database {
    /// Opens or creates a database at the specified path
    ///
    /// # Examples
    /// ```no_run
    /// use ideaboard::db::Database;
    /// let db = Database::open("my_board").unwrap();
    /// ```
    ///
    /// # Errors
    ///
    /// Returns `DbError` if the database cannot be opened or if the internal trees cannot be created.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, DbError> {
        let db = sled::open(path)?;
        let groups = db.open_tree("groups")?;
        let categories = db.open_tree("categories")?;
        let tags = db.open_tree("tags")?;
        let entries = db.open_tree("entries")?;
        Ok(Self { db, groups, categories, tags, entries })
    }

    fn tree<R: Record>(&self) -> &Tree {
        R::tree(self)
    }

    fn next_id<K: RecordKey>(&self) -> Result<K, DbError> {
        // sled ids start at zero; board ids start at one
        Ok(K::from_raw(self.db.generate_id()? + 1))
    }

    fn put<R: Record>(&self, record: &R) -> Result<(), DbError> {
        let value = bincode::serde::encode_to_vec(record, bincode::config::standard())?;
        self.tree::<R>().insert(record.key().to_key(), value)?;
        Ok(())
    }

    fn fetch<R: Record>(&self, id: R::Id) -> Result<Option<R>, DbError> {
        match self.tree::<R>().get(id.to_key())? {
            Some(value) => {
                let (record, _): (R, usize) =
                    bincode::serde::decode_from_slice(&value, bincode::config::standard())?;
                Ok(Some(record))
            }
            None => Ok(None),
        }
    }

    fn require<R: Record>(&self, id: R::Id) -> Result<R, DbError> {
        self.fetch::<R>(id)?.ok_or_else(|| DbError::not_found(id))
    }

    fn scan<R: Record>(&self) -> Result<Vec<R>, DbError> {
        let mut records = Vec::new();
        for result in self.tree::<R>() {
            let (_, value) = result?;
            let (record, _): (R, usize) =
                bincode::serde::decode_from_slice(&value, bincode::config::standard())?;
            records.push(record);
        }
        Ok(records)
    }

    fn erase<R: Record>(&self, id: R::Id) -> Result<bool, DbError> {
        Ok(self.tree::<R>().remove(id.to_key())?.is_some())
    }

    // Groups

    /// Create a new entry group
    ///
    /// # Errors
    ///
    /// Returns `DbError::InvalidInput` if the title or short title is blank,
    /// or another `DbError` if the write fails.
    pub fn create_group(&self, draft: NewGroup) -> Result<EntryGroup, DbError> {
        let group = EntryGroup {
            id: self.next_id()?,
            title: required(&draft.title, "Oops, your group needs a title.")?,
            short_title: required(
                &draft.short_title,
                "Oops, your group needs a short title to display on the tab.",
            )?,
            description: draft.description,
            public: draft.public,
            date_modified: Utc::now(),
        };
        self.put(&group)?;
        debug!(group = %group.id, short_title = %group.short_title, "created group");
        Ok(group)
    }

    /// Get a group by id
    ///
    /// # Errors
    ///
    /// Returns `DbError` if the read or decoding fails.
    pub fn get_group(&self, id: GroupId) -> Result<Option<EntryGroup>, DbError> {
        self.fetch(id)
    }

    /// Get a group by id, failing if it does not exist
    ///
    /// # Errors
    ///
    /// Returns `DbError::NotFound` if there is no such group.
    pub fn require_group(&self, id: GroupId) -> Result<EntryGroup, DbError> {
        self.require(id)
    }

    /// All groups in id order
    ///
    /// # Errors
    ///
    /// Returns `DbError` if iteration or decoding fails.
    pub fn list_groups(&self) -> Result<Vec<EntryGroup>, DbError> {
        self.scan()
    }

    /// Overwrite an existing group, refreshing its modification date
    ///
    /// # Errors
    ///
    /// Returns `DbError::NotFound` if the group does not exist, or
    /// `DbError::InvalidInput` if a required field is blank.
    pub fn update_group(&self, group: &EntryGroup) -> Result<EntryGroup, DbError> {
        self.require::<EntryGroup>(group.id)?;
        let updated = EntryGroup {
            title: required(&group.title, "Oops, your group needs a title.")?,
            short_title: required(
                &group.short_title,
                "Oops, your group needs a short title to display on the tab.",
            )?,
            date_modified: Utc::now(),
            ..group.clone()
        };
        self.put(&updated)?;
        Ok(updated)
    }

    /// Delete a group together with its categories, tags and entries
    ///
    /// Returns `false` if the group did not exist.
    ///
    /// # Errors
    ///
    /// Returns `DbError` if any of the cascading deletes fail.
    pub fn delete_group(&self, id: GroupId) -> Result<bool, DbError> {
        if self.get_group(id)?.is_none() {
            return Ok(false);
        }

        for entry in self.list_entries(Some(id))? {
            self.erase::<Entry>(entry.id)?;
        }
        for category in self.list_categories(Some(id))? {
            self.delete_category(category.id)?;
        }
        for tag in self.list_tags(Some(id))? {
            self.delete_tag(tag.id)?;
        }

        let removed = self.erase::<EntryGroup>(id)?;
        debug!(group = %id, "deleted group");
        Ok(removed)
    }

    // Categories

    /// Create a category inside a group
    ///
    /// # Errors
    ///
    /// Returns `DbError::NotFound` if the group does not exist, or
    /// `DbError::InvalidInput` if the name is blank.
    pub fn create_category(&self, draft: NewCategory) -> Result<Category, DbError> {
        self.require::<EntryGroup>(draft.group)?;
        let category = Category {
            id: self.next_id()?,
            group: draft.group,
            name: required(&draft.name, "Oops, your category needs a name.")?,
            description: draft.description,
        };
        self.put(&category)?;
        debug!(category = %category.id, name = %category.name, "created category");
        Ok(category)
    }

    /// Get a category by id
    ///
    /// # Errors
    ///
    /// Returns `DbError` if the read or decoding fails.
    pub fn get_category(&self, id: CategoryId) -> Result<Option<Category>, DbError> {
        self.fetch(id)
    }

    /// Get a category by id, failing if it does not exist
    ///
    /// # Errors
    ///
    /// Returns `DbError::NotFound` if there is no such category.
    pub fn require_category(&self, id: CategoryId) -> Result<Category, DbError> {
        self.require(id)
    }

    /// Categories in id order, optionally restricted to one group
    ///
    /// # Errors
    ///
    /// Returns `DbError` if iteration or decoding fails.
    pub fn list_categories(&self, group: Option<GroupId>) -> Result<Vec<Category>, DbError> {
        let mut categories: Vec<Category> = self.scan()?;
        if let Some(group) = group {
            categories.retain(|c| c.group == group);
        }
        Ok(categories)
    }

    /// Overwrite an existing category
    ///
    /// # Errors
    ///
    /// Returns `DbError::NotFound` if the category does not exist, or
    /// `DbError::InvalidInput` if the name is blank.
    pub fn update_category(&self, category: &Category) -> Result<Category, DbError> {
        self.require::<Category>(category.id)?;
        let updated = Category {
            name: required(&category.name, "Oops, your category needs a name.")?,
            ..category.clone()
        };
        self.put(&updated)?;
        Ok(updated)
    }

    /// Delete a category and every tag filed under it
    ///
    /// # Errors
    ///
    /// Returns `DbError` if any of the cascading deletes fail.
    pub fn delete_category(&self, id: CategoryId) -> Result<bool, DbError> {
        let tags: Vec<Tag> = self.scan()?;
        for tag in tags.iter().filter(|t| t.category == Some(id)) {
            self.delete_tag(tag.id)?;
        }
        let removed = self.erase::<Category>(id)?;
        debug!(category = %id, removed, "deleted category");
        Ok(removed)
    }

    /// Number of tags filed under each category, optionally counting only
    /// the tags of one group
    ///
    /// Categories without tags are absent from the map.
    ///
    /// # Errors
    ///
    /// Returns `DbError` if iteration or decoding fails.
    pub fn category_tag_counts(&self, group: Option<GroupId>) -> Result<HashMap<CategoryId, usize>, DbError> {
        let mut counts = HashMap::new();
        for tag in self.scan::<Tag>()? {
            if group.is_some_and(|group| tag.group != group) {
                continue;
            }
            if let Some(category) = tag.category {
                *counts.entry(category).or_insert(0) += 1;
            }
        }
        Ok(counts)
    }

    /// Check that `category` exists and belongs to `group`
    fn require_category_in(&self, category: CategoryId, group: GroupId) -> Result<Category, DbError> {
        let category = self.require::<Category>(category)?;
        if category.group != group {
            return Err(DbError::InvalidInput(format!(
                "Category {} belongs to group {}, not group {group}.",
                category.id, category.group
            )));
        }
        Ok(category)
    }

    // Tags

    /// Create a tag, optionally filed under a category
    ///
    /// # Errors
    ///
    /// Returns `DbError::NotFound` if the group or category does not exist,
    /// or `DbError::InvalidInput` if the name is blank or the category
    /// belongs to another group.
    pub fn create_tag(&self, draft: NewTag) -> Result<Tag, DbError> {
        self.require::<EntryGroup>(draft.group)?;
        if let Some(category) = draft.category {
            self.require_category_in(category, draft.group)?;
        }
        let tag = Tag {
            id: self.next_id()?,
            group: draft.group,
            name: required(&draft.name, "Oops, your tag needs a name.")?,
            category: draft.category,
        };
        self.put(&tag)?;
        debug!(tag = %tag.id, name = %tag.name, "created tag");
        Ok(tag)
    }

    /// Get a tag by id
    ///
    /// # Errors
    ///
    /// Returns `DbError` if the read or decoding fails.
    pub fn get_tag(&self, id: TagId) -> Result<Option<Tag>, DbError> {
        self.fetch(id)
    }

    /// Get a tag by id, failing if it does not exist
    ///
    /// # Errors
    ///
    /// Returns `DbError::NotFound` if there is no such tag.
    pub fn require_tag(&self, id: TagId) -> Result<Tag, DbError> {
        self.require(id)
    }

    /// Tags in selection order (uncategorized first, then by category, then name)
    ///
    /// # Errors
    ///
    /// Returns `DbError` if iteration or decoding fails.
    pub fn list_tags(&self, group: Option<GroupId>) -> Result<Vec<Tag>, DbError> {
        let mut tags: Vec<Tag> = self.scan()?;
        if let Some(group) = group {
            tags.retain(|t| t.group == group);
        }
        tags.sort_by(|a, b| a.selection_key().cmp(&b.selection_key()));
        Ok(tags)
    }

    /// Rename a tag; a blank name deletes it instead
    ///
    /// Returns the renamed tag, or `None` if it was deleted.
    ///
    /// # Errors
    ///
    /// Returns `DbError::NotFound` if the tag does not exist.
    pub fn rename_tag(&self, id: TagId, name: &str) -> Result<Option<Tag>, DbError> {
        let tag = self.require::<Tag>(id)?;
        let name = name.trim();
        if name.is_empty() {
            self.delete_tag(id)?;
            return Ok(None);
        }
        let renamed = Tag { name: name.to_string(), ..tag };
        self.put(&renamed)?;
        Ok(Some(renamed))
    }

    /// File a tag under a category, or detach it with `None`
    ///
    /// # Errors
    ///
    /// Returns `DbError::NotFound` if the tag or category does not exist, or
    /// `DbError::InvalidInput` if the category belongs to another group.
    pub fn set_tag_category(&self, id: TagId, category: Option<CategoryId>) -> Result<Tag, DbError> {
        let tag = self.require::<Tag>(id)?;
        if let Some(category) = category {
            self.require_category_in(category, tag.group)?;
        }
        let moved = Tag { category, ..tag };
        self.put(&moved)?;
        Ok(moved)
    }

    /// Delete a tag and detach it from every entry
    ///
    /// # Errors
    ///
    /// Returns `DbError` if rewriting an entry or removing the tag fails.
    pub fn delete_tag(&self, id: TagId) -> Result<bool, DbError> {
        for mut entry in self.scan::<Entry>()? {
            if entry.has_tag(id) {
                entry.tags.retain(|t| *t != id);
                self.put(&entry)?;
            }
        }
        let removed = self.erase::<Tag>(id)?;
        debug!(tag = %id, removed, "deleted tag");
        Ok(removed)
    }

    /// Number of entries carrying each tag
    ///
    /// Unused tags are absent from the map.
    ///
    /// # Errors
    ///
    /// Returns `DbError` if iteration or decoding fails.
    pub fn tag_usage_counts(&self) -> Result<HashMap<TagId, usize>, DbError> {
        let mut counts = HashMap::new();
        for entry in self.scan::<Entry>()? {
            for tag in entry.tags {
                *counts.entry(tag).or_insert(0) += 1;
            }
        }
        Ok(counts)
    }

    // Entries

    /// Keep only tag ids that exist, dropping duplicates
    fn existing_tags(&self, tags: &[TagId]) -> Result<Vec<TagId>, DbError> {
        let mut seen = HashSet::new();
        let mut kept = Vec::with_capacity(tags.len());
        for &tag in tags {
            if !seen.insert(tag) {
                continue;
            }
            if self.get_tag(tag)?.is_some() {
                kept.push(tag);
            } else {
                warn!(tag = %tag, "ignoring unknown tag id");
            }
        }
        Ok(kept)
    }

    /// Create an entry in a group
    ///
    /// Unknown tag ids are dropped rather than rejected.
    ///
    /// # Errors
    ///
    /// Returns `DbError::NotFound` if the group does not exist, or
    /// `DbError::InvalidInput` if the title is blank.
    pub fn create_entry(&self, draft: NewEntry) -> Result<Entry, DbError> {
        self.require::<EntryGroup>(draft.group)?;
        let entry = Entry {
            id: self.next_id()?,
            group: draft.group,
            title: required(&draft.title, "Oops, your idea needs a title.")?,
            body: draft.body,
            date_created: Utc::now(),
            tags: self.existing_tags(&draft.tags)?,
        };
        self.put(&entry)?;
        debug!(entry = %entry.id, tags = entry.tags.len(), "created entry");
        Ok(entry)
    }

    /// Get an entry by id
    ///
    /// # Errors
    ///
    /// Returns `DbError` if the read or decoding fails.
    pub fn get_entry(&self, id: EntryId) -> Result<Option<Entry>, DbError> {
        self.fetch(id)
    }

    /// Get an entry by id, failing if it does not exist
    ///
    /// # Errors
    ///
    /// Returns `DbError::NotFound` if there is no such entry.
    pub fn require_entry(&self, id: EntryId) -> Result<Entry, DbError> {
        self.require(id)
    }

    /// Overwrite an existing entry's title, body and tags
    ///
    /// The group and creation date are kept from the stored entry.
    ///
    /// # Errors
    ///
    /// Returns `DbError::NotFound` if the entry does not exist, or
    /// `DbError::InvalidInput` if the title is blank.
    pub fn update_entry(&self, entry: &Entry) -> Result<Entry, DbError> {
        let stored = self.require::<Entry>(entry.id)?;
        let updated = Entry {
            title: required(&entry.title, "Oops, your idea needs a title.")?,
            body: entry.body.clone(),
            tags: self.existing_tags(&entry.tags)?,
            ..stored
        };
        self.put(&updated)?;
        Ok(updated)
    }

    /// Replace the tags on an entry
    ///
    /// # Errors
    ///
    /// Returns `DbError::NotFound` if the entry does not exist.
    pub fn set_entry_tags(&self, id: EntryId, tags: &[TagId]) -> Result<Entry, DbError> {
        let entry = self.require::<Entry>(id)?;
        let updated = Entry { tags: self.existing_tags(tags)?, ..entry };
        self.put(&updated)?;
        Ok(updated)
    }

    /// Entries newest first, optionally restricted to one group
    ///
    /// # Errors
    ///
    /// Returns `DbError` if iteration or decoding fails.
    pub fn list_entries(&self, group: Option<GroupId>) -> Result<Vec<Entry>, DbError> {
        let mut entries: Vec<Entry> = self.scan()?;
        if let Some(group) = group {
            entries.retain(|e| e.group == group);
        }
        entries.sort_by(|a, b| b.date_created.cmp(&a.date_created).then(b.id.cmp(&a.id)));
        Ok(entries)
    }

    /// Delete an entry
    ///
    /// # Errors
    ///
    /// Returns `DbError` if the removal fails.
    pub fn delete_entry(&self, id: EntryId) -> Result<bool, DbError> {
        self.erase::<Entry>(id)
    }

    /// Group of the oldest entry, used as the landing tab
    ///
    /// # Errors
    ///
    /// Returns `DbError` if iteration or decoding fails.
    pub fn default_group(&self) -> Result<Option<GroupId>, DbError> {
        let entries: Vec<Entry> = self.scan()?;
        Ok(entries
            .iter()
            .min_by(|a, b| a.date_created.cmp(&b.date_created).then(a.id.cmp(&b.id)))
            .map(|e| e.group))
    }

    /// Number of entries across all groups
    #[must_use]
    pub fn count(&self) -> usize {
        self.entries.len()
    }

    /// Flush all pending writes to disk
    ///
    /// # Errors
    ///
    /// Returns `DbError` if the flush operation fails.
    pub fn flush(&self) -> Result<(), DbError> {
        self.db.flush()?;
        Ok(())
    }

    /// Clear all records from the database
    ///
    /// # Warning
    /// This operation is irreversible!
    ///
    /// # Errors
    ///
    /// Returns `DbError` if clearing any tree fails.
    pub fn clear(&self) -> Result<(), DbError> {
        self.groups.clear()?;
        self.categories.clear()?;
        self.tags.clear()?;
        self.entries.clear()?;
        Ok(())
    }
}

impl Drop for Database {
    fn drop(&mut self) {
        // Best-effort flush on drop. Callers should explicitly flush()
        // if they need guaranteed durability.
        let _ = self.db.flush();
    }
}
