//! Board records: groups, categories, tags and entries
//!
//! These are plain data types. The store assigns ids, so every record is
//! first described by a `New*` draft and only gains an id once written.

use crate::db::types::{CategoryId, EntryId, GroupId, TagId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A tab on the board holding related entries
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct EntryGroup {
    pub id: GroupId,
    pub title: String,
    /// Short label shown on the tab and next to facet headers
    pub short_title: String,
    pub description: String,
    pub public: bool,
    pub date_modified: DateTime<Utc>,
}

/// Draft of an entry group before it is stored
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NewGroup {
    pub title: String,
    pub short_title: String,
    pub description: String,
    pub public: bool,
}

/// A facet: the optional parent of a set of tags
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Category {
    pub id: CategoryId,
    pub group: GroupId,
    pub name: String,
    pub description: String,
}

/// Draft of a category before it is stored
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewCategory {
    pub group: GroupId,
    pub name: String,
    pub description: String,
}

/// A single word or phrase attached to entries
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Tag {
    pub id: TagId,
    pub group: GroupId,
    pub name: String,
    pub category: Option<CategoryId>,
}

impl Tag {
    /// Sort key used everywhere tags are offered for selection:
    /// uncategorized first, then by category id, then by name.
    #[must_use]
    pub fn selection_key(&self) -> (Option<CategoryId>, &str) {
        (self.category, self.name.as_str())
    }
}

/// Draft of a tag before it is stored
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewTag {
    pub group: GroupId,
    pub name: String,
    pub category: Option<CategoryId>,
}

/// An idea on the board
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Entry {
    pub id: EntryId,
    pub group: GroupId,
    pub title: String,
    pub body: String,
    pub date_created: DateTime<Utc>,
    pub tags: Vec<TagId>,
}

impl Entry {
    #[must_use]
    pub fn has_tag(&self, tag: TagId) -> bool {
        self.tags.contains(&tag)
    }
}

/// Draft of an entry before it is stored
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewEntry {
    pub group: GroupId,
    pub title: String,
    pub body: String,
    pub tags: Vec<TagId>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tag(id: u64, name: &str, category: Option<u64>) -> Tag {
        Tag {
            id: TagId::new(id),
            group: GroupId::new(1),
            name: name.to_string(),
            category: category.map(CategoryId::new),
        }
    }

    #[test]
    fn test_selection_key_puts_uncategorized_first() {
        let mut tags = vec![
            tag(1, "wood", Some(2)),
            tag(2, "zinc", None),
            tag(3, "glue", Some(1)),
            tag(4, "acrylic", None),
        ];
        tags.sort_by(|a, b| a.selection_key().cmp(&b.selection_key()));
        let names: Vec<&str> = tags.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["acrylic", "zinc", "glue", "wood"]);
    }

    #[test]
    fn test_entry_has_tag() {
        let entry = Entry {
            id: EntryId::new(1),
            group: GroupId::new(1),
            title: "Birdhouse".into(),
            body: String::new(),
            date_created: Utc::now(),
            tags: vec![TagId::new(4)],
        };
        assert!(entry.has_tag(TagId::new(4)));
        assert!(!entry.has_tag(TagId::new(5)));
    }
}
