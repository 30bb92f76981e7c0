//! Board view: one group's entries filtered by tag
//!
//! A board is what the user browses. It shows the entries of one group,
//! newest first, narrowed to the entries carrying *every* active tag, next
//! to a sidebar of the group's tags with usage counts. Options arrive as a
//! query string:
//!
//! - `tag=<id>` (repeatable): active tag filters; non-numeric values are ignored
//! - `show_empty_tags=1`: keep tags no entry uses in the sidebar
//! - `expand=<id>`: entry to show in full

pub mod query;

use crate::db::{CategoryId, Database, DbError, EntryId, GroupId, TagId};
use crate::models::{Category, Entry, EntryGroup};
use query::{get_all, get_last, parse_query};
use serde::Serialize;
use std::collections::HashSet;
use tracing::debug;

fn parse_digits<T: std::str::FromStr>(value: &str) -> Option<T> {
    if !value.is_empty() && value.bytes().all(|b| b.is_ascii_digit()) {
        value.parse().ok()
    } else {
        None
    }
}

/// Display options of a board
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BoardOptions {
    pub active_tags: Vec<TagId>,
    pub show_empty_tags: bool,
    pub expand: Option<EntryId>,
}

impl BoardOptions {
    /// Read options from parsed query pairs
    #[must_use]
    pub fn from_query(pairs: &[(String, String)]) -> Self {
        let active_tags = get_all(pairs, "tag").into_iter().filter_map(parse_digits).collect();
        let show_empty_tags = get_last(pairs, "show_empty_tags").and_then(parse_digits::<u64>) == Some(1);
        let expand = get_last(pairs, "expand").and_then(parse_digits);
        Self { active_tags, show_empty_tags, expand }
    }

    /// Read options from a raw query string
    #[must_use]
    pub fn from_query_string(query: &str) -> Self {
        Self::from_query(&parse_query(query))
    }

    #[must_use]
    pub fn is_active(&self, tag: TagId) -> bool {
        self.active_tags.contains(&tag)
    }
}

/// A tag as listed in the board sidebar
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TagSummary {
    pub id: TagId,
    pub name: String,
    /// Name of the tag's category, if any
    pub category: Option<String>,
    /// Entries carrying the tag, across the whole group
    pub entry_count: usize,
    pub active: bool,
}

/// Everything needed to show one group's board
#[derive(Debug, Clone, Serialize)]
pub struct BoardView {
    pub group: EntryGroup,
    /// All groups, for the tab bar
    pub groups: Vec<EntryGroup>,
    pub entries: Vec<Entry>,
    pub tags: Vec<TagSummary>,
    /// Categories of the group with no tags yet
    pub empty_categories: Vec<Category>,
    pub options: BoardOptions,
}

impl BoardView {
    /// Build the board for `group`
    ///
    /// # Errors
    ///
    /// Returns `DbError::NotFound` if the group does not exist, or another
    /// `DbError` if reading the store fails.
    pub fn load(db: &Database, group: GroupId, options: BoardOptions) -> Result<Self, DbError> {
        let group = db.require_group(group)?;

        let mut entries = db.list_entries(Some(group.id))?;
        if !options.active_tags.is_empty() {
            debug!(active = ?options.active_tags, "filtering board entries");
            entries.retain(|entry| options.active_tags.iter().all(|tag| entry.has_tag(*tag)));
        }

        let usage = db.tag_usage_counts()?;
        let categories = db.list_categories(Some(group.id))?;
        let category_name = |id: CategoryId| categories.iter().find(|c| c.id == id).map(|c| c.name.clone());

        let mut tags = Vec::new();
        let mut used_categories = HashSet::new();
        for tag in db.list_tags(Some(group.id))? {
            if let Some(category) = tag.category {
                used_categories.insert(category);
            }
            let entry_count = usage.get(&tag.id).copied().unwrap_or(0);
            if entry_count == 0 && !options.show_empty_tags {
                continue;
            }
            tags.push(TagSummary {
                id: tag.id,
                name: tag.name,
                category: tag.category.and_then(category_name),
                entry_count,
                active: options.is_active(tag.id),
            });
        }

        let empty_categories = categories
            .iter()
            .filter(|c| !used_categories.contains(&c.id))
            .cloned()
            .collect();

        Ok(Self {
            group,
            groups: db.list_groups()?,
            entries,
            tags,
            empty_categories,
            options,
        })
    }

    /// Board of the landing group, or `None` while the board has no entries
    ///
    /// # Errors
    ///
    /// Returns `DbError` if reading the store fails.
    pub fn home(db: &Database, options: BoardOptions) -> Result<Option<Self>, DbError> {
        match db.default_group()? {
            Some(group) => Self::load(db, group, options).map(Some),
            None => Ok(None),
        }
    }

    /// Whether `entry` should be shown in full
    #[must_use]
    pub fn is_expanded(&self, entry: EntryId) -> bool {
        self.options.expand == Some(entry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::TestDb;

    #[test]
    fn test_options_from_query() {
        let options = BoardOptions::from_query_string("?tag=3&tag=abc&tag=&tag=7&show_empty_tags=1&expand=12");
        assert_eq!(options.active_tags, vec![TagId::new(3), TagId::new(7)]);
        assert!(options.show_empty_tags);
        assert_eq!(options.expand, Some(EntryId::new(12)));
    }

    #[test]
    fn test_options_reject_non_digits() {
        let options = BoardOptions::from_query_string("tag=-1&tag=+2&show_empty_tags=yes&expand=x");
        assert!(options.active_tags.is_empty());
        assert!(!options.show_empty_tags);
        assert_eq!(options.expand, None);

        let options = BoardOptions::from_query_string("show_empty_tags=0");
        assert!(!options.show_empty_tags);
        assert_eq!(BoardOptions::from_query_string(""), BoardOptions::default());
    }

    #[test]
    fn test_board_filters_by_all_active_tags() {
        let test_db = TestDb::new();
        let shop = test_db.group("Shop");
        let saw = test_db.tag(shop, "saw", None);
        let glue = test_db.tag(shop, "glue", None);
        let bench = test_db.entry(shop, "Bench", &[saw, glue]);
        test_db.entry(shop, "Shelf", &[saw]);
        test_db.entry(shop, "Box", &[glue]);

        let options = BoardOptions { active_tags: vec![saw, glue], ..BoardOptions::default() };
        let board = BoardView::load(test_db.db(), shop, options).unwrap();
        let ids: Vec<EntryId> = board.entries.iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![bench]);

        let options = BoardOptions { active_tags: vec![saw], ..BoardOptions::default() };
        assert_eq!(BoardView::load(test_db.db(), shop, options).unwrap().entries.len(), 2);
    }

    #[test]
    fn test_board_entries_newest_first_and_scoped() {
        let test_db = TestDb::new();
        let shop = test_db.group("Shop");
        let kitchen = test_db.group("Kitchen");
        let first = test_db.entry(shop, "First", &[]);
        let second = test_db.entry(shop, "Second", &[]);
        test_db.entry(kitchen, "Soup", &[]);

        let board = BoardView::load(test_db.db(), shop, BoardOptions::default()).unwrap();
        let ids: Vec<EntryId> = board.entries.iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![second, first]);
        assert_eq!(board.groups.len(), 2);
    }

    #[test]
    fn test_sidebar_hides_unused_tags_unless_asked() {
        let test_db = TestDb::new();
        let shop = test_db.group("Shop");
        let tools = test_db.category(shop, "Tools");
        let saw = test_db.tag(shop, "saw", Some(tools));
        test_db.tag(shop, "unused", None);
        test_db.entry(shop, "Bench", &[saw]);

        let board = BoardView::load(test_db.db(), shop, BoardOptions::default()).unwrap();
        assert_eq!(
            board.tags,
            vec![TagSummary {
                id: saw,
                name: "saw".into(),
                category: Some("Tools".into()),
                entry_count: 1,
                active: false,
            }]
        );

        let options = BoardOptions { show_empty_tags: true, active_tags: vec![saw], expand: None };
        let board = BoardView::load(test_db.db(), shop, options).unwrap();
        let names: Vec<&str> = board.tags.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["unused", "saw"]);
        assert!(board.tags[1].active);
    }

    #[test]
    fn test_empty_categories_listed() {
        let test_db = TestDb::new();
        let shop = test_db.group("Shop");
        let tools = test_db.category(shop, "Tools");
        let empty = test_db.category(shop, "Someday");
        test_db.tag(shop, "saw", Some(tools));

        let board = BoardView::load(test_db.db(), shop, BoardOptions::default()).unwrap();
        let ids: Vec<_> = board.empty_categories.iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![empty]);
    }

    #[test]
    fn test_missing_group_is_not_found() {
        let test_db = TestDb::new();
        let err = BoardView::load(test_db.db(), GroupId::new(8), BoardOptions::default()).unwrap_err();
        assert!(matches!(err, DbError::NotFound { kind: "group", id: 8 }));
    }

    #[test]
    fn test_home_uses_oldest_entry_group() {
        let test_db = TestDb::new();
        assert!(BoardView::home(test_db.db(), BoardOptions::default()).unwrap().is_none());

        let shop = test_db.group("Shop");
        let kitchen = test_db.group("Kitchen");
        test_db.entry(kitchen, "Soup", &[]);
        test_db.entry(shop, "Bench", &[]);
        let board = BoardView::home(test_db.db(), BoardOptions::default()).unwrap().unwrap();
        assert_eq!(board.group.id, kitchen);
    }

    #[test]
    fn test_is_expanded() {
        let test_db = TestDb::new();
        let shop = test_db.group("Shop");
        let bench = test_db.entry(shop, "Bench", &[]);
        let options = BoardOptions { expand: Some(bench), ..BoardOptions::default() };
        let board = BoardView::load(test_db.db(), shop, options).unwrap();
        assert!(board.is_expanded(bench));
        assert!(!board.is_expanded(EntryId::new(999)));
    }
}
