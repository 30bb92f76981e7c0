//! Read ports the selector queries
//!
//! The selector never reaches for the store on its own. Whoever builds it
//! passes in a `FacetSource`, which answers the three questions the selector
//! asks: which categories are populated, which tags have no category, and
//! which group owns a given tag.

use super::FacetError;
use super::widget::Choice;
use crate::db::{CategoryId, Database, GroupId, TagId};
use std::collections::HashMap;

/// A category with at least one tag, as seen by the selector
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryCount {
    pub id: CategoryId,
    pub name: String,
    /// Short title of the group owning the category
    pub group_label: String,
    /// Number of tags filed under the category
    pub tag_count: usize,
}

/// Read-only queries backing the faceted selector
pub trait FacetSource {
    /// Categories with at least one tag, in ascending id order
    ///
    /// # Errors
    /// Returns `FacetError` if the backing store cannot be read.
    fn populated_categories(&self) -> Result<Vec<CategoryCount>, FacetError>;

    /// Ids of all tags that have no category
    ///
    /// # Errors
    /// Returns `FacetError` if the backing store cannot be read.
    fn uncategorized_tags(&self) -> Result<Vec<TagId>, FacetError>;

    /// Short title of the group owning `tag`
    ///
    /// # Errors
    /// Returns `FacetError` if the tag or its group cannot be resolved.
    fn tag_group_label(&self, tag: TagId) -> Result<String, FacetError>;
}

/// Which tags a `DatabaseSource` exposes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FacetScope {
    /// Every tag in the store
    #[default]
    All,
    /// Only the tags of one group
    Group(GroupId),
}

impl FacetScope {
    const fn group(self) -> Option<GroupId> {
        match self {
            Self::All => None,
            Self::Group(group) => Some(group),
        }
    }
}

/// `FacetSource` backed by the sled store
pub struct DatabaseSource<'a> {
    db: &'a Database,
    scope: FacetScope,
}

impl<'a> DatabaseSource<'a> {
    #[must_use]
    pub const fn new(db: &'a Database, scope: FacetScope) -> Self {
        Self { db, scope }
    }

    /// Candidate choices for the selector, in the order it expects
    ///
    /// # Errors
    /// Returns `FacetError` if the tags cannot be read.
    pub fn choices(&self) -> Result<Vec<Choice>, FacetError> {
        Ok(self
            .db
            .list_tags(self.scope.group())?
            .iter()
            .map(Choice::from)
            .collect())
    }
}

impl FacetSource for DatabaseSource<'_> {
    fn populated_categories(&self) -> Result<Vec<CategoryCount>, FacetError> {
        // Count from the scoped tags so offsets line up with `choices()`.
        let counts = self.db.category_tag_counts(self.scope.group())?;

        let mut labels: HashMap<GroupId, String> = HashMap::new();
        let mut populated = Vec::new();
        for category in self.db.list_categories(None)? {
            let Some(&tag_count) = counts.get(&category.id) else {
                continue;
            };
            let group_label = match labels.get(&category.group) {
                Some(label) => label.clone(),
                None => {
                    let label = self.db.require_group(category.group)?.short_title;
                    labels.insert(category.group, label.clone());
                    label
                }
            };
            populated.push(CategoryCount {
                id: category.id,
                name: category.name,
                group_label,
                tag_count,
            });
        }
        Ok(populated)
    }

    fn uncategorized_tags(&self) -> Result<Vec<TagId>, FacetError> {
        Ok(self
            .db
            .list_tags(self.scope.group())?
            .into_iter()
            .filter(|t| t.category.is_none())
            .map(|t| t.id)
            .collect())
    }

    fn tag_group_label(&self, tag: TagId) -> Result<String, FacetError> {
        let tag = self.db.require_tag(tag)?;
        Ok(self.db.require_group(tag.group)?.short_title)
    }
}
