//! The faceted checkbox selector
//!
//! Renders every tag choice as a checkbox, in columns headed by category.
//! Choices must already be ordered by (category, name), which is what
//! `Database::list_tags` returns; the partition only says where each column
//! starts, it does not reorder anything.

use super::FacetError;
use super::html;
use super::partition::FacetPartition;
use super::source::FacetSource;
use crate::db::TagId;
use crate::models::Tag;
use std::borrow::Cow;
use std::collections::HashSet;
use std::fmt::Display;
use tracing::{debug, warn};

/// A candidate value and its visible label
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Choice {
    pub value: TagId,
    pub label: String,
}

impl Choice {
    #[must_use]
    pub fn new(value: TagId, label: impl Into<String>) -> Self {
        Self { value, label: label.into() }
    }
}

impl From<&Tag> for Choice {
    fn from(tag: &Tag) -> Self {
        Self::new(tag.id, tag.name.clone())
    }
}

/// Field-level attributes shared by every checkbox
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldAttrs<'a> {
    /// Form field name all checkboxes submit under
    pub name: &'a str,
    /// Base DOM id; checkbox `i` gets `<base>_<i>`
    pub id_base: Option<&'a str>,
}

impl<'a> FieldAttrs<'a> {
    #[must_use]
    pub const fn new(name: &'a str) -> Self {
        Self { name, id_base: None }
    }

    #[must_use]
    pub const fn with_id_base(mut self, id_base: &'a str) -> Self {
        self.id_base = Some(id_base);
        self
    }
}

/// Normalize submitted values so `5` and `"5"` compare equal
fn normalize_selection<I>(selected: I) -> HashSet<String>
where
    I: IntoIterator,
    I::Item: Display,
{
    selected.into_iter().map(|v| v.to_string().trim().to_string()).collect()
}

/// Grouped multi-select widget over a `FacetSource`
pub struct FacetedCheckboxSelect<'s, S: FacetSource + ?Sized> {
    source: &'s S,
}

impl<'s, S: FacetSource + ?Sized> FacetedCheckboxSelect<'s, S> {
    #[must_use]
    pub const fn new(source: &'s S) -> Self {
        Self { source }
    }

    /// Query the source for the current partition and render
    ///
    /// # Errors
    /// Returns `FacetError` if a source query fails, including an
    /// uncategorized tag whose group cannot be resolved.
    pub fn render<I>(&self, attrs: FieldAttrs<'_>, selected: I, choices: &[Choice]) -> Result<String, FacetError>
    where
        I: IntoIterator,
        I::Item: Display,
    {
        let partition = FacetPartition::build(self.source)?;
        self.render_partition(&partition, attrs, selected, choices)
    }

    /// Render against an already-built partition
    ///
    /// # Errors
    /// Returns `FacetError` if a group label lookup fails.
    pub fn render_partition<I>(
        &self,
        partition: &FacetPartition,
        attrs: FieldAttrs<'_>,
        selected: I,
        choices: &[Choice],
    ) -> Result<String, FacetError>
    where
        I: IntoIterator,
        I::Item: Display,
    {
        let selected = normalize_selection(selected);
        let segments = partition.segments();

        if partition.total() != choices.len() {
            warn!(
                expected = partition.total(),
                actual = choices.len(),
                "choice count does not match facet partition"
            );
        }
        debug!(field = attrs.name, choices = choices.len(), segments = segments.len(), "rendering selector");

        let mut output = vec![html::OPEN_CONTAINER.to_string()];
        let mut segment_index = 0;
        let mut column_open = false;

        for (i, choice) in choices.iter().enumerate() {
            if let Some(segment) = segments.get(segment_index)
                && segment.start == i
            {
                if column_open {
                    output.push(html::CLOSE_COLUMN.to_string());
                }
                output.push(html::open_column(&segment.header()));
                column_open = true;
                segment_index += 1;
            }

            let id = attrs.id_base.map(|base| format!("{base}_{i}"));
            let value = choice.value.to_string();
            let checkbox = html::checkbox(attrs.name, &value, id.as_deref(), selected.contains(&value));
            let label = self.display_label(partition, choice)?;
            output.push(html::option_row(&checkbox, &label, id.as_deref()));
        }

        if column_open {
            output.push(html::CLOSE_COLUMN.to_string());
        }
        output.push(html::CLOSE_CONTAINER.to_string());

        Ok(output.join("\n"))
    }

    /// Label shown for a choice; uncategorized tags get their group appended
    fn display_label<'c>(&self, partition: &FacetPartition, choice: &'c Choice) -> Result<Cow<'c, str>, FacetError> {
        if partition.is_uncategorized(choice.value) {
            let group = self.source.tag_group_label(choice.value)?;
            Ok(Cow::Owned(format!("{} ({group})", choice.label)))
        } else {
            Ok(Cow::Borrowed(&choice.label))
        }
    }
}
