//! Selector command - print the faceted tag selector markup

use super::Result;
use crate::db::{Database, EntryId, GroupId};
use crate::facets::{DatabaseSource, FacetScope, FacetedCheckboxSelect, FieldAttrs};

/// Render the selector for a form field
///
/// Selected values are the tags of `entry` (if given) followed by `select`.
///
/// # Errors
/// Returns an error if the entry does not exist or the selector cannot
/// resolve a tag's group
pub fn render(
    db: &Database,
    group: Option<GroupId>,
    entry: Option<EntryId>,
    attrs: FieldAttrs<'_>,
    select: &[String],
) -> Result<String> {
    let scope = group.map_or(FacetScope::All, FacetScope::Group);
    let source = DatabaseSource::new(db, scope);

    let mut selected: Vec<String> = match entry {
        Some(id) => db.require_entry(id)?.tags.iter().map(ToString::to_string).collect(),
        None => Vec::new(),
    };
    selected.extend(select.iter().cloned());

    let choices = source.choices()?;
    Ok(FacetedCheckboxSelect::new(&source).render(attrs, selected, &choices)?)
}

/// Execute the selector command
///
/// # Errors
/// Returns an error if rendering fails
pub fn execute(
    db: &Database,
    group: Option<GroupId>,
    entry: Option<EntryId>,
    name: &str,
    id_base: Option<&str>,
    select: &[String],
) -> Result<()> {
    let mut attrs = FieldAttrs::new(name);
    if let Some(id_base) = id_base {
        attrs = attrs.with_id_base(id_base);
    }
    println!("{}", render(db, group, entry, attrs, select)?);
    Ok(())
}
