//! Output formatting for CLI display
//!
//! Every formatter takes a `quiet` flag: quiet output is the bare id, one
//! per line, so it can be piped into further commands.

use crate::board::TagSummary;
use crate::models::{Category, Entry, EntryGroup, Tag};
use colored::Colorize;

/// Format a group for listing
#[must_use]
pub fn group_line(group: &EntryGroup, quiet: bool) -> String {
    if quiet {
        return group.id.to_string();
    }
    let visibility = if group.public { "public".green() } else { "private".yellow() };
    format!(
        "  {} {} - {} ({visibility})",
        format!("[{}]", group.id).bold(),
        group.short_title.cyan(),
        group.title
    )
}

/// Format a category with the number of tags filed under it
#[must_use]
pub fn category_line(category: &Category, tag_count: usize, quiet: bool) -> String {
    if quiet {
        category.id.to_string()
    } else {
        format!(
            "  {} {} ({tag_count} tag(s))",
            format!("[{}]", category.id).bold(),
            category.name.cyan()
        )
    }
}

/// Format a tag with usage count
#[must_use]
pub fn tag_line(tag: &Tag, category: Option<&str>, count: usize, quiet: bool) -> String {
    if quiet {
        return tag.id.to_string();
    }
    let category = category.map_or_else(String::new, |name| format!(" in {}", name.cyan()));
    format!(
        "  {} {}{category} (used by {count} entry(s))",
        format!("[{}]", tag.id).bold(),
        tag.name
    )
}

/// Format an entry headline; `tags` are the names of its tags
#[must_use]
pub fn entry_line(entry: &Entry, tags: &[&str], quiet: bool) -> String {
    if quiet {
        return entry.id.to_string();
    }
    let date = entry.date_created.format("%Y-%m-%d");
    let tags = if tags.is_empty() {
        String::new()
    } else {
        format!(" [{}]", tags.join(", "))
    };
    format!(
        "  {} {} {}{}",
        format!("[{}]", entry.id).bold(),
        date.to_string().dimmed(),
        entry.title,
        tags.green()
    )
}

/// Format an entry in full: headline followed by the indented body
#[must_use]
pub fn entry_detail(entry: &Entry, tags: &[&str], quiet: bool) -> String {
    let headline = entry_line(entry, tags, quiet);
    if quiet || entry.body.trim().is_empty() {
        return headline;
    }
    let body: Vec<String> = entry.body.lines().map(|line| format!("      {line}")).collect();
    format!("{headline}\n{}", body.join("\n"))
}

/// Format a sidebar tag of a board
#[must_use]
pub fn board_tag_line(tag: &TagSummary, quiet: bool) -> String {
    if quiet {
        return tag.id.to_string();
    }
    let marker = if tag.active { "*".green().bold() } else { " ".normal() };
    let category = tag.category.as_deref().map_or_else(String::new, |name| format!("{name}: "));
    format!(
        " {marker}{} {}{} ({})",
        format!("[{}]", tag.id).bold(),
        category.dimmed(),
        tag.name,
        tag.entry_count
    )
}
