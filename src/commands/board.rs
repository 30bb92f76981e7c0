//! Board command - list a group's entries filtered by tag

use super::Result;
use super::entry::tag_names;
use crate::board::{BoardOptions, BoardView};
use crate::db::{Database, EntryId, GroupId, TagId};
use crate::output;
use colored::Colorize;

/// How the board options were given on the command line
#[derive(Debug, Clone, Default)]
pub struct BoardArgs {
    pub query: Option<String>,
    pub tags: Vec<TagId>,
    pub show_empty: bool,
    pub expand: Option<EntryId>,
}

impl BoardArgs {
    /// A query string takes precedence over individual flags
    #[must_use]
    pub fn options(&self) -> BoardOptions {
        match &self.query {
            Some(query) => BoardOptions::from_query_string(query),
            None => BoardOptions {
                active_tags: self.tags.clone(),
                show_empty_tags: self.show_empty,
                expand: self.expand,
            },
        }
    }
}

/// Execute the board command
///
/// # Errors
/// Returns an error if the group does not exist, a database read fails, or
/// JSON output cannot be produced
pub fn execute(db: &Database, group: Option<GroupId>, args: &BoardArgs, json: bool, quiet: bool) -> Result<()> {
    let options = args.options();
    let board = match group {
        Some(group) => Some(BoardView::load(db, group, options)?),
        None => BoardView::home(db, options)?,
    };

    let Some(board) = board else {
        if json {
            println!("null");
        } else if !quiet {
            println!("The board is empty. Post an idea with: ideaboard entry add <GROUP> <TITLE>");
        }
        return Ok(());
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&board)?);
        return Ok(());
    }

    if !quiet {
        let tabs: Vec<String> = board
            .groups
            .iter()
            .map(|g| {
                if g.id == board.group.id {
                    format!("[{}]", g.short_title).bold().to_string()
                } else {
                    g.short_title.clone()
                }
            })
            .collect();
        println!("{}", tabs.join("  "));
        println!("{}", board.group.title.bold());
        if !board.group.description.is_empty() {
            println!("{}", board.group.description);
        }
        println!();
    }

    if board.entries.is_empty() {
        if !quiet {
            println!("No entries match.");
        }
    } else {
        for entry in &board.entries {
            let names = tag_names(db, entry)?;
            let names: Vec<&str> = names.iter().map(String::as_str).collect();
            if board.is_expanded(entry.id) {
                println!("{}", output::entry_detail(entry, &names, quiet));
            } else {
                println!("{}", output::entry_line(entry, &names, quiet));
            }
        }
    }

    if !quiet {
        println!();
        println!("Tags:");
        for tag in &board.tags {
            println!("{}", output::board_tag_line(tag, quiet));
        }
        for category in &board.empty_categories {
            println!("  {} {}", category.name.dimmed(), "(no tags)".dimmed());
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::TestDb;

    #[test]
    fn test_query_overrides_flags() {
        let args = BoardArgs {
            query: Some("tag=4&expand=9".into()),
            tags: vec![TagId::new(1)],
            show_empty: true,
            expand: None,
        };
        let options = args.options();
        assert_eq!(options.active_tags, vec![TagId::new(4)]);
        assert_eq!(options.expand, Some(EntryId::new(9)));
        assert!(!options.show_empty_tags);
    }

    #[test]
    fn test_flags_without_query() {
        let args = BoardArgs { query: None, tags: vec![TagId::new(2)], show_empty: true, expand: None };
        let options = args.options();
        assert_eq!(options.active_tags, vec![TagId::new(2)]);
        assert!(options.show_empty_tags);
    }

    #[test]
    fn test_execute_on_empty_board() {
        let test_db = TestDb::new();
        execute(test_db.db(), None, &BoardArgs::default(), false, true).unwrap();
        execute(test_db.db(), None, &BoardArgs::default(), true, true).unwrap();
    }

    #[test]
    fn test_execute_missing_group_fails() {
        let test_db = TestDb::new();
        assert!(execute(test_db.db(), Some(GroupId::new(3)), &BoardArgs::default(), false, true).is_err());
    }
}
