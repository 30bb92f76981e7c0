//! Command-line interface definitions and parsing
//!
//! This module defines the complete CLI structure for ideaboard using the
//! `clap` crate.
//!
//! # Commands
//!
//! - **group**, **category**, **tag**, **entry**: manage board records
//! - **board**: list a group's entries filtered by tag
//! - **selector**: print the faceted tag selector markup
//! - **db**: manage multiple databases (add, remove, list, set-default)
//! - **config**: read and write settings
//!
//! Every command that touches a board accepts `--db <NAME>`; the global
//! `--quiet` flag trims output for scripting and `--verbose` turns on debug
//! logging.

use crate::db::{CategoryId, EntryId, GroupId, TagId};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Configuration management subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum ConfigCommands {
    /// Set a configuration value
    Set {
        /// Configuration key=value (e.g., quiet=true, log_level=info)
        #[arg(value_name = "KEY=VALUE")]
        setting: String,
    },

    /// Get a configuration value
    Get {
        /// Configuration key to retrieve (quiet or log_level)
        #[arg(value_name = "KEY")]
        key: String,
    },
}

/// Database management subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum DbCommands {
    /// Add a new database
    Add {
        /// Name of the database
        name: String,

        /// Path to the database directory
        path: PathBuf,
    },

    /// List all databases
    List,

    /// Remove a database from configuration
    #[command(visible_alias = "rm")]
    Remove {
        /// Name of the database to remove
        name: String,

        /// Also delete database files from disk
        #[arg(short = 'd', long = "delete-files")]
        delete_files: bool,
    },

    /// Set the default database
    SetDefault {
        /// Name of the database to use by default
        name: String,
    },
}

/// Entry group subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum GroupCommands {
    /// Create a group
    Add {
        /// Full title
        title: String,

        /// Short label for the tab (defaults to the title)
        #[arg(short = 's', long = "short")]
        short_title: Option<String>,

        #[arg(short = 'd', long = "description", default_value = "")]
        description: String,

        /// Mark the group as public
        #[arg(long)]
        public: bool,
    },

    /// List groups
    #[command(visible_alias = "ls")]
    List,

    /// Change a group's fields
    Edit {
        id: GroupId,

        #[arg(long)]
        title: Option<String>,

        #[arg(short = 's', long = "short")]
        short_title: Option<String>,

        #[arg(short = 'd', long = "description")]
        description: Option<String>,

        #[arg(long)]
        public: Option<bool>,
    },

    /// Delete a group with all its categories, tags and entries
    #[command(visible_alias = "rm")]
    Remove {
        id: GroupId,

        /// Skip the confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },
}

/// Category subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum CategoryCommands {
    /// Create a category in a group
    Add {
        group: GroupId,

        name: String,

        #[arg(short = 'd', long = "description", default_value = "")]
        description: String,
    },

    /// List categories with their tag counts
    #[command(visible_alias = "ls")]
    List {
        /// Only categories of this group
        #[arg(short = 'g', long = "group")]
        group: Option<GroupId>,
    },

    /// Change a category's name or description
    Edit {
        id: CategoryId,

        #[arg(long)]
        name: Option<String>,

        #[arg(short = 'd', long = "description")]
        description: Option<String>,
    },

    /// Delete a category and its tags
    #[command(visible_alias = "rm")]
    Remove {
        id: CategoryId,

        /// Skip the confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },
}

/// Tag subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum TagCommands {
    /// Create a tag in a group
    Add {
        group: GroupId,

        name: String,

        /// File the tag under this category
        #[arg(short = 'c', long = "category")]
        category: Option<CategoryId>,
    },

    /// List tags with their usage counts
    #[command(visible_alias = "ls")]
    List {
        /// Only tags of this group
        #[arg(short = 'g', long = "group")]
        group: Option<GroupId>,
    },

    /// Rename a tag (an empty name deletes it)
    Rename { id: TagId, name: String },

    /// Move a tag to a category, or out of any category when omitted
    Move { id: TagId, category: Option<CategoryId> },

    /// Delete a tag and detach it from every entry
    #[command(visible_alias = "rm")]
    Remove {
        id: TagId,

        /// Skip the confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },
}

/// Entry subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum EntryCommands {
    /// Post a new idea to a group
    Add {
        group: GroupId,

        title: String,

        #[arg(short = 'b', long = "body", default_value = "")]
        body: String,

        /// Tag ids (can specify multiple: -t 3 -t 7)
        #[arg(short = 't', long = "tag", value_name = "TAG_ID")]
        tags: Vec<TagId>,
    },

    /// Change an entry's title, body or tags
    Edit {
        id: EntryId,

        #[arg(long)]
        title: Option<String>,

        #[arg(short = 'b', long = "body")]
        body: Option<String>,

        /// Replace the tags with these ids
        #[arg(short = 't', long = "tag", value_name = "TAG_ID", conflicts_with = "clear_tags")]
        tags: Vec<TagId>,

        /// Remove every tag from the entry
        #[arg(long)]
        clear_tags: bool,
    },

    /// Show one entry in full
    Show { id: EntryId },

    /// Delete an entry
    #[command(visible_alias = "rm")]
    Remove {
        id: EntryId,

        /// Skip the confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },
}

/// Shared arguments for commands that work with a database
#[derive(Parser, Debug, Clone)]
pub struct DbArgs {
    /// Database name to use (overrides default)
    #[arg(long = "db", value_name = "NAME")]
    pub db: Option<String>,
}

/// Main CLI structure for parsing command-line arguments
#[derive(Parser, Debug)]
#[command(name = "ideaboard")]
#[command(about = "An idea board organised by faceted tags", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Suppress informational output (only print results)
    #[arg(short = 'q', long = "quiet", global = true)]
    pub quiet: bool,

    /// Log debug details to stderr
    #[arg(short = 'v', long = "verbose", global = true)]
    pub verbose: bool,
}

/// Available CLI commands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Manage entry groups (the board's tabs)
    #[command(visible_alias = "g")]
    Group {
        #[command(subcommand)]
        command: GroupCommands,

        #[command(flatten)]
        db_args: DbArgs,
    },

    /// Manage categories (facets)
    #[command(visible_alias = "c")]
    Category {
        #[command(subcommand)]
        command: CategoryCommands,

        #[command(flatten)]
        db_args: DbArgs,
    },

    /// Manage tags
    #[command(visible_alias = "t")]
    Tag {
        #[command(subcommand)]
        command: TagCommands,

        #[command(flatten)]
        db_args: DbArgs,
    },

    /// Manage entries (ideas)
    #[command(visible_alias = "e")]
    Entry {
        #[command(subcommand)]
        command: EntryCommands,

        #[command(flatten)]
        db_args: DbArgs,
    },

    /// Show a group's entries, filtered by tags
    #[command(visible_alias = "b")]
    Board {
        /// Group to show (defaults to the group of the oldest entry)
        group: Option<GroupId>,

        /// Board options as a query string, e.g. "tag=3&tag=7&expand=12"
        #[arg(long, conflicts_with_all = ["tags", "show_empty", "expand"])]
        query: Option<String>,

        /// Only entries carrying every one of these tags
        #[arg(short = 't', long = "tag", value_name = "TAG_ID")]
        tags: Vec<TagId>,

        /// List tags no entry uses
        #[arg(long)]
        show_empty: bool,

        /// Entry to show in full
        #[arg(short = 'x', long, value_name = "ENTRY_ID")]
        expand: Option<EntryId>,

        /// Print the board as JSON
        #[arg(long)]
        json: bool,

        #[command(flatten)]
        db_args: DbArgs,
    },

    /// Print the faceted tag selector as HTML
    #[command(visible_alias = "s")]
    Selector {
        /// Only offer tags of this group
        #[arg(short = 'g', long = "group")]
        group: Option<GroupId>,

        /// Pre-select the tags of this entry
        #[arg(short = 'e', long = "entry")]
        entry: Option<EntryId>,

        /// Form field name of the checkboxes
        #[arg(short = 'n', long = "name", default_value = "tags")]
        name: String,

        /// Base DOM id; checkbox i gets <ID_BASE>_<i>
        #[arg(long = "id-base", value_name = "ID_BASE")]
        id_base: Option<String>,

        /// Extra selected values (tag ids, as submitted by a form)
        #[arg(long = "select", value_name = "VALUE")]
        select: Vec<String>,

        #[command(flatten)]
        db_args: DbArgs,
    },

    /// Manage databases
    Db {
        #[command(subcommand)]
        command: DbCommands,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

impl Commands {
    /// Helper method to get the database name override from commands
    #[must_use]
    pub fn get_db(&self) -> Option<&str> {
        match self {
            Self::Group { db_args, .. }
            | Self::Category { db_args, .. }
            | Self::Tag { db_args, .. }
            | Self::Entry { db_args, .. }
            | Self::Board { db_args, .. }
            | Self::Selector { db_args, .. } => db_args.db.as_deref(),
            Self::Db { .. } | Self::Config { .. } => None,
        }
    }
}

impl Cli {
    /// Parse command line arguments
    #[must_use]
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("ideaboard").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_board_with_tags() {
        let cli = parse(&["board", "2", "-t", "3", "--tag", "7", "--show-empty", "--db", "work"]);
        match &cli.command {
            Commands::Board { group, tags, show_empty, expand, query, .. } => {
                assert_eq!(*group, Some(GroupId::new(2)));
                assert_eq!(tags, &vec![TagId::new(3), TagId::new(7)]);
                assert!(*show_empty);
                assert_eq!(*expand, None);
                assert!(query.is_none());
            }
            other => panic!("unexpected command: {other:?}"),
        }
        assert_eq!(cli.command.get_db(), Some("work"));
    }

    #[test]
    fn test_board_query_conflicts_with_flags() {
        let result = Cli::try_parse_from(["ideaboard", "board", "--query", "tag=1", "--tag", "2"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_selector_defaults() {
        let cli = parse(&["selector", "--select", "3", "--select", "5"]);
        match cli.command {
            Commands::Selector { name, id_base, select, group, entry, .. } => {
                assert_eq!(name, "tags");
                assert!(id_base.is_none());
                assert_eq!(select, vec!["3", "5"]);
                assert!(group.is_none());
                assert!(entry.is_none());
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_rejects_non_numeric_ids() {
        assert!(Cli::try_parse_from(["ideaboard", "entry", "show", "abc"]).is_err());
    }

    #[test]
    fn test_tag_move_without_category_detaches() {
        let cli = parse(&["tag", "move", "4"]);
        match cli.command {
            Commands::Tag { command: TagCommands::Move { id, category }, .. } => {
                assert_eq!(id, TagId::new(4));
                assert!(category.is_none());
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_global_flags() {
        let cli = parse(&["group", "list", "-q", "-v"]);
        assert!(cli.quiet);
        assert!(cli.verbose);
        assert_eq!(cli.command.get_db(), None);
    }

    #[test]
    fn test_entry_edit_tags_conflict_with_clear() {
        let result = Cli::try_parse_from(["ideaboard", "entry", "edit", "1", "-t", "2", "--clear-tags"]);
        assert!(result.is_err());
    }
}
