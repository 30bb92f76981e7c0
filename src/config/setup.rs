//! Interactive setup wizard for first-time configuration
//!
//! On first run the wizard registers a board database and, unless skipped,
//! opens it and creates the first group so the board has a tab to post to.

use super::BoardConfig;
use crate::db::{Database, GroupId};
use crate::models::NewGroup;
use config::ConfigError;
use dialoguer::{Input, theme::ColorfulTheme};
use std::path::{Path, PathBuf};
use tracing::debug;

fn ask(prompt: &str, default: Option<String>) -> Result<String, ConfigError> {
    let theme = ColorfulTheme::default();
    let mut input = Input::<String>::with_theme(&theme).with_prompt(prompt).allow_empty(true);
    if let Some(default) = default {
        input = input.default(default);
    }
    input
        .interact_text()
        .map_err(|e| ConfigError::Message(format!("Failed to read input: {e}")))
}

/// Draft for the first group; a blank title skips it and a blank short
/// title falls back to the title
fn first_group(title: &str, short_title: &str) -> Option<NewGroup> {
    let title = title.trim();
    if title.is_empty() {
        return None;
    }
    let short_title = match short_title.trim() {
        "" => title,
        short => short,
    };
    Some(NewGroup {
        title: title.to_string(),
        short_title: short_title.to_string(),
        ..NewGroup::default()
    })
}

/// Configuration with `name` as the only and default board
fn board_config(name: &str, path: PathBuf) -> BoardConfig {
    let mut config = BoardConfig::default();
    config.databases.insert(name.to_string(), path);
    config.default_database = Some(name.to_string());
    config
}

/// Open the board at `path` and create `draft` in it
fn seed_board(path: &Path, draft: NewGroup) -> Result<GroupId, ConfigError> {
    let store_error = |e| ConfigError::Message(format!("Failed to create first group: {e}"));
    let db = Database::open(path).map_err(store_error)?;
    let group = db.create_group(draft).map_err(store_error)?;
    db.flush().map_err(store_error)?;
    debug!(group = %group.id, path = %path.display(), "seeded board");
    Ok(group.id)
}

/// Interactive first-time setup
///
/// Prompts for the board name and location, then for the first group's
/// title and tab label. Leaving the group title blank registers an empty
/// board.
///
/// # Errors
///
/// Returns `ConfigError` if the data directory cannot be determined, input
/// cannot be read, the first group cannot be created or the configuration
/// cannot be saved.
pub fn first_time_setup() -> Result<BoardConfig, ConfigError> {
    println!("Welcome to ideaboard! Let's set up your first board.\n");

    let data_dir = dirs::data_local_dir()
        .ok_or_else(|| ConfigError::Message("Could not determine data directory".to_string()))?
        .join("ideaboard");

    let name = ask("Board name", Some("default".to_string()))?;
    let location = ask("Board location", Some(data_dir.join(&name).to_string_lossy().to_string()))?;
    let config = board_config(&name, PathBuf::from(location));

    let title = ask("First group title (blank to skip)", None)?;
    if !title.trim().is_empty() {
        let short_title = ask("Short title for the tab", Some(title.trim().to_string()))?;
        if let Some(draft) = first_group(&title, &short_title)
            && let Some(path) = config.get_database(&name)
        {
            let id = seed_board(path, draft)?;
            println!("Created group {id}");
        }
    }

    config.save()?;

    println!("\nConfiguration saved successfully!");
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_first_group_defaults_short_title() {
        let draft = first_group("  Wood shop ", "").unwrap();
        assert_eq!(draft.title, "Wood shop");
        assert_eq!(draft.short_title, "Wood shop");
        assert!(!draft.public);

        let draft = first_group("Wood shop", " Shop ").unwrap();
        assert_eq!(draft.short_title, "Shop");
    }

    #[test]
    fn test_blank_title_skips_first_group() {
        assert!(first_group("", "Shop").is_none());
        assert!(first_group("   ", "").is_none());
    }

    #[test]
    fn test_board_config_registers_default() {
        let config = board_config("garage", PathBuf::from("/tmp/garage"));
        assert_eq!(config.get_default_database().map(String::as_str), Some("garage"));
        assert_eq!(config.resolve_database(None).unwrap().1, &PathBuf::from("/tmp/garage"));
    }

    #[test]
    fn test_seed_board_creates_first_group() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("board");
        let id = seed_board(&path, first_group("Wood shop", "Shop").unwrap()).unwrap();

        let db = Database::open(&path).unwrap();
        let group = db.require_group(id).unwrap();
        assert_eq!(group.short_title, "Shop");
        assert_eq!(db.default_group().unwrap(), Some(id));
    }
}
