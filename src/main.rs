//! Ideaboard CLI application entry point
//!
//! This is the main executable for the ideaboard idea board. It provides a
//! command-line interface for managing groups, categories, tags and entries,
//! browsing boards by tag, and printing the faceted tag selector.
//!
//! # Usage
//!
//! ```bash
//! # Set up a group with a category and a few tags
//! ideaboard group add "Wood shop" --short Shop
//! ideaboard category add 1 Tools
//! ideaboard tag add 1 saw --category 2
//! ideaboard tag add 1 someday
//!
//! # Post an idea
//! ideaboard entry add 1 "Workbench" --body "Heavy top, vise on the left" -t 3
//!
//! # Browse the board, filtered by tag
//! ideaboard board 1 --tag 3
//! ideaboard board --query "tag=3&expand=5"
//!
//! # Print the selector markup for an entry form
//! ideaboard selector --entry 5 --id-base id_tags
//!
//! # Quiet mode (only output results), debug logging to stderr
//! ideaboard -q tag list
//! ideaboard -v board
//! ```
//!
//! # Configuration
//!
//! On first run, ideaboard will prompt for initial setup. Configuration is
//! stored in the user's config directory (`~/.config/ideaboard/config.toml`
//! on Linux).

use ideaboard::{
    BoardError,
    cli::{Cli, Commands, ConfigCommands, DbCommands},
    commands::{self, board::BoardArgs},
    config::BoardConfig,
    db::Database,
};
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

type Result<T> = std::result::Result<T, BoardError>;

const CONFIG_KEYS: &str = "quiet, log_level";

/// Install the stderr log subscriber; `RUST_LOG` wins over `default_filter`
fn init_logging(default_filter: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Handle database management commands
///
/// # Errors
///
/// Returns `BoardError` if configuration changes cannot be saved or
/// directories cannot be created.
fn handle_db_command(mut config: BoardConfig, command: &DbCommands, quiet: bool) -> Result<()> {
    match command {
        DbCommands::Add { name, path } => {
            if config.get_database(name).is_some() {
                return Err(BoardError::InvalidInput(format!("Database '{name}' already exists")));
            }

            let resolved_path = if path.components().count() == 1 {
                let data_dir = dirs::data_local_dir()
                    .ok_or_else(|| BoardError::InvalidInput("Could not determine data directory".into()))?;
                data_dir.join("ideaboard").join(path)
            } else {
                path.clone()
            };

            config.add_database(name.clone(), resolved_path.clone())?;

            if !resolved_path.exists() {
                std::fs::create_dir_all(&resolved_path)?;
            }

            if !quiet {
                println!("Database '{name}' added at {}", resolved_path.display());
            }

            if config.databases.len() == 1 {
                config.set_default_database(name.clone())?;
                if !quiet {
                    println!("Set '{name}' as default database");
                }
            }
        }
        DbCommands::List => {
            if config.databases.is_empty() {
                if !quiet {
                    println!("No databases configured.");
                    println!("Add one with: ideaboard db add <name> <path>");
                }
                return Ok(());
            }

            if !quiet {
                println!("Configured databases:");
            }

            let default_db = config.get_default_database();
            for name in config.list_databases() {
                if let Some(path) = config.get_database(name) {
                    if quiet {
                        println!("{name}");
                    } else {
                        let marker = if default_db == Some(name) { " (default)" } else { "" };
                        println!("  {name} -> {}{marker}", path.display());
                    }
                }
            }
        }
        DbCommands::Remove { name, delete_files } => {
            if config.get_database(name).is_none() {
                return Err(BoardError::InvalidInput(format!("Database '{name}' does not exist")));
            }

            if config.get_default_database() == Some(name) && !quiet {
                println!("Warning: Removing the default database. You'll need to set a new default.");
            }

            if let Some(path) = config.remove_database(name)? {
                if !quiet {
                    println!("Database '{name}' removed from configuration");
                }

                if *delete_files {
                    if path.exists() {
                        match std::fs::remove_dir_all(&path) {
                            Ok(()) => {
                                if !quiet {
                                    println!("Database files deleted from {}", path.display());
                                }
                            }
                            Err(e) => warn!(path = %path.display(), error = %e, "failed to delete database files"),
                        }
                    } else if !quiet {
                        println!("Database files at {} do not exist (already deleted)", path.display());
                    }
                } else if !quiet {
                    println!("Note: Database files at {} were NOT deleted", path.display());
                }
            }
        }
        DbCommands::SetDefault { name } => {
            if config.get_database(name).is_none() {
                return Err(BoardError::InvalidInput(format!("Database '{name}' does not exist")));
            }

            config.set_default_database(name.clone())?;

            if !quiet {
                println!("Set '{name}' as default database");
            }
        }
    }
    Ok(())
}

/// Apply `key=value` to the configuration without saving
///
/// # Errors
///
/// Returns `BoardError::InvalidInput` for malformed settings, unknown keys
/// or values that do not parse.
fn apply_setting(config: &mut BoardConfig, setting: &str) -> Result<String> {
    let (key, value) = setting
        .split_once('=')
        .ok_or_else(|| BoardError::InvalidInput("Invalid format. Use: ideaboard config set key=value".into()))?;
    let (key, value) = (key.trim(), value.trim());

    match key {
        "quiet" => {
            config.quiet = value.parse::<bool>().map_err(|_| {
                BoardError::InvalidInput(format!("Invalid value for quiet: '{value}'. Use 'true' or 'false'"))
            })?;
            Ok(format!("quiet = {}", config.quiet))
        }
        "log_level" => {
            if value.is_empty() {
                config.log_level = None;
                return Ok("log_level unset".to_string());
            }
            EnvFilter::try_new(value).map_err(|e| {
                BoardError::InvalidInput(format!("Invalid value for log_level: '{value}' ({e})"))
            })?;
            config.log_level = Some(value.to_string());
            Ok(format!("log_level = {value}"))
        }
        _ => Err(BoardError::InvalidInput(format!(
            "Unknown configuration key: '{key}'. Available keys: {CONFIG_KEYS}"
        ))),
    }
}

/// Read one configuration value as displayed by `config get`
///
/// # Errors
///
/// Returns `BoardError::InvalidInput` for unknown keys.
fn read_setting(config: &BoardConfig, key: &str) -> Result<String> {
    match key {
        "quiet" => Ok(config.quiet.to_string()),
        "log_level" => Ok(config.log_filter(false).to_string()),
        _ => Err(BoardError::InvalidInput(format!(
            "Unknown configuration key: '{key}'. Available keys: {CONFIG_KEYS}"
        ))),
    }
}

/// Handle configuration commands
///
/// # Errors
///
/// Returns `BoardError` if the setting is invalid or cannot be saved.
fn handle_config_command(mut config: BoardConfig, command: &ConfigCommands, quiet: bool) -> Result<()> {
    match command {
        ConfigCommands::Set { setting } => {
            let message = apply_setting(&mut config, setting)?;
            config.save()?;
            if !quiet {
                println!("Set {message}");
            }
        }
        ConfigCommands::Get { key } => println!("{}", read_setting(&config, key)?),
    }
    Ok(())
}

/// Run a command that works against a board database
///
/// # Errors
///
/// Returns `BoardError` from the command.
fn run_board_command(db: &Database, command: &Commands, quiet: bool) -> Result<()> {
    match command {
        Commands::Group { command, .. } => commands::group(db, command, quiet),
        Commands::Category { command, .. } => commands::category(db, command, quiet),
        Commands::Tag { command, .. } => commands::tag(db, command, quiet),
        Commands::Entry { command, .. } => commands::entry(db, command, quiet),
        Commands::Board { group, query, tags, show_empty, expand, json, .. } => {
            let args = BoardArgs {
                query: query.clone(),
                tags: tags.clone(),
                show_empty: *show_empty,
                expand: *expand,
            };
            commands::board(db, *group, &args, *json, quiet)
        }
        Commands::Selector { group, entry, name, id_base, select, .. } => {
            commands::selector(db, *group, *entry, name, id_base.as_deref(), select)
        }
        Commands::Db { .. } | Commands::Config { .. } => Err(BoardError::InvalidInput(
            "Database and config commands do not open a board".into(),
        )),
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse_args();

    let config = BoardConfig::load_or_setup()?;
    init_logging(config.log_filter(cli.verbose));

    let quiet = cli.quiet || config.quiet;

    match &cli.command {
        Commands::Db { command } => handle_db_command(config, command, quiet),
        Commands::Config { command } => handle_config_command(config, command, quiet),
        command => {
            let (name, path) = config.resolve_database(command.get_db())?;
            debug!(database = name, path = %path.display(), "opening board");
            let db = Database::open(path)?;
            run_board_command(&db, command, quiet)?;
            db.flush()?;
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_quiet_setting() {
        let mut config = BoardConfig::default();
        assert_eq!(apply_setting(&mut config, "quiet = true").unwrap(), "quiet = true");
        assert!(config.quiet);
        assert!(apply_setting(&mut config, "quiet=maybe").is_err());
        assert!(config.quiet);
    }

    #[test]
    fn test_apply_log_level_setting() {
        let mut config = BoardConfig::default();
        apply_setting(&mut config, "log_level=ideaboard=debug").unwrap();
        assert_eq!(config.log_level.as_deref(), Some("ideaboard=debug"));
        assert_eq!(read_setting(&config, "log_level").unwrap(), "ideaboard=debug");

        apply_setting(&mut config, "log_level=").unwrap();
        assert!(config.log_level.is_none());
        assert_eq!(read_setting(&config, "log_level").unwrap(), "warn");
    }

    #[test]
    fn test_unknown_and_malformed_settings() {
        let mut config = BoardConfig::default();
        let err = apply_setting(&mut config, "colour=red").unwrap_err();
        assert!(err.to_string().contains("Available keys: quiet, log_level"));
        assert!(apply_setting(&mut config, "quiet").is_err());
        assert!(read_setting(&config, "colour").is_err());
    }
}
