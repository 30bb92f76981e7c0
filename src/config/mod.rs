//! Configuration module for ideaboard
//!
//! Manages application configuration including named board databases.
//! Configuration is stored in the user's config directory.

mod setup;

pub use setup::first_time_setup;

use config::{Config, ConfigError, File, FileFormat};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

/// Default `tracing` filter when neither `RUST_LOG` nor `--verbose` is given
pub const DEFAULT_LOG_LEVEL: &str = "warn";

/// Application configuration structure
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct BoardConfig {
    /// Map of database names to their filesystem paths
    #[serde(default)]
    pub databases: HashMap<String, PathBuf>,

    /// The default database to use when none is specified
    #[serde(default)]
    pub default_database: Option<String>,

    /// Suppress informational output by default
    #[serde(default)]
    pub quiet: bool,

    /// `tracing` filter directive, e.g. `info` or `ideaboard=debug`
    #[serde(default)]
    pub log_level: Option<String>,
}

impl BoardConfig {
    /// Get the path to the config file
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the system config directory cannot be determined.
    pub fn config_path() -> Result<PathBuf, ConfigError> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| ConfigError::Message("Could not determine config directory".to_string()))?;

        Ok(config_dir.join("ideaboard").join("config.toml"))
    }

    /// Load configuration from file, creating default if it doesn't exist
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the config file cannot be read, parsed, or created.
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            let default_config = Self::default();
            default_config.save()?;
            return Ok(default_config);
        }

        Self::from_toml_file(config_path)
    }

    /// Parse a configuration from a TOML file at an explicit path
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the file cannot be read or parsed.
    pub fn from_toml_file(path: PathBuf) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::from(path).format(FileFormat::Toml))
            .build()?;

        settings.try_deserialize()
    }

    /// Save configuration to file
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the config directory cannot be created, the configuration
    /// cannot be serialized to TOML, or the file cannot be written.
    pub fn save(&self) -> Result<(), ConfigError> {
        let config_path = Self::config_path()?;

        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| ConfigError::Message(format!("Failed to create config directory: {e}")))?;
        }

        fs::write(&config_path, self.to_toml()?)
            .map_err(|e| ConfigError::Message(format!("Failed to write config file: {e}")))?;

        Ok(())
    }

    /// Serialize to TOML
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the configuration cannot be serialized.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::Message(format!("Failed to serialize config: {e}")))
    }

    /// Add a database to the configuration
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if saving the configuration fails.
    pub fn add_database(&mut self, name: String, path: PathBuf) -> Result<(), ConfigError> {
        self.databases.insert(name, path);
        self.save()
    }

    /// Remove a database from the configuration
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if saving the configuration fails.
    pub fn remove_database(&mut self, name: &str) -> Result<Option<PathBuf>, ConfigError> {
        let removed = self.databases.remove(name);
        if self.default_database.as_deref() == Some(name) {
            self.default_database = None;
        }
        self.save()?;
        Ok(removed)
    }

    /// Get a database path by name
    #[must_use]
    pub fn get_database(&self, name: &str) -> Option<&PathBuf> {
        self.databases.get(name)
    }

    /// List all database names, sorted
    #[must_use]
    pub fn list_databases(&self) -> Vec<&String> {
        let mut names: Vec<&String> = self.databases.keys().collect();
        names.sort();
        names
    }

    /// Set the default database
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the database name doesn't exist in the configuration
    /// or if saving the configuration fails.
    pub fn set_default_database(&mut self, name: String) -> Result<(), ConfigError> {
        self.check_database(&name)?;
        self.default_database = Some(name);
        self.save()
    }

    fn check_database(&self, name: &str) -> Result<(), ConfigError> {
        if self.databases.contains_key(name) {
            Ok(())
        } else {
            Err(ConfigError::Message(format!("Database '{name}' does not exist in configuration")))
        }
    }

    /// Get the default database name
    #[must_use]
    pub const fn get_default_database(&self) -> Option<&String> {
        self.default_database.as_ref()
    }

    /// Resolve the database to open: explicit name first, then the default
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if no name is given and no default is set, or
    /// if the name is not configured.
    pub fn resolve_database(&self, name: Option<&str>) -> Result<(&str, &PathBuf), ConfigError> {
        let name = name.or(self.default_database.as_deref()).ok_or_else(|| {
            ConfigError::Message(
                "No default database set. Use 'ideaboard db add <name> <path>' to create one, or specify --db <name>."
                    .to_string(),
            )
        })?;
        self.databases
            .get_key_value(name)
            .map(|(name, path)| (name.as_str(), path))
            .ok_or_else(|| ConfigError::Message(format!("Database '{name}' not found in configuration")))
    }

    /// Log filter to use when `RUST_LOG` is unset
    #[must_use]
    pub fn log_filter(&self, verbose: bool) -> &str {
        if verbose {
            "debug"
        } else {
            self.log_level.as_deref().unwrap_or(DEFAULT_LOG_LEVEL)
        }
    }

    /// Load configuration, running first-time setup if config doesn't exist
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if loading or creating the configuration fails.
    pub fn load_or_setup() -> Result<Self, ConfigError> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            Self::load()
        } else {
            first_time_setup()
        }
    }
}
