//! Ideaboard - an idea board organised by faceted tags
//!
//! Entries live in groups (the board's tabs) and carry tags. Tags may belong
//! to a category (a facet). This library stores all of it in an embedded
//! database, filters boards by tag, and renders the faceted tag selector
//! used by entry forms.

use thiserror::Error;

pub mod board;
pub mod cli;
pub mod commands;
pub mod config;
pub mod db;
pub mod facets;
pub mod models;
pub mod output;

#[cfg(test)]
pub mod testing;

/// Error enum, contains all failure states of the program
#[derive(Debug, Error)]
pub enum BoardError {
    /// Database error
    #[error("Database error: {0}")]
    DbError(#[from] db::DbError),
    /// Selector rendering error
    #[error("Selector error: {0}")]
    FacetError(#[from] facets::FacetError),
    /// Represents a configuration error
    #[error("Configuration error: {0}")]
    ConfigError(#[from] ::config::ConfigError),
    /// Represents an I/O error
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
    /// JSON output error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
    /// Invalid input error
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}
