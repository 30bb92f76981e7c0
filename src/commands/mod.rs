//! Command implementations
//!
//! Each command is a module with an execute function that takes parsed CLI args
//! and executes the operation against the database.

use crate::BoardError;
use dialoguer::Confirm;

pub mod board;
pub mod category;
pub mod entry;
pub mod group;
pub mod selector;
pub mod tag;

pub use board::execute as board;
pub use category::execute as category;
pub use entry::execute as entry;
pub use group::execute as group;
pub use selector::execute as selector;
pub use tag::execute as tag;

type Result<T> = std::result::Result<T, BoardError>;

/// Prompt user for yes/no confirmation using dialoguer
///
/// Skipped (treated as yes) when `assume_yes` is set.
///
/// # Errors
/// Returns `BoardError::InvalidInput` if the prompt cannot be shown.
pub fn confirm(prompt: &str, assume_yes: bool) -> Result<bool> {
    if assume_yes {
        return Ok(true);
    }

    Confirm::new()
        .with_prompt(prompt)
        .interact()
        .map_err(|e| BoardError::InvalidInput(format!("Confirmation failed: {e}")))
}
