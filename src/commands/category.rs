//! Category command - manage facets

use super::{Result, confirm};
use crate::{cli::CategoryCommands, db::Database, models::NewCategory, output};

/// Execute a category subcommand
///
/// # Errors
/// Returns an error if validation, database operations or confirmation fail
pub fn execute(db: &Database, command: &CategoryCommands, quiet: bool) -> Result<()> {
    match command {
        CategoryCommands::Add { group, name, description } => {
            let category = db.create_category(NewCategory {
                group: *group,
                name: name.clone(),
                description: description.clone(),
            })?;
            if quiet {
                println!("{}", category.id);
            } else {
                println!("Created category {} ({})", category.id, category.name);
            }
        }
        CategoryCommands::List { group } => {
            let categories = db.list_categories(*group)?;
            if categories.is_empty() {
                if !quiet {
                    println!("No categories found.");
                }
                return Ok(());
            }
            let counts = db.category_tag_counts(None)?;
            if !quiet {
                println!("Categories:");
            }
            for category in &categories {
                let count = counts.get(&category.id).copied().unwrap_or(0);
                println!("{}", output::category_line(category, count, quiet));
            }
        }
        CategoryCommands::Edit { id, name, description } => {
            let mut category = db.require_category(*id)?;
            if let Some(name) = name {
                category.name.clone_from(name);
            }
            if let Some(description) = description {
                category.description.clone_from(description);
            }
            let category = db.update_category(&category)?;
            if !quiet {
                println!("Updated category {}", category.id);
            }
        }
        CategoryCommands::Remove { id, yes } => {
            let category = db.require_category(*id)?;
            let tag_count = db.category_tag_counts(None)?.get(id).copied().unwrap_or(0);
            let prompt = format!("Delete category '{}' and its {tag_count} tag(s)?", category.name);
            if !confirm(&prompt, *yes || quiet)? {
                if !quiet {
                    println!("Cancelled.");
                }
                return Ok(());
            }
            db.delete_category(*id)?;
            if !quiet {
                println!("Deleted category {id}");
            }
        }
    }
    Ok(())
}
