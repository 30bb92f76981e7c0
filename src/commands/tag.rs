//! Tag command - create, rename, move and remove tags

use super::{Result, confirm};
use crate::{cli::TagCommands, db::Database, models::NewTag, output};
use std::collections::HashMap;

/// Execute a tag subcommand
///
/// # Errors
/// Returns an error if validation, database operations or confirmation fail
pub fn execute(db: &Database, command: &TagCommands, quiet: bool) -> Result<()> {
    match command {
        TagCommands::Add { group, name, category } => {
            let tag = db.create_tag(NewTag { group: *group, name: name.clone(), category: *category })?;
            if quiet {
                println!("{}", tag.id);
            } else {
                println!("Created tag {} ({})", tag.id, tag.name);
            }
        }
        TagCommands::List { group } => {
            let tags = db.list_tags(*group)?;
            if tags.is_empty() {
                if !quiet {
                    println!("No tags found.");
                }
                return Ok(());
            }
            let usage = db.tag_usage_counts()?;
            let categories: HashMap<_, _> = db
                .list_categories(*group)?
                .into_iter()
                .map(|c| (c.id, c.name))
                .collect();
            if !quiet {
                println!("Tags:");
            }
            for tag in &tags {
                let category = tag.category.and_then(|id| categories.get(&id)).map(String::as_str);
                let count = usage.get(&tag.id).copied().unwrap_or(0);
                println!("{}", output::tag_line(tag, category, count, quiet));
            }
        }
        TagCommands::Rename { id, name } => match db.rename_tag(*id, name)? {
            Some(tag) => {
                if !quiet {
                    println!("Renamed tag {} to '{}'", tag.id, tag.name);
                }
            }
            None => {
                if !quiet {
                    println!("Empty name given; deleted tag {id}");
                }
            }
        },
        TagCommands::Move { id, category } => {
            let tag = db.set_tag_category(*id, *category)?;
            if !quiet {
                match tag.category {
                    Some(category) => println!("Moved tag '{}' to category {category}", tag.name),
                    None => println!("Tag '{}' is now uncategorized", tag.name),
                }
            }
        }
        TagCommands::Remove { id, yes } => {
            let tag = db.require_tag(*id)?;
            let used_by = db.tag_usage_counts()?.get(id).copied().unwrap_or(0);
            let prompt = format!("Remove tag '{}' from {used_by} entry(s) and delete it?", tag.name);
            if !confirm(&prompt, *yes || quiet)? {
                if !quiet {
                    println!("Cancelled.");
                }
                return Ok(());
            }
            db.delete_tag(*id)?;
            if !quiet {
                println!("Deleted tag '{}'", tag.name);
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::TestDb;

    #[test]
    fn test_rename_to_blank_deletes() {
        let test_db = TestDb::new();
        let shop = test_db.group("Shop");
        let saw = test_db.tag(shop, "saw", None);
        let bench = test_db.entry(shop, "Bench", &[saw]);

        execute(test_db.db(), &TagCommands::Rename { id: saw, name: "   ".into() }, true).unwrap();
        assert!(test_db.db().get_tag(saw).unwrap().is_none());
        assert!(test_db.db().require_entry(bench).unwrap().tags.is_empty());
    }

    #[test]
    fn test_move_in_and_out_of_category() {
        let test_db = TestDb::new();
        let shop = test_db.group("Shop");
        let tools = test_db.category(shop, "Tools");
        let saw = test_db.tag(shop, "saw", None);

        execute(test_db.db(), &TagCommands::Move { id: saw, category: Some(tools) }, true).unwrap();
        assert_eq!(test_db.db().require_tag(saw).unwrap().category, Some(tools));

        execute(test_db.db(), &TagCommands::Move { id: saw, category: None }, true).unwrap();
        assert_eq!(test_db.db().require_tag(saw).unwrap().category, None);
    }

    #[test]
    fn test_add_into_missing_category_fails() {
        let test_db = TestDb::new();
        let shop = test_db.group("Shop");
        let add = TagCommands::Add {
            group: shop,
            name: "saw".into(),
            category: Some(crate::db::CategoryId::new(99)),
        };
        assert!(execute(test_db.db(), &add, true).is_err());
    }
}
