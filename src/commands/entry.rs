//! Entry command - post, edit, show and remove ideas

use super::{Result, confirm};
use crate::{cli::EntryCommands, db::Database, models::Entry, models::NewEntry, output};

/// Names of an entry's tags, in the order stored on the entry
///
/// # Errors
/// Returns an error if a tag cannot be read.
pub fn tag_names(db: &Database, entry: &Entry) -> Result<Vec<String>> {
    let mut names = Vec::with_capacity(entry.tags.len());
    for id in &entry.tags {
        if let Some(tag) = db.get_tag(*id)? {
            names.push(tag.name);
        }
    }
    Ok(names)
}

fn print_entry(db: &Database, entry: &Entry, full: bool, quiet: bool) -> Result<()> {
    let names = tag_names(db, entry)?;
    let names: Vec<&str> = names.iter().map(String::as_str).collect();
    if full {
        println!("{}", output::entry_detail(entry, &names, quiet));
    } else {
        println!("{}", output::entry_line(entry, &names, quiet));
    }
    Ok(())
}

/// Execute an entry subcommand
///
/// # Errors
/// Returns an error if validation, database operations or confirmation fail
pub fn execute(db: &Database, command: &EntryCommands, quiet: bool) -> Result<()> {
    match command {
        EntryCommands::Add { group, title, body, tags } => {
            let entry = db.create_entry(NewEntry {
                group: *group,
                title: title.clone(),
                body: body.clone(),
                tags: tags.clone(),
            })?;
            if quiet {
                println!("{}", entry.id);
            } else {
                println!("Posted entry {}", entry.id);
                print_entry(db, &entry, false, quiet)?;
            }
        }
        EntryCommands::Edit { id, title, body, tags, clear_tags } => {
            let mut entry = db.require_entry(*id)?;
            if let Some(title) = title {
                entry.title.clone_from(title);
            }
            if let Some(body) = body {
                entry.body.clone_from(body);
            }
            if *clear_tags {
                entry.tags.clear();
            } else if !tags.is_empty() {
                entry.tags.clone_from(tags);
            }
            let entry = db.update_entry(&entry)?;
            if !quiet {
                println!("Updated entry {}", entry.id);
            }
        }
        EntryCommands::Show { id } => {
            let entry = db.require_entry(*id)?;
            print_entry(db, &entry, true, quiet)?;
        }
        EntryCommands::Remove { id, yes } => {
            let entry = db.require_entry(*id)?;
            if !confirm(&format!("Delete entry '{}'?", entry.title), *yes || quiet)? {
                if !quiet {
                    println!("Cancelled.");
                }
                return Ok(());
            }
            db.delete_entry(*id)?;
            if !quiet {
                println!("Deleted entry {id}");
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::BoardError;
    use crate::db::{DbError, TagId};
    use crate::testing::TestDb;

    #[test]
    fn test_add_requires_title() {
        let test_db = TestDb::new();
        let shop = test_db.group("Shop");
        let add = EntryCommands::Add { group: shop, title: String::new(), body: String::new(), tags: vec![] };
        let err = execute(test_db.db(), &add, true).unwrap_err();
        assert!(matches!(err, BoardError::DbError(DbError::InvalidInput(ref m)) if m == "Oops, your idea needs a title."));
    }

    #[test]
    fn test_edit_replaces_and_clears_tags() {
        let test_db = TestDb::new();
        let shop = test_db.group("Shop");
        let saw = test_db.tag(shop, "saw", None);
        let glue = test_db.tag(shop, "glue", None);
        let bench = test_db.entry(shop, "Bench", &[saw]);

        let edit = EntryCommands::Edit { id: bench, title: None, body: None, tags: vec![glue], clear_tags: false };
        execute(test_db.db(), &edit, true).unwrap();
        assert_eq!(test_db.db().require_entry(bench).unwrap().tags, vec![glue]);

        let keep = EntryCommands::Edit { id: bench, title: Some("Big bench".into()), body: None, tags: vec![], clear_tags: false };
        execute(test_db.db(), &keep, true).unwrap();
        let entry = test_db.db().require_entry(bench).unwrap();
        assert_eq!(entry.title, "Big bench");
        assert_eq!(entry.tags, vec![glue]);

        let clear = EntryCommands::Edit { id: bench, title: None, body: None, tags: vec![], clear_tags: true };
        execute(test_db.db(), &clear, true).unwrap();
        assert!(test_db.db().require_entry(bench).unwrap().tags.is_empty());
    }

    #[test]
    fn test_tag_names_skip_missing() {
        let test_db = TestDb::new();
        let shop = test_db.group("Shop");
        let saw = test_db.tag(shop, "saw", None);
        let bench = test_db.entry(shop, "Bench", &[saw]);
        let mut entry = test_db.db().require_entry(bench).unwrap();
        entry.tags.push(TagId::new(999));
        assert_eq!(tag_names(test_db.db(), &entry).unwrap(), vec!["saw"]);
    }

    #[test]
    fn test_remove() {
        let test_db = TestDb::new();
        let shop = test_db.group("Shop");
        let bench = test_db.entry(shop, "Bench", &[]);
        execute(test_db.db(), &EntryCommands::Remove { id: bench, yes: true }, true).unwrap();
        assert!(test_db.db().get_entry(bench).unwrap().is_none());
    }
}
