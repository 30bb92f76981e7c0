//! Group command - manage the board's tabs

use super::{Result, confirm};
use crate::{cli::GroupCommands, db::Database, models::NewGroup, output};

/// Execute a group subcommand
///
/// # Errors
/// Returns an error if validation, database operations or confirmation fail
pub fn execute(db: &Database, command: &GroupCommands, quiet: bool) -> Result<()> {
    match command {
        GroupCommands::Add { title, short_title, description, public } => {
            let group = db.create_group(NewGroup {
                title: title.clone(),
                short_title: short_title.clone().unwrap_or_else(|| title.clone()),
                description: description.clone(),
                public: *public,
            })?;
            if quiet {
                println!("{}", group.id);
            } else {
                println!("Created group {} ({})", group.id, group.short_title);
            }
        }
        GroupCommands::List => {
            let groups = db.list_groups()?;
            if groups.is_empty() {
                if !quiet {
                    println!("No groups found in database.");
                }
                return Ok(());
            }
            if !quiet {
                println!("Groups:");
            }
            for group in &groups {
                println!("{}", output::group_line(group, quiet));
            }
        }
        GroupCommands::Edit { id, title, short_title, description, public } => {
            let mut group = db.require_group(*id)?;
            if let Some(title) = title {
                group.title.clone_from(title);
            }
            if let Some(short_title) = short_title {
                group.short_title.clone_from(short_title);
            }
            if let Some(description) = description {
                group.description.clone_from(description);
            }
            if let Some(public) = public {
                group.public = *public;
            }
            let group = db.update_group(&group)?;
            if !quiet {
                println!("Updated group {}", group.id);
            }
        }
        GroupCommands::Remove { id, yes } => {
            let group = db.require_group(*id)?;
            let prompt = format!(
                "Delete group '{}' with all its categories, tags and entries?",
                group.short_title
            );
            if !confirm(&prompt, *yes || quiet)? {
                if !quiet {
                    println!("Cancelled.");
                }
                return Ok(());
            }
            db.delete_group(*id)?;
            if !quiet {
                println!("Deleted group {id}");
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::GroupId;
    use crate::testing::TestDb;

    #[test]
    fn test_add_defaults_short_title() {
        let test_db = TestDb::new();
        let command = GroupCommands::Add {
            title: "Workshop".into(),
            short_title: None,
            description: String::new(),
            public: true,
        };
        execute(test_db.db(), &command, true).unwrap();

        let groups = test_db.db().list_groups().unwrap();
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].short_title, "Workshop");
        assert!(groups[0].public);
    }

    #[test]
    fn test_edit_changes_only_given_fields() {
        let test_db = TestDb::new();
        let shop = test_db.group("Shop");
        let command = GroupCommands::Edit {
            id: shop,
            title: Some("Wood shop".into()),
            short_title: None,
            description: None,
            public: Some(true),
        };
        execute(test_db.db(), &command, true).unwrap();

        let group = test_db.db().require_group(shop).unwrap();
        assert_eq!(group.title, "Wood shop");
        assert_eq!(group.short_title, "Shop");
        assert!(group.public);
    }

    #[test]
    fn test_edit_rejects_blank_title() {
        let test_db = TestDb::new();
        let shop = test_db.group("Shop");
        let command = GroupCommands::Edit {
            id: shop,
            title: Some("  ".into()),
            short_title: None,
            description: None,
            public: None,
        };
        assert!(execute(test_db.db(), &command, true).is_err());
    }

    #[test]
    fn test_remove_missing_group_fails() {
        let test_db = TestDb::new();
        let command = GroupCommands::Remove { id: GroupId::new(42), yes: true };
        assert!(execute(test_db.db(), &command, true).is_err());
    }

    #[test]
    fn test_remove_cascades() {
        let test_db = TestDb::new();
        let shop = test_db.group("Shop");
        let saw = test_db.tag(shop, "saw", None);
        test_db.entry(shop, "Bench", &[saw]);

        execute(test_db.db(), &GroupCommands::Remove { id: shop, yes: true }, true).unwrap();
        assert!(test_db.db().list_tags(None).unwrap().is_empty());
        assert_eq!(test_db.db().count(), 0);
    }
}
