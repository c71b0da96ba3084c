//! Backup stage: point-in-time snapshots of prompts and their category
//! relations, written to the backup directory before anything is deleted.

use std::fs;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::domain::types::PromptId;
use crate::migration::MigrationError;
use crate::repository::PromptReader;

/// Full prompt records with nested category detail.
pub const PROMPTS_BACKUP_FILE: &str = "prompts-backup.json";
/// Flattened relation tuples consumed by the reassignment stage.
pub const RELATIONS_BACKUP_FILE: &str = "prompt-category-relations.json";

/// One backed-up prompt/category relation, keyed by the English display
/// names that were live at backup time.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RelationTuple {
    pub prompt_id: PromptId,
    pub old_category_name: String,
    pub old_subcategory_name: String,
}

/// Outcome of the backup stage, returned to the caller so the relation list
/// can be reused without a redundant disk read.
#[derive(Debug, Clone)]
pub struct BackupSnapshot {
    pub prompts_backed_up: usize,
    pub relations: Vec<RelationTuple>,
}

/// Read every prompt with its category links and write both backup files,
/// overwriting any previous run. Any read or write failure aborts the
/// migration; a partial backup is not usable.
pub fn backup_prompts<R>(repo: &R, backup_dir: &Path) -> Result<BackupSnapshot, MigrationError>
where
    R: PromptReader,
{
    fs::create_dir_all(backup_dir)?;

    let prompts = repo.list_prompts_with_categories()?;
    let relations: Vec<RelationTuple> = prompts
        .iter()
        .flat_map(|entry| {
            entry.categories.iter().map(|pair| RelationTuple {
                prompt_id: entry.prompt.id,
                old_category_name: pair.category.name_en.as_str().to_string(),
                old_subcategory_name: pair.subcategory.name_en.as_str().to_string(),
            })
        })
        .collect();

    write_pretty_json(&backup_dir.join(PROMPTS_BACKUP_FILE), &prompts)?;
    write_pretty_json(&backup_dir.join(RELATIONS_BACKUP_FILE), &relations)?;

    log::info!(
        "Backed up {} prompts and {} category relations to {}",
        prompts.len(),
        relations.len(),
        backup_dir.display()
    );

    Ok(BackupSnapshot {
        prompts_backed_up: prompts.len(),
        relations,
    })
}

/// Read the relation tuples written by a previous [`backup_prompts`] run.
pub fn load_relation_tuples(backup_dir: &Path) -> Result<Vec<RelationTuple>, MigrationError> {
    let file = fs::File::open(backup_dir.join(RELATIONS_BACKUP_FILE))?;
    Ok(serde_json::from_reader(BufReader::new(file))?)
}

pub(crate) fn write_pretty_json<T: Serialize>(
    path: &Path,
    value: &T,
) -> Result<(), MigrationError> {
    let file = fs::File::create(path)?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, value)?;
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::DateTime;

    use crate::domain::category::Category;
    use crate::domain::types::{CategoryId, CategoryName, CategorySlug, IconName, SortOrder};
    use crate::repository::test::TestRepository;

    fn sample_category(id: i32, name_en: &str, slug: &str, parent_id: Option<i32>) -> Category {
        let epoch = DateTime::from_timestamp(0, 0).unwrap().naive_utc();
        Category {
            id: CategoryId::new(id).unwrap(),
            name_en: CategoryName::new(name_en).unwrap(),
            name_ar: CategoryName::new(name_en).unwrap(),
            slug: CategorySlug::new(slug).unwrap(),
            icon: IconName::new("pen").unwrap(),
            sort_order: SortOrder::new(0).unwrap(),
            parent_id: parent_id.map(|id| CategoryId::new(id).unwrap()),
            created_at: epoch,
            updated_at: epoch,
        }
    }

    #[test]
    fn backup_captures_one_tuple_per_relation_with_live_names() {
        let repo = TestRepository::default()
            .with_categories(vec![
                sample_category(1, "Content Creation", "content-creation", None),
                sample_category(2, "Blog Writing", "blog-writing", Some(1)),
            ])
            .with_prompt("Blog post outline", "مخطط تدوينة", false)
            .with_prompt("Unlinked prompt", "بدون تصنيف", false)
            .with_link(1, 1, 2);
        let dir = tempfile::tempdir().unwrap();

        let snapshot = backup_prompts(&repo, dir.path()).unwrap();

        assert_eq!(snapshot.prompts_backed_up, 2);
        assert_eq!(
            snapshot.relations,
            vec![RelationTuple {
                prompt_id: crate::domain::types::PromptId::new(1).unwrap(),
                old_category_name: "Content Creation".to_string(),
                old_subcategory_name: "Blog Writing".to_string(),
            }]
        );
        assert!(dir.path().join(PROMPTS_BACKUP_FILE).exists());

        let reloaded = load_relation_tuples(dir.path()).unwrap();
        assert_eq!(reloaded, snapshot.relations);
    }
}
