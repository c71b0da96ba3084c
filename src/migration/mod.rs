//! The taxonomy reorganization pipeline.
//!
//! Two separately invoked flows share this module:
//!
//! 1. [`run_migration`] snapshots every prompt and its category relations
//!    to disk, writes the human-readable mapping guide, then atomically
//!    replaces the taxonomy (delete all links and categories, seed the new
//!    tree) in a single transaction.
//! 2. [`run_reassignment`] later reads the relation snapshot back and
//!    recreates prompt links against the freshly seeded tree by name,
//!    accumulating per-tuple statistics instead of aborting.
//!
//! Stage-level failures abort and propagate; per-tuple failures during
//! reassignment are recorded and the loop continues.

use std::path::Path;

use serde::Serialize;
use thiserror::Error;

use crate::domain::taxonomy::{TaxonomyCategory, TaxonomyError, TaxonomyReplaceSummary};
use crate::migration::mapping::CategoryMappings;
use crate::migration::reassign::ReassignmentOutcome;
use crate::repository::errors::RepositoryError;
use crate::repository::{CategoryReader, CategoryWriter, PromptReader, PromptWriter};

pub mod backup;
pub mod guide;
pub mod mapping;
pub mod reassign;

/// Errors that abort a pipeline stage.
#[derive(Debug, Error)]
pub enum MigrationError {
    #[error("backup i/o error: {0}")]
    Io(#[from] std::io::Error),
    #[error("backup serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
    #[error("invalid taxonomy definition: {0}")]
    Taxonomy(#[from] TaxonomyError),
}

/// Row counts reported after a completed migration run.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct MigrationReport {
    pub prompts_backed_up: usize,
    pub relations_backed_up: usize,
    pub taxonomy: TaxonomyReplaceSummary,
}

/// Backup → mapping guide → transactional reset and reseed.
///
/// The backup is written before anything is deleted; if any write fails the
/// run aborts with the database untouched.
pub fn run_migration<R>(
    repo: &R,
    backup_dir: &Path,
    taxonomy: &[TaxonomyCategory],
    mappings: &CategoryMappings,
) -> Result<MigrationReport, MigrationError>
where
    R: PromptReader + CategoryReader + CategoryWriter,
{
    log::info!("Starting taxonomy migration");

    let snapshot = backup::backup_prompts(repo, backup_dir)?;
    guide::write_mapping_guide(mappings, backup_dir)?;

    let taxonomy_summary = repo.replace_taxonomy(taxonomy)?;
    log::info!(
        "Replaced taxonomy: removed {} links and {} categories, seeded {} categories with {} subcategories",
        taxonomy_summary.reset.links_deleted,
        taxonomy_summary.reset.categories_deleted,
        taxonomy_summary.seeded.categories_created,
        taxonomy_summary.seeded.subcategories_created,
    );

    Ok(MigrationReport {
        prompts_backed_up: snapshot.prompts_backed_up,
        relations_backed_up: snapshot.relations.len(),
        taxonomy: taxonomy_summary,
    })
}

/// Recreate prompt links from the relation snapshot in `backup_dir`.
pub fn run_reassignment<R>(
    repo: &R,
    backup_dir: &Path,
    mappings: &CategoryMappings,
) -> Result<ReassignmentOutcome, MigrationError>
where
    R: PromptReader + PromptWriter + CategoryReader,
{
    let tuples = backup::load_relation_tuples(backup_dir)?;
    log::info!("Loaded {} backed-up category relations", tuples.len());
    reassign::reassign_prompts(repo, &tuples, mappings, backup_dir)
}
