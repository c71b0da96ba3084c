//! Reassignment stage: recreate prompt/category links from the relation
//! snapshot against the freshly seeded taxonomy.
//!
//! Resolution is by exact English name because the seeded identifiers are
//! unknown until the reseed runs; the snapshot's old identifiers are dead.
//! Per tuple, in priority order:
//!
//! 1. prompt gone → `skipped` (an expected race with concurrent admin work)
//! 2. subcategory table hit → resolve both names exactly, link, `reassigned`
//! 3. otherwise map the category name (best-effort) and fall back to that
//!    category's first subcategory in creation order, `reassigned`
//! 4. anything unresolvable, or any per-tuple database error → `failed`
//!
//! No tuple aborts the stage; the statistics and failures file are always
//! produced.

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::domain::category::CategoryTreeNode;
use crate::domain::prompt::NewPromptCategoryLink;
use crate::domain::types::{CategoryId, PromptId};
use crate::migration::MigrationError;
use crate::migration::backup::{RelationTuple, write_pretty_json};
use crate::migration::mapping::CategoryMappings;
use crate::repository::errors::RepositoryResult;
use crate::repository::{CategoryReader, PromptReader, PromptWriter};

/// Unresolved relations land here, overwriting any prior run's file.
pub const FAILURES_FILE: &str = "reassignment-failures.json";

pub const REASON_SUBCATEGORY_NOT_FOUND: &str =
    "Category or subcategory not found in new structure";
pub const REASON_CATEGORY_NOT_FOUND: &str = "Category not found or has no subcategories";

/// Counters accumulated over a reassignment run.
#[derive(Debug, Clone, Copy, Default, Serialize, PartialEq, Eq)]
pub struct ReassignmentStats {
    pub total: usize,
    pub reassigned: usize,
    pub failed: usize,
    pub skipped: usize,
}

/// One unresolved relation, persisted for manual follow-up.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReassignmentFailure {
    pub prompt_id: PromptId,
    pub old_category: String,
    pub old_subcategory: String,
    pub new_category: Option<String>,
    pub new_subcategory: Option<String>,
    pub reason: String,
}

/// Statistics plus the failure detail records of one run.
#[derive(Debug, Clone)]
pub struct ReassignmentOutcome {
    pub stats: ReassignmentStats,
    pub failures: Vec<ReassignmentFailure>,
}

/// Name-keyed index over the live taxonomy tree.
///
/// Subcategories are keyed by a `category:subcategory` composite so equal
/// subcategory names under different parents stay distinct. Matching is
/// exact and case-sensitive.
pub struct TaxonomyIndex {
    categories: HashMap<String, CategoryId>,
    subcategories: HashMap<String, CategoryId>,
    first_subcategory: HashMap<CategoryId, CategoryId>,
}

impl TaxonomyIndex {
    pub fn from_tree(tree: &[CategoryTreeNode]) -> Self {
        let mut categories = HashMap::new();
        let mut subcategories = HashMap::new();
        let mut first_subcategory = HashMap::new();

        for node in tree {
            let category_name = node.category.name_en.as_str();
            categories.insert(category_name.to_string(), node.category.id);
            if let Some(first) = node.children.first() {
                first_subcategory.insert(node.category.id, first.id);
            }
            for child in &node.children {
                subcategories.insert(
                    Self::composite_key(category_name, child.name_en.as_str()),
                    child.id,
                );
            }
        }

        Self {
            categories,
            subcategories,
            first_subcategory,
        }
    }

    fn composite_key(category: &str, subcategory: &str) -> String {
        format!("{category}:{subcategory}")
    }

    pub fn resolve_category(&self, name: &str) -> Option<CategoryId> {
        self.categories.get(name).copied()
    }

    pub fn resolve_subcategory(&self, category: &str, subcategory: &str) -> Option<CategoryId> {
        self.subcategories
            .get(&Self::composite_key(category, subcategory))
            .copied()
    }

    /// The default bucket used for category-only matches: the category's
    /// first child in creation order.
    pub fn default_subcategory(&self, category_id: CategoryId) -> Option<CategoryId> {
        self.first_subcategory.get(&category_id).copied()
    }
}

/// Result of resolving a single relation tuple against the index. Pure:
/// the same tuple, tables and index always produce the same resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Mapped {
        category_id: CategoryId,
        subcategory_id: CategoryId,
    },
    Unresolved {
        new_category: Option<String>,
        new_subcategory: Option<String>,
        reason: &'static str,
    },
}

/// Resolve one tuple: subcategory table first (authoritative), then the
/// best-effort category table with the first-subcategory fallback.
pub fn resolve_tuple(
    tuple: &RelationTuple,
    mappings: &CategoryMappings,
    index: &TaxonomyIndex,
) -> Resolution {
    if let Some((new_category, new_subcategory)) =
        mappings.map_subcategory(&tuple.old_subcategory_name)
    {
        return match index.resolve_subcategory(new_category, new_subcategory) {
            Some(subcategory_id) => match index.resolve_category(new_category) {
                Some(category_id) => Resolution::Mapped {
                    category_id,
                    subcategory_id,
                },
                None => Resolution::Unresolved {
                    new_category: Some(new_category.to_string()),
                    new_subcategory: Some(new_subcategory.to_string()),
                    reason: REASON_SUBCATEGORY_NOT_FOUND,
                },
            },
            None => Resolution::Unresolved {
                new_category: Some(new_category.to_string()),
                new_subcategory: Some(new_subcategory.to_string()),
                reason: REASON_SUBCATEGORY_NOT_FOUND,
            },
        };
    }

    let new_category = mappings.map_category(&tuple.old_category_name);
    let resolved = index
        .resolve_category(new_category)
        .and_then(|category_id| {
            index
                .default_subcategory(category_id)
                .map(|subcategory_id| (category_id, subcategory_id))
        });

    match resolved {
        Some((category_id, subcategory_id)) => Resolution::Mapped {
            category_id,
            subcategory_id,
        },
        None => Resolution::Unresolved {
            new_category: Some(new_category.to_string()),
            new_subcategory: None,
            reason: REASON_CATEGORY_NOT_FOUND,
        },
    }
}

enum TupleOutcome {
    Reassigned,
    Skipped,
    Failed(ReassignmentFailure),
}

fn reassign_one<R>(
    repo: &R,
    tuple: &RelationTuple,
    mappings: &CategoryMappings,
    index: &TaxonomyIndex,
) -> RepositoryResult<TupleOutcome>
where
    R: PromptReader + PromptWriter,
{
    // Prompts deleted between backup and reassignment are expected.
    if repo.get_prompt_by_id(tuple.prompt_id)?.is_none() {
        return Ok(TupleOutcome::Skipped);
    }

    match resolve_tuple(tuple, mappings, index) {
        Resolution::Mapped {
            category_id,
            subcategory_id,
        } => {
            repo.link_prompt_category(&NewPromptCategoryLink {
                prompt_id: tuple.prompt_id,
                category_id,
                subcategory_id,
            })?;
            Ok(TupleOutcome::Reassigned)
        }
        Resolution::Unresolved {
            new_category,
            new_subcategory,
            reason,
        } => Ok(TupleOutcome::Failed(ReassignmentFailure {
            prompt_id: tuple.prompt_id,
            old_category: tuple.old_category_name.clone(),
            old_subcategory: tuple.old_subcategory_name.clone(),
            new_category,
            new_subcategory,
            reason: reason.to_string(),
        })),
    }
}

/// Process every tuple sequentially, classifying each as reassigned,
/// skipped or failed. Per-tuple errors are recorded and the loop continues;
/// only the taxonomy fetch and the failures-file write can abort.
pub fn reassign_prompts<R>(
    repo: &R,
    tuples: &[RelationTuple],
    mappings: &CategoryMappings,
    backup_dir: &Path,
) -> Result<ReassignmentOutcome, MigrationError>
where
    R: PromptReader + PromptWriter + CategoryReader,
{
    let tree = repo.category_tree()?;
    let index = TaxonomyIndex::from_tree(&tree);

    let mut stats = ReassignmentStats::default();
    let mut failures = Vec::new();

    for tuple in tuples {
        stats.total += 1;
        match reassign_one(repo, tuple, mappings, &index) {
            Ok(TupleOutcome::Reassigned) => stats.reassigned += 1,
            Ok(TupleOutcome::Skipped) => {
                stats.skipped += 1;
                log::info!(
                    "Prompt {} no longer exists, skipping relation",
                    tuple.prompt_id
                );
            }
            Ok(TupleOutcome::Failed(failure)) => {
                stats.failed += 1;
                log::warn!(
                    "Could not reassign prompt {} ({} / {}): {}",
                    tuple.prompt_id,
                    tuple.old_category_name,
                    tuple.old_subcategory_name,
                    failure.reason
                );
                failures.push(failure);
            }
            Err(e) => {
                stats.failed += 1;
                log::error!("Failed to reassign prompt {}: {e}", tuple.prompt_id);
                failures.push(ReassignmentFailure {
                    prompt_id: tuple.prompt_id,
                    old_category: tuple.old_category_name.clone(),
                    old_subcategory: tuple.old_subcategory_name.clone(),
                    new_category: None,
                    new_subcategory: None,
                    reason: e.to_string(),
                });
            }
        }
    }

    std::fs::create_dir_all(backup_dir)?;
    write_pretty_json(&backup_dir.join(FAILURES_FILE), &failures)?;

    log::info!(
        "Reassignment complete: {} total, {} reassigned, {} failed, {} skipped",
        stats.total,
        stats.reassigned,
        stats.failed,
        stats.skipped
    );

    Ok(ReassignmentOutcome { stats, failures })
}
