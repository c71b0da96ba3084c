use crate::db::{DbConnection, DbPool};
use crate::domain::category::{Category, CategoryTreeNode, CategoryUpdate, NewCategory};
use crate::domain::prompt::{NewPrompt, NewPromptCategoryLink, Prompt, PromptWithCategories};
use crate::domain::taxonomy::{TaxonomyCategory, TaxonomyReplaceSummary, TaxonomySeed};
use crate::domain::types::{CategoryId, PromptId, SortOrder};
use crate::repository::errors::RepositoryResult;

pub mod category;
pub mod errors;
pub mod prompt;
#[cfg(test)]
pub mod test;

/// Repository implementation backed by Diesel and SQLite.
///
/// The underlying `r2d2::Pool` is cheap to clone, allowing the repository to
/// be passed around freely between the services and the migration pipeline.
#[derive(Clone)]
pub struct DieselRepository {
    pool: DbPool, // r2d2::Pool is cheap to clone
}

impl DieselRepository {
    /// Create a new repository from an established database pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Get a pooled database connection.
    fn conn(&self) -> RepositoryResult<DbConnection> {
        Ok(self.pool.get()?)
    }
}

/// Pagination parameters shared by listing queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    /// 1-based page number.
    pub page: usize,
    pub per_page: usize,
}

/// Query parameters for listing categories.
#[derive(Debug, Clone, Default)]
pub struct CategoryListQuery {
    /// Restrict to children of this category.
    pub parent_id: Option<CategoryId>,
    /// Restrict to top-level categories.
    pub top_level_only: bool,
    /// Pagination parameters.
    pub pagination: Option<Pagination>,
}

impl CategoryListQuery {
    pub fn new() -> Self {
        Self::default()
    }
    pub fn parent(mut self, parent_id: CategoryId) -> Self {
        self.parent_id = Some(parent_id);
        self
    }
    pub fn top_level(mut self) -> Self {
        self.top_level_only = true;
        self
    }
    pub fn paginate(mut self, page: usize, per_page: usize) -> Self {
        self.pagination = Some(Pagination { page, per_page });
        self
    }
}

/// Query parameters used when listing or searching prompts.
#[derive(Debug, Clone, Default)]
pub struct PromptListQuery {
    /// Restrict to prompts linked to this category or subcategory.
    pub category_id: Option<CategoryId>,
    /// Restrict to pro (true) or free (false) prompts.
    pub pro: Option<bool>,
    /// Case-insensitive title search string.
    pub search: Option<String>,
    /// Pagination parameters.
    pub pagination: Option<Pagination>,
}

impl PromptListQuery {
    pub fn new() -> Self {
        Self::default()
    }
    pub fn category(mut self, category_id: CategoryId) -> Self {
        self.category_id = Some(category_id);
        self
    }
    pub fn pro(mut self, pro: bool) -> Self {
        self.pro = Some(pro);
        self
    }
    pub fn search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }
    pub fn paginate(mut self, page: usize, per_page: usize) -> Self {
        self.pagination = Some(Pagination { page, per_page });
        self
    }
}

/// Read-only operations for category entities.
pub trait CategoryReader {
    /// List categories using the supplied query options.
    fn list_categories(&self, query: CategoryListQuery)
    -> RepositoryResult<(usize, Vec<Category>)>;
    /// Retrieve a category by its identifier.
    fn get_category_by_id(&self, id: CategoryId) -> RepositoryResult<Option<Category>>;
    /// Load the full two-level tree: top-level categories with eagerly
    /// loaded children, both ordered by sort order then insertion order.
    fn category_tree(&self) -> RepositoryResult<Vec<CategoryTreeNode>>;
    /// Total number of category rows.
    fn count_categories(&self) -> RepositoryResult<usize>;
}

/// Write operations for category entities and the taxonomy as a whole.
pub trait CategoryWriter {
    /// Persist a new category, rejecting grandchildren.
    fn create_category(&self, category: &NewCategory) -> RepositoryResult<Category>;
    /// Update names, icon and sort order of a category.
    fn update_category(&self, id: CategoryId, update: &CategoryUpdate) -> RepositoryResult<usize>;
    /// Delete a category, its children and any prompt links referencing them.
    fn delete_category(&self, id: CategoryId) -> RepositoryResult<usize>;
    /// Batch-update sibling sort orders.
    fn reorder_categories(&self, order: &[(CategoryId, SortOrder)]) -> RepositoryResult<usize>;
    /// Seed the fixed taxonomy into an empty database; refuses when any
    /// category rows already exist.
    fn seed_taxonomy(&self, taxonomy: &[TaxonomyCategory]) -> RepositoryResult<TaxonomySeed>;
    /// Atomically delete every prompt link and category, then seed the new
    /// taxonomy, all within a single transaction.
    fn replace_taxonomy(
        &self,
        taxonomy: &[TaxonomyCategory],
    ) -> RepositoryResult<TaxonomyReplaceSummary>;
}

/// Read-only operations for prompt entities.
pub trait PromptReader {
    /// List prompts matching the supplied query parameters.
    fn list_prompts(&self, query: PromptListQuery) -> RepositoryResult<(usize, Vec<Prompt>)>;
    /// Retrieve a prompt by its identifier.
    fn get_prompt_by_id(&self, id: PromptId) -> RepositoryResult<Option<Prompt>>;
    /// Load every prompt with its category links fully resolved, in
    /// insertion order. This is the backup-stage read.
    fn list_prompts_with_categories(&self) -> RepositoryResult<Vec<PromptWithCategories>>;
}

/// Write operations for prompt entities and their category links.
pub trait PromptWriter {
    /// Persist a new prompt.
    fn create_prompt(&self, prompt: &NewPrompt) -> RepositoryResult<Prompt>;
    /// Link a prompt to a (category, subcategory) pair. Duplicate links are
    /// a no-op; returns the number of rows inserted (0 or 1).
    fn link_prompt_category(&self, link: &NewPromptCategoryLink) -> RepositoryResult<usize>;
    /// Increment a prompt's usage counter.
    fn record_prompt_usage(&self, id: PromptId) -> RepositoryResult<usize>;
}
