use std::collections::HashMap;

use chrono::Utc;
use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;

use crate::domain::category::{Category, CategoryTreeNode, CategoryUpdate, NewCategory};
use crate::domain::taxonomy::{
    TaxonomyCategory, TaxonomyReplaceSummary, TaxonomyReset, TaxonomySeed, validate_taxonomy,
};
use crate::domain::types::{CategoryId, SortOrder};
use crate::models::category::{Category as DbCategory, NewCategory as DbNewCategory};
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{CategoryListQuery, CategoryReader, CategoryWriter, DieselRepository};

impl CategoryReader for DieselRepository {
    fn list_categories(
        &self,
        query: CategoryListQuery,
    ) -> RepositoryResult<(usize, Vec<Category>)> {
        use crate::schema::categories;

        let mut conn = self.conn()?;

        let query_builder = || {
            let mut items = categories::table.into_boxed::<diesel::sqlite::Sqlite>();
            if query.top_level_only {
                items = items.filter(categories::parent_id.is_null());
            }
            if let Some(parent_id) = query.parent_id {
                items = items.filter(categories::parent_id.eq(Some(parent_id.get())));
            }
            items
        };

        let total = query_builder().count().get_result::<i64>(&mut conn)? as usize;

        let mut items = query_builder();
        if let Some(pagination) = &query.pagination {
            let offset = ((pagination.page.max(1) - 1) * pagination.per_page) as i64;
            let limit = pagination.per_page as i64;
            items = items.offset(offset).limit(limit);
        }

        let items = items
            .order((categories::sort_order.asc(), categories::id.asc()))
            .load::<DbCategory>(&mut conn)?
            .into_iter()
            .map(TryInto::try_into)
            .collect::<Result<Vec<Category>, _>>()?;

        Ok((total, items))
    }

    fn get_category_by_id(&self, id: CategoryId) -> RepositoryResult<Option<Category>> {
        use crate::schema::categories;

        let mut conn = self.conn()?;

        let category = categories::table
            .filter(categories::id.eq(id.get()))
            .first::<DbCategory>(&mut conn)
            .optional()?;

        let category = category.map(TryInto::try_into).transpose()?;
        Ok(category)
    }

    fn category_tree(&self) -> RepositoryResult<Vec<CategoryTreeNode>> {
        use crate::schema::categories;

        let mut conn = self.conn()?;

        let parents = categories::table
            .filter(categories::parent_id.is_null())
            .order((categories::sort_order.asc(), categories::id.asc()))
            .load::<DbCategory>(&mut conn)?;
        let children = categories::table
            .filter(categories::parent_id.is_not_null())
            .order((categories::sort_order.asc(), categories::id.asc()))
            .load::<DbCategory>(&mut conn)?;

        let mut by_parent: HashMap<i32, Vec<Category>> = HashMap::new();
        for child in children {
            let parent_id = child.parent_id.ok_or_else(|| {
                RepositoryError::Validation("child category lost its parent".to_string())
            })?;
            by_parent
                .entry(parent_id)
                .or_default()
                .push(child.try_into()?);
        }

        let mut tree = Vec::with_capacity(parents.len());
        for parent in parents {
            let children = by_parent.remove(&parent.id).unwrap_or_default();
            tree.push(CategoryTreeNode {
                category: parent.try_into()?,
                children,
            });
        }

        Ok(tree)
    }

    fn count_categories(&self) -> RepositoryResult<usize> {
        use crate::schema::categories;

        let mut conn = self.conn()?;
        let total: i64 = categories::table.count().get_result(&mut conn)?;
        Ok(total as usize)
    }
}

impl CategoryWriter for DieselRepository {
    fn create_category(&self, category: &NewCategory) -> RepositoryResult<Category> {
        use crate::schema::categories;

        let mut conn = self.conn()?;

        // Keep the tree at two levels: a parent must itself be top-level.
        if let Some(parent_id) = category.parent_id {
            let parent = categories::table
                .filter(categories::id.eq(parent_id.get()))
                .first::<DbCategory>(&mut conn)
                .optional()?;
            match parent {
                None => {
                    return Err(RepositoryError::Validation(format!(
                        "parent category {parent_id} does not exist"
                    )));
                }
                Some(parent) if parent.parent_id.is_some() => {
                    return Err(RepositoryError::Validation(
                        "subcategories cannot have children".to_string(),
                    ));
                }
                Some(_) => {}
            }
        }

        let db_category: DbNewCategory = category.clone().into();
        let created = diesel::insert_into(categories::table)
            .values(db_category)
            .get_result::<DbCategory>(&mut conn)?;

        Ok(created.try_into()?)
    }

    fn update_category(&self, id: CategoryId, update: &CategoryUpdate) -> RepositoryResult<usize> {
        use crate::schema::categories;

        let mut conn = self.conn()?;

        let affected = diesel::update(categories::table.filter(categories::id.eq(id.get())))
            .set((
                categories::name_en.eq(update.name_en.as_str()),
                categories::name_ar.eq(update.name_ar.as_str()),
                categories::icon.eq(update.icon.as_str()),
                categories::sort_order.eq(update.sort_order.get()),
                categories::updated_at.eq(diesel::dsl::now),
            ))
            .execute(&mut conn)?;

        Ok(affected)
    }

    fn delete_category(&self, id: CategoryId) -> RepositoryResult<usize> {
        use crate::schema::{categories, prompt_categories};

        let mut conn = self.conn()?;

        let affected = conn.transaction(|conn| {
            let mut ids = categories::table
                .filter(categories::parent_id.eq(Some(id.get())))
                .select(categories::id)
                .load::<i32>(conn)?;
            ids.push(id.get());

            diesel::delete(
                prompt_categories::table.filter(
                    prompt_categories::category_id
                        .eq_any(ids.clone())
                        .or(prompt_categories::subcategory_id.eq_any(ids.clone())),
                ),
            )
            .execute(conn)?;

            diesel::delete(categories::table.filter(categories::id.eq_any(ids))).execute(conn)
        })?;

        Ok(affected)
    }

    fn reorder_categories(&self, order: &[(CategoryId, SortOrder)]) -> RepositoryResult<usize> {
        use crate::schema::categories;

        let mut conn = self.conn()?;

        let affected = conn.transaction(|conn| {
            let mut affected = 0;
            for (id, sort_order) in order {
                affected += diesel::update(categories::table.filter(categories::id.eq(id.get())))
                    .set((
                        categories::sort_order.eq(sort_order.get()),
                        categories::updated_at.eq(diesel::dsl::now),
                    ))
                    .execute(conn)?;
            }
            Ok::<usize, diesel::result::Error>(affected)
        })?;

        Ok(affected)
    }

    fn seed_taxonomy(&self, taxonomy: &[TaxonomyCategory]) -> RepositoryResult<TaxonomySeed> {
        use crate::schema::categories;

        validate_taxonomy(taxonomy)
            .map_err(|e| RepositoryError::Validation(e.to_string()))?;

        let mut conn = self.conn()?;
        conn.transaction::<_, RepositoryError, _>(|conn| {
            let existing: i64 = categories::table.count().get_result(conn)?;
            if existing > 0 {
                return Err(RepositoryError::Validation(
                    "taxonomy is not empty; refusing to seed".to_string(),
                ));
            }
            seed_taxonomy_inner(conn, taxonomy)
        })
    }

    fn replace_taxonomy(
        &self,
        taxonomy: &[TaxonomyCategory],
    ) -> RepositoryResult<TaxonomyReplaceSummary> {
        validate_taxonomy(taxonomy)
            .map_err(|e| RepositoryError::Validation(e.to_string()))?;

        let mut conn = self.conn()?;
        conn.transaction::<_, RepositoryError, _>(|conn| {
            let reset = clear_taxonomy_inner(conn)?;
            let seeded = seed_taxonomy_inner(conn, taxonomy)?;
            Ok(TaxonomyReplaceSummary { reset, seeded })
        })
    }
}

/// Delete every prompt link, then every category. Links go first because
/// they reference category rows.
fn clear_taxonomy_inner(conn: &mut SqliteConnection) -> Result<TaxonomyReset, RepositoryError> {
    use crate::schema::{categories, prompt_categories};

    let links_deleted = diesel::delete(prompt_categories::table).execute(conn)?;
    let categories_deleted = diesel::delete(categories::table).execute(conn)?;

    Ok(TaxonomyReset {
        links_deleted,
        categories_deleted,
    })
}

/// Insert every top-level category, then its subcategories with the freshly
/// generated parent identifier. Subcategory sort order is fixed at 0, so
/// sibling display order is insertion order.
fn seed_taxonomy_inner(
    conn: &mut SqliteConnection,
    taxonomy: &[TaxonomyCategory],
) -> Result<TaxonomySeed, RepositoryError> {
    use crate::schema::categories;

    let now = Utc::now().naive_utc();
    let mut seeded = TaxonomySeed::default();

    for category in taxonomy {
        let parent = diesel::insert_into(categories::table)
            .values(DbNewCategory {
                name_en: category.name_en.clone(),
                name_ar: category.name_ar.clone(),
                slug: category.slug.clone(),
                icon: category.icon.clone(),
                sort_order: category.sort_order,
                parent_id: None,
                created_at: now,
                updated_at: now,
            })
            .get_result::<DbCategory>(conn)?;
        seeded.categories_created += 1;

        for subcategory in &category.subcategories {
            diesel::insert_into(categories::table)
                .values(DbNewCategory {
                    name_en: subcategory.name_en.clone(),
                    name_ar: subcategory.name_ar.clone(),
                    slug: subcategory.slug.clone(),
                    icon: subcategory.icon.clone(),
                    sort_order: 0,
                    parent_id: Some(parent.id),
                    created_at: now,
                    updated_at: now,
                })
                .execute(conn)?;
            seeded.subcategories_created += 1;
        }
    }

    Ok(seeded)
}
