use std::collections::HashMap;

use diesel::prelude::*;

use crate::domain::category::Category;
use crate::domain::prompt::{
    LinkedCategoryPair, NewPrompt, NewPromptCategoryLink, Prompt, PromptWithCategories,
};
use crate::domain::types::PromptId;
use crate::models::category::Category as DbCategory;
use crate::models::prompt::{
    NewPrompt as DbNewPrompt, NewPromptCategory as DbNewPromptCategory, Prompt as DbPrompt,
    PromptCategory as DbPromptCategory,
};
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{DieselRepository, PromptListQuery, PromptReader, PromptWriter};

impl PromptReader for DieselRepository {
    fn list_prompts(&self, query: PromptListQuery) -> RepositoryResult<(usize, Vec<Prompt>)> {
        use crate::schema::{prompt_categories, prompts};

        let mut conn = self.conn()?;

        let query_builder = || {
            let mut items = prompts::table.into_boxed::<diesel::sqlite::Sqlite>();

            if let Some(category_id) = query.category_id {
                items = items.filter(
                    prompts::id.eq_any(
                        prompt_categories::table
                            .filter(
                                prompt_categories::category_id
                                    .eq(category_id.get())
                                    .or(prompt_categories::subcategory_id.eq(category_id.get())),
                            )
                            .select(prompt_categories::prompt_id),
                    ),
                );
            }

            if let Some(pro) = query.pro {
                items = items.filter(prompts::is_pro.eq(pro));
            }

            if let Some(search) = &query.search {
                let pattern = format!("%{search}%");
                items = items.filter(
                    prompts::title_en
                        .like(pattern.clone())
                        .or(prompts::title_ar.like(pattern)),
                );
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
            .order(prompts::id.asc())
            .load::<DbPrompt>(&mut conn)?
            .into_iter()
            .map(TryInto::try_into)
            .collect::<Result<Vec<Prompt>, _>>()?;

        Ok((total, items))
    }

    fn get_prompt_by_id(&self, id: PromptId) -> RepositoryResult<Option<Prompt>> {
        use crate::schema::prompts;

        let mut conn = self.conn()?;

        let prompt = prompts::table
            .filter(prompts::id.eq(id.get()))
            .first::<DbPrompt>(&mut conn)
            .optional()?;

        let prompt = prompt.map(TryInto::try_into).transpose()?;
        Ok(prompt)
    }

    fn list_prompts_with_categories(&self) -> RepositoryResult<Vec<PromptWithCategories>> {
        use crate::schema::{categories, prompt_categories, prompts};

        let mut conn = self.conn()?;

        let prompts = prompts::table
            .order(prompts::id.asc())
            .load::<DbPrompt>(&mut conn)?;
        let links = prompt_categories::table
            .order(prompt_categories::id.asc())
            .load::<DbPromptCategory>(&mut conn)?;
        let categories = categories::table
            .load::<DbCategory>(&mut conn)?
            .into_iter()
            .map(|c| Ok((c.id, c.try_into()?)))
            .collect::<Result<HashMap<i32, Category>, RepositoryError>>()?;

        let mut links_by_prompt: HashMap<i32, Vec<LinkedCategoryPair>> = HashMap::new();
        for link in links {
            let category = categories.get(&link.category_id).ok_or_else(|| {
                RepositoryError::Validation(format!(
                    "prompt link references missing category {}",
                    link.category_id
                ))
            })?;
            let subcategory = categories.get(&link.subcategory_id).ok_or_else(|| {
                RepositoryError::Validation(format!(
                    "prompt link references missing subcategory {}",
                    link.subcategory_id
                ))
            })?;
            links_by_prompt
                .entry(link.prompt_id)
                .or_default()
                .push(LinkedCategoryPair {
                    category: category.clone(),
                    subcategory: subcategory.clone(),
                });
        }

        let mut result = Vec::with_capacity(prompts.len());
        for prompt in prompts {
            let categories = links_by_prompt.remove(&prompt.id).unwrap_or_default();
            result.push(PromptWithCategories {
                prompt: prompt.try_into()?,
                categories,
            });
        }

        Ok(result)
    }
}

impl PromptWriter for DieselRepository {
    fn create_prompt(&self, prompt: &NewPrompt) -> RepositoryResult<Prompt> {
        use crate::schema::prompts;

        let mut conn = self.conn()?;
        let db_prompt: DbNewPrompt = prompt.clone().into();

        let created = diesel::insert_into(prompts::table)
            .values(db_prompt)
            .get_result::<DbPrompt>(&mut conn)?;

        Ok(created.try_into()?)
    }

    fn link_prompt_category(&self, link: &NewPromptCategoryLink) -> RepositoryResult<usize> {
        use crate::schema::prompt_categories;

        let mut conn = self.conn()?;
        let db_link: DbNewPromptCategory = (*link).into();

        // The UNIQUE (prompt_id, category_id, subcategory_id) constraint
        // makes a duplicate link a no-op rather than an error.
        let affected = diesel::insert_into(prompt_categories::table)
            .values(db_link)
            .on_conflict_do_nothing()
            .execute(&mut conn)?;

        Ok(affected)
    }

    fn record_prompt_usage(&self, id: PromptId) -> RepositoryResult<usize> {
        use crate::schema::prompts;

        let mut conn = self.conn()?;

        let affected = diesel::update(prompts::table.filter(prompts::id.eq(id.get())))
            .set((
                prompts::usage_count.eq(prompts::usage_count + 1),
                prompts::updated_at.eq(diesel::dsl::now),
            ))
            .execute(&mut conn)?;

        Ok(affected)
    }
}
