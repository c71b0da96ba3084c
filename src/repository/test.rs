use std::cell::RefCell;
use std::collections::HashMap;

use chrono::{DateTime, NaiveDateTime};

use crate::domain::category::{Category, CategoryTreeNode, CategoryUpdate, NewCategory};
use crate::domain::prompt::{
    LinkedCategoryPair, NewPrompt, NewPromptCategoryLink, Prompt, PromptWithCategories,
};
use crate::domain::taxonomy::{
    TaxonomyCategory, TaxonomyReplaceSummary, TaxonomyReset, TaxonomySeed,
};
use crate::domain::types::{
    CategoryId, CategoryName, CategorySlug, IconName, PromptId, PromptTitle, SortOrder, UsageCount,
};
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{
    CategoryListQuery, CategoryReader, CategoryWriter, PromptListQuery, PromptReader, PromptWriter,
};

/// Simple in-memory repository used for unit tests.
#[derive(Default)]
pub struct TestRepository {
    categories: RefCell<Vec<Category>>,
    prompts: RefCell<Vec<Prompt>>,
    links: RefCell<Vec<NewPromptCategoryLink>>,
}

impl TestRepository {
    fn epoch() -> NaiveDateTime {
        DateTime::from_timestamp(0, 0).unwrap().naive_utc()
    }

    pub fn with_categories(self, categories: Vec<Category>) -> Self {
        *self.categories.borrow_mut() = categories;
        self
    }

    pub fn with_prompt(self, title_en: &str, title_ar: &str, is_pro: bool) -> Self {
        {
            let mut prompts = self.prompts.borrow_mut();
            let id = prompts.len() as i32 + 1;
            prompts.push(Prompt {
                id: PromptId::new(id).unwrap(),
                title_en: PromptTitle::new(title_en).unwrap(),
                title_ar: PromptTitle::new(title_ar).unwrap(),
                description_en: String::new(),
                description_ar: String::new(),
                instructions_en: String::new(),
                instructions_ar: String::new(),
                content_en: String::new(),
                content_ar: String::new(),
                is_pro,
                usage_count: UsageCount::new(0).unwrap(),
                created_at: Self::epoch(),
                updated_at: Self::epoch(),
            });
        }
        self
    }

    pub fn with_link(self, prompt_id: i32, category_id: i32, subcategory_id: i32) -> Self {
        self.links.borrow_mut().push(NewPromptCategoryLink {
            prompt_id: PromptId::new(prompt_id).unwrap(),
            category_id: CategoryId::new(category_id).unwrap(),
            subcategory_id: CategoryId::new(subcategory_id).unwrap(),
        });
        self
    }

    pub fn created_links(&self) -> Vec<NewPromptCategoryLink> {
        self.links.borrow().clone()
    }

    fn next_category_id(&self) -> i32 {
        self.categories
            .borrow()
            .iter()
            .map(|c| c.id.get())
            .max()
            .unwrap_or(0)
            + 1
    }

    fn sorted(mut categories: Vec<Category>) -> Vec<Category> {
        categories.sort_by_key(|c| (c.sort_order.get(), c.id.get()));
        categories
    }

    fn seed(&self, taxonomy: &[TaxonomyCategory]) -> RepositoryResult<TaxonomySeed> {
        let mut seeded = TaxonomySeed::default();
        for definition in taxonomy {
            let parent_id = self.next_category_id();
            self.categories.borrow_mut().push(Category {
                id: CategoryId::new(parent_id)?,
                name_en: CategoryName::new(definition.name_en.as_str())?,
                name_ar: CategoryName::new(definition.name_ar.as_str())?,
                slug: CategorySlug::new(definition.slug.as_str())?,
                icon: IconName::new(definition.icon.as_str())?,
                sort_order: SortOrder::new(definition.sort_order)?,
                parent_id: None,
                created_at: Self::epoch(),
                updated_at: Self::epoch(),
            });
            seeded.categories_created += 1;

            for subcategory in &definition.subcategories {
                let id = self.next_category_id();
                self.categories.borrow_mut().push(Category {
                    id: CategoryId::new(id)?,
                    name_en: CategoryName::new(subcategory.name_en.as_str())?,
                    name_ar: CategoryName::new(subcategory.name_ar.as_str())?,
                    slug: CategorySlug::new(subcategory.slug.as_str())?,
                    icon: IconName::new(subcategory.icon.as_str())?,
                    sort_order: SortOrder::new(0)?,
                    parent_id: Some(CategoryId::new(parent_id)?),
                    created_at: Self::epoch(),
                    updated_at: Self::epoch(),
                });
                seeded.subcategories_created += 1;
            }
        }
        Ok(seeded)
    }
}

impl CategoryReader for TestRepository {
    fn list_categories(
        &self,
        query: CategoryListQuery,
    ) -> RepositoryResult<(usize, Vec<Category>)> {
        let mut items: Vec<Category> = self.categories.borrow().clone();
        if query.top_level_only {
            items.retain(|c| c.parent_id.is_none());
        }
        if let Some(parent_id) = query.parent_id {
            items.retain(|c| c.parent_id == Some(parent_id));
        }
        let total = items.len();
        Ok((total, Self::sorted(items)))
    }

    fn get_category_by_id(&self, id: CategoryId) -> RepositoryResult<Option<Category>> {
        Ok(self
            .categories
            .borrow()
            .iter()
            .find(|c| c.id == id)
            .cloned())
    }

    fn category_tree(&self) -> RepositoryResult<Vec<CategoryTreeNode>> {
        let categories = self.categories.borrow();
        let parents: Vec<Category> = categories
            .iter()
            .filter(|c| c.parent_id.is_none())
            .cloned()
            .collect();
        let mut by_parent: HashMap<CategoryId, Vec<Category>> = HashMap::new();
        for child in categories.iter().filter(|c| c.parent_id.is_some()) {
            by_parent
                .entry(child.parent_id.unwrap())
                .or_default()
                .push(child.clone());
        }

        Ok(Self::sorted(parents)
            .into_iter()
            .map(|parent| {
                let children = by_parent.remove(&parent.id).unwrap_or_default();
                CategoryTreeNode {
                    category: parent,
                    children: Self::sorted(children),
                }
            })
            .collect())
    }

    fn count_categories(&self) -> RepositoryResult<usize> {
        Ok(self.categories.borrow().len())
    }
}

impl CategoryWriter for TestRepository {
    fn create_category(&self, category: &NewCategory) -> RepositoryResult<Category> {
        if let Some(parent_id) = category.parent_id {
            let categories = self.categories.borrow();
            let parent = categories.iter().find(|c| c.id == parent_id);
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

        let created = Category {
            id: CategoryId::new(self.next_category_id())?,
            name_en: category.name_en.clone(),
            name_ar: category.name_ar.clone(),
            slug: category.slug.clone(),
            icon: category.icon.clone(),
            sort_order: category.sort_order,
            parent_id: category.parent_id,
            created_at: category.created_at,
            updated_at: category.updated_at,
        };
        self.categories.borrow_mut().push(created.clone());
        Ok(created)
    }

    fn update_category(&self, id: CategoryId, update: &CategoryUpdate) -> RepositoryResult<usize> {
        let mut categories = self.categories.borrow_mut();
        match categories.iter_mut().find(|c| c.id == id) {
            Some(category) => {
                category.name_en = update.name_en.clone();
                category.name_ar = update.name_ar.clone();
                category.icon = update.icon.clone();
                category.sort_order = update.sort_order;
                Ok(1)
            }
            None => Ok(0),
        }
    }

    fn delete_category(&self, id: CategoryId) -> RepositoryResult<usize> {
        let mut categories = self.categories.borrow_mut();
        let mut doomed: Vec<CategoryId> = categories
            .iter()
            .filter(|c| c.parent_id == Some(id))
            .map(|c| c.id)
            .collect();
        doomed.push(id);

        self.links.borrow_mut().retain(|link| {
            !doomed.contains(&link.category_id) && !doomed.contains(&link.subcategory_id)
        });
        let before = categories.len();
        categories.retain(|c| !doomed.contains(&c.id));
        Ok(before - categories.len())
    }

    fn reorder_categories(&self, order: &[(CategoryId, SortOrder)]) -> RepositoryResult<usize> {
        let mut categories = self.categories.borrow_mut();
        let mut affected = 0;
        for (id, sort_order) in order {
            if let Some(category) = categories.iter_mut().find(|c| c.id == *id) {
                category.sort_order = *sort_order;
                affected += 1;
            }
        }
        Ok(affected)
    }

    fn seed_taxonomy(&self, taxonomy: &[TaxonomyCategory]) -> RepositoryResult<TaxonomySeed> {
        if !self.categories.borrow().is_empty() {
            return Err(RepositoryError::Validation(
                "taxonomy is not empty; refusing to seed".to_string(),
            ));
        }
        self.seed(taxonomy)
    }

    fn replace_taxonomy(
        &self,
        taxonomy: &[TaxonomyCategory],
    ) -> RepositoryResult<TaxonomyReplaceSummary> {
        let reset = TaxonomyReset {
            links_deleted: self.links.borrow().len(),
            categories_deleted: self.categories.borrow().len(),
        };
        self.links.borrow_mut().clear();
        self.categories.borrow_mut().clear();
        let seeded = self.seed(taxonomy)?;
        Ok(TaxonomyReplaceSummary { reset, seeded })
    }
}

impl PromptReader for TestRepository {
    fn list_prompts(&self, query: PromptListQuery) -> RepositoryResult<(usize, Vec<Prompt>)> {
        let mut items: Vec<Prompt> = self.prompts.borrow().clone();
        if let Some(category_id) = query.category_id {
            let links = self.links.borrow();
            items.retain(|p| {
                links.iter().any(|link| {
                    link.prompt_id == p.id
                        && (link.category_id == category_id || link.subcategory_id == category_id)
                })
            });
        }
        if let Some(pro) = query.pro {
            items.retain(|p| p.is_pro == pro);
        }
        if let Some(search) = &query.search {
            let search = search.to_lowercase();
            items.retain(|p| {
                p.title_en.to_lowercase().contains(&search)
                    || p.title_ar.to_lowercase().contains(&search)
            });
        }
        let total = items.len();
        Ok((total, items))
    }

    fn get_prompt_by_id(&self, id: PromptId) -> RepositoryResult<Option<Prompt>> {
        Ok(self.prompts.borrow().iter().find(|p| p.id == id).cloned())
    }

    fn list_prompts_with_categories(&self) -> RepositoryResult<Vec<PromptWithCategories>> {
        let categories = self.categories.borrow();
        let links = self.links.borrow();

        let lookup = |id: CategoryId| -> RepositoryResult<Category> {
            categories
                .iter()
                .find(|c| c.id == id)
                .cloned()
                .ok_or_else(|| {
                    RepositoryError::Validation(format!(
                        "prompt link references missing category {id}"
                    ))
                })
        };

        self.prompts
            .borrow()
            .iter()
            .map(|prompt| {
                let categories = links
                    .iter()
                    .filter(|link| link.prompt_id == prompt.id)
                    .map(|link| {
                        Ok(LinkedCategoryPair {
                            category: lookup(link.category_id)?,
                            subcategory: lookup(link.subcategory_id)?,
                        })
                    })
                    .collect::<RepositoryResult<Vec<_>>>()?;
                Ok(PromptWithCategories {
                    prompt: prompt.clone(),
                    categories,
                })
            })
            .collect()
    }
}

impl PromptWriter for TestRepository {
    fn create_prompt(&self, prompt: &NewPrompt) -> RepositoryResult<Prompt> {
        let mut prompts = self.prompts.borrow_mut();
        let created = Prompt {
            id: PromptId::new(prompts.len() as i32 + 1)?,
            title_en: prompt.title_en.clone(),
            title_ar: prompt.title_ar.clone(),
            description_en: prompt.description_en.clone(),
            description_ar: prompt.description_ar.clone(),
            instructions_en: prompt.instructions_en.clone(),
            instructions_ar: prompt.instructions_ar.clone(),
            content_en: prompt.content_en.clone(),
            content_ar: prompt.content_ar.clone(),
            is_pro: prompt.is_pro,
            usage_count: UsageCount::new(0)?,
            created_at: prompt.created_at,
            updated_at: prompt.updated_at,
        };
        prompts.push(created.clone());
        Ok(created)
    }

    fn link_prompt_category(&self, link: &NewPromptCategoryLink) -> RepositoryResult<usize> {
        let mut links = self.links.borrow_mut();
        if links.contains(link) {
            return Ok(0);
        }
        links.push(*link);
        Ok(1)
    }

    fn record_prompt_usage(&self, id: PromptId) -> RepositoryResult<usize> {
        let mut prompts = self.prompts.borrow_mut();
        match prompts.iter_mut().find(|p| p.id == id) {
            Some(prompt) => {
                prompt.usage_count = UsageCount::new(prompt.usage_count.get() + 1)?;
                Ok(1)
            }
            None => Ok(0),
        }
    }
}
