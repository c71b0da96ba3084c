use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::prompt::{
    NewPrompt as DomainNewPrompt, NewPromptCategoryLink as DomainNewLink,
    Prompt as DomainPrompt, PromptCategoryLink as DomainLink,
};
use crate::domain::types::{PromptTitle, TypeConstraintError, UsageCount};

/// Diesel model representing the `prompts` table.
#[derive(Debug, Clone, Identifiable, Queryable)]
#[diesel(table_name = crate::schema::prompts)]
pub struct Prompt {
    pub id: i32,
    pub title_en: String,
    pub title_ar: String,
    pub description_en: String,
    pub description_ar: String,
    pub instructions_en: String,
    pub instructions_ar: String,
    pub content_en: String,
    pub content_ar: String,
    pub is_pro: bool,
    pub usage_count: i32,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Insertable form of [`Prompt`].
#[derive(Debug, Insertable)]
#[diesel(table_name = crate::schema::prompts)]
pub struct NewPrompt {
    pub title_en: String,
    pub title_ar: String,
    pub description_en: String,
    pub description_ar: String,
    pub instructions_en: String,
    pub instructions_ar: String,
    pub content_en: String,
    pub content_ar: String,
    pub is_pro: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Diesel model representing the `prompt_categories` join table.
#[derive(Debug, Clone, Identifiable, Queryable)]
#[diesel(table_name = crate::schema::prompt_categories)]
pub struct PromptCategory {
    pub id: i32,
    pub prompt_id: i32,
    pub category_id: i32,
    pub subcategory_id: i32,
    pub created_at: NaiveDateTime,
}

/// Insertable form of [`PromptCategory`].
#[derive(Debug, Insertable)]
#[diesel(table_name = crate::schema::prompt_categories)]
pub struct NewPromptCategory {
    pub prompt_id: i32,
    pub category_id: i32,
    pub subcategory_id: i32,
}

impl TryFrom<Prompt> for DomainPrompt {
    type Error = TypeConstraintError;

    fn try_from(prompt: Prompt) -> Result<Self, Self::Error> {
        Ok(Self {
            id: prompt.id.try_into()?,
            title_en: PromptTitle::new(prompt.title_en)?,
            title_ar: PromptTitle::new(prompt.title_ar)?,
            description_en: prompt.description_en,
            description_ar: prompt.description_ar,
            instructions_en: prompt.instructions_en,
            instructions_ar: prompt.instructions_ar,
            content_en: prompt.content_en,
            content_ar: prompt.content_ar,
            is_pro: prompt.is_pro,
            usage_count: UsageCount::new(prompt.usage_count)?,
            created_at: prompt.created_at,
            updated_at: prompt.updated_at,
        })
    }
}

impl From<DomainNewPrompt> for NewPrompt {
    fn from(prompt: DomainNewPrompt) -> Self {
        Self {
            title_en: prompt.title_en.into_inner(),
            title_ar: prompt.title_ar.into_inner(),
            description_en: prompt.description_en,
            description_ar: prompt.description_ar,
            instructions_en: prompt.instructions_en,
            instructions_ar: prompt.instructions_ar,
            content_en: prompt.content_en,
            content_ar: prompt.content_ar,
            is_pro: prompt.is_pro,
            created_at: prompt.created_at,
            updated_at: prompt.updated_at,
        }
    }
}

impl TryFrom<PromptCategory> for DomainLink {
    type Error = TypeConstraintError;

    fn try_from(link: PromptCategory) -> Result<Self, Self::Error> {
        Ok(Self {
            prompt_id: link.prompt_id.try_into()?,
            category_id: link.category_id.try_into()?,
            subcategory_id: link.subcategory_id.try_into()?,
            created_at: link.created_at,
        })
    }
}

impl From<DomainNewLink> for NewPromptCategory {
    fn from(link: DomainNewLink) -> Self {
        Self {
            prompt_id: link.prompt_id.get(),
            category_id: link.category_id.get(),
            subcategory_id: link.subcategory_id.get(),
        }
    }
}
