use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::category::Category;
use crate::domain::types::{CategoryId, PromptId, PromptTitle, UsageCount};

/// A bilingual prompt record. The taxonomy migration treats prompts as
/// opaque apart from the identifier and category links.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Prompt {
    pub id: PromptId,
    pub title_en: PromptTitle,
    pub title_ar: PromptTitle,
    pub description_en: String,
    pub description_ar: String,
    pub instructions_en: String,
    pub instructions_ar: String,
    pub content_en: String,
    pub content_ar: String,
    pub is_pro: bool,
    pub usage_count: UsageCount,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Information required to create a new [`Prompt`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewPrompt {
    pub title_en: PromptTitle,
    pub title_ar: PromptTitle,
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

/// Join record linking a prompt to a (category, subcategory) pair.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PromptCategoryLink {
    pub prompt_id: PromptId,
    pub category_id: CategoryId,
    pub subcategory_id: CategoryId,
    pub created_at: NaiveDateTime,
}

/// Data required to insert a new [`PromptCategoryLink`].
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct NewPromptCategoryLink {
    pub prompt_id: PromptId,
    pub category_id: CategoryId,
    pub subcategory_id: CategoryId,
}

/// One resolved category/subcategory pair attached to a prompt.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinkedCategoryPair {
    pub category: Category,
    pub subcategory: Category,
}

/// A prompt with its category links fully resolved, as captured by the
/// backup stage.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PromptWithCategories {
    pub prompt: Prompt,
    pub categories: Vec<LinkedCategoryPair>,
}
