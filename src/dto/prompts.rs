use serde::Serialize;

use crate::domain::prompt::Prompt;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PromptDto {
    pub id: i32,
    pub title_en: String,
    pub title_ar: String,
    pub description_en: String,
    pub description_ar: String,
    pub is_pro: bool,
    pub usage_count: i32,
}

impl From<Prompt> for PromptDto {
    fn from(value: Prompt) -> Self {
        Self {
            id: value.id.get(),
            title_en: value.title_en.into_inner(),
            title_ar: value.title_ar.into_inner(),
            description_en: value.description_en,
            description_ar: value.description_ar,
            is_pro: value.is_pro,
            usage_count: value.usage_count.get(),
        }
    }
}
