use serde::Serialize;

use crate::domain::category::{Category, CategoryTreeNode};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryDto {
    pub id: i32,
    pub name_en: String,
    pub name_ar: String,
    pub slug: String,
    pub icon: String,
    pub sort_order: i32,
    pub parent_id: Option<i32>,
}

impl From<Category> for CategoryDto {
    fn from(value: Category) -> Self {
        Self {
            id: value.id.get(),
            name_en: value.name_en.into_inner(),
            name_ar: value.name_ar.into_inner(),
            slug: value.slug.into_inner(),
            icon: value.icon.into_inner(),
            sort_order: value.sort_order.get(),
            parent_id: value.parent_id.map(|id| id.get()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryTreeDto {
    #[serde(flatten)]
    pub category: CategoryDto,
    pub children: Vec<CategoryDto>,
}

impl From<CategoryTreeNode> for CategoryTreeDto {
    fn from(value: CategoryTreeNode) -> Self {
        Self {
            category: value.category.into(),
            children: value.children.into_iter().map(Into::into).collect(),
        }
    }
}
