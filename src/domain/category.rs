use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::types::{CategoryId, CategoryName, CategorySlug, IconName, SortOrder};

/// Canonical category record. Categories form a strict two-level tree:
/// top-level entries have `parent_id == None`, subcategories reference a
/// top-level parent and must never be parents themselves.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    pub name_en: CategoryName,
    pub name_ar: CategoryName,
    pub slug: CategorySlug,
    pub icon: IconName,
    pub sort_order: SortOrder,
    pub parent_id: Option<CategoryId>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl Category {
    /// Whether this category sits at the top level of the taxonomy.
    pub fn is_top_level(&self) -> bool {
        self.parent_id.is_none()
    }
}

/// Data required to insert a new [`Category`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewCategory {
    pub name_en: CategoryName,
    pub name_ar: CategoryName,
    pub slug: CategorySlug,
    pub icon: IconName,
    pub sort_order: SortOrder,
    pub parent_id: Option<CategoryId>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Mutable attributes of a [`Category`]; identifier, slug and parent are
/// fixed once created.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryUpdate {
    pub name_en: CategoryName,
    pub name_ar: CategoryName,
    pub icon: IconName,
    pub sort_order: SortOrder,
}

/// A top-level category together with its eagerly loaded children, ordered
/// by `sort_order` then insertion order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryTreeNode {
    pub category: Category,
    pub children: Vec<Category>,
}
