use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::category::{Category as DomainCategory, NewCategory as DomainNewCategory};
use crate::domain::types::{CategoryName, CategorySlug, IconName, SortOrder, TypeConstraintError};

/// Diesel model representing the `categories` table.
#[derive(Debug, Clone, Identifiable, Queryable)]
#[diesel(table_name = crate::schema::categories)]
pub struct Category {
    pub id: i32,
    pub name_en: String,
    pub name_ar: String,
    pub slug: String,
    pub icon: String,
    pub sort_order: i32,
    pub parent_id: Option<i32>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Insertable/patchable form of [`Category`].
#[derive(Debug, Insertable, AsChangeset)]
#[diesel(table_name = crate::schema::categories)]
pub struct NewCategory {
    pub name_en: String,
    pub name_ar: String,
    pub slug: String,
    pub icon: String,
    pub sort_order: i32,
    pub parent_id: Option<i32>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl TryFrom<Category> for DomainCategory {
    type Error = TypeConstraintError;

    fn try_from(category: Category) -> Result<Self, Self::Error> {
        Ok(Self {
            id: category.id.try_into()?,
            name_en: CategoryName::new(category.name_en)?,
            name_ar: CategoryName::new(category.name_ar)?,
            slug: CategorySlug::new(category.slug)?,
            icon: IconName::new(category.icon)?,
            sort_order: SortOrder::new(category.sort_order)?,
            parent_id: category.parent_id.map(TryInto::try_into).transpose()?,
            created_at: category.created_at,
            updated_at: category.updated_at,
        })
    }
}

impl From<DomainNewCategory> for NewCategory {
    fn from(category: DomainNewCategory) -> Self {
        Self {
            name_en: category.name_en.into_inner(),
            name_ar: category.name_ar.into_inner(),
            slug: category.slug.into_inner(),
            icon: category.icon.into_inner(),
            sort_order: category.sort_order.get(),
            parent_id: category.parent_id.map(|id| id.get()),
            created_at: category.created_at,
            updated_at: category.updated_at,
        }
    }
}
