use chrono::Utc;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::domain::category::{CategoryUpdate, NewCategory};
use crate::domain::types::{
    CategoryId, CategoryName, CategorySlug, IconName, SortOrder, TypeConstraintError,
};

#[derive(Deserialize, Validate)]
pub struct AddCategoryForm {
    #[validate(length(min = 1))]
    pub name_en: String,
    #[validate(length(min = 1))]
    pub name_ar: String,
    #[validate(length(min = 1))]
    pub slug: String,
    #[validate(length(min = 1))]
    pub icon: String,
    #[validate(range(min = 0))]
    pub sort_order: i32,
    #[validate(range(min = 1))]
    pub parent_id: Option<i32>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AddCategoryFormPayload {
    pub name_en: CategoryName,
    pub name_ar: CategoryName,
    pub slug: CategorySlug,
    pub icon: IconName,
    pub sort_order: SortOrder,
    pub parent_id: Option<CategoryId>,
}

impl AddCategoryFormPayload {
    pub fn into_new_category(self) -> NewCategory {
        let now = Utc::now().naive_utc();
        NewCategory {
            name_en: self.name_en,
            name_ar: self.name_ar,
            slug: self.slug,
            icon: self.icon,
            sort_order: self.sort_order,
            parent_id: self.parent_id,
            created_at: now,
            updated_at: now,
        }
    }
}

#[derive(Debug, Error)]
pub enum AddCategoryFormError {
    #[error("Add category form validation failed: {0}")]
    Validation(String),
    #[error("Add category form contains invalid data: {0}")]
    TypeConstraint(String),
}

impl From<ValidationErrors> for AddCategoryFormError {
    fn from(value: ValidationErrors) -> Self {
        Self::Validation(value.to_string())
    }
}

impl From<TypeConstraintError> for AddCategoryFormError {
    fn from(value: TypeConstraintError) -> Self {
        Self::TypeConstraint(value.to_string())
    }
}

impl TryFrom<AddCategoryForm> for AddCategoryFormPayload {
    type Error = AddCategoryFormError;

    fn try_from(value: AddCategoryForm) -> Result<Self, Self::Error> {
        value.validate()?;
        Ok(Self {
            name_en: CategoryName::new(value.name_en)?,
            name_ar: CategoryName::new(value.name_ar)?,
            slug: CategorySlug::new(value.slug)?,
            icon: IconName::new(value.icon)?,
            sort_order: SortOrder::new(value.sort_order)?,
            parent_id: value.parent_id.map(CategoryId::new).transpose()?,
        })
    }
}

#[derive(Deserialize, Validate)]
pub struct UpdateCategoryForm {
    #[validate(range(min = 1))]
    pub category_id: i32,
    #[validate(length(min = 1))]
    pub name_en: String,
    #[validate(length(min = 1))]
    pub name_ar: String,
    #[validate(length(min = 1))]
    pub icon: String,
    #[validate(range(min = 0))]
    pub sort_order: i32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct UpdateCategoryFormPayload {
    pub category_id: CategoryId,
    pub update: CategoryUpdate,
}

#[derive(Debug, Error)]
pub enum UpdateCategoryFormError {
    #[error("Update category form validation failed: {0}")]
    Validation(String),
    #[error("Update category form contains invalid data: {0}")]
    TypeConstraint(String),
}

impl From<ValidationErrors> for UpdateCategoryFormError {
    fn from(value: ValidationErrors) -> Self {
        Self::Validation(value.to_string())
    }
}

impl From<TypeConstraintError> for UpdateCategoryFormError {
    fn from(value: TypeConstraintError) -> Self {
        Self::TypeConstraint(value.to_string())
    }
}

impl TryFrom<UpdateCategoryForm> for UpdateCategoryFormPayload {
    type Error = UpdateCategoryFormError;

    fn try_from(value: UpdateCategoryForm) -> Result<Self, Self::Error> {
        value.validate()?;
        Ok(Self {
            category_id: CategoryId::new(value.category_id)?,
            update: CategoryUpdate {
                name_en: CategoryName::new(value.name_en)?,
                name_ar: CategoryName::new(value.name_ar)?,
                icon: IconName::new(value.icon)?,
                sort_order: SortOrder::new(value.sort_order)?,
            },
        })
    }
}

#[derive(Deserialize, Validate)]
pub struct DeleteCategoryForm {
    #[validate(range(min = 1))]
    pub category_id: i32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DeleteCategoryFormPayload {
    pub category_id: CategoryId,
}

#[derive(Debug, Error)]
pub enum DeleteCategoryFormError {
    #[error("Delete category form validation failed: {0}")]
    Validation(String),
    #[error("Delete category form contains invalid data: {0}")]
    TypeConstraint(String),
}

impl From<ValidationErrors> for DeleteCategoryFormError {
    fn from(value: ValidationErrors) -> Self {
        Self::Validation(value.to_string())
    }
}

impl From<TypeConstraintError> for DeleteCategoryFormError {
    fn from(value: TypeConstraintError) -> Self {
        Self::TypeConstraint(value.to_string())
    }
}

impl TryFrom<DeleteCategoryForm> for DeleteCategoryFormPayload {
    type Error = DeleteCategoryFormError;

    fn try_from(value: DeleteCategoryForm) -> Result<Self, Self::Error> {
        value.validate()?;
        Ok(Self {
            category_id: CategoryId::new(value.category_id)?,
        })
    }
}

/// One entry of a drag-and-drop reorder request.
#[derive(Deserialize, Serialize, Validate)]
pub struct ReorderCategoryItem {
    #[validate(range(min = 1))]
    pub category_id: i32,
    #[validate(range(min = 0))]
    pub sort_order: i32,
}

#[derive(Deserialize, Validate)]
pub struct ReorderCategoriesForm {
    #[validate(length(min = 1), nested)]
    pub items: Vec<ReorderCategoryItem>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReorderCategoriesFormPayload {
    pub items: Vec<(CategoryId, SortOrder)>,
}

#[derive(Debug, Error)]
pub enum ReorderCategoriesFormError {
    #[error("Reorder categories form validation failed: {0}")]
    Validation(String),
    #[error("Reorder categories form contains invalid data: {0}")]
    TypeConstraint(String),
}

impl From<ValidationErrors> for ReorderCategoriesFormError {
    fn from(value: ValidationErrors) -> Self {
        Self::Validation(value.to_string())
    }
}

impl From<TypeConstraintError> for ReorderCategoriesFormError {
    fn from(value: TypeConstraintError) -> Self {
        Self::TypeConstraint(value.to_string())
    }
}

impl TryFrom<ReorderCategoriesForm> for ReorderCategoriesFormPayload {
    type Error = ReorderCategoriesFormError;

    fn try_from(value: ReorderCategoriesForm) -> Result<Self, Self::Error> {
        value.validate()?;
        let items = value
            .items
            .into_iter()
            .map(|item| {
                Ok((
                    CategoryId::new(item.category_id)?,
                    SortOrder::new(item.sort_order)?,
                ))
            })
            .collect::<Result<Vec<_>, TypeConstraintError>>()?;
        Ok(Self { items })
    }
}
