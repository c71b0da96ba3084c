use crate::dto::categories::{CategoryDto, CategoryTreeDto};
use crate::forms::categories::{
    AddCategoryFormPayload, DeleteCategoryFormPayload, ReorderCategoriesFormPayload,
    UpdateCategoryFormPayload,
};
use crate::repository::{CategoryListQuery, CategoryReader, CategoryWriter};

use super::{ServiceError, ServiceResult};

pub fn show_categories<R>(repo: &R) -> ServiceResult<Vec<CategoryDto>>
where
    R: CategoryReader,
{
    match repo.list_categories(CategoryListQuery::new()) {
        Ok((_total, categories)) => Ok(categories.into_iter().map(CategoryDto::from).collect()),
        Err(e) => {
            log::error!("Failed to list categories: {e}");
            Err(ServiceError::Internal)
        }
    }
}

pub fn show_category_tree<R>(repo: &R) -> ServiceResult<Vec<CategoryTreeDto>>
where
    R: CategoryReader,
{
    match repo.category_tree() {
        Ok(tree) => Ok(tree.into_iter().map(CategoryTreeDto::from).collect()),
        Err(e) => {
            log::error!("Failed to load category tree: {e}");
            Err(ServiceError::Internal)
        }
    }
}

pub fn add_category<R>(payload: AddCategoryFormPayload, repo: &R) -> ServiceResult<CategoryDto>
where
    R: CategoryWriter,
{
    let category = payload.into_new_category();
    match repo.create_category(&category) {
        Ok(created) => Ok(created.into()),
        Err(e) => {
            log::error!("Failed to create category: {e}");
            Err(ServiceError::Form(e.to_string()))
        }
    }
}

pub fn update_category<R>(payload: UpdateCategoryFormPayload, repo: &R) -> ServiceResult<bool>
where
    R: CategoryReader + CategoryWriter,
{
    match repo.get_category_by_id(payload.category_id) {
        Ok(Some(_)) => {}
        Ok(None) => return Err(ServiceError::NotFound),
        Err(e) => {
            log::error!("Failed to get category: {e}");
            return Err(ServiceError::Internal);
        }
    }

    match repo.update_category(payload.category_id, &payload.update) {
        Ok(_) => Ok(true),
        Err(e) => {
            log::error!("Failed to update category: {e}");
            Ok(false)
        }
    }
}

pub fn delete_category<R>(payload: DeleteCategoryFormPayload, repo: &R) -> ServiceResult<bool>
where
    R: CategoryReader + CategoryWriter,
{
    match repo.get_category_by_id(payload.category_id) {
        Ok(Some(_)) => {}
        Ok(None) => return Err(ServiceError::NotFound),
        Err(e) => {
            log::error!("Failed to get category: {e}");
            return Err(ServiceError::Internal);
        }
    }

    match repo.delete_category(payload.category_id) {
        Ok(_) => Ok(true),
        Err(e) => {
            log::error!("Failed to delete category: {e}");
            Ok(false)
        }
    }
}

pub fn reorder_categories<R>(payload: ReorderCategoriesFormPayload, repo: &R) -> ServiceResult<bool>
where
    R: CategoryWriter,
{
    match repo.reorder_categories(&payload.items) {
        Ok(_) => Ok(true),
        Err(e) => {
            log::error!("Failed to reorder categories: {e}");
            Ok(false)
        }
    }
}
