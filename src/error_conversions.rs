//! Error conversion glue between the domain, repository and service layers.
//!
//! The domain layer must not depend on service/repository error types, so
//! the conversions live here instead.

use crate::domain::types::TypeConstraintError;
use crate::forms::categories::{
    AddCategoryFormError, DeleteCategoryFormError, ReorderCategoriesFormError,
    UpdateCategoryFormError,
};
use crate::repository::errors::RepositoryError;
use crate::services::errors::ServiceError;

impl From<TypeConstraintError> for RepositoryError {
    fn from(val: TypeConstraintError) -> Self {
        RepositoryError::Validation(val.to_string())
    }
}

impl From<TypeConstraintError> for ServiceError {
    fn from(val: TypeConstraintError) -> Self {
        ServiceError::TypeConstraint(val.to_string())
    }
}

impl From<AddCategoryFormError> for ServiceError {
    fn from(val: AddCategoryFormError) -> Self {
        ServiceError::Form(val.to_string())
    }
}

impl From<UpdateCategoryFormError> for ServiceError {
    fn from(val: UpdateCategoryFormError) -> Self {
        ServiceError::Form(val.to_string())
    }
}

impl From<DeleteCategoryFormError> for ServiceError {
    fn from(val: DeleteCategoryFormError) -> Self {
        ServiceError::Form(val.to_string())
    }
}

impl From<ReorderCategoriesFormError> for ServiceError {
    fn from(val: ReorderCategoriesFormError) -> Self {
        ServiceError::Form(val.to_string())
    }
}
