//! Error conversion glue between layers.
//!
//! The domain and form layers must not depend on service or repository error
//! types, so the conversions live here.

use crate::domain::types::TypeConstraintError;
use crate::forms::categories::CategoryFormError;
use crate::forms::filters::FilterFormError;
use crate::forms::period::PeriodFormError;
use crate::forms::todos::TodoFormError;
use crate::repository::RepositoryError;
use crate::services::ServiceError;

impl From<TypeConstraintError> for ServiceError {
    fn from(val: TypeConstraintError) -> Self {
        ServiceError::TypeConstraint(val.to_string())
    }
}

impl From<TypeConstraintError> for RepositoryError {
    fn from(val: TypeConstraintError) -> Self {
        RepositoryError::ValidationError(val.to_string())
    }
}

impl From<CategoryFormError> for ServiceError {
    fn from(val: CategoryFormError) -> Self {
        ServiceError::Form(val.to_string())
    }
}

impl From<TodoFormError> for ServiceError {
    fn from(val: TodoFormError) -> Self {
        ServiceError::Form(val.to_string())
    }
}

impl From<FilterFormError> for ServiceError {
    fn from(val: FilterFormError) -> Self {
        ServiceError::Form(val.to_string())
    }
}

impl From<PeriodFormError> for ServiceError {
    fn from(val: PeriodFormError) -> Self {
        ServiceError::Form(val.to_string())
    }
}
