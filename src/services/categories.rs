use chrono::NaiveDateTime;

use crate::dto::categories::CategoryDto;
use crate::forms::categories::{
    AddCategoryFormPayload, DeleteCategoryFormPayload, ReorderCategoriesFormPayload,
    UpdateCategoryFormPayload,
};
use crate::repository::{CategoryReader, CategoryWriter};

use super::{ServiceError, ServiceResult};

/// Lists categories in display order, flagging the default one.
pub fn show_categories<R>(repo: &R) -> ServiceResult<Vec<CategoryDto>>
where
    R: CategoryReader,
{
    let default_category_id = match repo.default_category_id() {
        Ok(id) => id,
        Err(e) => {
            log::error!("Failed to get default category: {e}");
            return Err(ServiceError::Internal);
        }
    };

    match repo.list_categories() {
        Ok(categories) => Ok(categories
            .into_iter()
            .map(|category| CategoryDto::new(category, default_category_id))
            .collect()),
        Err(e) => {
            log::error!("Failed to list categories: {e}");
            Err(ServiceError::Internal)
        }
    }
}

pub fn add_category<R>(
    payload: AddCategoryFormPayload,
    now: NaiveDateTime,
    repo: &mut R,
) -> ServiceResult<bool>
where
    R: CategoryWriter,
{
    let category = payload.into_new_category(now);
    match repo.create_category(&category) {
        Ok(_) => Ok(true),
        Err(e) => {
            log::error!("Failed to create category: {e}");
            Ok(false)
        }
    }
}

pub fn update_category<R>(payload: UpdateCategoryFormPayload, repo: &mut R) -> ServiceResult<bool>
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

    match repo.update_category(payload.category_id, &payload.name) {
        Ok(_) => Ok(true),
        Err(e) => {
            log::error!("Failed to update category: {e}");
            Ok(false)
        }
    }
}

/// Deletes a category and moves its todos to the default category.
///
/// Returns `Ok(false)` without touching anything when asked to delete the
/// default category.
pub fn delete_category<R>(payload: DeleteCategoryFormPayload, repo: &mut R) -> ServiceResult<bool>
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

    match repo.default_category_id() {
        Ok(default_id) if default_id == payload.category_id => {
            log::warn!("Refusing to delete default category {default_id}");
            return Ok(false);
        }
        Ok(_) => {}
        Err(e) => {
            log::error!("Failed to get default category: {e}");
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

/// Stores a new display order given as the full list of category ids.
pub fn reorder_categories<R>(
    payload: ReorderCategoriesFormPayload,
    repo: &mut R,
) -> ServiceResult<bool>
where
    R: CategoryReader + CategoryWriter,
{
    let current = match repo.list_categories() {
        Ok(categories) => categories,
        Err(e) => {
            log::error!("Failed to list categories: {e}");
            return Err(ServiceError::Internal);
        }
    };

    let mut reordered = Vec::with_capacity(payload.category_ids.len());
    for id in &payload.category_ids {
        match current.iter().find(|category| category.id == *id) {
            Some(category) => reordered.push(category.clone()),
            None => return Err(ServiceError::NotFound),
        }
    }

    match repo.reorder_categories(reordered) {
        Ok(_) => Ok(true),
        Err(e) => {
            log::error!("Failed to reorder categories: {e}");
            Ok(false)
        }
    }
}
