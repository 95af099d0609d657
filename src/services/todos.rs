use chrono::NaiveDateTime;

use crate::domain::category::Category;
use crate::domain::todo::Todo;
use crate::domain::types::TodoId;
use crate::dto::todos::{FilterOptionsDto, TodoDto};
use crate::forms::filters::FilterOptionsFormPayload;
use crate::forms::todos::{AddTodoFormPayload, EditTodoFormPayload, TodoActionFormPayload};
use crate::repository::{CategoryReader, TodoReader, TodoWriter};

use super::{ServiceError, ServiceResult};

fn load_categories<R>(repo: &R) -> ServiceResult<Vec<Category>>
where
    R: CategoryReader,
{
    repo.list_categories().map_err(|e| {
        log::error!("Failed to list categories: {e}");
        ServiceError::Internal
    })
}

fn to_dtos(todos: Vec<Todo>, categories: &[Category]) -> Vec<TodoDto> {
    todos
        .into_iter()
        .map(|todo| TodoDto::new(todo, categories))
        .collect()
}

fn ensure_todo_exists<R>(repo: &R, id: TodoId) -> ServiceResult<()>
where
    R: TodoReader,
{
    match repo.get_todo_by_id(id) {
        Ok(Some(_)) => Ok(()),
        Ok(None) => Err(ServiceError::NotFound),
        Err(e) => {
            log::error!("Failed to get todo: {e}");
            Err(ServiceError::Internal)
        }
    }
}

/// The full collection in insertion order.
pub fn show_todos<R>(repo: &R) -> ServiceResult<Vec<TodoDto>>
where
    R: TodoReader + CategoryReader,
{
    let categories = load_categories(repo)?;
    match repo.list_todos() {
        Ok(todos) => Ok(to_dtos(todos, &categories)),
        Err(e) => {
            log::error!("Failed to list todos: {e}");
            Err(ServiceError::Internal)
        }
    }
}

/// The collection as seen through the active filter options.
pub fn show_filtered_todos<R>(repo: &R) -> ServiceResult<Vec<TodoDto>>
where
    R: TodoReader + CategoryReader,
{
    let categories = load_categories(repo)?;
    match repo.list_filtered_todos() {
        Ok(todos) => Ok(to_dtos(todos, &categories)),
        Err(e) => {
            log::error!("Failed to list filtered todos: {e}");
            Err(ServiceError::Internal)
        }
    }
}

pub fn add_todo<R>(
    payload: AddTodoFormPayload,
    now: NaiveDateTime,
    repo: &mut R,
) -> ServiceResult<bool>
where
    R: TodoWriter,
{
    let todo = payload.into_new_todo(now);
    match repo.create_todo(&todo) {
        Ok(id) => {
            log::info!("Created todo {id}");
            Ok(true)
        }
        Err(e) => {
            log::error!("Failed to create todo: {e}");
            Ok(false)
        }
    }
}

pub fn toggle_todo<R>(payload: TodoActionFormPayload, repo: &mut R) -> ServiceResult<bool>
where
    R: TodoReader + TodoWriter,
{
    ensure_todo_exists(repo, payload.todo_id)?;

    match repo.toggle_todo(payload.todo_id) {
        Ok(_) => Ok(true),
        Err(e) => {
            log::error!("Failed to toggle todo: {e}");
            Ok(false)
        }
    }
}

/// Applies an edit; unknown categories fall back to the default category.
pub fn update_todo<R>(payload: EditTodoFormPayload, repo: &mut R) -> ServiceResult<bool>
where
    R: TodoReader + TodoWriter,
{
    ensure_todo_exists(repo, payload.todo_id)?;

    match repo.update_todo(payload.todo_id, &payload.update) {
        Ok(_) => Ok(true),
        Err(e) => {
            log::error!("Failed to update todo: {e}");
            Ok(false)
        }
    }
}

pub fn delete_todo<R>(payload: TodoActionFormPayload, repo: &mut R) -> ServiceResult<bool>
where
    R: TodoReader + TodoWriter,
{
    ensure_todo_exists(repo, payload.todo_id)?;

    match repo.delete_todo(payload.todo_id) {
        Ok(_) => Ok(true),
        Err(e) => {
            log::error!("Failed to delete todo: {e}");
            Ok(false)
        }
    }
}

/// Merges the submitted filter controls into the active options.
///
/// A category the registry does not know is treated as "all categories".
pub fn set_filter_options<R>(payload: FilterOptionsFormPayload, repo: &mut R) -> ServiceResult<()>
where
    R: CategoryReader + TodoWriter,
{
    let mut patch = payload.patch;

    if let Some(Some(category_id)) = patch.category_id {
        match repo.get_category_by_id(category_id) {
            Ok(Some(_)) => {}
            Ok(None) => {
                log::warn!("Ignoring filter on unknown category {category_id}");
                patch.category_id = Some(None);
            }
            Err(e) => {
                log::error!("Failed to get category: {e}");
                return Err(ServiceError::Internal);
            }
        }
    }

    repo.set_filter_options(&patch).map_err(|e| {
        log::error!("Failed to set filter options: {e}");
        ServiceError::Internal
    })
}

pub fn show_filter_options<R>(repo: &R) -> ServiceResult<FilterOptionsDto>
where
    R: TodoReader,
{
    match repo.filter_options() {
        Ok(options) => Ok(FilterOptionsDto::from(options)),
        Err(e) => {
            log::error!("Failed to get filter options: {e}");
            Err(ServiceError::Internal)
        }
    }
}

/// Pushes incomplete todos due this week into next week.
///
/// Returns how many todos moved.
pub fn move_uncompleted_todos<R>(now: NaiveDateTime, repo: &mut R) -> ServiceResult<usize>
where
    R: TodoWriter,
{
    match repo.move_uncompleted_todos(now) {
        Ok(moved) => {
            if moved > 0 {
                log::info!("Rolled {moved} todos over into next week");
            }
            Ok(moved)
        }
        Err(e) => {
            log::error!("Failed to roll over todos: {e}");
            Err(ServiceError::Internal)
        }
    }
}
