use chrono::NaiveDateTime;

use crate::domain::category::{Category, NewCategory};
use crate::domain::dates::truncate_to_day;
use crate::domain::filter::{FilterOptions, FilterOptionsPatch, apply_filters};
use crate::domain::snapshot::Snapshot;
use crate::domain::todo::{
    NewTodo, Todo, TodoUpdate, normalize_description, validate_schedule,
};
use crate::domain::types::{CategoryId, CategoryName, TodoId};
use crate::settings::TodoSettings;

pub use errors::{RepositoryError, RepositoryResult};

pub mod category;
pub mod errors;
pub mod todo;

/// In-process planner state: the category registry, the todo collection and
/// the filtered view derived from it.
///
/// Every mutating call recomputes the filtered view before returning, so a
/// reader never observes a stale view. Construct one per session (or per
/// test) and hand it to the service layer by reference.
#[derive(Debug, Clone)]
pub struct InMemoryRepository {
    categories: Vec<Category>,
    default_category_id: CategoryId,
    todos: Vec<Todo>,
    filtered_todos: Vec<Todo>,
    filter_options: FilterOptions,
    // Ids are never reused, even after deletion.
    next_category_id: i32,
    next_todo_id: i32,
}

impl InMemoryRepository {
    /// Create a repository seeded with the built-in categories.
    pub fn new(now: NaiveDateTime) -> Self {
        Self::from_settings(&TodoSettings::default(), now)
    }

    /// Create a repository seeded according to `settings`.
    ///
    /// Seed categories receive ids `1..=n` in configured order.
    pub fn from_settings(settings: &TodoSettings, now: NaiveDateTime) -> Self {
        let (names, default_index) = settings.seeds();
        let categories: Vec<Category> = names
            .into_iter()
            .zip(1..)
            .filter_map(|(name, id)| {
                CategoryId::new(id).ok().map(|id| Category {
                    id,
                    name,
                    created_at: now,
                })
            })
            .collect();

        let default_category_id = categories
            .get(default_index)
            .or_else(|| categories.first())
            .map(|category| category.id)
            .unwrap_or(CategoryId::MIN);
        let next_category_id = categories
            .iter()
            .map(|category| category.id.get())
            .max()
            .unwrap_or(0)
            + 1;

        Self {
            categories,
            default_category_id,
            todos: Vec::new(),
            filtered_todos: Vec::new(),
            filter_options: FilterOptions {
                show_completed: settings.show_completed,
                ..FilterOptions::default()
            },
            next_category_id,
            next_todo_id: 1,
        }
    }

    /// Rebuild a repository from a previously exported [`Snapshot`].
    ///
    /// Todos go through the same rules as on creation: dates are truncated
    /// to the day, a start later than the due date is rejected, the `"0"`
    /// description placeholder is dropped and unknown categories resolve to
    /// the default category.
    pub fn restore(snapshot: Snapshot) -> RepositoryResult<Self> {
        if !snapshot
            .categories
            .iter()
            .any(|category| category.id == snapshot.default_category_id)
        {
            return Err(RepositoryError::ValidationError(format!(
                "default category {} is missing from the snapshot",
                snapshot.default_category_id
            )));
        }
        if has_duplicates(snapshot.categories.iter().map(|category| category.id)) {
            return Err(RepositoryError::ValidationError(
                "snapshot contains duplicate category ids".to_string(),
            ));
        }
        if has_duplicates(snapshot.todos.iter().map(|todo| todo.id)) {
            return Err(RepositoryError::ValidationError(
                "snapshot contains duplicate todo ids".to_string(),
            ));
        }

        let mut todos = snapshot.todos;
        for todo in &mut todos {
            todo.start_date = todo.start_date.map(truncate_to_day);
            todo.due_date = todo.due_date.map(truncate_to_day);
            validate_schedule(todo.start_date, todo.due_date).map_err(|e| {
                RepositoryError::ValidationError(format!("todo {}: {e}", todo.id))
            })?;
            todo.description = normalize_description(todo.description.take());
            todo.category_id = match todo.category_id {
                Some(id) if snapshot.categories.iter().any(|c| c.id == id) => Some(id),
                _ => Some(snapshot.default_category_id),
            };
        }

        let next_category_id = next_id(snapshot.categories.iter().map(|c| c.id.get()))?;
        let next_todo_id = next_id(todos.iter().map(|t| t.id.get()))?;

        let mut filter_options = snapshot.filter_options;
        if let Some(category_id) = filter_options.category_id {
            if !snapshot.categories.iter().any(|c| c.id == category_id) {
                filter_options.category_id = None;
            }
        }

        let mut repo = Self {
            categories: snapshot.categories,
            default_category_id: snapshot.default_category_id,
            todos,
            filtered_todos: Vec::new(),
            filter_options,
            next_category_id,
            next_todo_id,
        };
        repo.refresh_filtered();
        Ok(repo)
    }

    /// Export the complete state.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            categories: self.categories.clone(),
            default_category_id: self.default_category_id,
            todos: self.todos.clone(),
            filter_options: self.filter_options.clone(),
        }
    }

    fn refresh_filtered(&mut self) {
        self.filtered_todos = apply_filters(&self.todos, &self.filter_options);
    }

    fn has_category(&self, id: CategoryId) -> bool {
        self.categories.iter().any(|category| category.id == id)
    }

    /// Missing or unknown categories resolve to the default category.
    fn resolve_category(&self, id: Option<CategoryId>) -> CategoryId {
        match id {
            Some(id) if self.has_category(id) => id,
            _ => self.default_category_id,
        }
    }

    fn allocate_category_id(&mut self) -> RepositoryResult<CategoryId> {
        let id = CategoryId::new(self.next_category_id)
            .map_err(|e| RepositoryError::ConstraintViolation(e.to_string()))?;
        self.next_category_id = self.next_category_id.checked_add(1).ok_or_else(|| {
            RepositoryError::ConstraintViolation("category ids exhausted".to_string())
        })?;
        Ok(id)
    }

    fn allocate_todo_id(&mut self) -> RepositoryResult<TodoId> {
        let id = TodoId::new(self.next_todo_id)
            .map_err(|e| RepositoryError::ConstraintViolation(e.to_string()))?;
        self.next_todo_id = self.next_todo_id.checked_add(1).ok_or_else(|| {
            RepositoryError::ConstraintViolation("todo ids exhausted".to_string())
        })?;
        Ok(id)
    }
}

fn has_duplicates<T: Ord>(ids: impl Iterator<Item = T>) -> bool {
    let mut ids: Vec<T> = ids.collect();
    let total = ids.len();
    ids.sort();
    ids.dedup();
    ids.len() != total
}

fn next_id(ids: impl Iterator<Item = i32>) -> RepositoryResult<i32> {
    ids.max()
        .unwrap_or(0)
        .checked_add(1)
        .ok_or_else(|| RepositoryError::ConstraintViolation("identifier space exhausted".into()))
}

/// Read-only operations for category entities.
pub trait CategoryReader {
    /// List categories in display order.
    fn list_categories(&self) -> RepositoryResult<Vec<Category>>;
    /// Retrieve a category by its identifier.
    fn get_category_by_id(&self, id: CategoryId) -> RepositoryResult<Option<Category>>;
    /// Identifier of the undeletable default category.
    fn default_category_id(&self) -> RepositoryResult<CategoryId>;
}

/// Write operations for category entities.
pub trait CategoryWriter {
    /// Append a new category to the end of the display order.
    fn create_category(&mut self, category: &NewCategory) -> RepositoryResult<CategoryId>;
    /// Rename a category, keeping its id and position.
    fn update_category(&mut self, id: CategoryId, name: &CategoryName) -> RepositoryResult<usize>;
    /// Delete a category, moving its todos to the default category.
    fn delete_category(&mut self, id: CategoryId) -> RepositoryResult<usize>;
    /// Replace the display order with `categories`, a permutation of the
    /// current entries.
    fn reorder_categories(&mut self, categories: Vec<Category>) -> RepositoryResult<usize>;
}

/// Read-only operations for todo entities and the filtered view.
pub trait TodoReader {
    /// The full collection in insertion order.
    fn list_todos(&self) -> RepositoryResult<Vec<Todo>>;
    /// The collection restricted by the current filter options.
    fn list_filtered_todos(&self) -> RepositoryResult<Vec<Todo>>;
    /// Retrieve a todo by its identifier.
    fn get_todo_by_id(&self, id: TodoId) -> RepositoryResult<Option<Todo>>;
    /// Currently active filter options.
    fn filter_options(&self) -> RepositoryResult<FilterOptions>;
}

/// Write operations for todo entities and the filter state.
pub trait TodoWriter {
    /// Persist a new todo, rejecting a start date later than the due date.
    fn create_todo(&mut self, todo: &NewTodo) -> RepositoryResult<TodoId>;
    /// Flip the completion flag.
    fn toggle_todo(&mut self, id: TodoId) -> RepositoryResult<usize>;
    /// Merge a partial update into a todo.
    fn update_todo(&mut self, id: TodoId, update: &TodoUpdate) -> RepositoryResult<usize>;
    /// Delete a todo by id.
    fn delete_todo(&mut self, id: TodoId) -> RepositoryResult<usize>;
    /// Shallow-merge `patch` into the active filter options.
    fn set_filter_options(&mut self, patch: &FilterOptionsPatch) -> RepositoryResult<()>;
    /// Push incomplete todos due in the week of `now` one week forward.
    fn move_uncompleted_todos(&mut self, now: NaiveDateTime) -> RepositoryResult<usize>;
}
