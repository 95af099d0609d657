use chrono::NaiveDateTime;

use crate::domain::dates::truncate_to_day;
use crate::domain::filter::{FilterOptions, FilterOptionsPatch};
use crate::domain::rollover;
use crate::domain::todo::{NewTodo, Todo, TodoUpdate, normalize_description, validate_schedule};
use crate::domain::types::{DelayCount, TodoId};
use crate::repository::{
    InMemoryRepository, RepositoryError, RepositoryResult, TodoReader, TodoWriter,
};

impl TodoReader for InMemoryRepository {
    fn list_todos(&self) -> RepositoryResult<Vec<Todo>> {
        Ok(self.todos.clone())
    }

    fn list_filtered_todos(&self) -> RepositoryResult<Vec<Todo>> {
        Ok(self.filtered_todos.clone())
    }

    fn get_todo_by_id(&self, id: TodoId) -> RepositoryResult<Option<Todo>> {
        Ok(self.todos.iter().find(|todo| todo.id == id).cloned())
    }

    fn filter_options(&self) -> RepositoryResult<FilterOptions> {
        Ok(self.filter_options.clone())
    }
}

impl TodoWriter for InMemoryRepository {
    fn create_todo(&mut self, todo: &NewTodo) -> RepositoryResult<TodoId> {
        let start_date = todo.start_date.map(truncate_to_day);
        let due_date = todo.due_date.map(truncate_to_day);
        validate_schedule(start_date, due_date)
            .map_err(|e| RepositoryError::ValidationError(e.to_string()))?;

        let category_id = self.resolve_category(todo.category_id);
        let id = self.allocate_todo_id()?;
        self.todos.push(Todo {
            id,
            title: todo.title.clone(),
            description: normalize_description(todo.description.clone()),
            completed: false,
            priority: todo.priority,
            start_date,
            due_date,
            created_at: todo.created_at,
            category_id: Some(category_id),
            delay_count: DelayCount::default(),
        });
        self.refresh_filtered();

        Ok(id)
    }

    fn toggle_todo(&mut self, id: TodoId) -> RepositoryResult<usize> {
        let Some(todo) = self.todos.iter_mut().find(|todo| todo.id == id) else {
            return Ok(0);
        };
        todo.completed = !todo.completed;
        self.refresh_filtered();
        Ok(1)
    }

    fn update_todo(&mut self, id: TodoId, update: &TodoUpdate) -> RepositoryResult<usize> {
        let category_id = update
            .category_id
            .map(|category_id| self.resolve_category(category_id));

        let Some(todo) = self.todos.iter_mut().find(|todo| todo.id == id) else {
            return Ok(0);
        };
        todo.apply(update);
        if let Some(category_id) = category_id {
            todo.category_id = Some(category_id);
        }
        self.refresh_filtered();
        Ok(1)
    }

    fn delete_todo(&mut self, id: TodoId) -> RepositoryResult<usize> {
        let before = self.todos.len();
        self.todos.retain(|todo| todo.id != id);
        let affected = before - self.todos.len();
        if affected > 0 {
            self.refresh_filtered();
        }
        Ok(affected)
    }

    fn set_filter_options(&mut self, patch: &FilterOptionsPatch) -> RepositoryResult<()> {
        if let Some(Some(category_id)) = patch.category_id {
            if !self.has_category(category_id) {
                return Err(RepositoryError::NotFound(format!("category {category_id}")));
            }
        }

        self.filter_options.merge(patch);
        self.refresh_filtered();
        Ok(())
    }

    fn move_uncompleted_todos(&mut self, now: NaiveDateTime) -> RepositoryResult<usize> {
        let moved = rollover::move_uncompleted_todos(&mut self.todos, now);
        self.refresh_filtered();
        Ok(moved)
    }
}
