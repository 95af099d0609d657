//! Predicates deriving the visible todo list from the full collection.
//!
//! Every active option is a conjunctive predicate, so the order in which they
//! are checked never changes the result and filtering twice is the same as
//! filtering once.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::domain::dates::start_of_day;
use crate::domain::todo::Todo;
use crate::domain::types::{CategoryId, Priority};

/// Active filter predicates.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct FilterOptions {
    pub category_id: Option<CategoryId>,
    pub priority: Option<Priority>,
    /// When `false`, completed todos are hidden.
    pub show_completed: bool,
    /// Hide todos starting before this day.
    pub start_date: Option<NaiveDate>,
    /// Hide todos due after this day.
    pub end_date: Option<NaiveDate>,
}

impl Default for FilterOptions {
    fn default() -> Self {
        Self {
            category_id: None,
            priority: None,
            show_completed: true,
            start_date: None,
            end_date: None,
        }
    }
}

/// Partial options shallow-merged into the current [`FilterOptions`].
///
/// `None` keeps the current value; `Some(None)` clears an optional predicate.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterOptionsPatch {
    pub category_id: Option<Option<CategoryId>>,
    pub priority: Option<Option<Priority>>,
    pub show_completed: Option<bool>,
    pub start_date: Option<Option<NaiveDate>>,
    pub end_date: Option<Option<NaiveDate>>,
}

impl FilterOptionsPatch {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

impl FilterOptions {
    /// Applies the supplied fields of `patch`, keeping everything else.
    pub fn merge(&mut self, patch: &FilterOptionsPatch) {
        if let Some(category_id) = patch.category_id {
            self.category_id = category_id;
        }
        if let Some(priority) = patch.priority {
            self.priority = priority;
        }
        if let Some(show_completed) = patch.show_completed {
            self.show_completed = show_completed;
        }
        if let Some(start_date) = patch.start_date {
            self.start_date = start_date;
        }
        if let Some(end_date) = patch.end_date {
            self.end_date = end_date;
        }
    }

    /// Returns `true` when `todo` satisfies every active predicate.
    pub fn matches(&self, todo: &Todo) -> bool {
        if let Some(category_id) = self.category_id {
            if todo.category_id != Some(category_id) {
                return false;
            }
        }

        if let Some(priority) = self.priority {
            if todo.priority != priority {
                return false;
            }
        }

        if !self.show_completed && todo.completed {
            return false;
        }

        if let Some(start_date) = self.start_date {
            if todo.effective_start() < start_of_day(start_date) {
                return false;
            }
        }

        if let Some(end_date) = self.end_date {
            if todo.effective_due() > end_of_filter_day(end_date) {
                return false;
            }
        }

        true
    }
}

// Whole seconds: an instant within the final second of the day is excluded.
fn end_of_filter_day(date: NaiveDate) -> NaiveDateTime {
    date.and_hms_opt(23, 59, 59)
        .unwrap_or_else(|| start_of_day(date))
}

/// Keeps the todos matching `options`, preserving collection order.
pub fn apply_filters(todos: &[Todo], options: &FilterOptions) -> Vec<Todo> {
    todos
        .iter()
        .filter(|todo| options.matches(todo))
        .cloned()
        .collect()
}
