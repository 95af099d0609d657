use chrono::{NaiveDate, NaiveDateTime};
use serde::Deserialize;
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::domain::dates::{parse_date_input, start_of_day};
use crate::domain::todo::{InvalidSchedule, NewTodo, RawDescription, TodoUpdate, validate_schedule};
use crate::domain::types::{
    CategoryId, Priority, TodoDescription, TodoId, TodoTitle, TypeConstraintError,
};
use crate::forms::parse_category_choice;

#[derive(Debug, Error)]
pub enum TodoFormError {
    #[error("Todo form validation failed: {0}")]
    Validation(String),
    #[error("Todo form contains invalid data: {0}")]
    TypeConstraint(String),
    #[error("{0}")]
    InvalidSchedule(#[from] InvalidSchedule),
}

impl From<ValidationErrors> for TodoFormError {
    fn from(value: ValidationErrors) -> Self {
        Self::Validation(value.to_string())
    }
}

impl From<TypeConstraintError> for TodoFormError {
    fn from(value: TypeConstraintError) -> Self {
        Self::TypeConstraint(value.to_string())
    }
}

fn parse_priority(value: Option<&str>) -> Result<Priority, TypeConstraintError> {
    match value.map(str::trim) {
        None | Some("") => Ok(Priority::default()),
        Some(value) => Priority::try_from(value),
    }
}

fn parse_optional_date(value: Option<&str>) -> Option<NaiveDate> {
    value.and_then(parse_date_input)
}

fn check_schedule(
    start_date: Option<NaiveDate>,
    due_date: Option<NaiveDate>,
) -> Result<(), InvalidSchedule> {
    validate_schedule(start_date.map(start_of_day), due_date.map(start_of_day))
}

/// New todo as submitted by the entry form.
#[derive(Deserialize, Validate)]
pub struct AddTodoForm {
    #[validate(length(min = 1))]
    pub title: String,
    #[serde(default)]
    pub description: Option<RawDescription>,
    #[serde(default)]
    pub priority: Option<String>,
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub due_date: Option<String>,
    /// Category id, `"none"` or empty for the default category.
    #[serde(default)]
    pub category_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AddTodoFormPayload {
    pub title: TodoTitle,
    pub description: Option<TodoDescription>,
    pub priority: Priority,
    pub start_date: Option<NaiveDate>,
    pub due_date: Option<NaiveDate>,
    pub category_id: Option<CategoryId>,
}

impl AddTodoFormPayload {
    pub fn into_new_todo(self, now: NaiveDateTime) -> NewTodo {
        NewTodo {
            title: self.title,
            description: self.description,
            priority: self.priority,
            start_date: self.start_date.map(start_of_day),
            due_date: self.due_date.map(start_of_day),
            category_id: self.category_id,
            created_at: now,
        }
    }
}

impl TryFrom<AddTodoForm> for AddTodoFormPayload {
    type Error = TodoFormError;

    fn try_from(value: AddTodoForm) -> Result<Self, Self::Error> {
        value.validate()?;

        let start_date = parse_optional_date(value.start_date.as_deref());
        let due_date = parse_optional_date(value.due_date.as_deref());
        check_schedule(start_date, due_date)?;

        Ok(Self {
            title: TodoTitle::new(value.title)?,
            description: value
                .description
                .as_ref()
                .and_then(RawDescription::normalize),
            priority: parse_priority(value.priority.as_deref())?,
            start_date,
            due_date,
            category_id: value
                .category_id
                .as_deref()
                .and_then(parse_category_choice),
        })
    }
}

/// Full edit of an existing todo. Omitted dates and description are cleared.
#[derive(Deserialize, Validate)]
pub struct EditTodoForm {
    #[validate(range(min = 1))]
    pub todo_id: i32,
    #[validate(length(min = 1))]
    pub title: String,
    #[serde(default)]
    pub description: Option<RawDescription>,
    #[serde(default)]
    pub priority: Option<String>,
    /// Left unchanged when omitted.
    #[serde(default)]
    pub completed: Option<bool>,
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub due_date: Option<String>,
    #[serde(default)]
    pub category_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EditTodoFormPayload {
    pub todo_id: TodoId,
    pub update: TodoUpdate,
}

impl TryFrom<EditTodoForm> for EditTodoFormPayload {
    type Error = TodoFormError;

    fn try_from(value: EditTodoForm) -> Result<Self, Self::Error> {
        value.validate()?;

        let start_date = parse_optional_date(value.start_date.as_deref());
        let due_date = parse_optional_date(value.due_date.as_deref());
        check_schedule(start_date, due_date)?;

        let update = TodoUpdate {
            title: Some(TodoTitle::new(value.title)?),
            description: Some(
                value
                    .description
                    .unwrap_or_else(|| RawDescription::Text(String::new())),
            ),
            priority: Some(parse_priority(value.priority.as_deref())?),
            completed: value.completed,
            start_date: Some(start_date.map(start_of_day)),
            due_date: Some(due_date.map(start_of_day)),
            category_id: Some(
                value
                    .category_id
                    .as_deref()
                    .and_then(parse_category_choice),
            ),
        };

        Ok(Self {
            todo_id: TodoId::new(value.todo_id)?,
            update,
        })
    }
}

/// Identifies a single todo for toggle and delete actions.
#[derive(Deserialize, Validate)]
pub struct TodoActionForm {
    #[validate(range(min = 1))]
    pub todo_id: i32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TodoActionFormPayload {
    pub todo_id: TodoId,
}

impl TryFrom<TodoActionForm> for TodoActionFormPayload {
    type Error = TodoFormError;

    fn try_from(value: TodoActionForm) -> Result<Self, Self::Error> {
        value.validate()?;
        Ok(Self {
            todo_id: TodoId::new(value.todo_id)?,
        })
    }
}
