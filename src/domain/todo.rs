use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::dates::truncate_to_day;
use crate::domain::types::{CategoryId, DelayCount, Priority, TodoDescription, TodoId, TodoTitle};

/// A single trackable task.
///
/// `start_date` and `due_date` carry date-only semantics and are always
/// midnight values.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Todo {
    pub id: TodoId,
    pub title: TodoTitle,
    #[serde(default)]
    pub description: Option<TodoDescription>,
    #[serde(default)]
    pub completed: bool,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default)]
    pub start_date: Option<NaiveDateTime>,
    #[serde(default)]
    pub due_date: Option<NaiveDateTime>,
    pub created_at: NaiveDateTime,
    #[serde(default)]
    pub category_id: Option<CategoryId>,
    #[serde(default)]
    pub delay_count: DelayCount,
}

/// Information required to create a new [`Todo`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewTodo {
    pub title: TodoTitle,
    pub description: Option<TodoDescription>,
    pub priority: Priority,
    pub start_date: Option<NaiveDateTime>,
    pub due_date: Option<NaiveDateTime>,
    /// Missing or unknown categories resolve to the default category.
    pub category_id: Option<CategoryId>,
    pub created_at: NaiveDateTime,
}

/// Partial update merged into an existing [`Todo`].
///
/// `None` leaves a field untouched. For the nullable fields `Some(None)`
/// clears the value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TodoUpdate {
    pub title: Option<TodoTitle>,
    /// Re-normalized on every update; may clear the description.
    pub description: Option<RawDescription>,
    pub priority: Option<Priority>,
    pub completed: Option<bool>,
    pub start_date: Option<Option<NaiveDateTime>>,
    pub due_date: Option<Option<NaiveDateTime>>,
    pub category_id: Option<Option<CategoryId>>,
}

/// Rejected schedule where the start is later than the due date.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("start date cannot be later than due date")]
pub struct InvalidSchedule;

/// Ensures `start <= due` when both dates are present.
pub fn validate_schedule(
    start_date: Option<NaiveDateTime>,
    due_date: Option<NaiveDateTime>,
) -> Result<(), InvalidSchedule> {
    match (start_date, due_date) {
        (Some(start), Some(due)) if start > due => Err(InvalidSchedule),
        _ => Ok(()),
    }
}

/// Description exactly as submitted by a client, before normalization.
///
/// Clients may send numbers where text is expected; those are accepted so the
/// normalization rule can discard the zero placeholder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawDescription {
    Number(f64),
    Text(String),
}

impl RawDescription {
    /// Empty, whitespace-only, `"0"` and numeric zero all mean "no description".
    pub fn normalize(&self) -> Option<TodoDescription> {
        match self {
            Self::Number(number) if *number == 0.0 => None,
            Self::Number(number) => TodoDescription::new(number.to_string()).ok(),
            Self::Text(text) if text.trim() == "0" => None,
            Self::Text(text) => TodoDescription::new(text.as_str()).ok(),
        }
    }
}

/// Drops the `"0"` placeholder from an already validated description.
pub fn normalize_description(description: Option<TodoDescription>) -> Option<TodoDescription> {
    description.and_then(|description| RawDescription::Text(description.into_inner()).normalize())
}

impl From<&str> for RawDescription {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for RawDescription {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<i64> for RawDescription {
    fn from(value: i64) -> Self {
        Self::Number(value as f64)
    }
}

impl From<f64> for RawDescription {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

/// Which schedule field a todo is placed by.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ScheduleKind {
    Due,
    Start,
    Created,
}

impl ScheduleKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Due => "due",
            Self::Start => "start",
            Self::Created => "created",
        }
    }
}

/// How strongly the UI should flag a repeatedly postponed todo.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum DelaySeverity {
    None,
    Mild,
    Moderate,
    Severe,
}

impl Todo {
    /// Due date, else start date, else creation instant.
    pub fn bucket_date(&self) -> (ScheduleKind, NaiveDateTime) {
        match (self.due_date, self.start_date) {
            (Some(due), _) => (ScheduleKind::Due, due),
            (None, Some(start)) => (ScheduleKind::Start, start),
            (None, None) => (ScheduleKind::Created, self.created_at),
        }
    }

    /// Start used by date-range filtering.
    pub fn effective_start(&self) -> NaiveDateTime {
        self.start_date.unwrap_or(self.created_at)
    }

    /// Due used by date-range filtering.
    pub fn effective_due(&self) -> NaiveDateTime {
        self.due_date.unwrap_or(self.created_at)
    }

    pub fn delay_severity(&self) -> DelaySeverity {
        match self.delay_count.get() {
            0 => DelaySeverity::None,
            1 => DelaySeverity::Mild,
            2 => DelaySeverity::Moderate,
            _ => DelaySeverity::Severe,
        }
    }

    /// Human readable postponement, `None` for todos never rolled over.
    pub fn delay_label(&self) -> Option<String> {
        match self.delay_count.get() {
            0 => None,
            1 => Some("1 week delayed".to_string()),
            weeks => Some(format!("{weeks} weeks delayed")),
        }
    }

    /// Merges a partial update into this todo.
    ///
    /// Category resolution is left to the caller, which knows the registry.
    pub fn apply(&mut self, update: &TodoUpdate) {
        if let Some(title) = &update.title {
            self.title = title.clone();
        }
        if let Some(description) = &update.description {
            self.description = description.normalize();
        }
        if let Some(priority) = update.priority {
            self.priority = priority;
        }
        if let Some(completed) = update.completed {
            self.completed = completed;
        }
        if let Some(start_date) = update.start_date {
            self.start_date = start_date.map(truncate_to_day);
        }
        if let Some(due_date) = update.due_date {
            self.due_date = due_date.map(truncate_to_day);
        }
        if let Some(category_id) = update.category_id {
            self.category_id = category_id;
        }
    }
}
