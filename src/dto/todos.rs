use chrono::NaiveDateTime;
use serde::Serialize;

use crate::domain::category::Category;
use crate::domain::filter::FilterOptions;
use crate::domain::todo::{DelaySeverity, ScheduleKind, Todo};
use crate::domain::types::Priority;

/// Todo row with everything a list item needs to render.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TodoDto {
    pub id: i32,
    pub title: String,
    pub description: Option<String>,
    pub completed: bool,
    pub priority: Priority,
    pub start_date: Option<NaiveDateTime>,
    pub due_date: Option<NaiveDateTime>,
    pub created_at: NaiveDateTime,
    pub category_id: Option<i32>,
    /// Name of the category, if it still exists.
    pub category_name: Option<String>,
    pub delay_count: u32,
    pub delay_severity: DelaySeverity,
    pub delay_label: Option<String>,
    /// Which date the todo is placed by, and that date.
    pub schedule_kind: ScheduleKind,
    pub schedule_date: NaiveDateTime,
    /// For example `due 2025-06-16`.
    pub schedule_label: String,
}

impl TodoDto {
    pub fn new(value: Todo, categories: &[Category]) -> Self {
        let category_name = value.category_id.and_then(|category_id| {
            categories
                .iter()
                .find(|category| category.id == category_id)
                .map(|category| category.name.as_str().to_string())
        });
        let (schedule_kind, schedule_date) = value.bucket_date();
        let delay_severity = value.delay_severity();
        let delay_label = value.delay_label();
        let schedule_label = format!(
            "{} {}",
            schedule_kind.as_str(),
            schedule_date.format("%Y-%m-%d")
        );

        Self {
            id: value.id.get(),
            title: value.title.into_inner(),
            description: value.description.map(|d| d.into_inner()),
            completed: value.completed,
            priority: value.priority,
            start_date: value.start_date,
            due_date: value.due_date,
            created_at: value.created_at,
            category_id: value.category_id.map(|id| id.get()),
            category_name,
            delay_count: value.delay_count.get(),
            delay_severity,
            delay_label,
            schedule_kind,
            schedule_date,
            schedule_label,
        }
    }
}

/// Current filter controls, with sentinels for inactive selects.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FilterOptionsDto {
    pub category_id: String,
    pub priority: String,
    pub show_completed: bool,
    pub start_date: String,
    pub end_date: String,
}

impl From<FilterOptions> for FilterOptionsDto {
    fn from(value: FilterOptions) -> Self {
        let format_date = |date: Option<chrono::NaiveDate>| {
            date.map(|d| d.format("%Y-%m-%d").to_string())
                .unwrap_or_default()
        };
        Self {
            category_id: value
                .category_id
                .map(|id| id.to_string())
                .unwrap_or_else(|| crate::forms::ALL_SENTINEL.to_string()),
            priority: value
                .priority
                .map(|priority| priority.as_str().to_string())
                .unwrap_or_else(|| crate::forms::ALL_SENTINEL.to_string()),
            show_completed: value.show_completed,
            start_date: format_date(value.start_date),
            end_date: format_date(value.end_date),
        }
    }
}
