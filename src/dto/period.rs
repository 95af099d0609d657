use chrono::NaiveDateTime;
use serde::Serialize;

use crate::domain::period::Period;
use crate::dto::todos::TodoDto;

/// Progress view for one period.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PeriodViewDto {
    pub period: Period,
    pub label: String,
    /// Calendar bounds of the period, before week alignment.
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub todos: Vec<TodoDto>,
    pub completed: usize,
    pub total: usize,
    pub completion_rate: u32,
    /// Todos pushed into next week while preparing this view.
    pub rolled_over: usize,
}
