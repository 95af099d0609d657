//! Week, month and year windows used by the progress view.

use chrono::{Datelike, Months, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::domain::dates::{end_of_day, start_of_day, week_end, week_start};
use crate::domain::todo::Todo;
use crate::domain::types::TypeConstraintError;

/// Time window selectable in the progress view.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Period {
    #[default]
    Week,
    Month,
    Year,
}

impl Period {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Week => "week",
            Self::Month => "month",
            Self::Year => "year",
        }
    }
}

impl TryFrom<&str> for Period {
    type Error = TypeConstraintError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim() {
            "week" => Ok(Self::Week),
            "month" => Ok(Self::Month),
            "year" => Ok(Self::Year),
            other => Err(TypeConstraintError::InvalidValue(format!("period: {other}"))),
        }
    }
}

/// Inclusive range of instants.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl DateRange {
    pub fn contains(&self, instant: NaiveDateTime) -> bool {
        self.start <= instant && instant <= self.end
    }

    /// Widens both ends outward to Monday-start week boundaries.
    pub fn snapped_to_weeks(&self) -> Self {
        Self {
            start: start_of_day(week_start(self.start.date())),
            end: end_of_day(week_end(self.end.date())),
        }
    }
}

/// Calendar range of a period together with its display label.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PeriodRange {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub label: String,
}

impl PeriodRange {
    pub fn range(&self) -> DateRange {
        DateRange {
            start: self.start,
            end: self.end,
        }
    }
}

/// Todos bucketed into a period plus the canonical (unwidened) range.
#[derive(Debug, Clone, PartialEq)]
pub struct PeriodTodos {
    pub todos: Vec<Todo>,
    pub date_range: DateRange,
}

/// Monday 00:00 through Sunday 23:59:59.999 of the week containing `now`.
pub fn current_week(now: NaiveDateTime) -> DateRange {
    let today = now.date();
    DateRange {
        start: start_of_day(week_start(today)),
        end: end_of_day(week_end(today)),
    }
}

/// Canonical range of `period` around `now`.
pub fn date_range(period: Period, now: NaiveDateTime) -> PeriodRange {
    let today = now.date();
    match period {
        Period::Week => {
            let week = current_week(now);
            PeriodRange {
                start: week.start,
                end: week.end,
                label: format!(
                    "{} - {}",
                    week.start.format("%-m.%-d"),
                    week.end.format("%-m.%-d")
                ),
            }
        }
        Period::Month => {
            let first = today.with_day(1).unwrap_or(today);
            let last = first
                .checked_add_months(Months::new(1))
                .and_then(|next| next.pred_opt())
                .unwrap_or(today);
            PeriodRange {
                start: start_of_day(first),
                end: end_of_day(last),
                label: today.format("%Y-%m").to_string(),
            }
        }
        Period::Year => {
            let first = NaiveDate::from_ymd_opt(today.year(), 1, 1).unwrap_or(today);
            let last = NaiveDate::from_ymd_opt(today.year(), 12, 31).unwrap_or(today);
            PeriodRange {
                start: start_of_day(first),
                end: end_of_day(last),
                label: today.format("%Y").to_string(),
            }
        }
    }
}

/// Selects the todos whose bucket date falls in `period`.
///
/// Membership is tested against the range widened to whole Monday-start
/// weeks for every period, so month and year views can include a few days
/// outside the calendar boundary. The returned range is the unwidened one.
pub fn filter_todos_by_period(todos: &[Todo], period: Period, now: NaiveDateTime) -> PeriodTodos {
    let date_range = date_range(period, now).range();
    let window = date_range.snapped_to_weeks();

    let todos = todos
        .iter()
        .filter(|todo| window.contains(todo.bucket_date().1))
        .cloned()
        .collect();

    PeriodTodos { todos, date_range }
}

/// Completion figures for a set of todos.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct CompletionStats {
    pub completed: usize,
    pub total: usize,
    /// Rounded percentage, zero for an empty set.
    pub rate: u32,
}

impl CompletionStats {
    pub fn from_todos(todos: &[Todo]) -> Self {
        let total = todos.len();
        let completed = todos.iter().filter(|todo| todo.completed).count();
        Self {
            completed,
            total,
            rate: completion_rate(completed, total),
        }
    }
}

/// `round(100 * completed / total)`, defined as 0 when `total` is 0.
pub fn completion_rate(completed: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    (completed as f64 * 100.0 / total as f64).round() as u32
}
