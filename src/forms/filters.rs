use serde::Deserialize;
use thiserror::Error;

use crate::domain::dates::parse_date_input;
use crate::domain::filter::FilterOptionsPatch;
use crate::domain::types::{Priority, TypeConstraintError};
use crate::forms::{ALL_SENTINEL, parse_category_choice};

#[derive(Debug, Error)]
pub enum FilterFormError {
    #[error("Filter form contains invalid data: {0}")]
    TypeConstraint(String),
}

impl From<TypeConstraintError> for FilterFormError {
    fn from(value: TypeConstraintError) -> Self {
        Self::TypeConstraint(value.to_string())
    }
}

/// Filter controls as submitted; omitted fields keep their current value.
#[derive(Debug, Default, Deserialize)]
pub struct FilterOptionsForm {
    /// Category id or `"all"`.
    #[serde(default)]
    pub category_id: Option<String>,
    /// Priority name or `"all"`.
    #[serde(default)]
    pub priority: Option<String>,
    #[serde(default)]
    pub show_completed: Option<bool>,
    /// `YYYY-MM-DD`; empty clears the bound.
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub end_date: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FilterOptionsFormPayload {
    pub patch: FilterOptionsPatch,
}

impl TryFrom<FilterOptionsForm> for FilterOptionsFormPayload {
    type Error = FilterFormError;

    fn try_from(value: FilterOptionsForm) -> Result<Self, Self::Error> {
        let priority = match value.priority.as_deref().map(str::trim) {
            None => None,
            Some("") | Some(ALL_SENTINEL) => Some(None),
            Some(priority) => Some(Some(Priority::try_from(priority)?)),
        };

        let patch = FilterOptionsPatch {
            category_id: value.category_id.as_deref().map(parse_category_choice),
            priority,
            show_completed: value.show_completed,
            start_date: value.start_date.as_deref().map(parse_date_input),
            end_date: value.end_date.as_deref().map(parse_date_input),
        };

        Ok(Self { patch })
    }
}
