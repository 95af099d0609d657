use serde::Deserialize;
use thiserror::Error;

use crate::domain::period::Period;
use crate::domain::types::{CategoryId, TypeConstraintError};
use crate::forms::parse_category_choice;

#[derive(Debug, Error)]
pub enum PeriodFormError {
    #[error("Period form contains invalid data: {0}")]
    TypeConstraint(String),
}

impl From<TypeConstraintError> for PeriodFormError {
    fn from(value: TypeConstraintError) -> Self {
        Self::TypeConstraint(value.to_string())
    }
}

/// Progress view selection.
#[derive(Debug, Default, Deserialize)]
pub struct PeriodViewForm {
    /// `week`, `month` or `year`; defaults to `week`.
    #[serde(default)]
    pub period: Option<String>,
    /// Category id or `"all"`.
    #[serde(default)]
    pub category_id: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PeriodViewFormPayload {
    pub period: Period,
    pub category_id: Option<CategoryId>,
}

impl TryFrom<PeriodViewForm> for PeriodViewFormPayload {
    type Error = PeriodFormError;

    fn try_from(value: PeriodViewForm) -> Result<Self, Self::Error> {
        let period = match value.period.as_deref().map(str::trim) {
            None | Some("") => Period::default(),
            Some(period) => Period::try_from(period)?,
        };

        Ok(Self {
            period,
            category_id: value
                .category_id
                .as_deref()
                .and_then(parse_category_choice),
        })
    }
}
