use chrono::NaiveDateTime;

use crate::domain::period::{CompletionStats, Period, date_range, filter_todos_by_period};
use crate::dto::period::PeriodViewDto;
use crate::dto::todos::TodoDto;
use crate::forms::period::PeriodViewFormPayload;
use crate::repository::{CategoryReader, TodoReader, TodoWriter};

use super::{ServiceError, ServiceResult};

/// Builds the progress view for the selected period.
///
/// Opening the week view first rolls unfinished todos of the current week
/// over into the next one, so the week only shows what is still planned for
/// it. The optional category restricts the todos before bucketing; an
/// unknown category yields an empty view rather than an error.
pub fn show_period<R>(
    payload: PeriodViewFormPayload,
    now: NaiveDateTime,
    repo: &mut R,
) -> ServiceResult<PeriodViewDto>
where
    R: CategoryReader + TodoReader + TodoWriter,
{
    let rolled_over = if payload.period == Period::Week {
        match repo.move_uncompleted_todos(now) {
            Ok(moved) => moved,
            Err(e) => {
                log::error!("Failed to roll over todos: {e}");
                return Err(ServiceError::Internal);
            }
        }
    } else {
        0
    };

    let categories = match repo.list_categories() {
        Ok(categories) => categories,
        Err(e) => {
            log::error!("Failed to list categories: {e}");
            return Err(ServiceError::Internal);
        }
    };

    let mut todos = match repo.list_todos() {
        Ok(todos) => todos,
        Err(e) => {
            log::error!("Failed to list todos: {e}");
            return Err(ServiceError::Internal);
        }
    };
    if let Some(category_id) = payload.category_id {
        todos.retain(|todo| todo.category_id == Some(category_id));
    }

    let bucketed = filter_todos_by_period(&todos, payload.period, now);
    let stats = CompletionStats::from_todos(&bucketed.todos);
    log::debug!(
        "{} view: {} of {} todos completed",
        payload.period.as_str(),
        stats.completed,
        stats.total
    );
    let label = date_range(payload.period, now).label;

    Ok(PeriodViewDto {
        period: payload.period,
        label,
        start: bucketed.date_range.start,
        end: bucketed.date_range.end,
        todos: bucketed
            .todos
            .into_iter()
            .map(|todo| TodoDto::new(todo, &categories))
            .collect(),
        completed: stats.completed,
        total: stats.total,
        completion_rate: stats.rate,
        rolled_over,
    })
}
