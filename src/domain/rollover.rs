//! Weekly rollover of unfinished scheduled work.

use chrono::NaiveDateTime;

use crate::domain::dates::add_weeks;
use crate::domain::period::current_week;
use crate::domain::todo::{Todo, normalize_description};

/// Pushes incomplete todos due this week one week forward.
///
/// Only todos with both a start and a due date take part. Each moved todo
/// gets both dates shifted by seven days and its delay count incremented.
/// Descriptions holding the literal `"0"` placeholder are cleared along the
/// way. Returns the number of todos moved.
///
/// Calling this again with the same `now` is a no-op for already moved todos,
/// since their due date now lies in the following week.
pub fn move_uncompleted_todos(todos: &mut [Todo], now: NaiveDateTime) -> usize {
    let week = current_week(now);
    let mut moved = 0;

    for todo in todos.iter_mut() {
        todo.description = normalize_description(todo.description.take());

        let (Some(start_date), Some(due_date)) = (todo.start_date, todo.due_date) else {
            continue;
        };

        if todo.completed || !week.contains(due_date) {
            continue;
        }

        match (add_weeks(start_date, 1), add_weeks(due_date, 1)) {
            (Some(next_start), Some(next_due)) => {
                todo.start_date = Some(next_start);
                todo.due_date = Some(next_due);
                todo.delay_count = todo.delay_count.incremented();
                moved += 1;
            }
            _ => log::warn!("Todo {} cannot be moved past the calendar limit", todo.id),
        }
    }

    moved
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::{DelayCount, Priority, TodoDescription, TodoId, TodoTitle};
    use chrono::{NaiveDate, NaiveTime, TimeDelta};

    fn at(y: i32, m: u32, d: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_time(NaiveTime::MIN)
    }

    fn now() -> NaiveDateTime {
        at(2025, 6, 11) + TimeDelta::hours(10)
    }

    fn scheduled(id: i32, start: NaiveDateTime, due: NaiveDateTime, completed: bool) -> Todo {
        Todo {
            id: TodoId::new(id).unwrap(),
            title: TodoTitle::new(format!("todo {id}")).unwrap(),
            description: None,
            completed,
            priority: Priority::High,
            start_date: Some(start),
            due_date: Some(due),
            created_at: at(2025, 6, 1),
            category_id: None,
            delay_count: DelayCount::default(),
        }
    }

    #[test]
    fn moves_incomplete_todo_due_this_week() {
        let mut todos = vec![scheduled(1, at(2025, 6, 4), at(2025, 6, 12), false)];

        assert_eq!(move_uncompleted_todos(&mut todos, now()), 1);

        let todo = &todos[0];
        assert_eq!(todo.delay_count, 1);
        assert_eq!(todo.start_date, Some(at(2025, 6, 11)));
        assert_eq!(todo.due_date, Some(at(2025, 6, 19)));
        assert!(!current_week(now()).contains(todo.due_date.unwrap()));
    }

    #[test]
    fn second_run_in_the_same_week_is_a_no_op() {
        let mut todos = vec![scheduled(1, at(2025, 6, 9), at(2025, 6, 9), false)];
        move_uncompleted_todos(&mut todos, now());
        let after_first = todos.clone();

        assert_eq!(move_uncompleted_todos(&mut todos, now()), 0);
        assert_eq!(todos, after_first);
    }

    #[test]
    fn leaves_completed_unscheduled_and_other_weeks_alone() {
        let mut half_scheduled = scheduled(3, at(2025, 6, 10), at(2025, 6, 10), false);
        half_scheduled.start_date = None;
        let mut todos = vec![
            scheduled(1, at(2025, 6, 9), at(2025, 6, 13), true),
            scheduled(2, at(2025, 6, 1), at(2025, 6, 8), false),
            half_scheduled,
            scheduled(4, at(2025, 6, 16), at(2025, 6, 16), false),
        ];
        let before = todos.clone();

        assert_eq!(move_uncompleted_todos(&mut todos, now()), 0);
        assert_eq!(todos, before);
    }

    #[test]
    fn clears_zero_placeholder_descriptions() {
        let mut todo = scheduled(1, at(2025, 5, 1), at(2025, 5, 2), true);
        todo.description = TodoDescription::new("0").ok();
        let mut kept = scheduled(2, at(2025, 5, 1), at(2025, 5, 2), true);
        kept.description = TodoDescription::new("10").ok();
        let mut todos = vec![todo, kept];

        move_uncompleted_todos(&mut todos, now());

        assert_eq!(todos[0].description, None);
        assert_eq!(todos[1].description.as_ref().unwrap().as_str(), "10");
    }
}
