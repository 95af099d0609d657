use pushkind_todo::forms::categories::{
    DeleteCategoryForm, DeleteCategoryFormPayload, ReorderCategoriesForm,
    ReorderCategoriesFormPayload,
};
use pushkind_todo::forms::filters::{FilterOptionsForm, FilterOptionsFormPayload};
use pushkind_todo::forms::period::{PeriodViewForm, PeriodViewFormPayload};
use pushkind_todo::forms::todos::{AddTodoForm, AddTodoFormPayload};
use pushkind_todo::services::categories::{delete_category, reorder_categories, show_categories};
use pushkind_todo::services::period::show_period;
use pushkind_todo::services::todos::{
    add_todo, set_filter_options, show_filtered_todos, show_todos,
};
use pushkind_todo::services::ServiceError;

mod common;

fn add_form(title: &str) -> AddTodoForm {
    AddTodoForm {
        title: title.to_string(),
        description: None,
        priority: None,
        start_date: None,
        due_date: None,
        category_id: None,
    }
}

fn submit(planner: &mut common::TestPlanner, form: AddTodoForm) {
    let payload = AddTodoFormPayload::try_from(form).expect("valid todo form");
    let created = add_todo(payload, planner.now, &mut planner.repo).expect("service call");
    assert!(created);
}

#[test]
fn opening_the_week_view_rolls_unfinished_work_forward() {
    let mut planner = common::TestPlanner::new();
    let mut form = add_form("Weekly review");
    form.start_date = Some("2025-06-09".into());
    form.due_date = Some("2025-06-09".into());
    submit(&mut planner, form);

    let payload = PeriodViewFormPayload::try_from(PeriodViewForm::default()).expect("valid form");
    let week = show_period(payload, planner.now, &mut planner.repo).expect("week view");

    assert_eq!(week.rolled_over, 1);
    assert_eq!(week.total, 0);
    assert_eq!(week.completion_rate, 0);

    let todo = &show_todos(&planner.repo).expect("list todos")[0];
    assert_eq!(
        todo.due_date.map(|d| d.date().to_string()).as_deref(),
        Some("2025-06-16")
    );
    assert_eq!(
        todo.start_date.map(|d| d.date().to_string()).as_deref(),
        Some("2025-06-16")
    );
    assert_eq!(todo.delay_count, 1);
    assert_eq!(todo.delay_label.as_deref(), Some("1 week delayed"));
}

#[test]
fn todos_without_a_start_date_stay_put() {
    let mut planner = common::TestPlanner::new();
    let mut form = add_form("A");
    form.priority = Some("high".into());
    form.due_date = Some("2025-06-09".into());
    submit(&mut planner, form);

    let payload = PeriodViewFormPayload::try_from(PeriodViewForm::default()).expect("valid form");
    let week = show_period(payload, planner.now, &mut planner.repo).expect("week view");

    assert_eq!(week.rolled_over, 0);
    assert_eq!(week.total, 1);
    let todo = &show_todos(&planner.repo).expect("list todos")[0];
    assert_eq!(
        todo.due_date.map(|d| d.date().to_string()).as_deref(),
        Some("2025-06-09")
    );
    assert_eq!(todo.delay_count, 0);
    assert_eq!(todo.delay_label, None);
}

#[test]
fn category_filter_narrows_and_all_restores() {
    let mut planner = common::TestPlanner::new();
    let mut taxes = add_form("File return");
    taxes.category_id = Some("3".into());
    submit(&mut planner, taxes);
    submit(&mut planner, add_form("Buy milk"));

    let narrow = FilterOptionsFormPayload::try_from(FilterOptionsForm {
        category_id: Some("3".into()),
        ..Default::default()
    })
    .expect("valid filter form");
    set_filter_options(narrow, &mut planner.repo).expect("set filter");

    let visible = show_filtered_todos(&planner.repo).expect("filtered todos");
    assert_eq!(visible.len(), 1);
    assert_eq!(visible[0].title, "File return");

    let all = FilterOptionsFormPayload::try_from(FilterOptionsForm {
        category_id: Some("all".into()),
        ..Default::default()
    })
    .expect("valid filter form");
    set_filter_options(all, &mut planner.repo).expect("set filter");

    assert_eq!(show_filtered_todos(&planner.repo).expect("filtered").len(), 2);
}

#[test]
fn deleting_a_category_keeps_its_todos() {
    let mut planner = common::TestPlanner::new();
    let mut setup = add_form("Install printer");
    setup.category_id = Some("2".into());
    submit(&mut planner, setup);

    let payload = DeleteCategoryFormPayload::try_from(DeleteCategoryForm { category_id: 2 })
        .expect("valid delete form");
    assert_eq!(delete_category(payload, &mut planner.repo), Ok(true));

    let todos = show_todos(&planner.repo).expect("list todos");
    assert_eq!(todos.len(), 1);
    assert_eq!(todos[0].category_name.as_deref(), Some("Todo"));

    let default = DeleteCategoryFormPayload::try_from(DeleteCategoryForm { category_id: 1 })
        .expect("valid delete form");
    assert_eq!(delete_category(default, &mut planner.repo), Ok(false));
}

#[test]
fn reorder_keeps_every_category() {
    let mut planner = common::TestPlanner::new();

    let payload = ReorderCategoriesFormPayload::try_from(ReorderCategoriesForm {
        category_ids: vec![2, 3, 1],
    })
    .expect("valid reorder form");
    assert_eq!(reorder_categories(payload, &mut planner.repo), Ok(true));

    let names: Vec<String> = show_categories(&planner.repo)
        .expect("list categories")
        .into_iter()
        .map(|category| category.name)
        .collect();
    assert_eq!(names, vec!["Setup", "Taxes", "Todo"]);

    let stray = ReorderCategoriesFormPayload::try_from(ReorderCategoriesForm {
        category_ids: vec![2, 3, 9],
    })
    .expect("valid reorder form");
    assert_eq!(
        reorder_categories(stray, &mut planner.repo),
        Err(ServiceError::NotFound)
    );
}

#[test]
fn invalid_schedule_is_rejected_before_reaching_the_planner() {
    let planner = common::TestPlanner::new();
    let mut form = add_form("Backwards");
    form.start_date = Some("2025-06-20".into());
    form.due_date = Some("2025-06-10".into());

    let err: ServiceError = AddTodoFormPayload::try_from(form)
        .expect_err("schedule must be rejected")
        .into();

    assert_eq!(
        err,
        ServiceError::Form("start date cannot be later than due date".to_string())
    );
    assert!(show_todos(&planner.repo).expect("list todos").is_empty());
}
