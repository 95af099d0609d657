use pushkind_todo::domain::category::NewCategory;
use pushkind_todo::domain::filter::FilterOptionsPatch;
use pushkind_todo::domain::todo::NewTodo;
use pushkind_todo::domain::types::{CategoryId, CategoryName, Priority, TodoTitle};
use pushkind_todo::repository::{
    CategoryReader, CategoryWriter, InMemoryRepository, RepositoryError, TodoReader, TodoWriter,
};
use pushkind_todo::settings::TodoSettings;

mod common;

fn new_todo(title: &str, category: i32, now: chrono::NaiveDateTime) -> NewTodo {
    NewTodo {
        title: TodoTitle::new(title).expect("valid title"),
        description: None,
        priority: Priority::High,
        start_date: None,
        due_date: None,
        category_id: CategoryId::new(category).ok(),
        created_at: now,
    }
}

#[test]
fn snapshot_survives_a_trip_through_disk() {
    let mut planner = common::TestPlanner::new();
    let now = planner.now;
    let errands = planner
        .repo
        .create_category(&NewCategory {
            name: CategoryName::new("Errands").expect("valid category name"),
            created_at: now,
        })
        .expect("should create category");
    planner
        .repo
        .create_todo(&new_todo("Post office", errands.get(), now))
        .expect("should create todo");
    planner
        .repo
        .set_filter_options(&FilterOptionsPatch {
            category_id: Some(Some(errands)),
            ..Default::default()
        })
        .expect("should set filter");

    let mut file = planner.save();
    let snapshot = common::load(&mut file);
    let mut restored = InMemoryRepository::restore(snapshot).expect("should restore");

    assert_eq!(restored.snapshot(), planner.repo.snapshot());
    assert_eq!(restored.list_filtered_todos().expect("list").len(), 1);

    // Counters continue after the highest restored id.
    let next = restored
        .create_todo(&new_todo("Bank", 1, now))
        .expect("should create todo");
    assert_eq!(next, 2);
}

#[test]
fn restore_rejects_missing_default_category() {
    let planner = common::TestPlanner::new();
    let mut snapshot = planner.repo.snapshot();
    snapshot.categories.retain(|category| category.id != 1);

    let err = InMemoryRepository::restore(snapshot).expect_err("should reject snapshot");
    assert!(matches!(err, RepositoryError::ValidationError(_)));
}

#[test]
fn restore_accepts_snapshot_without_todos() {
    common::init_logging();
    let json = r#"{
        "categories": [
            {"id": 7, "name": "Home", "created_at": "2025-06-01T00:00:00"}
        ],
        "default_category_id": 7
    }"#;

    let snapshot = serde_json::from_str(json).expect("valid snapshot json");
    let mut repo = InMemoryRepository::restore(snapshot).expect("should restore");

    assert!(repo.list_todos().expect("list").is_empty());
    assert!(repo.filter_options().expect("options").show_completed);
    let id = repo
        .create_category(&NewCategory {
            name: CategoryName::new("Garden").expect("valid category name"),
            created_at: common::fixed_now(),
        })
        .expect("should create category");
    assert_eq!(id, 8);
}

#[test]
fn settings_control_seeding() {
    common::init_logging();
    let settings = TodoSettings {
        seed_categories: vec!["Inbox".into(), "Work".into()],
        default_category: "Work".into(),
        show_completed: false,
    };

    let mut repo = InMemoryRepository::from_settings(&settings, common::fixed_now());

    let names: Vec<String> = repo
        .list_categories()
        .expect("list")
        .into_iter()
        .map(|category| category.name.into_inner())
        .collect();
    assert_eq!(names, vec!["Inbox", "Work"]);
    assert_eq!(repo.default_category_id().expect("default"), 2);
    assert!(!repo.filter_options().expect("options").show_completed);

    let id = repo
        .create_todo(&new_todo("Standup", 99, common::fixed_now()))
        .expect("should create todo");
    let todo = repo.get_todo_by_id(id).expect("get").expect("exists");
    assert_eq!(todo.category_id, CategoryId::new(2).ok());
}

#[test]
fn restore_applies_creation_rules_to_todos() {
    common::init_logging();
    let json = r#"{
        "categories": [
            {"id": 1, "name": "Todo", "created_at": "2025-06-01T00:00:00"},
            {"id": 2, "name": "Work", "created_at": "2025-06-01T00:00:00"}
        ],
        "default_category_id": 1,
        "todos": [
            {
                "id": 4,
                "title": "Imported",
                "description": "0",
                "start_date": "2025-06-09T15:30:00",
                "due_date": "2025-06-10T08:00:00",
                "created_at": "2025-06-01T10:00:00",
                "category_id": 9
            },
            {
                "id": 5,
                "title": "Uncategorized",
                "created_at": "2025-06-01T10:00:00"
            },
            {
                "id": 6,
                "title": "Work item",
                "created_at": "2025-06-01T10:00:00",
                "category_id": 2
            }
        ]
    }"#;

    let snapshot = serde_json::from_str(json).expect("valid snapshot json");
    let repo = InMemoryRepository::restore(snapshot).expect("should restore");
    let todos = repo.list_todos().expect("list");

    let imported = &todos[0];
    assert_eq!(imported.description, None);
    assert_eq!(
        imported.start_date.map(|d| d.to_string()).as_deref(),
        Some("2025-06-09 00:00:00")
    );
    assert_eq!(
        imported.due_date.map(|d| d.to_string()).as_deref(),
        Some("2025-06-10 00:00:00")
    );
    assert_eq!(imported.category_id, CategoryId::new(1).ok());
    assert_eq!(todos[1].category_id, CategoryId::new(1).ok());
    assert_eq!(todos[2].category_id, CategoryId::new(2).ok());
}

#[test]
fn restore_rejects_start_after_due() {
    common::init_logging();
    let json = r#"{
        "categories": [
            {"id": 1, "name": "Todo", "created_at": "2025-06-01T00:00:00"}
        ],
        "default_category_id": 1,
        "todos": [
            {
                "id": 1,
                "title": "Backwards",
                "start_date": "2025-06-20T00:00:00",
                "due_date": "2025-06-10T00:00:00",
                "created_at": "2025-06-01T10:00:00"
            }
        ]
    }"#;

    let snapshot = serde_json::from_str(json).expect("valid snapshot json");
    let err = InMemoryRepository::restore(snapshot).expect_err("should reject snapshot");
    assert!(matches!(err, RepositoryError::ValidationError(_)));
}
