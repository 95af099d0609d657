//! Helpers for integration tests.

use std::io::{Read, Seek, SeekFrom, Write};

use chrono::{NaiveDate, NaiveDateTime};
use pushkind_todo::domain::snapshot::Snapshot;
use pushkind_todo::repository::InMemoryRepository;
use tempfile::NamedTempFile;

/// Wednesday 2025-06-11 09:00, inside the week of Monday 2025-06-09.
pub fn fixed_now() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2025, 6, 11)
        .and_then(|date| date.and_hms_opt(9, 0, 0))
        .expect("valid fixed instant")
}

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Planner seeded with the built-in categories at [`fixed_now`].
pub struct TestPlanner {
    pub repo: InMemoryRepository,
    pub now: NaiveDateTime,
}

impl TestPlanner {
    pub fn new() -> Self {
        init_logging();
        let now = fixed_now();
        TestPlanner {
            repo: InMemoryRepository::new(now),
            now,
        }
    }

    /// Writes the current state as JSON into a temporary file.
    pub fn save(&self) -> NamedTempFile {
        let mut file = NamedTempFile::new().expect("Failed to create temp file");
        let json = serde_json::to_string_pretty(&self.repo.snapshot())
            .expect("Failed to serialize snapshot");
        file.write_all(json.as_bytes())
            .expect("Failed to write snapshot");
        file
    }
}

/// Reads a snapshot written by [`TestPlanner::save`].
pub fn load(file: &mut NamedTempFile) -> Snapshot {
    let mut json = String::new();
    file.seek(SeekFrom::Start(0)).expect("Failed to rewind");
    file.read_to_string(&mut json)
        .expect("Failed to read snapshot");
    serde_json::from_str(&json).expect("Failed to deserialize snapshot")
}
