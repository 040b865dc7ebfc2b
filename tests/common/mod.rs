//! Shared setup for integration tests
//!
//! Each test gets its own SQLite file in the temp directory, seeded from
//! `tests/fixtures/schema.sql` and removed again on drop.

#![allow(dead_code)]

use std::path::PathBuf;
use tablehaus::prelude::*;
use uuid::Uuid;

pub const SCHEMA_FILE: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/schema.sql");

#[model]
#[table(name = "users")]
pub struct User {
    pub id: i64,
    pub name: String,
    #[field(skip)]
    pub not_mapped_to_table: String,
}

impl User {
    pub fn named(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ..Default::default()
        }
    }
}

pub struct TestDb {
    pub tablehaus: TableHaus,
    path: PathBuf,
}

impl TestDb {
    pub async fn new() -> Self {
        let path = std::env::temp_dir().join(format!("tablehaus-test-{}.db", Uuid::new_v4()));
        let tablehaus = TableHaus::new(DatabaseConfig::sqlite(&path))
            .await
            .expect("failed to open test database");
        tablehaus
            .exec_file(SCHEMA_FILE)
            .await
            .expect("failed to load schema fixture");

        Self { tablehaus, path }
    }

    pub fn session(&self) -> Session {
        self.tablehaus.session()
    }
}

impl Drop for TestDb {
    fn drop(&mut self) {
        for suffix in ["", "-wal", "-shm", "-journal"] {
            let mut file = self.path.clone().into_os_string();
            file.push(suffix);
            let _ = std::fs::remove_file(file);
        }
    }
}
