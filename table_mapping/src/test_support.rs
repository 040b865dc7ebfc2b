//! In-memory executor for unit tests
//!
//! Records every statement, answers `PRAGMA table_info` from registered
//! column lists and replays queued results for everything else.

use crate::catalog::ColumnCatalog;
use crate::errors::MappingError;
use crate::traits::{ColumnInfo, ExecOutcome, Executor, Row};
use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use type_mapping::SqlValue;

pub type Statement = (String, Vec<SqlValue>);

pub struct MockExecutor {
    catalog: Arc<ColumnCatalog>,
    tables: Arc<HashMap<String, Vec<ColumnInfo>>>,
    statements: Arc<Mutex<Vec<Statement>>>,
    describe_calls: Arc<AtomicUsize>,
    exec_results: VecDeque<Result<ExecOutcome, MappingError>>,
    query_results: VecDeque<Vec<Row>>,
    fail_queries: bool,
}

impl MockExecutor {
    pub fn new() -> Self {
        Self {
            catalog: Arc::new(ColumnCatalog::new()),
            tables: Arc::new(HashMap::new()),
            statements: Arc::new(Mutex::new(Vec::new())),
            describe_calls: Arc::new(AtomicUsize::new(0)),
            exec_results: VecDeque::new(),
            query_results: VecDeque::new(),
            fail_queries: false,
        }
    }

    pub fn with_table(mut self, name: &str, columns: Vec<ColumnInfo>) -> Self {
        let mut tables = (*self.tables).clone();
        tables.insert(name.to_string(), columns);
        self.tables = Arc::new(tables);
        self
    }

    pub fn with_exec(mut self, outcome: ExecOutcome) -> Self {
        self.exec_results.push_back(Ok(outcome));
        self
    }

    pub fn with_exec_error(mut self, error: MappingError) -> Self {
        self.exec_results.push_back(Err(error));
        self
    }

    pub fn with_rows(mut self, rows: Vec<Row>) -> Self {
        self.query_results.push_back(rows);
        self
    }

    pub fn failing_queries(mut self) -> Self {
        self.fail_queries = true;
        self
    }

    /// Another executor sharing catalog, tables, log and counters
    pub fn fork(&self) -> Self {
        Self {
            catalog: Arc::clone(&self.catalog),
            tables: Arc::clone(&self.tables),
            statements: Arc::clone(&self.statements),
            describe_calls: Arc::clone(&self.describe_calls),
            exec_results: VecDeque::new(),
            query_results: VecDeque::new(),
            fail_queries: self.fail_queries,
        }
    }

    pub fn statements(&self) -> Vec<Statement> {
        self.statements.lock().unwrap().clone()
    }

    /// Statements other than catalog pragmas
    pub fn data_statements(&self) -> Vec<Statement> {
        self.statements()
            .into_iter()
            .filter(|(sql, _)| !sql.starts_with("PRAGMA"))
            .collect()
    }

    pub fn describe_calls(&self) -> &Arc<AtomicUsize> {
        &self.describe_calls
    }

    fn record(&self, sql: &str, params: &[SqlValue]) {
        self.statements
            .lock()
            .unwrap()
            .push((sql.to_string(), params.to_vec()));
    }

    fn pragma_rows(&self, sql: &str) -> Vec<Row> {
        let table = sql
            .trim_start_matches("PRAGMA table_info(\"")
            .trim_end_matches("\")")
            .replace("\"\"", "\"");
        self.tables
            .get(&table)
            .map(|columns| columns.iter().map(pragma_row).collect())
            .unwrap_or_default()
    }
}

fn pragma_row(info: &ColumnInfo) -> Row {
    vec![
        SqlValue::Integer(info.ordinal),
        SqlValue::Text(info.name.clone()),
        SqlValue::Text(info.declared_type.clone()),
        SqlValue::Integer(info.not_null as i64),
        info.default_value.clone().into(),
        SqlValue::Integer(info.primary_key),
    ]
}

#[async_trait]
impl Executor for MockExecutor {
    fn catalog(&self) -> Arc<ColumnCatalog> {
        Arc::clone(&self.catalog)
    }

    async fn execute(
        &mut self,
        sql: &str,
        params: &[SqlValue],
    ) -> Result<ExecOutcome, MappingError> {
        self.record(sql, params);
        self.exec_results.pop_front().unwrap_or(Ok(ExecOutcome {
            rows_affected: 1,
            last_insert_id: None,
        }))
    }

    async fn fetch_all(&mut self, sql: &str, params: &[SqlValue]) -> Result<Vec<Row>, MappingError> {
        self.record(sql, params);
        if self.fail_queries {
            return Err(MappingError::Execution(sqlx::Error::Protocol(
                "connection lost".to_string(),
            )));
        }
        if sql.starts_with("PRAGMA table_info(") {
            self.describe_calls.fetch_add(1, Ordering::SeqCst);
            tokio::task::yield_now().await;
            return Ok(self.pragma_rows(sql));
        }
        Ok(self.query_results.pop_front().unwrap_or_default())
    }
}

fn column(ordinal: i64, name: &str, declared_type: &str, not_null: bool, pk: i64) -> ColumnInfo {
    ColumnInfo {
        ordinal,
        name: name.to_string(),
        declared_type: declared_type.to_string(),
        not_null,
        default_value: None,
        primary_key: pk,
    }
}

/// `users(id INTEGER PRIMARY KEY, name TEXT NOT NULL UNIQUE)`
pub fn users_columns() -> Vec<ColumnInfo> {
    vec![
        column(0, "id", "INTEGER", false, 1),
        column(1, "name", "TEXT", true, 0),
    ]
}

/// `user_profiles(id, user_id, display_name, created_at)`
pub fn profiles_columns() -> Vec<ColumnInfo> {
    vec![
        column(0, "id", "INTEGER", false, 1),
        column(1, "user_id", "INTEGER", true, 0),
        column(2, "display_name", "TEXT", false, 0),
        column(3, "created_at", "TEXT", false, 0),
    ]
}

/// Table keyed by a text column
pub fn tags_columns() -> Vec<ColumnInfo> {
    vec![
        column(0, "slug", "TEXT", false, 1),
        column(1, "label", "TEXT", false, 0),
    ]
}

/// Row the way a `users` select returns it
pub fn user_row(id: i64, name: &str) -> Row {
    vec![SqlValue::Integer(id), SqlValue::Text(name.to_string())]
}
