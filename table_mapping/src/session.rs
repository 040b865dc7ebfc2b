//! SQLite session
//!
//! A [`Session`] is one unit of work. It opens a transaction lazily on its
//! first statement and keeps it until [`Session::commit`] or
//! [`Session::rollback`]; the next statement after either begins a fresh
//! one. Dropping a session with an open transaction rolls it back.
//!
//! A session is not meant to be shared between concurrent tasks.

use crate::catalog::ColumnCatalog;
use crate::errors::MappingError;
use crate::mapping::TableMapping;
use crate::traits::{ExecOutcome, Executor, Record, Row};
use async_trait::async_trait;
use sqlx::query::Query;
use sqlx::sqlite::{SqliteArguments, SqlitePool, SqliteRow};
use sqlx::{Row as _, Sqlite, Transaction, TypeInfo, ValueRef};
use std::sync::Arc;
use tracing::{debug, warn};
use type_mapping::SqlValue;

pub struct Session {
    pool: SqlitePool,
    tx: Option<Transaction<'static, Sqlite>>,
    catalog: Arc<ColumnCatalog>,
}

impl Session {
    pub fn new(pool: SqlitePool, catalog: Arc<ColumnCatalog>) -> Self {
        Self {
            pool,
            tx: None,
            catalog,
        }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    pub fn in_transaction(&self) -> bool {
        self.tx.is_some()
    }

    /// Mapping for `name` that runs inside this session
    pub fn table(&mut self, name: impl Into<String>) -> TableMapping<'_, Self> {
        TableMapping::new(self, name)
    }

    /// Mapping for the table `R` declares
    pub fn table_for<R: Record>(&mut self) -> Result<TableMapping<'_, Self>, MappingError> {
        let name = R::table_name().ok_or_else(|| {
            MappingError::invalid_record(format!(
                "{} does not declare a table name",
                std::any::type_name::<R>()
            ))
        })?;
        Ok(TableMapping::new(self, name))
    }

    /// Run a statement inside the current transaction
    pub async fn exec(
        &mut self,
        sql: &str,
        params: &[SqlValue],
    ) -> Result<ExecOutcome, MappingError> {
        trace_statement(sql, params);
        let tx = self.transaction().await?;

        let result = bind_params(sqlx::query(sql), params)
            .execute(&mut **tx)
            .await
            .inspect_err(|e| warn!(sql = %sql, error = %e, "Statement failed"))?;

        let last_insert_id = Some(result.last_insert_rowid()).filter(|&id| id != 0);
        Ok(ExecOutcome {
            rows_affected: result.rows_affected(),
            last_insert_id,
        })
    }

    /// Run a query inside the current transaction and decode every row
    pub async fn query(&mut self, sql: &str, params: &[SqlValue]) -> Result<Vec<Row>, MappingError> {
        trace_statement(sql, params);
        let tx = self.transaction().await?;

        let rows = bind_params(sqlx::query(sql), params)
            .fetch_all(&mut **tx)
            .await
            .inspect_err(|e| warn!(sql = %sql, error = %e, "Query failed"))?;

        rows.iter()
            .map(decode_row)
            .collect::<Result<Vec<_>, _>>()
            .map_err(MappingError::from)
    }

    /// Commit the open transaction, if any
    pub async fn commit(&mut self) -> Result<(), MappingError> {
        let Some(tx) = self.tx.take() else {
            return Ok(());
        };
        debug!("Committing transaction");
        tx.commit().await.map_err(|e| {
            warn!(error = %e, "Commit failed");
            MappingError::from(e)
        })
    }

    /// Roll back the open transaction, if any
    pub async fn rollback(&mut self) -> Result<(), MappingError> {
        let Some(tx) = self.tx.take() else {
            return Ok(());
        };
        debug!("Rolling back transaction");
        tx.rollback().await.map_err(|e| {
            warn!(error = %e, "Rollback failed");
            MappingError::from(e)
        })
    }

    async fn transaction(&mut self) -> Result<&mut Transaction<'static, Sqlite>, MappingError> {
        let tx = match self.tx.take() {
            Some(tx) => tx,
            None => {
                debug!("Beginning transaction");
                self.pool.begin().await.inspect_err(|e| {
                    warn!(error = %e, "Failed to begin transaction");
                })?
            }
        };
        Ok(self.tx.insert(tx))
    }
}

#[async_trait]
impl Executor for Session {
    fn catalog(&self) -> Arc<ColumnCatalog> {
        Arc::clone(&self.catalog)
    }

    async fn execute(
        &mut self,
        sql: &str,
        params: &[SqlValue],
    ) -> Result<ExecOutcome, MappingError> {
        self.exec(sql, params).await
    }

    async fn fetch_all(&mut self, sql: &str, params: &[SqlValue]) -> Result<Vec<Row>, MappingError> {
        self.query(sql, params).await
    }
}

fn trace_statement(sql: &str, params: &[SqlValue]) {
    debug!(sql = %sql, params = params.len(), "Running statement");
    #[cfg(feature = "debug-logging")]
    tracing::trace!(?params, "Statement parameters");
}

fn bind_params<'q>(
    mut query: Query<'q, Sqlite, SqliteArguments<'q>>,
    params: &'q [SqlValue],
) -> Query<'q, Sqlite, SqliteArguments<'q>> {
    for param in params {
        query = match param {
            SqlValue::Null => query.bind(None::<i64>),
            SqlValue::Integer(i) => query.bind(*i),
            SqlValue::Real(r) => query.bind(*r),
            SqlValue::Text(s) => query.bind(s.as_str()),
            SqlValue::Blob(b) => query.bind(b.as_slice()),
        };
    }
    query
}

/// Decode by each value's storage class rather than the declared column type
fn decode_row(row: &SqliteRow) -> Result<Row, sqlx::Error> {
    (0..row.len()).map(|index| decode_value(row, index)).collect()
}

fn decode_value(row: &SqliteRow, index: usize) -> Result<SqlValue, sqlx::Error> {
    let raw = row.try_get_raw(index)?;
    if raw.is_null() {
        return Ok(SqlValue::Null);
    }
    let storage_class = raw.type_info().name().to_string();

    let value = match storage_class.as_str() {
        "INTEGER" => SqlValue::Integer(row.try_get_unchecked(index)?),
        "REAL" => SqlValue::Real(row.try_get_unchecked(index)?),
        "BLOB" => SqlValue::Blob(row.try_get_unchecked(index)?),
        _ => SqlValue::Text(row.try_get_unchecked(index)?),
    };
    Ok(value)
}
