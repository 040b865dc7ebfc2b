//! Statement execution seam
//!
//! The mapping layer never talks to a connection directly. Everything goes
//! through an [`Executor`]: the SQLite [`Session`](crate::Session) in
//! production, canned fakes in unit tests.

use crate::catalog::ColumnCatalog;
use crate::errors::MappingError;
use crate::validation::quote_identifier;
use async_trait::async_trait;
use std::sync::Arc;
use type_mapping::SqlValue;

/// One decoded result row, values in select-list order
pub type Row = Vec<SqlValue>;

/// Outcome of a non-query statement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ExecOutcome {
    pub rows_affected: u64,
    /// Row id generated by the last insert, when the engine reports one
    pub last_insert_id: Option<i64>,
}

/// One row of `PRAGMA table_info`
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnInfo {
    pub ordinal: i64,
    pub name: String,
    pub declared_type: String,
    pub not_null: bool,
    pub default_value: Option<String>,
    /// 1-based position inside the primary key, 0 when not part of it
    pub primary_key: i64,
}

impl ColumnInfo {
    /// Parse a `(cid, name, type, notnull, dflt_value, pk)` row
    pub fn from_row(row: Row) -> Result<Self, String> {
        let [cid, name, declared_type, not_null, default_value, pk]: [SqlValue; 6] = row
            .try_into()
            .map_err(|row: Row| format!("expected 6 table_info columns, got {}", row.len()))?;

        let integer = |value: &SqlValue, what: &str| {
            value
                .as_integer()
                .ok_or_else(|| format!("table_info {} is {}, expected integer", what, value.kind()))
        };

        Ok(Self {
            ordinal: integer(&cid, "cid")?,
            name: match name {
                SqlValue::Text(s) => s,
                other => return Err(format!("table_info name is {}, expected text", other.kind())),
            },
            declared_type: match declared_type {
                SqlValue::Text(s) => s,
                _ => String::new(),
            },
            not_null: integer(&not_null, "notnull")? != 0,
            default_value: match default_value {
                SqlValue::Null => None,
                SqlValue::Text(s) => Some(s),
                other => Some(other.to_string()),
            },
            primary_key: integer(&pk, "pk")?,
        })
    }
}

#[async_trait]
pub trait Executor: Send {
    /// Catalog shared by everything executing against this database
    fn catalog(&self) -> Arc<ColumnCatalog>;

    /// Run a statement that returns no rows
    async fn execute(&mut self, sql: &str, params: &[SqlValue])
        -> Result<ExecOutcome, MappingError>;

    /// Run a query and decode every result row
    async fn fetch_all(&mut self, sql: &str, params: &[SqlValue])
        -> Result<Vec<Row>, MappingError>;

    /// Enumerate a table's columns in physical order
    ///
    /// Runs through `fetch_all`, so it shares whatever transaction the
    /// executor has open.
    async fn describe_table(&mut self, table: &str) -> Result<Vec<ColumnInfo>, MappingError> {
        let sql = format!("PRAGMA table_info({})", quote_identifier(table));
        let rows = self.fetch_all(&sql, &[]).await?;
        rows.into_iter()
            .map(|row| ColumnInfo::from_row(row).map_err(|e| MappingError::introspection(table, e)))
            .collect()
    }
}
