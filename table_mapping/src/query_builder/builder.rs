//! Query builder
//!
//! A [`Query`] accumulates filters, ordering and pagination for one table and
//! runs them against the executor it borrows. Builder methods consume and
//! return the query; terminal operations borrow it mutably so the same query
//! can run more than once. A query is meant for a single caller at a time.

use crate::binder::{bind, bind_mut, scan_row};
use crate::catalog::TableSchema;
use crate::errors::MappingError;
use crate::query_builder::ordering::{Ordering, SortOrder};
use crate::query_builder::pagination::Pagination;
use crate::query_builder::sql_generation::SqlGenerator;
use crate::traits::{Executor, Record};
use std::sync::Arc;
use tracing::error;
use type_mapping::SqlValue;

/// One WHERE condition: a caller supplied fragment such as `"name ="`
/// followed by a placeholder bound to `value`
#[derive(Debug, Clone, PartialEq)]
pub struct Filter {
    pub fragment: String,
    pub value: SqlValue,
}

/// Accumulated query state
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QuerySpec {
    pub filters: Vec<Filter>,
    pub ordering: Ordering,
    pub pagination: Pagination,
}

impl QuerySpec {
    pub fn new() -> Self {
        Self::default()
    }
}

pub struct Query<'e, E: Executor + ?Sized> {
    executor: &'e mut E,
    table: String,
    spec: QuerySpec,
}

impl<'e, E: Executor + ?Sized> Query<'e, E> {
    pub fn new(executor: &'e mut E, table: impl Into<String>) -> Self {
        Self {
            executor,
            table: table.into(),
            spec: QuerySpec::new(),
        }
    }

    pub fn table(&self) -> &str {
        &self.table
    }

    pub fn spec(&self) -> &QuerySpec {
        &self.spec
    }

    /// Add a condition, e.g. `filter("name =", "bob")`
    pub fn filter(mut self, fragment: impl Into<String>, value: impl Into<SqlValue>) -> Self {
        self.spec.filters.push(Filter {
            fragment: fragment.into(),
            value: value.into(),
        });
        self
    }

    /// Sort ascending by the given columns
    pub fn order_by<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for column in columns {
            self.spec.ordering.push(column.into(), SortOrder::Asc);
        }
        self
    }

    /// Sort descending by the given columns
    pub fn order_desc<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for column in columns {
            self.spec.ordering.push(column.into(), SortOrder::Desc);
        }
        self
    }

    pub fn limit(mut self, limit: u64) -> Self {
        self.spec.pagination = self.spec.pagination.with_limit(limit);
        self
    }

    pub fn offset(mut self, offset: u64) -> Self {
        self.spec.pagination = self.spec.pagination.with_offset(offset);
        self
    }

    async fn schema(&mut self) -> Result<Arc<TableSchema>, MappingError> {
        let catalog = self.executor.catalog();
        catalog.get_schema(&mut *self.executor, &self.table).await
    }

    /// Load exactly one row into `destination`.
    ///
    /// Fails with `NotFound` on an empty result and `MultipleRowsFound` when
    /// more than one row matches; `destination` is untouched in both cases.
    pub async fn one<R>(&mut self, destination: &mut R) -> Result<(), MappingError>
    where
        R: Record + ?Sized,
    {
        let schema = self.schema().await?;
        let mut bindings = bind_mut(&schema, destination);
        if bindings.is_empty() {
            return Err(MappingError::invalid_record(format!(
                "record has no field for any column of '{}'",
                self.table
            )));
        }

        let columns: Vec<&str> = bindings.iter().map(|b| b.column.column_name.as_str()).collect();
        let (sql, params) = SqlGenerator::select(&self.table, &columns, &self.spec);
        let mut rows = self.executor.fetch_all(&sql, &params).await?;

        let row = match rows.len() {
            0 => return Err(MappingError::NotFound),
            1 => rows.remove(0),
            _ => return Err(MappingError::MultipleRowsFound),
        };

        scan_row(&mut bindings, row).inspect_err(|e| {
            error!(table = %self.table, error = %e, "Failed to scan row");
        })
    }

    /// Append every matching row to `destination`, in result order.
    ///
    /// On a scan failure the rows appended so far stay in `destination`.
    pub async fn all<T>(&mut self, destination: &mut Vec<T>) -> Result<(), MappingError>
    where
        T: Record + Default,
    {
        let schema = self.schema().await?;
        let probe = T::default();
        let columns: Vec<&str> = bind(&schema, &probe)
            .iter()
            .map(|b| b.column.column_name.as_str())
            .collect();
        if columns.is_empty() {
            return Err(MappingError::invalid_record(format!(
                "element type has no field for any column of '{}'",
                self.table
            )));
        }

        let (sql, params) = SqlGenerator::select(&self.table, &columns, &self.spec);
        let rows = self.executor.fetch_all(&sql, &params).await?;

        destination.reserve(rows.len());
        for row in rows {
            let mut record = T::default();
            let mut bindings = bind_mut(&schema, &mut record);
            if let Err(e) = scan_row(&mut bindings, row) {
                error!(table = %self.table, error = %e, "Failed to scan row");
                return Err(e);
            }
            drop(bindings);
            destination.push(record);
        }
        Ok(())
    }

    /// Number of matching rows
    pub async fn count(&mut self) -> Result<i64, MappingError> {
        let (sql, params) = SqlGenerator::count(&self.table, &self.spec);
        self.fetch_scalar(&sql, &params).await
    }

    /// Whether at least one row matches
    pub async fn exists(&mut self) -> Result<bool, MappingError> {
        let (sql, params) = SqlGenerator::exists(&self.table, &self.spec);
        Ok(self.fetch_scalar(&sql, &params).await? != 0)
    }

    async fn fetch_scalar(&mut self, sql: &str, params: &[SqlValue]) -> Result<i64, MappingError> {
        let rows = self.executor.fetch_all(sql, params).await?;
        let value = rows
            .into_iter()
            .next()
            .and_then(|row| row.into_iter().next())
            .ok_or(MappingError::Execution(sqlx::Error::RowNotFound))?;
        value.as_integer().ok_or_else(|| {
            MappingError::column_decode(
                "0",
                type_mapping::ConversionError::mismatch("i64", &value),
            )
        })
    }
}
