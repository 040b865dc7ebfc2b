//! Table mapping
//!
//! Saves and deletes records against one table. Whether a save inserts or
//! updates is decided by the primary key field: its zero value means the row
//! does not exist yet.

use crate::binder::{bind, bind_mut};
use crate::catalog::TableSchema;
use crate::errors::MappingError;
use crate::query_builder::{Query, SqlGenerator};
use crate::traits::{Executor, Record};
use std::sync::Arc;
use tracing::debug;
use type_mapping::{Affinity, SqlValue};

pub struct TableMapping<'e, E: Executor + ?Sized> {
    name: String,
    executor: &'e mut E,
}

impl<'e, E: Executor + ?Sized> TableMapping<'e, E> {
    pub fn new(executor: &'e mut E, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            executor,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Column layout of the mapped table
    ///
    /// An uncached table is introspected through this mapping's executor. On
    /// a [`Session`](crate::Session) that means inside the session's
    /// transaction, which the lookup opens if none is active, so the pragma
    /// sees tables created earlier in the same unit of work.
    pub async fn schema(&mut self) -> Result<Arc<TableSchema>, MappingError> {
        let catalog = self.executor.catalog();
        catalog.get_schema(&mut *self.executor, &self.name).await
    }

    /// Insert or update `record`. Returns true when a row was inserted.
    ///
    /// After an insert the generated row id is written back into the primary
    /// key field when that column is an integer rowid alias.
    pub async fn save<R>(&mut self, record: &mut R) -> Result<bool, MappingError>
    where
        R: Record + ?Sized,
    {
        let schema = self.schema().await?;
        let mut bindings = bind_mut(&schema, record);
        if bindings.is_empty() {
            return Err(MappingError::invalid_record(format!(
                "record has no field for any column of '{}'",
                self.name
            )));
        }

        let pk_index = bindings.iter().position(|b| b.is_primary_key());
        let (columns, mut params): (Vec<&str>, Vec<SqlValue>) = bindings
            .iter()
            .filter(|b| !b.is_primary_key())
            .map(|b| (b.column.column_name.as_str(), b.value()))
            .unzip();

        if let Some(index) = pk_index.filter(|&i| !bindings[i].is_zero()) {
            if columns.is_empty() {
                return Err(MappingError::invalid_record(format!(
                    "nothing to update in '{}' besides the primary key",
                    self.name
                )));
            }
            let pk = &bindings[index];
            let sql = SqlGenerator::update(&self.name, &columns, &pk.column.column_name);
            params.push(pk.value());

            self.executor.execute(&sql, &params).await?;
            return Ok(false);
        }

        let sql = SqlGenerator::insert(&self.name, &columns);
        let outcome = self.executor.execute(&sql, &params).await?;

        if let (Some(index), Some(id)) = (pk_index, outcome.last_insert_id) {
            let pk = &mut bindings[index];
            if pk.column.affinity == Affinity::Integer && pk.set_generated_id(id) {
                debug!(table = %self.name, id, "Wrote generated id back");
            }
        }
        Ok(true)
    }

    /// Delete the row identified by `record`'s primary key.
    ///
    /// Fails with `NotFound` unless exactly one row was affected.
    pub async fn delete<R>(&mut self, record: &R) -> Result<(), MappingError>
    where
        R: Record + ?Sized,
    {
        let schema = self.schema().await?;
        let pk_column = schema.primary_key().ok_or_else(|| {
            MappingError::invalid_record(format!("table '{}' has no primary key", self.name))
        })?;

        let bindings = bind(&schema, record);
        let pk = bindings
            .iter()
            .find(|b| b.is_primary_key())
            .ok_or_else(|| {
                MappingError::invalid_record(format!(
                    "record has no field for primary key '{}'",
                    pk_column.column_name
                ))
            })?;

        let sql = SqlGenerator::delete(&self.name, &pk_column.column_name);
        let outcome = self.executor.execute(&sql, &[pk.value()]).await?;
        if outcome.rows_affected != 1 {
            return Err(MappingError::NotFound);
        }
        Ok(())
    }

    /// Start a query over the mapped table
    pub fn query(self) -> Query<'e, E> {
        Query::new(self.executor, self.name)
    }
}
