//! Column catalog
//!
//! Discovers a table's column layout through `PRAGMA table_info` and caches
//! it per table name. Each table owns a `OnceCell`; the map lock is only held
//! to find or create that cell, never across introspection. Concurrent
//! callers asking for the same new table wait on its cell and trigger a
//! single pragma, while lookups of other tables proceed.

use crate::errors::MappingError;
use crate::naming::to_field_convention;
use crate::traits::{ColumnInfo, Executor};
use crate::validation::ValidatedTableName;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{OnceCell, RwLock};
use tracing::{debug, error};
use type_mapping::Affinity;

/// One column of a cached table layout
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnSpec {
    /// Name in field convention, derived from `column_name`
    pub field_name: String,
    pub column_name: String,
    pub declared_type: String,
    pub affinity: Affinity,
    pub not_null: bool,
    pub default_value: Option<String>,
    pub is_primary_key: bool,
}

impl ColumnSpec {
    fn from_info(info: ColumnInfo, is_primary_key: bool) -> Self {
        Self {
            field_name: to_field_convention(&info.name),
            affinity: Affinity::from_declared_type(&info.declared_type),
            column_name: info.name,
            declared_type: info.declared_type,
            not_null: info.not_null,
            default_value: info.default_value,
            is_primary_key,
        }
    }
}

/// Immutable column layout of one table, in physical column order
#[derive(Debug, Clone, PartialEq)]
pub struct TableSchema {
    pub name: String,
    pub columns: Vec<ColumnSpec>,
    /// Index into `columns` of the single primary key column
    pub primary_key: Option<usize>,
}

impl TableSchema {
    /// Build a schema from pragma rows.
    ///
    /// A composite primary key leaves the schema without one.
    pub fn from_column_info(name: &str, infos: Vec<ColumnInfo>) -> Self {
        let pk_count = infos.iter().filter(|info| info.primary_key > 0).count();
        let columns: Vec<ColumnSpec> = infos
            .into_iter()
            .map(|info| {
                let is_pk = pk_count == 1 && info.primary_key > 0;
                ColumnSpec::from_info(info, is_pk)
            })
            .collect();
        let primary_key = columns.iter().position(|c| c.is_primary_key);

        Self {
            name: name.to_string(),
            columns,
            primary_key,
        }
    }

    pub fn primary_key(&self) -> Option<&ColumnSpec> {
        self.primary_key.map(|index| &self.columns[index])
    }

    pub fn column(&self, column_name: &str) -> Option<&ColumnSpec> {
        self.columns.iter().find(|c| c.column_name == column_name)
    }

    pub fn column_for_field(&self, field_name: &str) -> Option<&ColumnSpec> {
        self.columns.iter().find(|c| c.field_name == field_name)
    }
}

type SchemaCell = Arc<OnceCell<Arc<TableSchema>>>;

/// Shared cache of table layouts
#[derive(Debug, Default)]
pub struct ColumnCatalog {
    tables: RwLock<HashMap<String, SchemaCell>>,
}

impl ColumnCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Column layout of `table`, introspecting through `executor` on first use
    pub async fn get_schema<E>(
        &self,
        executor: &mut E,
        table: &str,
    ) -> Result<Arc<TableSchema>, MappingError>
    where
        E: Executor + ?Sized,
    {
        let cell = self.cell(table).await;
        if let Some(schema) = cell.get() {
            return Ok(Arc::clone(schema));
        }

        let result = cell
            .get_or_try_init(|| async {
                let schema = Arc::new(Self::introspect(executor, table).await?);
                debug!(
                    table = %table,
                    columns = schema.columns.len(),
                    primary_key = schema.primary_key().map(|c| c.column_name.as_str()),
                    "Cached table schema"
                );
                Ok::<_, MappingError>(schema)
            })
            .await;

        match result {
            Ok(schema) => Ok(Arc::clone(schema)),
            Err(e) => {
                error!(table = %table, error = %e, "Failed to read table info");
                self.forget_empty(table, &cell).await;
                Err(e)
            }
        }
    }

    async fn cell(&self, table: &str) -> SchemaCell {
        if let Some(cell) = self.tables.read().await.get(table) {
            return Arc::clone(cell);
        }
        let mut tables = self.tables.write().await;
        Arc::clone(tables.entry(table.to_string()).or_default())
    }

    /// Drop a cell left empty by a failed introspection
    async fn forget_empty(&self, table: &str, cell: &SchemaCell) {
        let mut tables = self.tables.write().await;
        let stale = tables
            .get(table)
            .is_some_and(|current| Arc::ptr_eq(current, cell) && !current.initialized());
        if stale {
            tables.remove(table);
        }
    }

    async fn introspect<E>(executor: &mut E, table: &str) -> Result<TableSchema, MappingError>
    where
        E: Executor + ?Sized,
    {
        let name = ValidatedTableName::new(table)
            .map_err(|e| MappingError::introspection(table, e))?;

        let infos = executor
            .describe_table(name.as_str())
            .await
            .map_err(|e| match e {
                MappingError::Introspection { .. } => e,
                other => MappingError::introspection(table, other),
            })?;

        if infos.is_empty() {
            return Err(MappingError::introspection(table, "no such table"));
        }

        Ok(TableSchema::from_column_info(table, infos))
    }

    /// Cached layout without introspecting
    pub async fn cached(&self, table: &str) -> Option<Arc<TableSchema>> {
        self.tables.read().await.get(table)?.get().cloned()
    }

    /// Forget one table, e.g. after altering it
    pub async fn invalidate(&self, table: &str) -> bool {
        self.tables
            .write()
            .await
            .remove(table)
            .is_some_and(|cell| cell.initialized())
    }

    pub async fn clear(&self) {
        self.tables.write().await.clear();
    }

    /// Number of tables with a cached layout
    pub async fn len(&self) -> usize {
        self.tables
            .read()
            .await
            .values()
            .filter(|cell| cell.initialized())
            .count()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}
