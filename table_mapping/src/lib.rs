//! Table Mapping - Core object/row mapping layer for TableHaus
//!
//! This crate binds in-memory records to rows of SQLite tables. Column layout
//! is discovered at runtime and cached per table, records expose their fields
//! through the [`Record`] trait, and SQL for save, delete and filtered
//! selects is synthesized on the fly.

pub mod binder;
pub mod catalog;
pub mod errors;
pub mod mapping;
pub mod naming;
pub mod prelude;
pub mod query_builder;
pub mod session;
pub mod traits;
pub mod validation;

#[cfg(test)]
mod test_support;

pub use binder::{Binding, BindingMut};
pub use catalog::{ColumnCatalog, ColumnSpec, TableSchema};
pub use errors::MappingError;
pub use mapping::TableMapping;
pub use query_builder::{Query, QuerySpec, SqlGenerator};
pub use session::Session;
pub use traits::{ColumnInfo, ExecOutcome, Executor, Record, Row};
pub use type_mapping::{Affinity, ConversionError, FieldSlot, SqlValue};
pub use validation::{quote_identifier, ValidatedTableName, ValidationError};
