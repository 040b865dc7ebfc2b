//! Convenience re-exports for common table-mapping usage

// Core traits
pub use crate::traits::{Executor, Record};

// Error types
pub use crate::errors::MappingError;

// Mapping and querying
pub use crate::catalog::{ColumnCatalog, ColumnSpec, TableSchema};
pub use crate::mapping::TableMapping;
pub use crate::query_builder::{Query, SortOrder};
pub use crate::session::Session;

// Naming convention helpers
pub use crate::naming::{to_column_convention, to_field_convention};

// Values and field slots (re-exported from type_mapping)
pub use type_mapping::{FieldSlot, SqlValue};

// Common external dependencies that are frequently used
pub use async_trait::async_trait;
pub use sqlx::SqlitePool;
