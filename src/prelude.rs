//! Convenience re-exports for common TableHaus usage
//!
//! This prelude module re-exports the most commonly used items from the TableHaus ecosystem,
//! making it easier to import everything you need with a single use statement.
//!
//! # Example
//!
//! ```rust
//! use tablehaus::prelude::*;
//!
//! // Now you have access to all the common TableHaus types and traits
//! ```

// Core TableHaus components
pub use crate::core::TableHaus;
pub use crate::errors::TableHausError;

// Re-export centralized config
pub use config::{AppConfig, DatabaseConfig};

// Re-export commonly used table-mapping types for convenience
pub use table_mapping::prelude::*;

// Re-export crates named by macro-generated code
pub use table_mapping;
pub use type_mapping;

// Re-export table derive for model creation
pub use table_derive::{Record, model};

// Common external dependencies
pub use async_trait;
pub use sqlx;
pub use tokio;
