//! Error types for the TableHaus crate
//!
//! This module contains all error types that can be returned by TableHaus operations.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum TableHausError {
    #[error("Database connection error: {0}")]
    DatabaseConnection(#[from] sqlx::Error),

    #[error("Mapping error: {0}")]
    Mapping(#[from] table_mapping::MappingError),

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Schema file error: {0}")]
    Io(#[from] std::io::Error),
}
