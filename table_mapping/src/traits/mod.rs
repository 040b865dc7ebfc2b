//! Traits for database operations
//!
//! This module contains the traits that define the seams of the mapping
//! layer: how records expose their fields and how statements get executed.

pub mod executor;
pub mod record;

// Re-export all public items for convenience
pub use executor::{ColumnInfo, ExecOutcome, Executor, Row};
pub use record::Record;
