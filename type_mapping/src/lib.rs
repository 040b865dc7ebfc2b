//! Unified type mapping between Rust field types and SQLite values
//! This crate provides the value model shared by the tablehaus ecosystem:
//! runtime values, typed field slots and column affinity.

pub mod affinity;
pub mod errors;
pub mod slot;
pub mod types;

pub use affinity::Affinity;
pub use errors::ConversionError;
pub use slot::FieldSlot;
pub use types::SqlValue;
