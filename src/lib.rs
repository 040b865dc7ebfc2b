//! # TableHaus
//!
//! A small Rust object/row mapper for SQLite. Column layouts are discovered at
//! runtime and cached, records expose their fields through a derived
//! `Record` implementation, and SQL for save, delete and filtered selects is
//! synthesized on the fly.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use tablehaus::prelude::*;
//!
//! #[model]
//! #[table(name = "users")]
//! pub struct User {
//!     pub id: i64,
//!     pub name: String,
//!     #[field(skip)]
//!     pub greeting: String,
//! }
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let tablehaus = TableHaus::new(DatabaseConfig::sqlite("app.db")).await?;
//!     tablehaus
//!         .exec_script("CREATE TABLE IF NOT EXISTS users (id INTEGER PRIMARY KEY, name TEXT NOT NULL UNIQUE)")
//!         .await?;
//!
//!     let mut session = tablehaus.session();
//!
//!     let mut user = User { name: "bob".to_string(), ..Default::default() };
//!     session.table_for::<User>()?.save(&mut user).await?;
//!     println!("Inserted user {}", user.id);
//!
//!     let mut users: Vec<User> = Vec::new();
//!     session
//!         .table("users")
//!         .query()
//!         .filter("name <>", "mike")
//!         .order_by(["id"])
//!         .limit(10)
//!         .all(&mut users)
//!         .await?;
//!
//!     session.commit().await?;
//!     Ok(())
//! }
//! ```

/// Conditional debug logging macros
/// These macros only compile in code when the `debug-logging` feature is enabled
#[cfg(feature = "debug-logging")]
#[macro_export]
macro_rules! debug_log {
    ($($arg:tt)*) => {
        tracing::debug!($($arg)*)
    };
}

#[cfg(not(feature = "debug-logging"))]
#[macro_export]
macro_rules! debug_log {
    ($($arg:tt)*) => {};
}

#[cfg(feature = "debug-logging")]
#[macro_export]
macro_rules! trace_log {
    ($($arg:tt)*) => {
        tracing::trace!($($arg)*)
    };
}

#[cfg(not(feature = "debug-logging"))]
#[macro_export]
macro_rules! trace_log {
    ($($arg:tt)*) => {};
}

pub mod core;
pub mod errors;
pub mod migration;
pub mod prelude;

// Re-export the main public types for convenience
pub use core::TableHaus;
pub use errors::TableHausError;

// Re-export centralized config
pub use config::{AppConfig, DatabaseConfig};

// Re-export internal crates used by macros and public API
// These MUST be public for the generated macro code to work correctly
pub use table_derive;
pub use table_mapping;
pub use type_mapping;

// Re-export external dependencies used in public API
pub use async_trait;
pub use sqlx;
