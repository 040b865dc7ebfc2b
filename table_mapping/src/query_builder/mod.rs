//! Query builder
//!
//! Filtered, ordered and paginated selects plus the statement text used by
//! the mapper for inserts, updates and deletes.

pub mod builder;
pub mod ordering;
pub mod pagination;
pub mod sql_generation;


pub use builder::{Filter, Query, QuerySpec};
pub use ordering::{Ordering, SortOrder};
pub use pagination::Pagination;
pub use sql_generation::SqlGenerator;
