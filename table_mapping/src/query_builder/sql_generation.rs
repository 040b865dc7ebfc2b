//! SQL text synthesis
//!
//! Identifiers are always double-quoted and values always travel as `?`
//! placeholders. ORDER BY columns and LIMIT/OFFSET numbers are the exception:
//! they are written into the text, so callers must not feed them unchecked
//! user input.

use crate::query_builder::builder::{Filter, QuerySpec};
use crate::validation::quote_identifier;
use type_mapping::SqlValue;

pub struct SqlGenerator;

impl SqlGenerator {
    /// Build WHERE clause from filters, one parameter per filter
    pub fn build_where_clause(filters: &[Filter]) -> (String, Vec<SqlValue>) {
        if filters.is_empty() {
            return (String::new(), Vec::new());
        }

        let conditions = filters
            .iter()
            .map(|filter| format!("{} ?", filter.fragment))
            .collect::<Vec<_>>()
            .join(" AND ");
        let values = filters.iter().map(|filter| filter.value.clone()).collect();

        (format!("WHERE {}", conditions), values)
    }

    /// `SELECT "c1", ... FROM "t" [WHERE] [ORDER BY] [LIMIT] [OFFSET]`
    pub fn select(table: &str, columns: &[&str], spec: &QuerySpec) -> (String, Vec<SqlValue>) {
        let (where_clause, params) = Self::build_where_clause(&spec.filters);
        let head = format!(
            "SELECT {} FROM {}",
            Self::column_list(columns),
            quote_identifier(table)
        );
        let sql = Self::join_clauses([
            head,
            where_clause,
            spec.ordering.to_sql(),
            spec.pagination.to_sql(),
        ]);
        (sql, params)
    }

    /// Row count of the filtered set, or of the paginated window when one is set
    pub fn count(table: &str, spec: &QuerySpec) -> (String, Vec<SqlValue>) {
        let (where_clause, params) = Self::build_where_clause(&spec.filters);
        let table = quote_identifier(table);

        let sql = if spec.pagination.is_empty() {
            Self::join_clauses([format!("SELECT COUNT(*) FROM {}", table), where_clause])
        } else {
            let inner = Self::join_clauses([
                format!("SELECT 1 FROM {}", table),
                where_clause,
                spec.ordering.to_sql(),
                spec.pagination.to_sql(),
            ]);
            format!("SELECT COUNT(*) FROM ({})", inner)
        };
        (sql, params)
    }

    /// `SELECT EXISTS(SELECT 1 FROM "t" [WHERE] [LIMIT] [OFFSET])`
    pub fn exists(table: &str, spec: &QuerySpec) -> (String, Vec<SqlValue>) {
        let (where_clause, params) = Self::build_where_clause(&spec.filters);
        let inner = Self::join_clauses([
            format!("SELECT 1 FROM {}", quote_identifier(table)),
            where_clause,
            spec.pagination.to_sql(),
        ]);
        (format!("SELECT EXISTS({})", inner), params)
    }

    /// `INSERT INTO "t"("c1", ...) VALUES(?, ...)`, or `DEFAULT VALUES` with no columns
    pub fn insert(table: &str, columns: &[&str]) -> String {
        if columns.is_empty() {
            return format!("INSERT INTO {} DEFAULT VALUES", quote_identifier(table));
        }
        format!(
            "INSERT INTO {}({}) VALUES({})",
            quote_identifier(table),
            Self::column_list(columns),
            Self::placeholders(columns.len())
        )
    }

    /// `UPDATE "t" SET "c1" = ?, ... WHERE "pk" = ?`
    pub fn update(table: &str, columns: &[&str], primary_key: &str) -> String {
        let assignments = columns
            .iter()
            .map(|column| format!("{} = ?", quote_identifier(column)))
            .collect::<Vec<_>>()
            .join(", ");
        format!(
            "UPDATE {} SET {} WHERE {} = ?",
            quote_identifier(table),
            assignments,
            quote_identifier(primary_key)
        )
    }

    /// `DELETE FROM "t" WHERE "pk" = ?`
    pub fn delete(table: &str, primary_key: &str) -> String {
        format!(
            "DELETE FROM {} WHERE {} = ?",
            quote_identifier(table),
            quote_identifier(primary_key)
        )
    }

    fn column_list(columns: &[&str]) -> String {
        columns
            .iter()
            .map(|column| quote_identifier(column))
            .collect::<Vec<_>>()
            .join(", ")
    }

    fn placeholders(count: usize) -> String {
        vec!["?"; count].join(", ")
    }

    fn join_clauses<const N: usize>(clauses: [String; N]) -> String {
        clauses
            .into_iter()
            .filter(|clause| !clause.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    }
}
