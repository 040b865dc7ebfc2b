//! Schema file loading
//!
//! Runs a `;`-separated SQL script as one transaction. The split is purely
//! textual, so scripts must not contain `;` inside literals or trigger bodies.

use std::path::Path;
use tracing::warn;

use crate::core::TableHaus;
use crate::errors::TableHausError;

impl TableHaus {
    /// Execute every statement of a schema file.
    /// Returns the number of statements run.
    pub async fn exec_file<P: AsRef<Path>>(&self, path: P) -> Result<usize, TableHausError> {
        let path = path.as_ref();
        let script = tokio::fs::read_to_string(path).await?;
        crate::debug_log!(path = %path.display(), "Loading schema file");
        self.exec_script(&script).await
    }

    /// Execute a `;`-separated script; all statements commit or none do.
    pub async fn exec_script(&self, script: &str) -> Result<usize, TableHausError> {
        let statements: Vec<&str> = script
            .split(';')
            .map(str::trim)
            .filter(|statement| !statement.is_empty())
            .collect();

        let mut tx = self.pool().begin().await?;
        for statement in &statements {
            crate::debug_log!(sql = %statement, "Executing schema statement");
            match sqlx::query(statement).execute(&mut *tx).await {
                Ok(_result) => {
                    crate::trace_log!(rows = _result.rows_affected(), "Schema statement applied");
                }
                Err(e) => {
                    warn!(sql = %statement, error = %e, "Schema statement failed, rolling back");
                    tx.rollback().await?;
                    return Err(e.into());
                }
            }
        }
        tx.commit().await?;

        // Tables may have changed shape
        self.catalog().clear().await;
        Ok(statements.len())
    }
}
