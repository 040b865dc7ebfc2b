//! Core TableHaus functionality
//!
//! This module contains the main TableHaus struct: it owns the connection pool
//! and the column catalog shared by every session it hands out.

use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;
use table_mapping::{ColumnCatalog, Session};

use crate::errors::TableHausError;
use config::DatabaseConfig;

/// Main TableHaus coordinator that manages the database connection and catalog
pub struct TableHaus {
    pool: SqlitePool,
    catalog: Arc<ColumnCatalog>,
}

impl TableHaus {
    /// Create new TableHaus with database connection
    ///
    /// Every pooled connection to `sqlite::memory:` opens its own database,
    /// so in-memory setups should use `max_connections = 1`.
    pub async fn new(config: DatabaseConfig) -> Result<Self, TableHausError> {
        config.validate()?;

        let connect_options = SqliteConnectOptions::from_str(&config.url)?
            .create_if_missing(config.create_if_missing)
            .foreign_keys(config.foreign_keys);

        let mut pool_options = SqlitePoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .acquire_timeout(Duration::from_secs(config.connection_timeout_seconds))
            .idle_timeout(Duration::from_secs(config.idle_timeout_seconds));

        // Set max lifetime if specified
        if config.max_lifetime_seconds > 0 {
            pool_options =
                pool_options.max_lifetime(Duration::from_secs(config.max_lifetime_seconds));
        }

        let pool = pool_options.connect_with(connect_options).await?;
        crate::debug_log!(url = %config.url, "Connected to database");

        Ok(Self::from_pool(pool))
    }

    /// Wrap an existing pool with a fresh catalog
    pub fn from_pool(pool: SqlitePool) -> Self {
        Self {
            pool,
            catalog: Arc::new(ColumnCatalog::new()),
        }
    }

    /// Get database pool reference
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Column catalog shared by all sessions
    pub fn catalog(&self) -> Arc<ColumnCatalog> {
        Arc::clone(&self.catalog)
    }

    /// Start a new unit of work
    pub fn session(&self) -> Session {
        Session::new(self.pool.clone(), self.catalog())
    }

    /// Check database connection health
    pub async fn health_check(&self) -> Result<(), TableHausError> {
        sqlx::query("SELECT 1").fetch_one(&self.pool).await?;
        Ok(())
    }
}
