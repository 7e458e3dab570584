//! Database connection and pool management

use outreach_common::config::DatabaseConfig;
use outreach_common::{Error, Result};
use sqlx::postgres::{PgPool, PgPoolOptions};
use std::time::Duration;
use tracing::info;

/// Database pool wrapper
#[derive(Clone)]
pub struct DatabasePool {
    pool: PgPool,
}

impl DatabasePool {
    /// Create a new database pool from configuration
    pub async fn new(config: &DatabaseConfig) -> Result<Self> {
        info!("Connecting to database");

        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .acquire_timeout(Duration::from_secs(30))
            .connect(&config.url)
            .await
            .map_err(|e| Error::Database(format!("Failed to connect: {}", e)))?;

        info!("Database connection established");

        Ok(Self { pool })
    }

    /// Get the underlying pool
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Run database migrations
    pub async fn migrate(&self) -> Result<()> {
        info!("Running database migrations");

        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .map_err(|e| Error::Database(format!("Migration failed: {}", e)))?;

        info!("Database migrations completed");
        Ok(())
    }

    /// Check database health
    pub async fn health_check(&self) -> Result<()> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(|e| Error::Database(format!("Health check failed: {}", e)))?;
        Ok(())
    }
}

/// Map a sqlx error to the application error taxonomy.
///
/// SQLSTATE codes distinguish the failure modes the wizard reports
/// differently: 42501 (insufficient privilege, typically row-level
/// security), 23505 (unique violation), 22001 (value too long).
pub fn classify_db_error(e: sqlx::Error) -> Error {
    if let sqlx::Error::Database(db_err) = &e {
        match db_err.code().as_deref() {
            Some("42501") => return Error::PermissionDenied(db_err.message().to_string()),
            Some("23505") => return Error::DuplicateKey(db_err.message().to_string()),
            Some("22001") => return Error::FieldTooLong(db_err.message().to_string()),
            _ => {}
        }
    }
    if matches!(e, sqlx::Error::RowNotFound) {
        return Error::NotFound("Row not found".to_string());
    }
    Error::Database(e.to_string())
}
