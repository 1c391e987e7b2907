//! `PostgreSQL` connection pooling and schema setup.

use crate::config::DatabaseConfig;
use diesel::connection::SimpleConnection;
use diesel::pg::PgConnection;
use diesel::r2d2::{ConnectionManager, Pool, PoolError};
use thiserror::Error;

/// Connection pool shared by every `PostgreSQL` adapter.
pub type PgPool = Pool<ConnectionManager<PgConnection>>;

/// Schema migration applied by [`apply_migrations`].
pub const SCHEMA_SQL: &str =
    include_str!("../migrations/2026-10-01-000000_create_taskboard_tables/up.sql");

/// Errors raised while preparing the database.
#[derive(Debug, Error)]
pub enum DatabaseError {
    /// The pool could not be built or a connection could not be checked out.
    #[error("connection pool error: {0}")]
    Pool(#[from] PoolError),

    /// The schema migration failed.
    #[error("schema migration failed: {0}")]
    Migration(#[from] diesel::result::Error),

    /// The blocking task running the database work panicked or was cancelled.
    #[error("database task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

/// Builds a connection pool for `config`.
///
/// # Errors
///
/// Returns [`DatabaseError::Pool`] when the initial connections cannot be
/// established.
pub async fn connect(config: &DatabaseConfig) -> Result<PgPool, DatabaseError> {
    let manager = ConnectionManager::<PgConnection>::new(config.database_url.as_str());
    let max_size = config.pool_size;
    let pool = tokio::task::spawn_blocking(move || {
        Pool::builder().max_size(max_size).build(manager)
    })
    .await??;
    tracing::info!(max_size, "database pool ready");
    Ok(pool)
}

/// Creates any missing tables and indexes.
///
/// # Errors
///
/// Returns [`DatabaseError`] when no connection is available or the SQL
/// fails.
pub async fn apply_migrations(pool: &PgPool) -> Result<(), DatabaseError> {
    let shared = pool.clone();
    tokio::task::spawn_blocking(move || -> Result<(), DatabaseError> {
        let mut connection = shared.get()?;
        connection.batch_execute(SCHEMA_SQL)?;
        Ok(())
    })
    .await??;
    tracing::info!("schema is up to date");
    Ok(())
}
