//! PostgreSQL adapters - database implementations of the storage ports.
//!
//! One adapter per port:
//! - `PostgresSessionRepository` - session lifecycle writes
//! - `PostgresLeadershipManager` - leader set with the in-statement
//!   last-leader guard
//! - `PostgresParticipantTracker` - presence upserts and listings
//! - `PostgresSessionReader` - read-side composition

mod leadership;
mod participant_tracker;
mod session_reader;
mod session_repository;

pub use leadership::PostgresLeadershipManager;
pub use participant_tracker::PostgresParticipantTracker;
pub use session_reader::PostgresSessionReader;
pub use session_repository::PostgresSessionRepository;

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

use crate::config::DatabaseConfig;
use crate::domain::foundation::{DomainError, ErrorCode};

/// Embedded schema migrations.
pub static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!();

/// Builds a connection pool from configuration, optionally running
/// migrations.
pub async fn connect(config: &DatabaseConfig) -> Result<PgPool, DomainError> {
    let pool = PgPoolOptions::new()
        .min_connections(config.min_connections)
        .max_connections(config.max_connections)
        .acquire_timeout(config.acquire_timeout())
        .idle_timeout(config.idle_timeout())
        .max_lifetime(config.max_lifetime())
        .connect(&config.url)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to connect to database: {}", e),
            )
        })?;

    if config.run_migrations {
        MIGRATOR.run(&pool).await.map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to run migrations: {}", e),
            )
        })?;
        tracing::info!("database migrations applied");
    }

    tracing::info!(
        max_connections = config.max_connections,
        "database pool ready"
    );

    Ok(pool)
}

/// Maps a column extraction failure into a DomainError.
pub(crate) fn column_error(column: &str, e: sqlx::Error) -> DomainError {
    DomainError::new(
        ErrorCode::DatabaseError,
        format!("Failed to get {}: {}", column, e),
    )
}
