//! Embedded schema migrations.
//!
//! Migrations run over a blocking `PgConnection` on the blocking thread pool
//! before the async pool is built.

use diesel::pg::PgConnection;
use diesel::Connection;
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use tracing::info;

const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Failure while applying migrations.
#[derive(Debug, thiserror::Error)]
pub enum MigrationError {
    #[error("failed to connect for migrations: {0}")]
    Connect(#[from] diesel::ConnectionError),
    #[error("failed to apply migrations: {0}")]
    Apply(String),
    #[error("migration task panicked: {0}")]
    Join(#[from] tokio::task::JoinError),
}

fn run_blocking(database_url: &str) -> Result<usize, MigrationError> {
    let mut conn = PgConnection::establish(database_url)?;
    let applied = conn
        .run_pending_migrations(MIGRATIONS)
        .map_err(|err| MigrationError::Apply(err.to_string()))?;
    Ok(applied.len())
}

/// Apply every pending migration and return how many ran.
///
/// # Errors
///
/// Returns [`MigrationError`] when the database is unreachable or a migration
/// fails.
pub async fn run_pending_migrations(database_url: &str) -> Result<usize, MigrationError> {
    let url = database_url.to_owned();
    let applied = tokio::task::spawn_blocking(move || run_blocking(&url)).await??;
    info!(applied, "database migrations applied");
    Ok(applied)
}
