//! Start-up creation of the `users` table.
//!
//! The SQL under `backend/migrations` is compiled into the binary and applied
//! once before the server binds. Diesel's migration harness is synchronous,
//! so the work runs on tokio's blocking pool.

use diesel::Connection;
use diesel::pg::PgConnection;
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use tracing::info;

const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Failures while preparing the schema.
#[derive(Debug, thiserror::Error)]
pub enum SchemaBootstrapError {
    /// Could not open a direct connection.
    #[error("schema bootstrap could not connect: {message}")]
    Connect { message: String },
    /// Applying the embedded SQL failed.
    #[error("schema bootstrap failed: {message}")]
    Apply { message: String },
    /// The blocking task panicked or was cancelled.
    #[error("schema bootstrap task aborted: {message}")]
    Aborted { message: String },
}

fn apply(database_url: &str) -> Result<usize, SchemaBootstrapError> {
    let mut conn =
        PgConnection::establish(database_url).map_err(|err| SchemaBootstrapError::Connect {
            message: err.to_string(),
        })?;
    let applied = conn
        .run_pending_migrations(MIGRATIONS)
        .map_err(|err| SchemaBootstrapError::Apply {
            message: err.to_string(),
        })?;
    Ok(applied.len())
}

/// Ensure the `users` table exists in the database at `database_url`.
///
/// # Errors
///
/// Returns [`SchemaBootstrapError`] when the database is unreachable or the
/// SQL cannot be applied.
pub async fn bootstrap_schema(database_url: &str) -> Result<(), SchemaBootstrapError> {
    let url = database_url.to_owned();
    let applied = tokio::task::spawn_blocking(move || apply(&url))
        .await
        .map_err(|err| SchemaBootstrapError::Aborted {
            message: err.to_string(),
        })??;
    info!(applied, "user schema ready");
    Ok(())
}
