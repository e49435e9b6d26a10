//! Embedded schema migrations, applied once at startup.

use diesel::{Connection, PgConnection};
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!();

/// ## Summary
/// Runs any pending migrations against the database at `database_url`.
///
/// Migrations run over a blocking connection; call from `spawn_blocking`
/// when inside the async runtime.
///
/// ## Errors
/// Returns an error if the connection cannot be established or a migration
/// fails to apply.
pub fn run_migrations(database_url: &str) -> anyhow::Result<()> {
    let mut conn = PgConnection::establish(database_url)?;

    let applied = conn
        .run_pending_migrations(MIGRATIONS)
        .map_err(|e| anyhow::anyhow!("failed to run migrations: {e}"))?;

    for version in &applied {
        tracing::info!(%version, "Applied migration");
    }

    Ok(())
}
