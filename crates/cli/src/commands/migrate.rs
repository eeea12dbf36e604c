//! Database migration command.
//!
//! Applies the migrations embedded from `crates/server/migrations/`. Safe to
//! re-run; sqlx tracks applied versions in `_sqlx_migrations`.

use secrecy::ExposeSecret;
use sqlx::PgPool;
use tracing::info;

/// Run all pending database migrations.
///
/// # Errors
///
/// Returns an error if the database URL is missing, the connection fails,
/// or a migration fails to apply.
pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let database_url = super::database_url()?;

    info!("Connecting to database...");
    let pool = PgPool::connect(database_url.expose_secret()).await?;

    info!("Running migrations...");
    sqlx::migrate!("../server/migrations").run(&pool).await?;

    info!("Migrations complete!");
    Ok(())
}
