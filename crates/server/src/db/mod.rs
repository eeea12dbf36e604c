//! Database operations for the `tailor` `PostgreSQL` schema.
//!
//! ## Tables
//!
//! - `users` - Customer principals (created lazily on first OTP login)
//! - `services` - Offerable tailoring services (reference data)
//! - `orders` - The one entity with a real lifecycle
//! - `appointments` - Schema-only, kept for compatibility
//! - `session` - tower-sessions storage
//! - `otp_codes` - Hashed one-time login codes
//!
//! # Migrations
//!
//! Migrations are stored in `crates/server/migrations/` and run via:
//! ```bash
//! cargo run -p smile-tailor-cli -- migrate
//! ```

pub mod orders;
pub mod otp;
pub mod services;
pub mod users;

use std::time::Duration;

use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use thiserror::Error;

/// Errors that can occur during repository operations.
///
/// Lookups that can legitimately miss return `Option` instead of an error
/// variant; the handler decides whether a miss is a 404.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Constraint violation (e.g., unique phone number).
    #[error("constraint violation: {0}")]
    Conflict(String),
}

/// Create a `PostgreSQL` connection pool with sensible defaults.
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(database_url: &secrecy::SecretString) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .min_connections(2)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url.expose_secret())
        .await
}
