//! One-time login code storage.
//!
//! Codes are stored hashed; verification consumes the code so it can be
//! used at most once.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use smile_tailor_core::PhoneNumber;

use super::RepositoryError;

/// Store a freshly issued code hash for a phone number.
///
/// # Errors
///
/// Returns error if the insert fails.
pub async fn insert_code(
    pool: &PgPool,
    phone: &PhoneNumber,
    code_hash: &str,
    expires_at: DateTime<Utc>,
) -> Result<(), RepositoryError> {
    sqlx::query(
        "INSERT INTO tailor.otp_codes (phone_number, code_hash, expires_at) \
         VALUES ($1, $2, $3)",
    )
    .bind(phone.as_str())
    .bind(code_hash)
    .bind(expires_at)
    .execute(pool)
    .await?;

    Ok(())
}

/// Atomically consume a matching, unexpired, unused code.
///
/// Returns `true` if a code was consumed. A second call with the same code
/// returns `false`.
///
/// # Errors
///
/// Returns error if the update fails.
pub async fn consume_code(
    pool: &PgPool,
    phone: &PhoneNumber,
    code_hash: &str,
) -> Result<bool, RepositoryError> {
    let result = sqlx::query(
        "UPDATE tailor.otp_codes \
         SET consumed_at = NOW() \
         WHERE phone_number = $1 \
           AND code_hash = $2 \
           AND consumed_at IS NULL \
           AND expires_at > NOW()",
    )
    .bind(phone.as_str())
    .bind(code_hash)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}

/// Drop expired codes. Called opportunistically; losing a few stale rows
/// to a failed sweep is harmless.
///
/// # Errors
///
/// Returns error if the delete fails.
pub async fn prune_expired(pool: &PgPool) -> Result<u64, RepositoryError> {
    let result = sqlx::query("DELETE FROM tailor.otp_codes WHERE expires_at < NOW()")
        .execute(pool)
        .await?;

    Ok(result.rows_affected())
}
