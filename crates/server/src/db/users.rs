//! User repository.

use sqlx::PgPool;

use smile_tailor_core::PhoneNumber;

use super::RepositoryError;
use crate::models::user::{User, UserRow};

const USER_COLUMNS: &str = "id, phone_number, full_name, created_at";

/// Look up a principal by phone number.
///
/// # Errors
///
/// Returns error if the database query fails.
pub async fn get_by_phone(
    pool: &PgPool,
    phone: &PhoneNumber,
) -> Result<Option<User>, RepositoryError> {
    let row = sqlx::query_as::<_, UserRow>(&format!(
        "SELECT {USER_COLUMNS} FROM tailor.users WHERE phone_number = $1"
    ))
    .bind(phone.as_str())
    .fetch_optional(pool)
    .await?;

    Ok(row.map(User::from))
}

/// Fetch the principal for a phone number, creating it on first login.
///
/// The upsert keys on the unique phone number, so concurrent first logins
/// for the same phone converge on one row.
///
/// # Errors
///
/// Returns error if the database query fails.
pub async fn create_if_missing(
    pool: &PgPool,
    phone: &PhoneNumber,
) -> Result<User, RepositoryError> {
    let row = sqlx::query_as::<_, UserRow>(&format!(
        "INSERT INTO tailor.users (phone_number) \
         VALUES ($1) \
         ON CONFLICT (phone_number) DO UPDATE SET phone_number = EXCLUDED.phone_number \
         RETURNING {USER_COLUMNS}"
    ))
    .bind(phone.as_str())
    .fetch_one(pool)
    .await?;

    Ok(User::from(row))
}
