//! Customer principal entity.

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

use smile_tailor_core::{PhoneNumber, UserId};

/// A customer principal, created lazily on first verified OTP login.
#[derive(Debug, Clone, Serialize)]
pub struct User {
    pub id: UserId,
    pub phone_number: PhoneNumber,
    pub full_name: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Raw database row for a user.
#[derive(Debug, FromRow)]
pub struct UserRow {
    pub id: Uuid,
    pub phone_number: String,
    pub full_name: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        Self {
            id: UserId::new(row.id),
            phone_number: PhoneNumber::from_normalized(row.phone_number),
            full_name: row.full_name,
            created_at: row.created_at,
        }
    }
}
