//! Service catalog repository.

use sqlx::PgPool;

use smile_tailor_core::ServiceId;

use super::RepositoryError;
use crate::models::service::{Service, ServiceRow};

const SERVICE_COLUMNS: &str = "id, name, description, base_price, is_active, created_at";

/// Fetch the services offerable to customers, in catalog order.
///
/// # Errors
///
/// Returns error if the database query fails.
pub async fn list_active(pool: &PgPool) -> Result<Vec<Service>, RepositoryError> {
    let rows = sqlx::query_as::<_, ServiceRow>(&format!(
        "SELECT {SERVICE_COLUMNS} FROM tailor.services WHERE is_active ORDER BY id"
    ))
    .fetch_all(pool)
    .await?;

    Ok(rows.into_iter().map(Service::from).collect())
}

/// Fetch a single service by id, active or not.
///
/// Historic orders may reference inactive services, so lookups never filter
/// on the active flag.
///
/// # Errors
///
/// Returns error if the database query fails.
pub async fn get(pool: &PgPool, id: ServiceId) -> Result<Option<Service>, RepositoryError> {
    let row = sqlx::query_as::<_, ServiceRow>(&format!(
        "SELECT {SERVICE_COLUMNS} FROM tailor.services WHERE id = $1"
    ))
    .bind(id.as_i64())
    .fetch_optional(pool)
    .await?;

    Ok(row.map(Service::from))
}
