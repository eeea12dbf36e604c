//! Order repository.
//!
//! Orders are created once by the submission flow, mutated by the lifecycle
//! flow, and deleted only by an explicit administrator action. Updates use
//! last-write-wins semantics: there is no version token or row lock, which
//! matches the documented concurrency model.

use sqlx::PgPool;

use smile_tailor_core::{OrderId, UserId};

use super::RepositoryError;
use crate::models::order::{NewOrder, Order, OrderChanges, OrderRow};

const ORDER_COLUMNS: &str = "id, user_id, service_id, service_label, order_type, \
     customer_name, customer_phone, customer_notes, image_urls, admin_images, \
     status, final_price, admin_notes, created_at, updated_at";

/// Fetch every order, newest first.
///
/// The whole collection is fetched in one query; filtering and per-status
/// counts happen in process over the result.
///
/// # Errors
///
/// Returns error if the database query fails.
pub async fn list_all(pool: &PgPool) -> Result<Vec<Order>, RepositoryError> {
    let rows = sqlx::query_as::<_, OrderRow>(&format!(
        "SELECT {ORDER_COLUMNS} FROM tailor.orders ORDER BY created_at DESC"
    ))
    .fetch_all(pool)
    .await?;

    Ok(rows.into_iter().map(Order::from).collect())
}

/// Fetch the given user's orders, newest first.
///
/// # Errors
///
/// Returns error if the database query fails.
pub async fn list_for_user(pool: &PgPool, user_id: UserId) -> Result<Vec<Order>, RepositoryError> {
    let rows = sqlx::query_as::<_, OrderRow>(&format!(
        "SELECT {ORDER_COLUMNS} FROM tailor.orders WHERE user_id = $1 ORDER BY created_at DESC"
    ))
    .bind(user_id.as_uuid())
    .fetch_all(pool)
    .await?;

    Ok(rows.into_iter().map(Order::from).collect())
}

/// Fetch a single order by id.
///
/// # Errors
///
/// Returns error if the database query fails.
pub async fn get(pool: &PgPool, id: OrderId) -> Result<Option<Order>, RepositoryError> {
    let row = sqlx::query_as::<_, OrderRow>(&format!(
        "SELECT {ORDER_COLUMNS} FROM tailor.orders WHERE id = $1"
    ))
    .bind(id.as_i64())
    .fetch_optional(pool)
    .await?;

    Ok(row.map(Order::from))
}

/// Insert a new order with status `pending`.
///
/// # Errors
///
/// Returns `RepositoryError::Conflict` if a referenced service does not
/// exist; `RepositoryError::Database` for other failures.
pub async fn create(pool: &PgPool, new_order: &NewOrder) -> Result<Order, RepositoryError> {
    let row = sqlx::query_as::<_, OrderRow>(&format!(
        "INSERT INTO tailor.orders \
             (user_id, service_id, service_label, order_type, \
              customer_name, customer_phone, customer_notes, image_urls) \
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8) \
         RETURNING {ORDER_COLUMNS}"
    ))
    .bind(new_order.user_id.map(uuid::Uuid::from))
    .bind(new_order.service_id.map(i64::from))
    .bind(new_order.service_label.as_deref())
    .bind(new_order.order_type.as_str())
    .bind(&new_order.customer_name)
    .bind(new_order.customer_phone.as_str())
    .bind(&new_order.customer_notes)
    .bind(&new_order.image_urls)
    .fetch_one(pool)
    .await
    .map_err(|e| {
        if let sqlx::Error::Database(ref db_err) = e
            && db_err.is_foreign_key_violation()
        {
            return RepositoryError::Conflict("unknown service".to_owned());
        }
        RepositoryError::Database(e)
    })?;

    Ok(Order::from(row))
}

/// Apply a partial operator update and bump `updated_at`.
///
/// Absent fields keep their stored value; `admin_images` entries are
/// appended to the existing list. Returns `None` if the order does not
/// exist.
///
/// # Errors
///
/// Returns error if the database update fails.
pub async fn update(
    pool: &PgPool,
    id: OrderId,
    changes: &OrderChanges,
) -> Result<Option<Order>, RepositoryError> {
    let row = sqlx::query_as::<_, OrderRow>(&format!(
        "UPDATE tailor.orders SET \
             status = COALESCE($2, status), \
             final_price = COALESCE($3, final_price), \
             admin_notes = COALESCE($4, admin_notes), \
             admin_images = admin_images || $5, \
             updated_at = NOW() \
         WHERE id = $1 \
         RETURNING {ORDER_COLUMNS}"
    ))
    .bind(id.as_i64())
    .bind(changes.status.map(|s| s.as_str()))
    .bind(changes.final_price.map(rust_decimal::Decimal::from))
    .bind(changes.admin_notes.as_deref())
    .bind(&changes.admin_images)
    .fetch_optional(pool)
    .await?;

    Ok(row.map(Order::from))
}

/// Delete an order; reset the id sequence if the table is now empty.
///
/// The reset makes the next inserted order receive id 1 again, a policy
/// kept for compatibility with existing data. Returns `false` if the order
/// did not exist.
///
/// # Errors
///
/// Returns error if any statement in the transaction fails.
pub async fn delete(pool: &PgPool, id: OrderId) -> Result<bool, RepositoryError> {
    let mut tx = pool.begin().await?;

    let deleted = sqlx::query("DELETE FROM tailor.orders WHERE id = $1")
        .bind(id.as_i64())
        .execute(&mut *tx)
        .await?;

    if deleted.rows_affected() == 0 {
        tx.rollback().await?;
        return Ok(false);
    }

    let remaining: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM tailor.orders")
        .fetch_one(&mut *tx)
        .await?;

    if remaining == 0 {
        sqlx::query(
            "SELECT setval(pg_get_serial_sequence('tailor.orders', 'id'), 1, false)",
        )
        .execute(&mut *tx)
        .await?;
    }

    tx.commit().await?;
    Ok(true)
}
