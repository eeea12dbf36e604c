//! Order route handlers: guest submission, the customer's own history, and
//! the admin lifecycle operations.
//!
//! Submission is client-sequenced: images are uploaded first (see
//! `routes::uploads`), then the order referencing their URLs is created
//! here. The response carries a prefilled WhatsApp deep link addressed to
//! the shop; opening it is the customer's act, and the server neither knows
//! nor cares whether they do.

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tower_sessions::Session;
use tracing::instrument;

use smile_tailor_core::{OrderId, OrderStatus, OrderType, PhoneNumber, Price, ServiceId, StatusFilter};

use crate::db;
use crate::error::{AppError, Result};
use crate::middleware::{RequireAdmin, RequireAuth};
use crate::models::{CurrentUser, NewOrder, Order, OrderChanges, session_keys};
use crate::services::dashboard::{self, StatusCounts};
use crate::services::whatsapp;
use crate::state::AppState;

/// Maximum number of image URLs an order may reference.
const MAX_IMAGE_URLS: usize = 5;

// =============================================================================
// Request / response bodies
// =============================================================================

/// Guest order submission.
#[derive(Debug, Deserialize)]
pub struct CreateOrderBody {
    pub customer_name: String,
    pub customer_phone: String,
    pub customer_notes: String,
    pub service_id: Option<i64>,
    pub service_label: Option<String>,
    #[serde(default)]
    pub order_type: OrderType,
    #[serde(default)]
    pub image_urls: Vec<String>,
}

/// Response for a created order.
#[derive(Debug, Serialize)]
pub struct CreateOrderResponse {
    pub order: Order,
    /// Deep link to the shop's WhatsApp with the order summary prefilled.
    pub whatsapp_url: String,
}

/// Query parameters for the admin listing.
#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub status: Option<String>,
}

/// Admin listing: the (possibly filtered) orders plus counts over the full
/// collection.
#[derive(Debug, Serialize)]
pub struct OrderListResponse {
    pub orders: Vec<Order>,
    pub counts: StatusCounts,
}

/// A customer's own orders.
#[derive(Debug, Serialize)]
pub struct MyOrdersResponse {
    pub orders: Vec<Order>,
}

/// A single order.
#[derive(Debug, Serialize)]
pub struct OrderResponse {
    pub order: Order,
}

/// Partial operator update. Absent fields keep their stored value;
/// `admin_images` entries are appended.
#[derive(Debug, Deserialize)]
pub struct UpdateOrderBody {
    pub status: Option<String>,
    pub final_price: Option<Decimal>,
    pub admin_notes: Option<String>,
    #[serde(default)]
    pub admin_images: Vec<String>,
}

/// Result of a delete.
#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    pub deleted: bool,
}

/// Prefilled customer notification.
#[derive(Debug, Serialize)]
pub struct NotificationResponse {
    pub message: String,
    /// Deep link to the customer's WhatsApp with the message prefilled.
    pub whatsapp_url: String,
}

// =============================================================================
// Handlers
// =============================================================================

/// Submit a new order.
///
/// Open to guests; when a session exists the order is attached to the
/// logged-in customer so it appears in their history.
#[instrument(skip(state, session, body))]
pub async fn create(
    State(state): State<AppState>,
    session: Session,
    Json(body): Json<CreateOrderBody>,
) -> Result<(StatusCode, Json<CreateOrderResponse>)> {
    let name = body.customer_name.trim();
    if name.is_empty() {
        return Err(AppError::BadRequest("Name is required".to_string()));
    }
    let notes = body.customer_notes.trim();
    if notes.is_empty() {
        return Err(AppError::BadRequest("Details are required".to_string()));
    }
    let phone = PhoneNumber::normalize(&body.customer_phone)
        .map_err(|e| AppError::BadRequest(format!("Invalid phone number: {e}")))?;

    let service_label = body
        .service_label
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(ToOwned::to_owned);
    if body.service_id.is_none() && service_label.is_none() {
        return Err(AppError::BadRequest(
            "A service or a service description is required".to_string(),
        ));
    }
    if body.image_urls.len() > MAX_IMAGE_URLS {
        return Err(AppError::BadRequest(format!(
            "At most {MAX_IMAGE_URLS} images are allowed"
        )));
    }

    // Resolve the catalog service up front so an unknown id fails before the
    // insert and its name is available for the summary message.
    let service_id = body.service_id.map(ServiceId::new);
    let catalog_name = match service_id {
        Some(id) => {
            let service = db::services::get(state.pool(), id)
                .await?
                .ok_or_else(|| AppError::BadRequest("Unknown service".to_string()))?;
            Some(service.name)
        }
        None => None,
    };

    let user_id = current_user(&session).await.map(|u| u.id);

    let order = db::orders::create(
        state.pool(),
        &NewOrder {
            user_id,
            service_id,
            service_label,
            order_type: body.order_type,
            customer_name: name.to_string(),
            customer_phone: phone,
            customer_notes: notes.to_string(),
            image_urls: body.image_urls,
        },
    )
    .await?;

    let shop = &state.config().shop;
    let summary = whatsapp::order_summary(
        &order,
        order.service_display(catalog_name.as_deref()),
        &shop.name,
    );
    let whatsapp_url = whatsapp::wa_link(&shop.whatsapp, &summary);

    tracing::info!(order_id = %order.id, "Order created");
    Ok((
        StatusCode::CREATED,
        Json(CreateOrderResponse { order, whatsapp_url }),
    ))
}

/// List every order, newest first, with per-status counts.
///
/// Admin only. `?status=` narrows the returned orders; the counts always
/// cover the full collection so the dashboard stat cards are stable across
/// filters. An unrecognized filter value is a client error.
#[instrument(skip(state, _admin))]
pub async fn list(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Query(query): Query<ListQuery>,
) -> Result<Json<OrderListResponse>> {
    let filter = match query.status.as_deref() {
        None => StatusFilter::All,
        Some(raw) => raw
            .parse::<StatusFilter>()
            .map_err(|e| AppError::BadRequest(format!("Invalid status filter: {e}")))?,
    };

    let orders = db::orders::list_all(state.pool()).await?;
    let counts = dashboard::status_counts(&orders);
    let orders = dashboard::filter_orders(orders, filter);

    Ok(Json(OrderListResponse { orders, counts }))
}

/// List the logged-in customer's own orders, newest first.
#[instrument(skip(state, user))]
pub async fn list_mine(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
) -> Result<Json<MyOrdersResponse>> {
    let orders = db::orders::list_for_user(state.pool(), user.id).await?;
    Ok(Json(MyOrdersResponse { orders }))
}

/// Fetch a single order.
///
/// Visible to its owning customer and to admins. Guest orders have no owner
/// and are admin-visible only.
#[instrument(skip(state, user))]
pub async fn get(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<i64>,
) -> Result<Json<OrderResponse>> {
    let order = db::orders::get(state.pool(), OrderId::new(id))
        .await?
        .ok_or_else(|| AppError::NotFound(format!("order {id}")))?;

    let is_owner = order.user_id == Some(user.id);
    if !is_owner && !state.config().is_admin_phone(&user.phone) {
        return Err(AppError::Forbidden("Not your order".to_string()));
    }

    Ok(Json(OrderResponse { order }))
}

/// Apply a partial operator update to an order.
///
/// Admin only. Any status in the recognized set is accepted regardless of
/// the current one; an unrecognized status is a client error.
#[instrument(skip(state, _admin, body))]
pub async fn update(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<i64>,
    Json(body): Json<UpdateOrderBody>,
) -> Result<Json<OrderResponse>> {
    let status = body
        .status
        .as_deref()
        .map(str::parse::<OrderStatus>)
        .transpose()
        .map_err(|e| AppError::BadRequest(format!("Invalid status: {e}")))?;

    let changes = OrderChanges {
        status,
        final_price: body.final_price.map(Price::new),
        admin_notes: body.admin_notes,
        admin_images: body.admin_images,
    };
    if changes.is_empty() {
        return Err(AppError::BadRequest("Update contains no changes".to_string()));
    }

    let order = db::orders::update(state.pool(), OrderId::new(id), &changes)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("order {id}")))?;

    tracing::info!(order_id = %order.id, status = %order.status, "Order updated");
    Ok(Json(OrderResponse { order }))
}

/// Delete an order.
///
/// Admin only. Deleting the last remaining order resets the id sequence so
/// numbering restarts at 1.
#[instrument(skip(state, _admin))]
pub async fn delete(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<i64>,
) -> Result<Json<DeleteResponse>> {
    let deleted = db::orders::delete(state.pool(), OrderId::new(id)).await?;
    if !deleted {
        return Err(AppError::NotFound(format!("order {id}")));
    }

    tracing::info!(order_id = id, "Order deleted");
    Ok(Json(DeleteResponse { deleted: true }))
}

/// Compose the status notification for an order's customer.
///
/// Admin only. Returns the rendered message and a deep link to the
/// customer's WhatsApp; the operator opens the link to actually send it.
#[instrument(skip(state, _admin))]
pub async fn notification(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<i64>,
) -> Result<Json<NotificationResponse>> {
    let order = db::orders::get(state.pool(), OrderId::new(id))
        .await?
        .ok_or_else(|| AppError::NotFound(format!("order {id}")))?;

    let catalog_name = match order.service_id {
        Some(service_id) => db::services::get(state.pool(), service_id)
            .await?
            .map(|s| s.name),
        None => None,
    };

    let message = whatsapp::customer_notification(
        &order,
        order.service_display(catalog_name.as_deref()),
        &state.config().shop.name,
    );
    let whatsapp_url = whatsapp::wa_link(&order.customer_phone, &message);

    Ok(Json(NotificationResponse {
        message,
        whatsapp_url,
    }))
}

/// Read the current user out of the session, if logged in.
async fn current_user(session: &Session) -> Option<CurrentUser> {
    session
        .get::<CurrentUser>(session_keys::CURRENT_USER)
        .await
        .ok()
        .flatten()
}
