//! HTTP route handlers for the tailoring API.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                  - Liveness probe
//! GET  /health/ready            - Readiness probe (checks database)
//!
//! # Catalog
//! GET  /services                - Active service catalog
//!
//! # Orders
//! POST /orders                  - Submit an order (guest or logged in)
//! GET  /orders                  - All orders + counts (admin, ?status= filter)
//! GET  /orders/me               - Own orders (requires login)
//! GET  /orders/{id}             - Single order (owner or admin)
//! PUT  /orders/{id}             - Partial update (admin)
//! DELETE /orders/{id}           - Delete (admin)
//! GET  /orders/{id}/notification - Prefilled customer WhatsApp message (admin)
//!
//! # Uploads
//! POST /uploads                 - Order images, multipart, max 5 x 5 MB
//!
//! # Auth
//! POST /auth/otp/request        - Issue a login code
//! POST /auth/otp/verify         - Verify code, establish session
//! POST /auth/logout             - End session
//! ```

pub mod auth;
pub mod health;
pub mod orders;
pub mod services;
pub mod uploads;

use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{get, post},
};

use crate::state::AppState;

/// Body limit for the image upload endpoint: five 5 MB files plus
/// multipart overhead.
const UPLOAD_BODY_LIMIT: usize = 30 * 1024 * 1024;

/// Create the order routes router.
pub fn order_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(orders::create).get(orders::list))
        .route("/me", get(orders::list_mine))
        .route(
            "/{id}",
            get(orders::get).put(orders::update).delete(orders::delete),
        )
        .route("/{id}/notification", get(orders::notification))
}

/// Create the auth routes router.
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/otp/request", post(auth::request_code))
        .route("/otp/verify", post(auth::verify_code))
        .route("/logout", post(auth::logout))
}

/// Create all routes for the API.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health))
        .route("/health/ready", get(health::ready))
        .route("/services", get(services::list))
        .nest("/orders", order_routes())
        .route(
            "/uploads",
            post(uploads::upload_images).layer(DefaultBodyLimit::max(UPLOAD_BODY_LIMIT)),
        )
        .nest("/auth", auth_routes())
}
