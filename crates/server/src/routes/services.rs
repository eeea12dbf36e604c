//! Service catalog route handlers.

use axum::{Json, extract::State};
use serde::Serialize;
use tracing::instrument;

use crate::db;
use crate::error::Result;
use crate::models::Service;
use crate::state::AppState;

/// Response body for the service catalog.
#[derive(Debug, Serialize)]
pub struct ServicesResponse {
    pub services: Vec<Service>,
}

/// List the services offerable to customers.
///
/// Inactive services are excluded; they remain resolvable as references on
/// historic orders but are not offered for new ones.
#[instrument(skip(state))]
pub async fn list(State(state): State<AppState>) -> Result<Json<ServicesResponse>> {
    let services = db::services::list_active(state.pool()).await?;
    Ok(Json(ServicesResponse { services }))
}
