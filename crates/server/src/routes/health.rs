//! Health and readiness probes.

use axum::{extract::State, http::StatusCode};
use tracing::instrument;

use crate::state::AppState;

/// Liveness probe: the process is up and serving.
pub async fn health() -> &'static str {
    "OK"
}

/// Readiness probe: the database is reachable.
#[instrument(skip(state))]
pub async fn ready(State(state): State<AppState>) -> Result<&'static str, StatusCode> {
    match sqlx::query("SELECT 1").execute(state.pool()).await {
        Ok(_) => Ok("OK"),
        Err(e) => {
            tracing::warn!(error = %e, "Readiness check failed");
            Err(StatusCode::SERVICE_UNAVAILABLE)
        }
    }
}
