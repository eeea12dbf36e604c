//! Phone-OTP authentication route handlers.
//!
//! Request: normalize the submitted phone and issue a short-lived code.
//! Verify: consume the code, lazily create the principal, and establish a
//! server-side session. Admin standing is never stored in the session; the
//! allowlist is consulted on every admin request.

use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};
use tower_sessions::Session;
use tracing::instrument;

use smile_tailor_core::PhoneNumber;

use crate::error::{AppError, Result};
use crate::models::{CurrentUser, User, session_keys};
use crate::services::auth::AuthService;
use crate::state::AppState;

/// Request body for issuing a login code.
#[derive(Debug, Deserialize)]
pub struct RequestCodeBody {
    pub phone: String,
}

/// Response for a successfully dispatched login code.
#[derive(Debug, Serialize)]
pub struct RequestCodeResponse {
    pub sent: bool,
}

/// Request body for verifying a login code.
#[derive(Debug, Deserialize)]
pub struct VerifyCodeBody {
    pub phone: String,
    pub code: String,
}

/// Response for a verified login.
#[derive(Debug, Serialize)]
pub struct VerifyCodeResponse {
    pub user: User,
}

/// Issue and dispatch a login code for the given phone.
#[instrument(skip(state, body))]
pub async fn request_code(
    State(state): State<AppState>,
    Json(body): Json<RequestCodeBody>,
) -> Result<Json<RequestCodeResponse>> {
    let phone = PhoneNumber::normalize(&body.phone)
        .map_err(|e| AppError::BadRequest(format!("Invalid phone number: {e}")))?;

    let auth = AuthService::new(state.pool(), state.otp_sender(), state.config().otp_ttl);
    auth.request_code(&phone).await?;

    Ok(Json(RequestCodeResponse { sent: true }))
}

/// Verify a login code and establish the session.
#[instrument(skip(state, session, body))]
pub async fn verify_code(
    State(state): State<AppState>,
    session: Session,
    Json(body): Json<VerifyCodeBody>,
) -> Result<Json<VerifyCodeResponse>> {
    let phone = PhoneNumber::normalize(&body.phone)
        .map_err(|e| AppError::BadRequest(format!("Invalid phone number: {e}")))?;

    let auth = AuthService::new(state.pool(), state.otp_sender(), state.config().otp_ttl);
    let user = auth.verify_code(&phone, &body.code).await?;

    let current = CurrentUser {
        id: user.id,
        phone: user.phone_number.clone(),
    };
    session
        .insert(session_keys::CURRENT_USER, current)
        .await
        .map_err(|e| AppError::Internal(format!("Failed to establish session: {e}")))?;

    tracing::info!(user_id = %user.id, "Login verified");
    Ok(Json(VerifyCodeResponse { user }))
}

/// Terminate the current session, if any.
#[instrument(skip(session))]
pub async fn logout(session: Session) -> Result<Json<serde_json::Value>> {
    session
        .flush()
        .await
        .map_err(|e| AppError::Internal(format!("Failed to clear session: {e}")))?;

    Ok(Json(serde_json::json!({ "success": true })))
}
