//! Authentication extractors.
//!
//! [`RequireAuth`] needs a logged-in session; [`RequireAdmin`] additionally
//! checks the caller's phone against the configured allowlist on every
//! request, so allowlist edits apply without re-login. Rejections use the
//! same JSON `{error}` shape as the rest of the API.

use axum::{
    Json,
    extract::FromRequestParts,
    http::{StatusCode, request::Parts},
    response::{IntoResponse, Response},
};
use tower_sessions::Session;

use crate::error::ErrorBody;
use crate::models::{CurrentUser, session_keys};
use crate::state::AppState;

/// Extractor that requires an authenticated session.
///
/// # Example
///
/// ```rust,ignore
/// async fn my_orders(RequireAuth(user): RequireAuth) -> impl IntoResponse {
///     format!("orders for {}", user.phone)
/// }
/// ```
pub struct RequireAuth(pub CurrentUser);

/// Rejection for failed authentication or authorization.
pub enum AuthRejection {
    /// No authenticated session.
    Unauthorized,
    /// Authenticated but not on the admin allowlist.
    Forbidden,
}

impl IntoResponse for AuthRejection {
    fn into_response(self) -> Response {
        match self {
            Self::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                Json(ErrorBody {
                    error: "Unauthorized".to_string(),
                }),
            )
                .into_response(),
            Self::Forbidden => (
                StatusCode::FORBIDDEN,
                Json(ErrorBody {
                    error: "Forbidden".to_string(),
                }),
            )
                .into_response(),
        }
    }
}

/// Read the current user out of the session, if any.
async fn current_user(parts: &mut Parts) -> Option<CurrentUser> {
    let session = parts.extensions.get::<Session>()?;
    session
        .get::<CurrentUser>(session_keys::CURRENT_USER)
        .await
        .ok()
        .flatten()
}

impl<S> FromRequestParts<S> for RequireAuth
where
    S: Send + Sync,
{
    type Rejection = AuthRejection;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user = current_user(parts)
            .await
            .ok_or(AuthRejection::Unauthorized)?;
        Ok(Self(user))
    }
}

/// Extractor that requires an allowlisted admin session.
///
/// The allowlist lives in configuration (`ADMIN_PHONE_NUMBERS`) and is
/// consulted on every admin API call.
pub struct RequireAdmin(pub CurrentUser);

impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = AuthRejection;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = current_user(parts)
            .await
            .ok_or(AuthRejection::Unauthorized)?;

        if !state.config().is_admin_phone(&user.phone) {
            return Err(AuthRejection::Forbidden);
        }

        Ok(Self(user))
    }
}
