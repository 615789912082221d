//! Handlers for login and logout.

use axum::{Extension, Json, extract::State, http::StatusCode};

use crate::api::dto::login::{LoginRequest, LoginResponse};
use crate::api::middleware::auth::AuthUser;
use crate::error::AppError;
use crate::state::AppState;

/// Exchanges credentials for a session token.
///
/// # Endpoint
///
/// `POST /api/login`
///
/// # Errors
///
/// Returns 401 Unauthorized for an unknown username or a wrong password.
pub async fn login_handler(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    let outcome = state
        .auth_service
        .login(&payload.username, &payload.password)
        .await?;

    Ok(Json(outcome.into()))
}

/// Revokes the session used to make this request.
///
/// # Endpoint
///
/// `POST /api/logout` (Bearer token required)
pub async fn logout_handler(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
) -> Result<StatusCode, AppError> {
    state.auth_service.logout(&auth.token).await?;
    Ok(StatusCode::NO_CONTENT)
}
