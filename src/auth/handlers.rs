use axum::{
    extract::{rejection::JsonRejection, State},
    Extension, Json,
};
use std::sync::Arc;
use tracing::{info, instrument, warn};

use super::{
    service::AuthService,
    types::{AuthClaims, ChangePasswordInput, LoginInput},
};
use crate::shared::{ApiResponse, AppError, AppState};

fn auth_service(state: &AppState) -> AuthService {
    AuthService::new(
        Arc::clone(&state.user_repository),
        state.token_config.clone(),
        state.bcrypt_cost,
    )
}

/// Any body the JSON extractor refuses becomes a 400 carrying the decoder's message
fn malformed_body(message: &str, rejection: JsonRejection) -> AppError {
    warn!(error = %rejection.body_text(), "Rejected malformed request body");
    AppError::BadRequest {
        message: message.to_string(),
        detail: rejection.body_text(),
    }
}

/// HTTP handler for logging in with email and password
///
/// POST /api/auth/login
/// Returns a signed JWT in `data` on success
#[instrument(name = "login", skip(state, payload))]
pub async fn login(
    State(state): State<AppState>,
    payload: Result<Json<LoginInput>, JsonRejection>,
) -> Result<Json<ApiResponse<String>>, AppError> {
    let Json(input) = payload.map_err(|e| malformed_body("Error on login request", e))?;

    info!(email = %input.email, "Login requested");

    let token = auth_service(&state).login(input).await?;

    Ok(Json(ApiResponse::success("Success login", token)))
}

/// HTTP handler for changing the caller's password
///
/// POST /api/auth/change-password
/// Requires the `require_auth` gate in front of it
#[instrument(name = "change_password", skip(state, claims, payload), fields(user_id = claims.user_id))]
pub async fn change_password(
    State(state): State<AppState>,
    Extension(claims): Extension<AuthClaims>,
    payload: Result<Json<ChangePasswordInput>, JsonRejection>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    let Json(input) =
        payload.map_err(|e| malformed_body("Error on change password request", e))?;

    auth_service(&state)
        .change_password(claims.user_id, input)
        .await?;

    Ok(Json(ApiResponse::message_only("Password updated")))
}
