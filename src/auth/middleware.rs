use axum::{
    extract::{Request, State},
    http::{header::AUTHORIZATION, HeaderMap},
    middleware::Next,
    response::Response,
};
use tracing::{info, instrument, warn};

use super::{token::TokenConfig, types::AuthClaims};
use crate::shared::{AppError, AppState};

/// Checks the `Authorization: Bearer <jwt>` header and returns the caller's claims.
///
/// Framework-independent: `require_auth` is the axum wrapper around it.
pub fn authorize(headers: &HeaderMap, token_config: &TokenConfig) -> Result<AuthClaims, AppError> {
    let auth_header = headers
        .get(AUTHORIZATION)
        .and_then(|header| header.to_str().ok())
        .ok_or_else(|| {
            warn!("Missing Authorization header in request");
            AppError::Unauthorized("Missing authorization header".to_string())
        })?;

    let token = auth_header.strip_prefix("Bearer ").ok_or_else(|| {
        warn!("Invalid Authorization header format (expected Bearer token)");
        AppError::Unauthorized("Invalid authorization header format".to_string())
    })?;

    token_config.validate_token(token.trim()).map_err(|e| {
        warn!(error = %e, "JWT authentication failed");
        AppError::Unauthorized("Invalid or expired token".to_string())
    })
}

/// JWT authentication middleware - rejects the request before the handler runs
/// unless `authorize` succeeds, then adds AuthClaims to request extensions.
/// Usage: .route_layer(middleware::from_fn_with_state(state.clone(), auth::require_auth))
#[instrument(skip(state, req, next))]
pub async fn require_auth(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let claims = authorize(req.headers(), &state.token_config)?;

    info!(
        user_id = claims.user_id,
        role = %claims.role,
        uri = %req.uri(),
        "Authentication successful, adding claims to request"
    );

    req.extensions_mut().insert(claims);

    Ok(next.run(req).await)
}
