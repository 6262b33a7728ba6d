use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;
use tracing::error;

use crate::auth::token::TokenConfig;
use crate::user::repository::UserRepository;

/// Shared application state containing all dependencies
#[derive(Clone)]
pub struct AppState {
    pub user_repository: Arc<dyn UserRepository + Send + Sync>,
    pub token_config: TokenConfig,
    pub bcrypt_cost: u32,
}

impl AppState {
    pub fn new(
        user_repository: Arc<dyn UserRepository + Send + Sync>,
        token_config: TokenConfig,
        bcrypt_cost: u32,
    ) -> Self {
        Self {
            user_repository,
            token_config,
            bcrypt_cost,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ResponseStatus {
    Success,
    Error,
}

/// JSON envelope returned by every endpoint: `{status, message, data}`
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct ApiResponse<T> {
    pub status: ResponseStatus,
    pub message: String,
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    pub fn success(message: impl Into<String>, data: T) -> Self {
        Self {
            status: ResponseStatus::Success,
            message: message.into(),
            data: Some(data),
        }
    }

    pub fn error(message: impl Into<String>, data: Option<T>) -> Self {
        Self {
            status: ResponseStatus::Error,
            message: message.into(),
            data,
        }
    }
}

impl ApiResponse<()> {
    /// Success envelope with `data: null`
    pub fn message_only(message: impl Into<String>) -> Self {
        Self {
            status: ResponseStatus::Success,
            message: message.into(),
            data: None,
        }
    }
}

#[derive(Error, Debug)]
pub enum AppError {
    /// Client sent a body we could not decode; `detail` is the decoder's error
    #[error("{message}: {detail}")]
    BadRequest { message: String, detail: String },

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Database error: {0}")]
    DatabaseError(String),

    /// Carries the generic message shown to the caller
    #[error("Internal server error: {0}")]
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            AppError::BadRequest { message, detail } => (
                StatusCode::BAD_REQUEST,
                ApiResponse::error(message, Some(detail)),
            ),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, ApiResponse::error(msg, None)),
            AppError::Unauthorized(msg) => {
                (StatusCode::UNAUTHORIZED, ApiResponse::error(msg, None))
            }
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, ApiResponse::error(msg, None)),
            AppError::DatabaseError(msg) => {
                // Store details stay in the logs
                error!(error = %msg, "Database error while handling request");
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    ApiResponse::error("Service unavailable", None),
                )
            }
            AppError::Internal(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ApiResponse::error(msg, None),
            ),
        };

        (status, Json(body)).into_response()
    }
}
