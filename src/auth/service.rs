use std::sync::Arc;
use tracing::{error, info, instrument, warn};

use super::{
    password::{hash_password, verify_password},
    token::TokenConfig,
    types::{ChangePasswordInput, LoginInput},
};
use crate::{shared::AppError, user::UserRepository};

pub const MIN_PASSWORD_LENGTH: usize = 6;

/// Service for credential checks and token issuance
pub struct AuthService {
    repository: Arc<dyn UserRepository + Send + Sync>,
    token_config: TokenConfig,
    bcrypt_cost: u32,
}

impl AuthService {
    pub fn new(
        repository: Arc<dyn UserRepository + Send + Sync>,
        token_config: TokenConfig,
        bcrypt_cost: u32,
    ) -> Self {
        Self {
            repository,
            token_config,
            bcrypt_cost,
        }
    }

    /// Verifies the credentials and returns a freshly signed token
    #[instrument(skip(self, input), fields(email = %input.email))]
    pub async fn login(&self, input: LoginInput) -> Result<String, AppError> {
        let user = self
            .repository
            .find_by_email(&input.email)
            .await?
            .ok_or_else(|| {
                warn!("Login attempted for unknown email");
                AppError::Unauthorized("User not found".to_string())
            })?;

        if !check_password(input.password, user.password.clone()).await? {
            warn!(user_id = user.id, "Login rejected: invalid password");
            return Err(AppError::Unauthorized("Invalid password".to_string()));
        }

        let token = self
            .token_config
            .create_token(user.id, &user.role)
            .map_err(|e| {
                error!(error = %e, user_id = user.id, "Token signing failed");
                AppError::Internal("Could not login".to_string())
            })?;

        info!(user_id = user.id, role = %user.role, "User logged in");
        Ok(token)
    }

    /// Replaces the user's password after re-checking the current one
    #[instrument(skip(self, input))]
    pub async fn change_password(
        &self,
        user_id: i64,
        input: ChangePasswordInput,
    ) -> Result<(), AppError> {
        if input.new_password.chars().count() < MIN_PASSWORD_LENGTH {
            return Err(AppError::Validation(format!(
                "New password must be at least {} characters",
                MIN_PASSWORD_LENGTH
            )));
        }

        let user = self
            .repository
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| {
                warn!(user_id, "Token refers to a user that no longer exists");
                AppError::NotFound("User not found".to_string())
            })?;

        if !check_password(input.old_password, user.password).await? {
            warn!(user_id, "Password change rejected: invalid password");
            return Err(AppError::Unauthorized("Invalid password".to_string()));
        }

        let cost = self.bcrypt_cost;
        let new_password = input.new_password;
        let new_hash = tokio::task::spawn_blocking(move || hash_password(&new_password, cost))
            .await
            .map_err(|e| {
                error!(error = %e, "Password hashing task failed");
                AppError::Internal("Could not change password".to_string())
            })?
            .map_err(|e| {
                error!(error = %e, "Password hashing failed");
                AppError::Internal("Could not change password".to_string())
            })?;

        self.repository.update_password(user_id, &new_hash).await?;

        info!(user_id, "Password changed");
        Ok(())
    }
}

/// bcrypt is CPU bound, so the comparison runs off the async workers
async fn check_password(password: String, password_hash: String) -> Result<bool, AppError> {
    tokio::task::spawn_blocking(move || verify_password(&password, &password_hash))
        .await
        .map_err(|e| {
            error!(error = %e, "Password verification task failed");
            AppError::Internal("Could not verify password".to_string())
        })
}
