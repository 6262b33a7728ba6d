use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use thiserror::Error;
use tracing::{debug, instrument};
use uuid::Uuid;

use super::types::AuthClaims;

#[derive(Debug, Error)]
pub enum TokenError {
    #[error("failed to sign token: {0}")]
    Encode(jsonwebtoken::errors::Error),

    #[error("invalid token: {0}")]
    Decode(jsonwebtoken::errors::Error),

    #[error("token lifetime of {0} hours is out of range")]
    Expiry(i64),
}

/// Configuration for JWT token operations (HS256)
#[derive(Clone)]
pub struct TokenConfig {
    secret: String,
    pub expiration_hours: i64,
}

impl TokenConfig {
    pub fn new(secret: impl Into<String>, expiration_hours: i64) -> Self {
        Self {
            secret: secret.into(),
            expiration_hours,
        }
    }

    /// Signs a token carrying the user's id and role
    #[instrument(skip(self, role))]
    pub fn create_token(&self, user_id: i64, role: &str) -> Result<String, TokenError> {
        let now = Utc::now();
        let exp = Duration::try_hours(self.expiration_hours)
            .and_then(|lifetime| now.checked_add_signed(lifetime))
            .ok_or_else(|| {
                debug!(expiration_hours = self.expiration_hours, "Token expiry overflowed");
                TokenError::Expiry(self.expiration_hours)
            })?
            .timestamp() as usize;

        debug!(
            expiration_hours = self.expiration_hours,
            exp_timestamp = exp,
            "Creating JWT token with expiration"
        );

        let claims = AuthClaims {
            user_id,
            role: role.to_string(),
            jti: Uuid::new_v4().to_string(),
            exp,
            iat: now.timestamp() as usize,
        };

        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.secret.as_ref()),
        )
        .map_err(|e| {
            debug!(error = %e, "Failed to encode JWT token");
            TokenError::Encode(e)
        })
    }

    /// Checks signature and expiry, returning the claims if valid
    #[instrument(skip(self, token))]
    pub fn validate_token(&self, token: &str) -> Result<AuthClaims, TokenError> {
        debug!("Decoding and validating JWT token");

        decode::<AuthClaims>(
            token,
            &DecodingKey::from_secret(self.secret.as_ref()),
            &Validation::default(),
        )
        .map(|data| {
            debug!(
                user_id = data.claims.user_id,
                role = %data.claims.role,
                exp = data.claims.exp,
                "JWT token decoded successfully"
            );
            data.claims
        })
        .map_err(|e| {
            debug!(error = %e, "Failed to decode JWT token");
            TokenError::Decode(e)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_and_validate_token() {
        let config = TokenConfig::new("secret", 72);

        let token = config.create_token(7, "customer").unwrap();
        assert!(!token.is_empty());
        assert_eq!(token.split('.').count(), 3);

        let claims = config.validate_token(&token).unwrap();
        assert_eq!(claims.user_id, 7);
        assert_eq!(claims.role, "customer");
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn test_tokens_are_unique_per_issue() {
        let config = TokenConfig::new("secret", 72);

        let first = config.create_token(7, "customer").unwrap();
        let second = config.create_token(7, "customer").unwrap();
        assert_ne!(first, second);

        let first_claims = config.validate_token(&first).unwrap();
        let second_claims = config.validate_token(&second).unwrap();
        assert_eq!(first_claims.user_id, second_claims.user_id);
        assert_ne!(first_claims.jti, second_claims.jti);
    }

    #[test]
    fn test_invalid_token() {
        let config = TokenConfig::new("secret", 72);
        let result = config.validate_token("invalid.token.here");
        assert!(matches!(result, Err(TokenError::Decode(_))));
    }

    #[test]
    fn test_token_with_different_secret() {
        let issuer = TokenConfig::new("secret-one", 72);
        let other = TokenConfig::new("secret-two", 72);

        let token = issuer.create_token(1, "admin").unwrap();

        assert!(issuer.validate_token(&token).is_ok());
        assert!(matches!(
            other.validate_token(&token),
            Err(TokenError::Decode(_))
        ));
    }

    #[test]
    fn test_oversized_lifetime_is_an_error_not_a_panic() {
        let config = TokenConfig::new("secret", 100_000_000_000);

        let result = config.create_token(1, "admin");
        assert!(matches!(result, Err(TokenError::Expiry(100_000_000_000))));
    }

    #[test]
    fn test_expired_token_is_rejected() {
        // Well past the default 60s leeway
        let config = TokenConfig::new("secret", -2);

        let token = config.create_token(1, "admin").unwrap();
        assert!(matches!(
            config.validate_token(&token),
            Err(TokenError::Decode(_))
        ));
    }
}
