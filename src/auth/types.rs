use serde::{Deserialize, Serialize};

/// Request payload for POST /api/auth/login
///
/// Absent fields decode as empty strings; only syntax and type errors reject the body.
#[derive(Debug, Deserialize)]
pub struct LoginInput {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// Request payload for POST /api/auth/change-password
#[derive(Debug, Deserialize)]
pub struct ChangePasswordInput {
    pub old_password: String,
    pub new_password: String,
}

/// JWT claims identifying the authenticated user
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AuthClaims {
    pub user_id: i64,
    pub role: String,
    pub jti: String, // Unique per issued token
    pub exp: usize,  // Expiration timestamp (standard JWT claim)
    pub iat: usize,  // Issued at timestamp (standard JWT claim)
}
