use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Database model for users table
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct UserModel {
    pub id: i64,
    pub name: Option<String>, // name and timestamps are nullable in the table
    pub email: String, // Unique, used as the login key
    #[serde(skip_serializing)]
    pub password: String, // bcrypt hash, never the plaintext
    pub role: String, // e.g. "admin", "staff", "customer"
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl UserModel {
    pub fn new(
        id: i64,
        name: impl Into<String>,
        email: impl Into<String>,
        password_hash: impl Into<String>,
        role: impl Into<String>,
    ) -> Self {
        let now = Utc::now();

        Self {
            id,
            name: Some(name.into()),
            email: email.into(),
            password: password_hash.into(),
            role: role.into(),
            created_at: Some(now),
            updated_at: Some(now),
        }
    }

    /// Replaces the stored hash and bumps `updated_at`
    pub fn set_password_hash(&mut self, password_hash: String) {
        self.password = password_hash;
        self.updated_at = Some(Utc::now());
    }
}
