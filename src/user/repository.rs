use async_trait::async_trait;
use chrono::Utc;
use sqlx::PgPool;
use std::collections::HashMap;
use std::sync::Mutex;
use tracing::{debug, instrument, warn};

use super::models::UserModel;
use crate::shared::AppError;

/// Trait for user repository operations
#[async_trait]
pub trait UserRepository {
    /// Exact-match lookup on the unique email column
    async fn find_by_email(&self, email: &str) -> Result<Option<UserModel>, AppError>;
    async fn find_by_id(&self, id: i64) -> Result<Option<UserModel>, AppError>;
    async fn update_password(&self, id: i64, password_hash: &str) -> Result<(), AppError>;
}

/// In-memory implementation of UserRepository for development and testing
///
/// Users are keyed by id; email lookups scan the map.
pub struct InMemoryUserRepository {
    users: Mutex<HashMap<i64, UserModel>>,
}

impl Default for InMemoryUserRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryUserRepository {
    /// Creates a new empty in-memory repository
    pub fn new() -> Self {
        Self {
            users: Mutex::new(HashMap::new()),
        }
    }

    /// Creates an in-memory repository with pre-populated users
    pub fn with_users(users: Vec<UserModel>) -> Self {
        let user_map = users.into_iter().map(|user| (user.id, user)).collect();

        Self {
            users: Mutex::new(user_map),
        }
    }

    pub fn user_count(&self) -> usize {
        self.users.lock().unwrap().len()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    #[instrument(skip(self))]
    async fn find_by_email(&self, email: &str) -> Result<Option<UserModel>, AppError> {
        debug!(email = %email, "Fetching user by email from memory");

        let users = self.users.lock().unwrap();
        let user = users.values().find(|u| u.email == email).cloned();

        match &user {
            Some(u) => debug!(user_id = u.id, "User found in memory"),
            None => debug!(email = %email, "User not found in memory"),
        }

        Ok(user)
    }

    #[instrument(skip(self))]
    async fn find_by_id(&self, id: i64) -> Result<Option<UserModel>, AppError> {
        debug!(user_id = id, "Fetching user by id from memory");

        let users = self.users.lock().unwrap();
        Ok(users.get(&id).cloned())
    }

    #[instrument(skip(self, password_hash))]
    async fn update_password(&self, id: i64, password_hash: &str) -> Result<(), AppError> {
        debug!(user_id = id, "Updating password hash in memory");

        let mut users = self.users.lock().unwrap();
        let user = users.get_mut(&id).ok_or_else(|| {
            warn!(user_id = id, "User not found for password update in memory");
            AppError::NotFound("User not found".to_string())
        })?;
        user.set_password_hash(password_hash.to_string());

        debug!(user_id = id, "Password hash updated in memory");
        Ok(())
    }
}

/// PostgreSQL implementation of user repository
///
/// Each query checks a connection out of the pool for its own duration.
pub struct PostgresUserRepository {
    pool: PgPool,
}

impl PostgresUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    #[instrument(skip(self))]
    async fn find_by_email(&self, email: &str) -> Result<Option<UserModel>, AppError> {
        debug!(email = %email, "Fetching user by email from database");

        sqlx::query_as::<_, UserModel>(
            "SELECT id, name, email, password, role, created_at, updated_at FROM users WHERE email = $1 LIMIT 1",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            warn!(error = %e, "Failed to fetch user by email from database");
            AppError::DatabaseError(e.to_string())
        })
    }

    #[instrument(skip(self))]
    async fn find_by_id(&self, id: i64) -> Result<Option<UserModel>, AppError> {
        debug!(user_id = id, "Fetching user by id from database");

        sqlx::query_as::<_, UserModel>(
            "SELECT id, name, email, password, role, created_at, updated_at FROM users WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            warn!(error = %e, user_id = id, "Failed to fetch user by id from database");
            AppError::DatabaseError(e.to_string())
        })
    }

    #[instrument(skip(self, password_hash))]
    async fn update_password(&self, id: i64, password_hash: &str) -> Result<(), AppError> {
        debug!(user_id = id, "Updating password hash in database");

        let result = sqlx::query("UPDATE users SET password = $2, updated_at = $3 WHERE id = $1")
            .bind(id)
            .bind(password_hash)
            .bind(Utc::now())
            .execute(&self.pool)
            .await
            .map_err(|e| {
                warn!(error = %e, user_id = id, "Failed to update password in database");
                AppError::DatabaseError(e.to_string())
            })?;

        if result.rows_affected() == 0 {
            warn!(user_id = id, "User not found for password update");
            return Err(AppError::NotFound("User not found".to_string()));
        }

        debug!(user_id = id, "Password hash updated in database");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_users() -> Vec<UserModel> {
        vec![
            UserModel::new(1, "Ann", "a@x.com", "hash-a", "customer"),
            UserModel::new(2, "Bob", "b@x.com", "hash-b", "admin"),
        ]
    }

    #[tokio::test]
    async fn test_find_by_email() {
        let repo = InMemoryUserRepository::with_users(create_test_users());

        let user = repo.find_by_email("b@x.com").await.unwrap().unwrap();
        assert_eq!(user.id, 2);
        assert_eq!(user.role, "admin");
    }

    #[tokio::test]
    async fn test_find_by_email_is_exact_match() {
        let repo = InMemoryUserRepository::with_users(create_test_users());

        assert!(repo.find_by_email("A@X.COM").await.unwrap().is_none());
        assert!(repo.find_by_email("a@x.co").await.unwrap().is_none());
        assert!(repo.find_by_email("").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_find_by_id() {
        let repo = InMemoryUserRepository::with_users(create_test_users());

        assert_eq!(repo.find_by_id(1).await.unwrap().unwrap().email, "a@x.com");
        assert!(repo.find_by_id(99).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_update_password() {
        let repo = InMemoryUserRepository::with_users(create_test_users());

        repo.update_password(1, "new-hash").await.unwrap();

        let user = repo.find_by_id(1).await.unwrap().unwrap();
        assert_eq!(user.password, "new-hash");
    }

    #[tokio::test]
    async fn test_update_password_nonexistent_user() {
        let repo = InMemoryUserRepository::new();

        let result = repo.update_password(42, "hash").await;
        assert!(matches!(result, Err(AppError::NotFound(_))));
        assert_eq!(repo.user_count(), 0);
    }
}
