use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use serde_json::Value;
use std::sync::Arc;
use tower::ServiceExt; // for `oneshot`

use laundry_backend::{
    auth::password::hash_password, build_router, AppState, InMemoryUserRepository, TokenConfig,
    UserModel,
};

pub const TEST_SECRET: &str = "integration-secret";
pub const TEST_BCRYPT_COST: u32 = 4;

// ============================================================================
// Test Setup Infrastructure
// ============================================================================

pub struct TestApp {
    pub router: Router,
    pub repository: Arc<InMemoryUserRepository>,
    pub token_config: TokenConfig,
}

pub struct TestAppBuilder {
    users: Vec<(i64, String, String, String)>, // (id, email, password, role)
}

impl TestAppBuilder {
    pub fn new() -> Self {
        Self { users: vec![] }
    }

    pub fn with_user(mut self, id: i64, email: &str, password: &str, role: &str) -> Self {
        self.users.push((
            id,
            email.to_string(),
            password.to_string(),
            role.to_string(),
        ));
        self
    }

    /// Seeds the user from the login scenario: a@x.com / "secret"
    pub fn with_default_user(self) -> Self {
        self.with_user(1, "a@x.com", "secret", "customer")
    }

    pub fn build(self) -> TestApp {
        let users = self
            .users
            .into_iter()
            .map(|(id, email, password, role)| {
                let hash = hash_password(&password, TEST_BCRYPT_COST).unwrap();
                UserModel::new(id, format!("user-{}", id), email, hash, role)
            })
            .collect();

        let repository = Arc::new(InMemoryUserRepository::with_users(users));
        let token_config = TokenConfig::new(TEST_SECRET, 1);
        let state = AppState::new(repository.clone(), token_config.clone(), TEST_BCRYPT_COST);

        TestApp {
            router: build_router(state),
            repository,
            token_config,
        }
    }
}

impl TestApp {
    /// Sends a POST with the raw body and optional bearer token, returning status and JSON body
    pub async fn post(&self, uri: &str, body: &str, token: Option<&str>) -> (StatusCode, Value) {
        let mut request = Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json");

        if let Some(token) = token {
            request = request.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }

        let response = self
            .router
            .clone()
            .oneshot(request.body(Body::from(body.to_string())).unwrap())
            .await
            .unwrap();

        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, json)
    }

    pub async fn login(&self, email: &str, password: &str) -> (StatusCode, Value) {
        let body = serde_json::json!({ "email": email, "password": password }).to_string();
        self.post("/api/auth/login", &body, None).await
    }

    /// Logs in and returns the token, panicking if login fails
    pub async fn token_for(&self, email: &str, password: &str) -> String {
        let (status, json) = self.login(email, password).await;
        assert_eq!(status, StatusCode::OK, "login should succeed: {}", json);
        json["data"].as_str().unwrap().to_string()
    }
}
