// Library crate for the laundry backend auth service
// This file exposes the public API for the binary and integration tests

pub mod auth;
pub mod config;
pub mod routes;
pub mod shared;
pub mod user;

// Re-export commonly used types for easier access in tests
pub use auth::token::TokenConfig;
pub use config::AppConfig;
pub use routes::build_router;
pub use shared::{ApiResponse, AppError, AppState};
pub use user::{InMemoryUserRepository, PostgresUserRepository, UserModel, UserRepository};
