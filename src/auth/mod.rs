// Public API - what other modules can use
pub use handlers::{change_password, login};
pub use middleware::{authorize, require_auth};
pub use types::{AuthClaims, ChangePasswordInput, LoginInput};

// Internal modules
mod handlers;
mod middleware;
pub mod password;
pub mod service;
pub mod token;
mod types;
