//! Authentication
//!
//! JWT auth for the admin surface:
//! - [`JwtService`] - token generation and validation
//! - [`AdminCredentials`] - env-configured admin login (argon2)
//! - [`require_auth`] - middleware gating mutating `/api/` requests

pub mod credentials;
pub mod jwt;
pub mod middleware;

pub use credentials::AdminCredentials;
pub use jwt::{Claims, JwtConfig, JwtError, JwtService};
pub use middleware::require_auth;

/// Authenticated admin, injected into request extensions by the middleware
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub username: String,
}
