//! API routing
//!
//! # Structure
//!
//! - [`health`] - liveness check
//! - [`auth`] - admin login
//! - [`catalogs`] - catalog CRUD and priced views
//! - [`search`] - live product search
//! - [`upload`] - image and PDF uploads
//! - [`scheduled_changes`] - staged catalog replacements
//!
//! Each resource contributes its own `Router`; [`build_app`] merges them and
//! applies the auth, CORS, compression and access-log layers.

use axum::{Router, middleware};
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;

use crate::auth::require_auth;
use crate::core::ServerState;

pub mod auth;
pub mod catalogs;
pub mod health;
pub mod scheduled_changes;
pub mod search;
pub mod upload;

// Re-export common types for handlers
pub use crate::utils::{AppResponse, AppResult};

/// HTTP access log middleware
async fn log_request(
    request: http::Request<axum::body::Body>,
    next: middleware::Next,
) -> http::Response<axum::body::Body> {
    let method = request.method().clone();
    let uri = request.uri().clone();

    let response = next.run(request).await;

    let status = response.status();

    tracing::info!(target: "http_access", "{} {} {}", method, uri, status);

    response
}

/// Build the Axum router with all middleware applied
pub fn build_app(state: ServerState) -> Router {
    Router::<ServerState>::new()
        .merge(auth::router())
        .merge(health::router())
        .merge(catalogs::router())
        .merge(search::router())
        .merge(upload::router())
        .merge(scheduled_changes::router())
        // Admin gate for mutating requests; read surface stays public
        .layer(middleware::from_fn_with_state(state.clone(), require_auth))
        .with_state(state)
        .layer(CorsLayer::permissive())
        .layer(CompressionLayer::new())
        .layer(middleware::from_fn(log_request))
}
