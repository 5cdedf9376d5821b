//! Health check API

mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;

/// Health routes - public (no authentication)
pub fn router() -> Router<ServerState> {
    Router::new().route("/api/health", get(handler::health))
}
