//! Search API module

mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;

/// Search routes - public (feeds the live search box)
pub fn router() -> Router<ServerState> {
    Router::new().route("/api/search", get(handler::search))
}
