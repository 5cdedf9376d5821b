//! Health check handler
//!
//! # Response example
//!
//! ```json
//! {
//!   "status": "ok",
//!   "version": "0.1.0",
//!   "catalogs": 9
//! }
//! ```

use axum::{Json, extract::State};
use serde::Serialize;

use crate::core::ServerState;
use crate::utils::AppResult;

/// Health check response
#[derive(Serialize)]
pub struct HealthResponse {
    /// Status (ok | error)
    status: &'static str,
    version: &'static str,
    /// Number of stored catalogs
    catalogs: usize,
}

/// GET /api/health - liveness check
pub async fn health(State(state): State<ServerState>) -> AppResult<Json<HealthResponse>> {
    let catalogs = state.catalogs.list().await.map(|c| c.len()).unwrap_or(0);

    Ok(Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        catalogs,
    }))
}
