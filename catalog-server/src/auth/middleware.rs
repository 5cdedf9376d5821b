//! Authentication middleware
//!
//! Axum middleware gating the admin surface with JWT.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

use crate::auth::{CurrentUser, JwtService};
use crate::core::ServerState;
use crate::utils::AppError;

/// Require a valid admin token for mutating API requests.
///
/// The public render surface is read-only, so the gate is method-based:
///
/// - `GET` / `HEAD` / `OPTIONS` requests pass through, except under
///   `/api/scheduled-changes` - pending changes reveal unpublished price
///   lists, so that whole resource is admin-only
/// - non-`/api/` paths pass through (they 404 normally)
/// - `POST /api/auth/login` passes through
/// - everything else under `/api/` needs `Authorization: Bearer <token>`
///
/// Verified claims are injected as a [`CurrentUser`] request extension.
pub async fn require_auth(
    State(state): State<ServerState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let path = req.uri().path();
    let method = req.method();

    let admin_only = path.starts_with("/api/scheduled-changes");

    if !admin_only
        && (method == http::Method::GET
            || method == http::Method::HEAD
            || method == http::Method::OPTIONS)
    {
        return Ok(next.run(req).await);
    }

    if !path.starts_with("/api/") || path == "/api/auth/login" {
        return Ok(next.run(req).await);
    }

    let token = req
        .headers()
        .get(http::header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(JwtService::extract_from_header)
        .ok_or(AppError::Unauthorized)?;

    match state.jwt_service().validate_token(token) {
        Ok(claims) => {
            req.extensions_mut().insert(CurrentUser {
                username: claims.username,
            });
            Ok(next.run(req).await)
        }
        Err(crate::auth::JwtError::ExpiredToken) => Err(AppError::TokenExpired),
        Err(e) => {
            tracing::warn!(target: "security", error = %e, path = %path, "Rejected admin request");
            Err(AppError::InvalidToken)
        }
    }
}
