//! Upload Routes
//!
//! Image and PDF uploads for the editors, plus the public serve endpoints
//! the rendered pages link to.

mod handler;

use axum::{
    Router,
    body::Bytes,
    extract::{Path, State},
    response::IntoResponse,
    routing::{get, post},
};
use http::header;

use crate::core::ServerState;
use crate::utils::validation::validate_filename;

/// Serve-file response
enum UploadFileResponse {
    Ok { content: Bytes, content_type: String },
    NotFound,
    BadRequest(&'static str),
}

impl IntoResponse for UploadFileResponse {
    fn into_response(self) -> axum::response::Response {
        match self {
            UploadFileResponse::Ok {
                content,
                content_type,
            } => (
                http::StatusCode::OK,
                [(header::CONTENT_TYPE, content_type)],
                content,
            )
                .into_response(),
            UploadFileResponse::NotFound => {
                (http::StatusCode::NOT_FOUND, "File not found").into_response()
            }
            UploadFileResponse::BadRequest(msg) => {
                (http::StatusCode::BAD_REQUEST, msg).into_response()
            }
        }
    }
}

/// Serve an uploaded file from `dir`, refusing traversal attempts.
async fn serve_file(dir: std::path::PathBuf, filename: &str) -> UploadFileResponse {
    if validate_filename(filename).is_err() {
        return UploadFileResponse::BadRequest("Invalid filename");
    }

    let content_type = mime_guess::from_path(filename)
        .first_or_octet_stream()
        .to_string();

    match tokio::fs::read(dir.join(filename)).await {
        Ok(content) => UploadFileResponse::Ok {
            content: content.into(),
            content_type,
        },
        Err(e) => {
            tracing::debug!(%filename, error = %e, "Uploaded file not found");
            UploadFileResponse::NotFound
        }
    }
}

/// Serve uploaded image (always stored as JPEG)
async fn serve_image(
    State(state): State<ServerState>,
    Path(filename): Path<String>,
) -> UploadFileResponse {
    serve_file(state.config.images_dir(), &filename).await
}

/// Serve uploaded PDF
async fn serve_pdf(
    State(state): State<ServerState>,
    Path(filename): Path<String>,
) -> UploadFileResponse {
    serve_file(state.config.pdf_dir(), &filename).await
}

/// Build upload router
pub fn router() -> Router<ServerState> {
    Router::new()
        // Upload APIs - admin gate applies (non-GET under /api/)
        .route("/api/image/upload", post(handler::upload_image))
        .route("/api/pdf/upload", post(handler::upload_pdf))
        .route("/api/pdf/{filename}", axum::routing::delete(handler::delete_pdf))
        // Serve endpoints - public access
        .route("/api/image/{filename}", get(serve_image))
        .route("/api/pdf/{filename}", get(serve_pdf))
}
