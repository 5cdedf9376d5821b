//! Catalog API module

mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/catalogs", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list))
        .route(
            "/{slug}",
            get(handler::get_by_slug)
                .put(handler::replace)
                .delete(handler::delete),
        )
        .route("/{slug}/priced", get(handler::priced))
}
