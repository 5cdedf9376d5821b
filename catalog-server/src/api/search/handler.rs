//! Search API Handler

use axum::{
    Json,
    extract::{Query, State},
};
use serde::Deserialize;

use shared::search::SearchResponse;

use crate::core::ServerState;
use crate::search::{Query as SearchQuery, search_catalog};
use crate::utils::validation::validate_slug;
use crate::utils::{AppError, AppResult};

/// Search query parameters
#[derive(Debug, Deserialize)]
pub struct SearchParams {
    /// Query string (case-insensitive substring)
    pub q: String,
    /// Restrict to one manufacturer
    pub manufacturer: Option<String>,
}

/// GET /api/search?q=... - search product names across catalogs
pub async fn search(
    State(state): State<ServerState>,
    Query(params): Query<SearchParams>,
) -> AppResult<Json<SearchResponse>> {
    let query = SearchQuery::new(&params.q);
    if query.is_empty() {
        return Err(AppError::validation("Query must not be empty"));
    }

    let slugs = match &params.manufacturer {
        Some(slug) => {
            validate_slug(slug)?;
            vec![slug.clone()]
        }
        None => state.catalogs.list().await?,
    };

    let mut hits = Vec::new();
    for slug in &slugs {
        // A manufacturer filter pointing at a missing catalog is a 404;
        // a file disappearing mid-scan is not.
        match state.catalogs.load(slug).await {
            Ok(catalog) => search_catalog(slug, &catalog, &query, &mut hits),
            Err(e) if params.manufacturer.is_some() => return Err(e),
            Err(e) => {
                tracing::warn!(manufacturer = %slug, error = %e, "Skipping catalog during search")
            }
        }
    }

    Ok(Json(SearchResponse {
        query: params.q,
        hits,
    }))
}
