//! Catalog API Handlers
//!
//! CRUD over the per-manufacturer JSON documents plus the priced render
//! view. Reads are public (they feed the public pages); writes go through
//! the admin gate.

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;

use shared::catalog::Catalog;
use shared::pricing::PricedCatalog;

use crate::core::ServerState;
use crate::pricing::price_catalog;
use crate::utils::validation::validate_slug;
use crate::utils::{AppError, AppResult};

/// GET /api/catalogs - list manufacturer slugs
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<String>>> {
    let slugs = state.catalogs.list().await?;
    Ok(Json(slugs))
}

/// GET /api/catalogs/{slug} - raw catalog document
pub async fn get_by_slug(
    State(state): State<ServerState>,
    Path(slug): Path<String>,
) -> AppResult<Json<Catalog>> {
    validate_slug(&slug)?;
    let catalog = state.catalogs.load(&slug).await?;
    Ok(Json((*catalog).clone()))
}

/// PUT /api/catalogs/{slug} - replace a catalog document
///
/// The body must parse as one of the known shapes; document invariants
/// (matrix dimensions, discount and factor ranges) are checked before the
/// old file is touched.
pub async fn replace(
    State(state): State<ServerState>,
    Path(slug): Path<String>,
    Json(catalog): Json<Catalog>,
) -> AppResult<Json<Catalog>> {
    validate_slug(&slug)?;
    catalog
        .validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    state.catalogs.save(&slug, catalog.clone()).await?;

    tracing::info!(
        manufacturer = %slug,
        products = catalog.product_count(),
        "Catalog replaced"
    );

    Ok(Json(catalog))
}

/// DELETE /api/catalogs/{slug} - remove a catalog
pub async fn delete(
    State(state): State<ServerState>,
    Path(slug): Path<String>,
) -> AppResult<Json<bool>> {
    validate_slug(&slug)?;
    state.catalogs.delete(&slug).await?;
    Ok(Json(true))
}

/// Query parameters of the priced view
#[derive(Debug, Deserialize)]
pub struct PricedParams {
    /// Simulation factor; overrides every configured multiplier
    pub factor: Option<f64>,
}

/// GET /api/catalogs/{slug}/priced - computed price view
///
/// `?factor=F` activates the simulation factor used by the price-change
/// preview in the editors.
pub async fn priced(
    State(state): State<ServerState>,
    Path(slug): Path<String>,
    Query(params): Query<PricedParams>,
) -> AppResult<Json<PricedCatalog>> {
    validate_slug(&slug)?;

    if let Some(factor) = params.factor
        && (!factor.is_finite() || factor <= 0.0)
    {
        return Err(AppError::validation(format!(
            "Simulation factor {factor} must be a positive number"
        )));
    }

    let catalog = state.catalogs.load(&slug).await?;
    Ok(Json(price_catalog(&slug, &catalog, params.factor)))
}
