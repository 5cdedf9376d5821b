//! Scheduled-Changes API Handlers
//!
//! Staged full-catalog replacements with an `apply_at` timestamp. The
//! periodic applier task picks them up once due; until then they can be
//! listed and withdrawn here. Admin-only surface.

use axum::{
    Json,
    extract::{Path, State},
};
use uuid::Uuid;

use shared::scheduled::{ScheduledChange, ScheduledChangeCreate};

use crate::core::ServerState;
use crate::utils::validation::validate_slug;
use crate::utils::{AppError, AppResult};

/// GET /api/scheduled-changes - list pending changes, soonest first
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<ScheduledChange>>> {
    let changes = state.scheduled.list().await?;
    Ok(Json(changes))
}

/// POST /api/scheduled-changes - stage a catalog replacement
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<ScheduledChangeCreate>,
) -> AppResult<Json<ScheduledChange>> {
    validate_slug(&payload.manufacturer)?;
    payload
        .catalog
        .validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    if payload.apply_at <= chrono::Utc::now() {
        return Err(AppError::validation(
            "apply_at must be in the future; use PUT /api/catalogs/{slug} for immediate changes",
        ));
    }

    let change = ScheduledChange::from_create(payload);
    state.scheduled.save(&change).await?;

    Ok(Json(change))
}

/// DELETE /api/scheduled-changes/{id} - withdraw a pending change
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<bool>> {
    state.scheduled.remove(id).await?;
    tracing::info!(%id, "Scheduled change withdrawn");
    Ok(Json(true))
}
