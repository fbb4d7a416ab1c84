//! Venue Admin Handlers

use axum::{
    Json,
    extract::{Path, State},
};

use crate::core::ServerState;
use crate::db::repository::venue;
use crate::utils::{AppError, AppResult, validation};
use shared::models::{Venue, VenueCreate, VenueUpdate};

/// GET /api/venues - 获取所有场地 (含停用)
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<Venue>>> {
    Ok(Json(venue::find_all(&state.pool).await?))
}

/// GET /api/venues/:id - 获取单个场地
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Venue>> {
    let v = venue::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Venue {} not found", id)))?;
    Ok(Json(v))
}

/// POST /api/venues - 创建场地
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<VenueCreate>,
) -> AppResult<Json<Venue>> {
    validation::validate_required_text(&payload.name, "name", validation::MAX_NAME_LEN)?;
    validation::validate_positive(payload.capacity, "capacity")?;

    let v = venue::create(&state.pool, payload).await?;
    tracing::info!(venue_id = v.id, "Venue created");
    Ok(Json(v))
}

/// PUT /api/venues/:id - 更新场地
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<VenueUpdate>,
) -> AppResult<Json<Venue>> {
    if let Some(name) = &payload.name {
        validation::validate_required_text(name, "name", validation::MAX_NAME_LEN)?;
    }
    if let Some(capacity) = payload.capacity {
        validation::validate_positive(capacity, "capacity")?;
    }

    let v = venue::update(&state.pool, id, payload).await?;
    Ok(Json(v))
}

/// DELETE /api/venues/:id - 删除场地
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<bool>> {
    Ok(Json(venue::delete(&state.pool, id).await?))
}
