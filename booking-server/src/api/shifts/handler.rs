//! Shift Admin Handlers

use axum::{
    Json,
    extract::{Path, State},
};

use crate::core::ServerState;
use crate::db::repository::shift;
use crate::utils::{AppError, AppResult, validation};
use shared::models::{Shift, ShiftCreate, ShiftUpdate};

/// GET /api/shifts - 获取所有班次 (含停用)
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<Shift>>> {
    Ok(Json(shift::find_all(&state.pool).await?))
}

/// GET /api/shifts/:id - 获取单个班次
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Shift>> {
    let s = shift::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Shift {} not found", id)))?;
    Ok(Json(s))
}

/// POST /api/shifts - 创建班次
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<ShiftCreate>,
) -> AppResult<Json<Shift>> {
    validation::validate_required_text(&payload.name, "name", validation::MAX_NAME_LEN)?;
    let s = shift::create(&state.pool, payload).await?;
    tracing::info!(shift_id = s.id, "Shift created");
    Ok(Json(s))
}

/// PUT /api/shifts/:id - 更新班次
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<ShiftUpdate>,
) -> AppResult<Json<Shift>> {
    if let Some(name) = &payload.name {
        validation::validate_required_text(name, "name", validation::MAX_NAME_LEN)?;
    }
    let s = shift::update(&state.pool, id, payload).await?;
    Ok(Json(s))
}

/// DELETE /api/shifts/:id - 删除班次
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<bool>> {
    Ok(Json(shift::delete(&state.pool, id).await?))
}
