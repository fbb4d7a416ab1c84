//! Event Type Admin Handlers

use axum::{
    Json,
    extract::{Path, State},
};

use crate::core::ServerState;
use crate::db::repository::event_type;
use crate::utils::{AppError, AppResult, validation};
use shared::models::{EventType, EventTypeCreate, EventTypeUpdate};

/// GET /api/events - 获取所有活动类型 (含停用)
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<EventType>>> {
    Ok(Json(event_type::find_all(&state.pool).await?))
}

/// GET /api/events/:id - 获取单个活动类型
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<EventType>> {
    let e = event_type::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Event type {} not found", id)))?;
    Ok(Json(e))
}

/// POST /api/events - 创建活动类型
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<EventTypeCreate>,
) -> AppResult<Json<EventType>> {
    validation::validate_required_text(&payload.name, "name", validation::MAX_NAME_LEN)?;
    let e = event_type::create(&state.pool, payload).await?;
    tracing::info!(event_id = e.id, "Event type created");
    Ok(Json(e))
}

/// PUT /api/events/:id - 更新活动类型
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<EventTypeUpdate>,
) -> AppResult<Json<EventType>> {
    if let Some(name) = &payload.name {
        validation::validate_required_text(name, "name", validation::MAX_NAME_LEN)?;
    }
    let e = event_type::update(&state.pool, id, payload).await?;
    Ok(Json(e))
}

/// DELETE /api/events/:id - 删除活动类型
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<bool>> {
    Ok(Json(event_type::delete(&state.pool, id).await?))
}
