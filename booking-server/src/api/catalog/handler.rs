//! Public Catalog Handlers

use axum::{
    Json,
    extract::{Path, State},
};

use crate::core::ServerState;
use crate::db::repository::{event_type, menu, package, shift, venue};
use crate::utils::{AppError, AppResult};
use shared::models::{EventType, Menu, Package, Shift, Venue};

/// GET /api/catalog/venues - 启用的场地
pub async fn venues(State(state): State<ServerState>) -> AppResult<Json<Vec<Venue>>> {
    Ok(Json(venue::find_active(&state.pool).await?))
}

/// GET /api/catalog/shifts - 启用的班次
pub async fn shifts(State(state): State<ServerState>) -> AppResult<Json<Vec<Shift>>> {
    Ok(Json(shift::find_active(&state.pool).await?))
}

/// GET /api/catalog/events - 启用的活动类型
pub async fn events(State(state): State<ServerState>) -> AppResult<Json<Vec<EventType>>> {
    Ok(Json(event_type::find_active(&state.pool).await?))
}

/// GET /api/catalog/packages - 启用的套餐
pub async fn packages(State(state): State<ServerState>) -> AppResult<Json<Vec<Package>>> {
    Ok(Json(package::find_active(&state.pool).await?))
}

/// GET /api/catalog/packages/:id/menus - 套餐下的菜单
pub async fn package_menus(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Vec<Menu>>> {
    let pkg = package::find_by_id(&state.pool, id)
        .await?
        .filter(|p| p.is_active)
        .ok_or_else(|| AppError::not_found(format!("Package {} not found", id)))?;

    Ok(Json(menu::find_by_package(&state.pool, pkg.id).await?))
}
