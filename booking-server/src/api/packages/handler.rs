//! Package & Menu Admin Handlers

use axum::{
    Json,
    extract::{Path, State},
};

use crate::core::ServerState;
use crate::db::repository::{menu, package};
use crate::utils::{AppError, AppResult, validation};
use shared::models::{Menu, MenuCreate, MenuUpdate, Package, PackageCreate, PackageUpdate};

/// GET /api/packages - 获取所有套餐 (含停用)
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<Package>>> {
    Ok(Json(package::find_all(&state.pool).await?))
}

/// GET /api/packages/:id - 获取单个套餐
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Package>> {
    let p = package::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Package {} not found", id)))?;
    Ok(Json(p))
}

/// POST /api/packages - 创建套餐
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<PackageCreate>,
) -> AppResult<Json<Package>> {
    validation::validate_required_text(&payload.name, "name", validation::MAX_NAME_LEN)?;
    validation::validate_amount(payload.base_price, "base_price")?;

    let p = package::create(&state.pool, payload).await?;
    tracing::info!(package_id = p.id, "Package created");
    Ok(Json(p))
}

/// PUT /api/packages/:id - 更新套餐
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<PackageUpdate>,
) -> AppResult<Json<Package>> {
    if let Some(name) = &payload.name {
        validation::validate_required_text(name, "name", validation::MAX_NAME_LEN)?;
    }
    if let Some(base_price) = payload.base_price {
        validation::validate_amount(base_price, "base_price")?;
    }

    let p = package::update(&state.pool, id, payload).await?;
    Ok(Json(p))
}

/// DELETE /api/packages/:id - 删除套餐
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<bool>> {
    Ok(Json(package::delete(&state.pool, id).await?))
}

/// GET /api/packages/:id/menus - 套餐下的所有菜单
pub async fn list_menus(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Vec<Menu>>> {
    package::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Package {} not found", id)))?;

    Ok(Json(menu::find_by_package(&state.pool, id).await?))
}

fn validate_menu_items(
    name: Option<&str>,
    items: Option<&[shared::models::MenuItemInput]>,
    free_limit: Option<i64>,
) -> AppResult<()> {
    if let Some(name) = name {
        validation::validate_required_text(name, "name", validation::MAX_NAME_LEN)?;
    }
    if let Some(items) = items {
        for item in items {
            validation::validate_required_text(&item.name, "item name", validation::MAX_NAME_LEN)?;
            if let Some(price) = item.price {
                validation::validate_amount(price, "item price")?;
            }
        }
    }
    if let Some(free_limit) = free_limit {
        validation::validate_non_negative(free_limit, "free_limit")?;
    }
    Ok(())
}

/// POST /api/packages/:id/menus - 在套餐下创建菜单
pub async fn create_menu(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<MenuCreate>,
) -> AppResult<Json<Menu>> {
    package::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Package {} not found", id)))?;

    validate_menu_items(
        Some(&payload.name),
        Some(&payload.items),
        Some(payload.free_limit),
    )?;

    let m = menu::create(&state.pool, id, payload).await?;
    tracing::info!(menu_id = m.id, package_id = id, "Menu created");
    Ok(Json(m))
}

/// PUT /api/menus/:id - 更新菜单
///
/// 带 `id` 的条目保留原 ID，新条目由服务器分配，
/// 已有预订里的选择不会因菜单编辑而改变含义。
pub async fn update_menu(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<MenuUpdate>,
) -> AppResult<Json<Menu>> {
    validate_menu_items(
        payload.name.as_deref(),
        payload.items.as_deref(),
        payload.free_limit,
    )?;

    let m = menu::update(&state.pool, id, payload).await?;
    Ok(Json(m))
}

/// DELETE /api/menus/:id - 删除菜单
pub async fn delete_menu(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<bool>> {
    Ok(Json(menu::delete(&state.pool, id).await?))
}
