//! User Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;

use crate::auth::{CurrentUser, hash_password};
use crate::core::ServerState;
use crate::db::repository::user;
use crate::utils::{AppError, AppResult, validation};
use shared::models::{UserCreate, UserPublic, UserUpdate};

/// GET /api/users/me - 当前用户资料
pub async fn me(
    State(state): State<ServerState>,
    current_user: CurrentUser,
) -> AppResult<Json<UserPublic>> {
    let account = user::find_by_id(&state.pool, current_user.id)
        .await?
        .ok_or_else(|| AppError::not_found("Account not found"))?;
    Ok(Json(account.into()))
}

/// PUT /api/users/me - 更新当前用户资料
pub async fn update_me(
    State(state): State<ServerState>,
    current_user: CurrentUser,
    Json(payload): Json<UserUpdate>,
) -> AppResult<Json<UserPublic>> {
    if let Some(name) = &payload.name {
        validation::validate_required_text(name, "name", validation::MAX_NAME_LEN)?;
    }
    validation::validate_optional_text(&payload.phone, "phone", validation::MAX_PHONE_LEN)?;

    let password_hash = match &payload.password {
        Some(password) => {
            validation::validate_password(password)?;
            Some(hash_password(password)?)
        }
        None => None,
    };

    let updated = user::update_profile(
        &state.pool,
        current_user.id,
        payload.name,
        payload.phone,
        password_hash,
    )
    .await?;
    Ok(Json(updated.into()))
}

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub limit: Option<i32>,
    pub offset: Option<i32>,
}

/// GET /api/users - 用户列表 (管理员)
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<Vec<UserPublic>>> {
    let limit = query.limit.unwrap_or(100).clamp(1, 500);
    let offset = query.offset.unwrap_or(0).max(0);

    let users = user::find_all(&state.pool, limit, offset).await?;
    Ok(Json(users.into_iter().map(UserPublic::from).collect()))
}

/// POST /api/users - 创建用户 (管理员)
///
/// 管理面板建的账号直接落库为已验证，不发验证邮件。
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<UserCreate>,
) -> AppResult<Json<UserPublic>> {
    validation::validate_required_text(&payload.name, "name", validation::MAX_NAME_LEN)?;
    validation::validate_email(&payload.email)?;
    validation::validate_password(&payload.password)?;
    validation::validate_optional_text(&payload.phone, "phone", validation::MAX_PHONE_LEN)?;

    let password_hash = hash_password(&payload.password)?;
    let created = user::create_verified(
        &state.pool,
        payload.name.trim(),
        &payload.email.trim().to_lowercase(),
        &password_hash,
        payload.phone.as_deref(),
    )
    .await?;

    tracing::info!(user_id = created.id, "User created by admin");
    Ok(Json(created.into()))
}

/// PUT /api/users/:id - 更新用户 (管理员)
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<UserUpdate>,
) -> AppResult<Json<UserPublic>> {
    if let Some(name) = &payload.name {
        validation::validate_required_text(name, "name", validation::MAX_NAME_LEN)?;
    }
    validation::validate_optional_text(&payload.phone, "phone", validation::MAX_PHONE_LEN)?;

    let password_hash = match &payload.password {
        Some(password) => {
            validation::validate_password(password)?;
            Some(hash_password(password)?)
        }
        None => None,
    };

    let updated =
        user::update_profile(&state.pool, id, payload.name, payload.phone, password_hash).await?;
    Ok(Json(updated.into()))
}

/// GET /api/users/:id - 查看用户 (管理员)
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<UserPublic>> {
    let account = user::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("User {} not found", id)))?;
    Ok(Json(account.into()))
}

/// DELETE /api/users/:id - 删除用户 (管理员)
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<bool>> {
    Ok(Json(user::delete(&state.pool, id).await?))
}
