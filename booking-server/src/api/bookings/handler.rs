//! Booking API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::{Deserialize, Serialize};

use crate::auth::CurrentUser;
use crate::booking::writer::{WriterContext, create_booking};
use crate::booking::{availability, fare};
use crate::core::ServerState;
use crate::db::repository::{booking, menu, package, user};
use crate::mailer::templates;
use crate::utils::{AppError, AppResult, time, validation};
use shared::models::{Booking, BookingCreate, BookingStatusUpdate, FareQuote, FareRequest};

#[derive(Debug, Deserialize)]
pub struct AvailabilityQuery {
    pub date: String,
    pub venue_id: Option<i64>,
    pub shift_id: Option<i64>,
}

#[derive(Debug, Serialize)]
pub struct AvailabilityResponse {
    pub available: bool,
}

/// GET /api/bookings/availability - 空位查询
///
/// 带 venue_id+shift_id 时检查具体时段，否则做日期级粗查。
pub async fn availability(
    State(state): State<ServerState>,
    Query(query): Query<AvailabilityQuery>,
) -> AppResult<Json<AvailabilityResponse>> {
    let date = time::canonical_date(&query.date)?;

    let available = match (query.venue_id, query.shift_id) {
        (Some(venue_id), Some(shift_id)) => {
            availability::slot_available(&state.pool, &date, venue_id, shift_id).await?
        }
        (None, None) => {
            availability::date_available(&state.pool, &date, state.config.max_bookings_per_date)
                .await?
        }
        _ => {
            return Err(AppError::validation(
                "venue_id and shift_id must be provided together",
            ));
        }
    };

    Ok(Json(AvailabilityResponse { available }))
}

/// POST /api/bookings/fare - 报价 (仅供展示，写入时重算)
pub async fn fare(
    State(state): State<ServerState>,
    Json(req): Json<FareRequest>,
) -> AppResult<Json<FareQuote>> {
    validation::validate_positive(req.guest_count, "guest_count")?;

    let pkg = package::find_by_id(&state.pool, req.package_id)
        .await?
        .filter(|p| p.is_active)
        .ok_or_else(|| AppError::not_found(format!("Package {} not found", req.package_id)))?;
    let menus = menu::find_by_package(&state.pool, pkg.id).await?;

    let quote = fare::calculate_fare(&pkg, &menus, req.guest_count, &req.selected_menus)?;
    Ok(Json(quote))
}

/// POST /api/bookings - 最终提交 (OTP 门控)
pub async fn create(
    State(state): State<ServerState>,
    current_user: CurrentUser,
    Json(payload): Json<BookingCreate>,
) -> AppResult<Json<Booking>> {
    let ctx = WriterContext {
        pool: &state.pool,
        otp: state.otp.as_ref(),
        default_country_code: &state.config.default_country_code,
    };
    let created = create_booking(&ctx, current_user.id, payload).await?;

    // 确认邮件不阻塞响应，投递失败只记日志
    if let Ok(Some(account)) = user::find_by_id(&state.pool, current_user.id).await {
        let email = templates::booking_confirmation_email(&account.email, &created);
        let mailer = state.mailer.clone();
        tokio::spawn(async move {
            if let Err(e) = mailer.send(email).await {
                tracing::error!(error = %e, "Failed to send booking confirmation email");
            }
        });
    }

    Ok(Json(created))
}

/// GET /api/bookings/mine - 当前用户的预订
pub async fn mine(
    State(state): State<ServerState>,
    current_user: CurrentUser,
) -> AppResult<Json<Vec<Booking>>> {
    Ok(Json(
        booking::find_by_user(&state.pool, current_user.id).await?,
    ))
}

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub limit: Option<i32>,
    pub offset: Option<i32>,
}

/// GET /api/bookings - 全部预订 (管理员)
///
/// 与 POST 共享路径，无法套用路由级管理员中间件，在此检查角色。
pub async fn list(
    State(state): State<ServerState>,
    current_user: CurrentUser,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<Vec<Booking>>> {
    if !current_user.is_admin() {
        return Err(AppError::forbidden("Administrator role required"));
    }

    let limit = query.limit.unwrap_or(100).clamp(1, 500);
    let offset = query.offset.unwrap_or(0).max(0);
    Ok(Json(booking::find_all(&state.pool, limit, offset).await?))
}

/// PUT /api/bookings/:id/status - 更新状态 (管理员)
pub async fn update_status(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<BookingStatusUpdate>,
) -> AppResult<Json<Booking>> {
    let updated = booking::update_status(&state.pool, id, payload.status).await?;
    tracing::info!(booking_id = id, status = payload.status.as_str(), "Booking status updated");
    Ok(Json(updated))
}

/// DELETE /api/bookings/:id - 删除预订 (管理员)
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<bool>> {
    Ok(Json(booking::delete(&state.pool, id).await?))
}
