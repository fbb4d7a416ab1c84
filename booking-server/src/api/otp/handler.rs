//! OTP Handlers

use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::repository::user;
use crate::mailer::templates;
use crate::utils::{AppError, AppResponse, AppResult, ok_with_message};

/// POST /api/otp/send - 签发确认码并发送邮件
///
/// 重复调用会覆盖旧码，节流交给前端和邮件服务商。
pub async fn send(
    State(state): State<ServerState>,
    current_user: CurrentUser,
) -> AppResult<Json<AppResponse<()>>> {
    let account = user::find_by_id(&state.pool, current_user.id)
        .await?
        .ok_or_else(|| AppError::not_found("Account not found"))?;

    let code = state.otp.issue(account.id);
    let email = templates::otp_email(&account.email, &code, state.config.otp_ttl_minutes);

    // 确认码邮件同步发送：发不出去时用户需要立刻知道
    state.mailer.send(email).await?;

    tracing::info!(user_id = account.id, "OTP issued");
    Ok(ok_with_message((), "Confirmation code sent"))
}

#[derive(Debug, Deserialize)]
pub struct VerifyRequest {
    pub code: String,
}

#[derive(Debug, Serialize)]
pub struct VerifyResponse {
    pub valid: bool,
}

/// POST /api/otp/verify - 校验确认码 (不消费)
///
/// 向导的中间校验步骤；码留在存储里，最终提交时由预订写入消费。
pub async fn verify(
    State(state): State<ServerState>,
    current_user: CurrentUser,
    Json(req): Json<VerifyRequest>,
) -> AppResult<Json<VerifyResponse>> {
    let valid = state.otp.peek(current_user.id, &req.code);
    Ok(Json(VerifyResponse { valid }))
}
