//! Admin Authentication Handlers

use std::time::Duration;

use axum::Json;
use axum::extract::State;
use axum::http::header::SET_COOKIE;
use axum::response::{AppendHeaders, IntoResponse};

use crate::auth::{hash_password, verify_password};
use crate::core::ServerState;
use crate::db::repository::admin;
use crate::mailer::templates;
use crate::security_log;
use crate::utils::{AppError, AppResponse, AppResult, ok_with_message, validation};
use shared::models::{AdminLoginResponse, ForgotPasswordRequest, LoginRequest, ResetPasswordRequest};

const AUTH_FIXED_DELAY_MS: u64 = 500;
const RESET_TTL_MILLIS: i64 = 60 * 60 * 1000;

/// POST /api/admin/auth/login - 管理员登录
pub async fn login(
    State(state): State<ServerState>,
    Json(req): Json<LoginRequest>,
) -> AppResult<impl IntoResponse> {
    let found = admin::find_by_email(&state.pool, &req.email.trim().to_lowercase()).await?;

    tokio::time::sleep(Duration::from_millis(AUTH_FIXED_DELAY_MS)).await;

    let account = match found {
        Some(a) => a,
        None => {
            security_log!("WARN", "admin_login_failed", reason = "admin_not_found");
            return Err(AppError::invalid_credentials());
        }
    };

    if !verify_password(&req.password, &account.password_hash)? {
        security_log!("WARN", "admin_login_failed", admin_id = account.id);
        return Err(AppError::invalid_credentials());
    }

    let token = state
        .jwt_service
        .generate_token(account.id, &account.name, &account.email, "admin")
        .map_err(|e| AppError::internal(format!("Token generation failed: {e}")))?;
    let cookie = state.jwt_service.session_cookie(&token);

    security_log!("INFO", "admin_login", admin_id = account.id);
    Ok((
        AppendHeaders([(SET_COOKIE, cookie)]),
        Json(AdminLoginResponse {
            token,
            admin: account.into(),
        }),
    ))
}

/// POST /api/admin/auth/logout - 清除会话 cookie
pub async fn logout(State(state): State<ServerState>) -> impl IntoResponse {
    let cookie = state.jwt_service.clear_session_cookie();
    (
        AppendHeaders([(SET_COOKIE, cookie)]),
        ok_with_message((), "Logged out"),
    )
}

/// POST /api/admin/auth/forgot-password - 发送重置链接
pub async fn forgot_password(
    State(state): State<ServerState>,
    Json(req): Json<ForgotPasswordRequest>,
) -> AppResult<Json<AppResponse<()>>> {
    let token = uuid::Uuid::new_v4().simple().to_string();
    let expires_at = shared::util::now_millis() + RESET_TTL_MILLIS;

    if let Some(account) =
        admin::set_reset_token(&state.pool, &req.email.trim().to_lowercase(), &token, expires_at)
            .await?
    {
        let email =
            templates::password_reset_email(&account.email, &state.config.app_base_url, &token, true);
        let mailer = state.mailer.clone();
        tokio::spawn(async move {
            if let Err(e) = mailer.send(email).await {
                tracing::error!(error = %e, "Failed to send admin reset email");
            }
        });
    }

    Ok(ok_with_message(
        (),
        "If that email is registered, a reset link has been sent",
    ))
}

/// POST /api/admin/auth/reset-password - 消费重置令牌并更新密码
pub async fn reset_password(
    State(state): State<ServerState>,
    Json(req): Json<ResetPasswordRequest>,
) -> AppResult<Json<AppResponse<()>>> {
    validation::validate_password(&req.password)?;

    let password_hash = hash_password(&req.password)?;
    let account = admin::reset_password(&state.pool, &req.token, &password_hash).await?;

    security_log!("INFO", "admin_password_reset", admin_id = account.id);
    Ok(ok_with_message((), "Password updated, please log in"))
}
