//! Guest Authentication Handlers
//!
//! Signup with email verification, cookie-based login, and the
//! forgot/reset password round trip.

use std::time::Duration;

use axum::extract::{Query, State};
use axum::http::header::SET_COOKIE;
use axum::response::{AppendHeaders, IntoResponse};
use axum::Json;
use serde::Deserialize;

use crate::auth::{hash_password, verify_password};
use crate::core::ServerState;
use crate::db::repository::user;
use crate::mailer::templates;
use crate::security_log;
use crate::utils::{AppError, AppResponse, AppResult, ok_with_message, validation};
use shared::models::{LoginRequest, LoginResponse, SignupRequest, UserPublic};
use shared::models::{ForgotPasswordRequest, ResetPasswordRequest};

/// Fixed delay for authentication to prevent timing attacks
const AUTH_FIXED_DELAY_MS: u64 = 500;

/// Verification links stay valid for 24 hours
const VERIFICATION_TTL_MILLIS: i64 = 24 * 60 * 60 * 1000;

/// Reset links stay valid for 1 hour
const RESET_TTL_MILLIS: i64 = 60 * 60 * 1000;

fn random_token() -> String {
    uuid::Uuid::new_v4().simple().to_string()
}

/// POST /api/auth/signup - 注册并发送验证邮件
pub async fn signup(
    State(state): State<ServerState>,
    Json(req): Json<SignupRequest>,
) -> AppResult<Json<UserPublic>> {
    validation::validate_required_text(&req.name, "name", validation::MAX_NAME_LEN)?;
    validation::validate_email(&req.email)?;
    validation::validate_password(&req.password)?;

    let password_hash = hash_password(&req.password)?;
    let token = random_token();
    let created = user::create(
        &state.pool,
        user::NewUser {
            name: req.name.trim().to_string(),
            email: req.email.trim().to_lowercase(),
            password_hash,
            phone: req.phone,
            verification_token: token.clone(),
            verification_expires_at: shared::util::now_millis() + VERIFICATION_TTL_MILLIS,
        },
    )
    .await?;

    let email = templates::verification_email(&created.email, &state.config.app_base_url, &token);
    let mailer = state.mailer.clone();
    tokio::spawn(async move {
        if let Err(e) = mailer.send(email).await {
            tracing::error!(error = %e, "Failed to send verification email");
        }
    });

    tracing::info!(user_id = created.id, "User signed up");
    Ok(Json(created.into()))
}

/// POST /api/auth/login - 登录，签发会话 cookie
pub async fn login(
    State(state): State<ServerState>,
    Json(req): Json<LoginRequest>,
) -> AppResult<impl IntoResponse> {
    let found = user::find_by_email(&state.pool, &req.email.trim().to_lowercase()).await?;

    // Fixed delay to prevent timing attacks (before checking result)
    tokio::time::sleep(Duration::from_millis(AUTH_FIXED_DELAY_MS)).await;

    // Unified error message to prevent email enumeration
    let account = match found {
        Some(u) => u,
        None => {
            security_log!("WARN", "login_failed", reason = "user_not_found");
            return Err(AppError::invalid_credentials());
        }
    };

    if !verify_password(&req.password, &account.password_hash)? {
        security_log!("WARN", "login_failed", user_id = account.id);
        return Err(AppError::invalid_credentials());
    }

    let token = state
        .jwt_service
        .generate_token(account.id, &account.name, &account.email, "user")
        .map_err(|e| AppError::internal(format!("Token generation failed: {e}")))?;
    let cookie = state.jwt_service.session_cookie(&token);

    tracing::info!(user_id = account.id, "User logged in");
    Ok((
        AppendHeaders([(SET_COOKIE, cookie)]),
        Json(LoginResponse {
            token,
            user: account.into(),
        }),
    ))
}

/// POST /api/auth/logout - 清除会话 cookie
pub async fn logout(State(state): State<ServerState>) -> impl IntoResponse {
    let cookie = state.jwt_service.clear_session_cookie();
    (
        AppendHeaders([(SET_COOKIE, cookie)]),
        ok_with_message((), "Logged out"),
    )
}

#[derive(Debug, Deserialize)]
pub struct VerifyEmailQuery {
    pub token: String,
}

/// GET /api/auth/verify-email?token= - 消费验证令牌
pub async fn verify_email(
    State(state): State<ServerState>,
    Query(query): Query<VerifyEmailQuery>,
) -> AppResult<Json<UserPublic>> {
    let verified = user::verify_email(&state.pool, &query.token).await?;
    tracing::info!(user_id = verified.id, "Email verified");
    Ok(Json(verified.into()))
}

/// POST /api/auth/forgot-password - 发送重置链接
///
/// 无论邮箱是否存在都返回同样的响应，避免账号枚举。
pub async fn forgot_password(
    State(state): State<ServerState>,
    Json(req): Json<ForgotPasswordRequest>,
) -> AppResult<Json<AppResponse<()>>> {
    let token = random_token();
    let expires_at = shared::util::now_millis() + RESET_TTL_MILLIS;

    if let Some(account) =
        user::set_reset_token(&state.pool, &req.email.trim().to_lowercase(), &token, expires_at)
            .await?
    {
        let email =
            templates::password_reset_email(&account.email, &state.config.app_base_url, &token, false);
        let mailer = state.mailer.clone();
        tokio::spawn(async move {
            if let Err(e) = mailer.send(email).await {
                tracing::error!(error = %e, "Failed to send password reset email");
            }
        });
    }

    Ok(ok_with_message(
        (),
        "If that email is registered, a reset link has been sent",
    ))
}

/// POST /api/auth/reset-password - 消费重置令牌并更新密码
pub async fn reset_password(
    State(state): State<ServerState>,
    Json(req): Json<ResetPasswordRequest>,
) -> AppResult<Json<AppResponse<()>>> {
    validation::validate_password(&req.password)?;

    let password_hash = hash_password(&req.password)?;
    let account = user::reset_password(&state.pool, &req.token, &password_hash).await?;

    security_log!("INFO", "password_reset", user_id = account.id);
    Ok(ok_with_message((), "Password updated, please log in"))
}
