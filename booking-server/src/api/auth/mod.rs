//! Guest Authentication Routes

mod handler;

use axum::{Router, routing::get, routing::post};

use crate::core::ServerState;

/// Build guest authentication router
///
/// 所有 `/api/auth/*` 路径在全局中间件中列为公共路由。
pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/api/auth/signup", post(handler::signup))
        .route("/api/auth/login", post(handler::login))
        .route("/api/auth/logout", post(handler::logout))
        .route("/api/auth/verify-email", get(handler::verify_email))
        .route("/api/auth/forgot-password", post(handler::forgot_password))
        .route("/api/auth/reset-password", post(handler::reset_password))
}
