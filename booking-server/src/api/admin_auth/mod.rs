//! Admin Authentication Routes
//!
//! 与访客登录平行的独立入口，共享请求形状但查询 admin 表。

mod handler;

use axum::{Router, routing::post};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/api/admin/auth/login", post(handler::login))
        .route("/api/admin/auth/logout", post(handler::logout))
        .route(
            "/api/admin/auth/forgot-password",
            post(handler::forgot_password),
        )
        .route(
            "/api/admin/auth/reset-password",
            post(handler::reset_password),
        )
}
