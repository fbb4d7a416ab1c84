//! OTP Routes
//!
//! 预订确认码的发送和校验，均要求登录。

mod handler;

use axum::{Router, routing::post};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/api/otp/send", post(handler::send))
        .route("/api/otp/verify", post(handler::verify))
}
