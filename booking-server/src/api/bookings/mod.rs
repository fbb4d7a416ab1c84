//! Booking API 模块
//!
//! 路由分三层：空位查询公开，报价/创建/我的预订要求登录，
//! 列表/状态/删除要求管理员。

mod handler;

use axum::{Router, middleware, routing::delete, routing::get, routing::post, routing::put};

use crate::auth::require_admin;
use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    let user = Router::new()
        .route("/api/bookings/availability", get(handler::availability))
        .route("/api/bookings/fare", post(handler::fare))
        // GET 与 POST 共享路径，列表在 handler 内检查管理员角色
        .route("/api/bookings", post(handler::create).get(handler::list))
        .route("/api/bookings/mine", get(handler::mine));

    let admin = Router::new()
        .route("/api/bookings/{id}/status", put(handler::update_status))
        .route("/api/bookings/{id}", delete(handler::delete))
        .layer(middleware::from_fn(require_admin));

    user.merge(admin)
}
