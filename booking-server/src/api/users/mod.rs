//! User Profile & Admin User Routes
//!
//! `/me` 是用户自助路径；其余是管理员的完整 CRUD。

mod handler;

use axum::{Router, middleware, routing::get};

use crate::auth::require_admin;
use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    let me = Router::new().route("/api/users/me", get(handler::me).put(handler::update_me));

    let admin = Router::new()
        .route("/api/users", get(handler::list).post(handler::create))
        .route(
            "/api/users/{id}",
            get(handler::get_by_id)
                .put(handler::update)
                .delete(handler::delete),
        )
        .layer(middleware::from_fn(require_admin));

    me.merge(admin)
}
