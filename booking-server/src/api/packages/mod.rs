//! Package & Menu Admin API 模块
//!
//! 菜单从属于套餐：创建走 `/api/packages/{id}/menus`，
//! 更新和删除走 `/api/menus/{id}`。

mod handler;

use axum::{Router, middleware, routing::get, routing::put};

use crate::auth::require_admin;
use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .nest("/api/packages", package_routes())
        .nest("/api/menus", menu_routes())
}

fn package_routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list).post(handler::create))
        .route(
            "/{id}",
            get(handler::get_by_id)
                .put(handler::update)
                .delete(handler::delete),
        )
        .route(
            "/{id}/menus",
            get(handler::list_menus).post(handler::create_menu),
        )
        .layer(middleware::from_fn(require_admin))
}

fn menu_routes() -> Router<ServerState> {
    Router::new()
        .route(
            "/{id}",
            put(handler::update_menu).delete(handler::delete_menu),
        )
        .layer(middleware::from_fn(require_admin))
}
