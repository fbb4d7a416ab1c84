//! Public Catalog Routes
//!
//! 向导登录前浏览的只读目录，只返回启用的行。

mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/catalog", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/venues", get(handler::venues))
        .route("/shifts", get(handler::shifts))
        .route("/events", get(handler::events))
        .route("/packages", get(handler::packages))
        .route("/packages/{id}/menus", get(handler::package_menus))
}
