//! Venue Image Upload Routes

mod handler;

use axum::{Router, extract::DefaultBodyLimit, middleware, routing::post};

use crate::auth::require_admin;
use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/api/upload/venue-image", post(handler::upload_venue_image))
        .layer(DefaultBodyLimit::max(handler::MAX_FILE_SIZE + 1024))
        .layer(middleware::from_fn(require_admin))
}
