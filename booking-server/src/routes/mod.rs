use axum::Router;
use http::{HeaderName, HeaderValue};
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use tower_http::request_id::{
    MakeRequestId, PropagateRequestIdLayer, RequestId, SetRequestIdLayer,
};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use uuid::Uuid;

use crate::api;
use crate::auth::require_auth;
use crate::core::ServerState;

/// Custom request ID generator
#[derive(Clone)]
struct XRequestId;

impl MakeRequestId for XRequestId {
    fn make_request_id<B>(&mut self, _request: &http::Request<B>) -> Option<RequestId> {
        let id = Uuid::new_v4().to_string();
        HeaderValue::from_str(&id).ok().map(RequestId::new)
    }
}

/// Build a router with all routes registered (no middleware, no state)
pub fn build_router() -> Router<ServerState> {
    Router::new()
        // Public routes
        .merge(api::health::router())
        .merge(api::auth::router())
        .merge(api::admin_auth::router())
        .merge(api::catalog::router())
        // Authenticated user routes
        .merge(api::bookings::router())
        .merge(api::otp::router())
        .merge(api::users::router())
        // Admin routes
        .merge(api::venues::router())
        .merge(api::shifts::router())
        .merge(api::events::router())
        .merge(api::packages::router())
        .merge(api::upload::router())
}

/// Build a fully configured application with all middleware and state
pub fn build_app(state: ServerState) -> Router {
    let uploads = ServeDir::new(state.config.uploads_dir());

    build_router()
        .nest_service("/uploads", uploads)
        // ========== Tower HTTP Middleware ==========
        // CORS - Handle cross-origin requests
        .layer(CorsLayer::permissive())
        // Compression - Gzip compress responses
        .layer(CompressionLayer::new())
        // Trace - Request tracing (logs at INFO level)
        .layer(TraceLayer::new_for_http())
        // Request ID - Generate unique ID for each request
        .layer(SetRequestIdLayer::new(
            HeaderName::from_static("x-request-id"),
            XRequestId,
        ))
        // Propagate request ID to response
        .layer(PropagateRequestIdLayer::new(HeaderName::from_static(
            "x-request-id",
        )))
        // Session authentication - injects CurrentUser for protected routes
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            require_auth,
        ))
        .with_state(state)
}
