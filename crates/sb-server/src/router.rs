//! Axum router construction.

use axum::extract::DefaultBodyLimit;
use axum::http::StatusCode;
use axum::middleware;
use axum::routing::{get, post};
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::context::AppContext;
use crate::middleware::request_id::request_id_middleware;
use crate::routes;

/// Build the complete Axum router.
pub fn build_router(ctx: AppContext) -> Router {
    let body_limit = match ctx.config.server.max_upload_bytes {
        Some(limit) => DefaultBodyLimit::max(limit),
        None => DefaultBodyLimit::disable(),
    };

    let upload_routes = Router::new()
        .route("/upload", post(routes::upload::upload))
        .layer(body_limit);

    Router::new()
        .route("/", get(routes::pages::landing))
        .route("/upload-page", get(routes::pages::upload_page))
        .route("/images", get(routes::images::list))
        .route("/images/{filename}", get(routes::images::get_image))
        .route("/health", get(health_check))
        .merge(upload_routes)
        .layer(middleware::from_fn(request_id_middleware))
        .layer(TraceLayer::new_for_http())
        .with_state(ctx)
}

async fn health_check() -> StatusCode {
    StatusCode::OK
}
