//! Route Configuration
//!
//! Configures all HTTP routes of the admin service.

use axum::{
    middleware,
    response::IntoResponse,
    routing::{get, post},
    Router,
};

use super::handlers;
use crate::infrastructure::metrics;
use crate::presentation::middleware::{admin_auth_middleware, track_metrics};
use crate::startup::AppState;

/// Create the main router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .nest("/admin", admin_routes(state.clone()))
        // Health check endpoints
        .route("/health", get(handlers::health::health_check))
        .route("/health/live", get(handlers::health::liveness))
        .route("/health/ready", get(handlers::health::readiness))
        // Prometheus metrics endpoint
        .route("/metrics", get(metrics_handler))
        .route_layer(middleware::from_fn(track_metrics))
        .with_state(state)
}

/// Prometheus metrics endpoint handler
async fn metrics_handler() -> impl IntoResponse {
    let metrics = metrics::gather_metrics();
    (
        [(
            axum::http::header::CONTENT_TYPE,
            "text/plain; version=0.0.4; charset=utf-8",
        )],
        metrics,
    )
}

/// Admin routes (require an admin token)
fn admin_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .nest("/brands/{brand_id}", brand_routes())
        .route(
            "/metrics/brand-performance/snapshots",
            post(handlers::metrics::run_snapshot),
        )
        .route_layer(middleware::from_fn_with_state(state, admin_auth_middleware))
}

/// Routes scoped to one brand
fn brand_routes() -> Router<AppState> {
    use handlers::creator_script;

    Router::new()
        .route(
            "/creator-scripts",
            get(creator_script::index).post(creator_script::store),
        )
        .route("/creator-scripts/create", get(creator_script::create))
        .route(
            "/creator-scripts/{script_id}",
            axum::routing::patch(creator_script::patch).delete(creator_script::destroy),
        )
        .route("/creator-scripts/{script_id}/edit", get(creator_script::edit))
        .route(
            "/metrics/brand-performance/latest",
            get(handlers::metrics::latest_brand_performance),
        )
}
